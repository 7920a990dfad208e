//! Progress reporting for dataset loads.
//!
//! CSV row counts are not known up front, so progress is a running row
//! count. Rendering is left to the caller (an `indicatif` spinner in the
//! CLI, nothing in tests).

/// Receives row-level progress while a dataset loads.
pub trait ProgressCallback: Send + Sync {
    /// Advance progress by `delta` rows.
    fn inc(&self, delta: u64);

    /// Update the message displayed alongside the progress indicator.
    fn set_message(&self, msg: String);

    /// Mark the load as complete with a final message.
    fn finish(&self, msg: String);
}

/// Ignores all progress updates.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}
