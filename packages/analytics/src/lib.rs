#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Analytical query engine over an in-memory collection of road accidents.
//!
//! [`QueryEngine`] borrows a loaded slice of [`RoadAccident`] records and
//! answers read-only questions about it: lookup by identifier, bounding-box
//! filtering, frequency counts, top-K rankings, and grouping of identifiers
//! by a categorical attribute. Every query is a linear scan; nothing is
//! cached between calls.
//!
//! [`RoadAccident`]: road_accidents_accident_models::RoadAccident

pub mod engine;
pub mod summary;

pub use engine::QueryEngine;
pub use summary::AccidentSummary;

use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyticsError {
    /// No accident carries the requested identifier.
    #[error("No accident found with id '{id}'")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// A query parameter is outside its valid range.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of what went wrong.
        message: String,
    },
}
