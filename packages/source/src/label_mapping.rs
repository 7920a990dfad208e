//! Code-to-label translation for categorical columns.
//!
//! Extracts such as STATS19 encode conditions as small integers. Unmapped
//! values pass through unchanged so labelled exports need no table.

use std::collections::BTreeMap;

/// Translates a raw cell value through `table`.
///
/// The value is trimmed first. An empty cell stays empty (the missing
/// sentinel) unless the table maps `""` explicitly.
#[must_use]
pub fn map_label(raw: &str, table: &BTreeMap<String, String>) -> String {
    let value = raw.trim();
    table
        .get(value)
        .map_or_else(|| value.to_string(), Clone::clone)
}
