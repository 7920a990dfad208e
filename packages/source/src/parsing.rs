//! Coordinate parsing for CSV cells.

/// Parses a longitude cell. Returns `None` if empty, unparseable,
/// non-finite, or outside `[-180, 180]`.
#[must_use]
pub fn parse_longitude(s: &str) -> Option<f64> {
    parse_bounded(s, 180.0)
}

/// Parses a latitude cell. Returns `None` if empty, unparseable,
/// non-finite, or outside `[-90, 90]`.
#[must_use]
pub fn parse_latitude(s: &str) -> Option<f64> {
    parse_bounded(s, 90.0)
}

fn parse_bounded(s: &str, limit: f64) -> Option<f64> {
    let value = s.trim().parse::<f64>().ok()?;
    (value.is_finite() && value.abs() <= limit).then_some(value)
}
