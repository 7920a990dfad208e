//! Rendering of query results as text tables or JSON.

use std::collections::BTreeMap;

use road_accidents_accident_models::{ConditionCount, RoadAccident};
use road_accidents_analytics::AccidentSummary;
use serde::Serialize;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned plain-text tables.
    Text,
    /// Pretty-printed JSON.
    Json,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

fn display_key(key: &str) -> &str {
    if key.is_empty() { "(none)" } else { key }
}

/// Renders a list of accidents.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_accidents(
    accidents: &[&RoadAccident],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    if format == OutputFormat::Json {
        return to_json(accidents);
    }

    let mut out = format!(
        "{:<16} {:>11} {:>11}  {:<20} {:<24} AUTHORITY\n",
        "ID", "LONGITUDE", "LATITUDE", "SURFACE", "WEATHER"
    );
    out.push_str(&format!("{}\n", "-".repeat(100)));
    for a in accidents {
        out.push_str(&format!(
            "{:<16} {:>11.6} {:>11.6}  {:<20} {:<24} {}\n",
            a.accident_id,
            a.longitude,
            a.latitude,
            display_key(&a.road_surface_conditions),
            display_key(&a.weather_conditions),
            display_key(&a.district_authority)
        ));
    }
    out.push_str(&format!("{} accident(s)\n", accidents.len()));
    Ok(out)
}

/// Renders a value-to-count table.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_counts(
    heading: &str,
    counts: &BTreeMap<String, u64>,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    if format == OutputFormat::Json {
        return to_json(counts);
    }

    let mut out = format!("{heading:<32} COUNT\n{}\n", "-".repeat(40));
    for (key, count) in counts {
        out.push_str(&format!("{:<32} {count}\n", display_key(key)));
    }
    Ok(out)
}

/// Renders a ranking, one line per entry.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_ranking(
    ranked: &[ConditionCount],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    if format == OutputFormat::Json {
        return to_json(ranked);
    }

    Ok(ranked
        .iter()
        .enumerate()
        .map(|(rank, entry)| {
            format!(
                "{:>2}. {:<32} {}\n",
                rank + 1,
                display_key(&entry.condition),
                entry.count
            )
        })
        .collect())
}

/// Renders identifier groups.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_groups(
    groups: &BTreeMap<String, Vec<String>>,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    if format == OutputFormat::Json {
        return to_json(groups);
    }

    Ok(groups
        .iter()
        .map(|(authority, ids)| {
            format!(
                "{} ({})\n  {}\n",
                display_key(authority),
                ids.len(),
                ids.join(", ")
            )
        })
        .collect())
}

/// Renders the combined summary.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_summary(
    summary: &AccidentSummary,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    if format == OutputFormat::Json {
        return to_json(summary);
    }

    let mut out = format!("Total accidents: {}\n\n", summary.total);
    out.push_str(&render_counts(
        "ROAD SURFACE",
        &summary.by_road_surface,
        format,
    )?);
    out.push_str("\nTop weather conditions\n");
    out.push_str(&render_ranking(&summary.top_weather, format)?);
    out.push('\n');
    out.push_str(&render_counts("AUTHORITY", &summary.by_authority, format)?);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accident() -> RoadAccident {
        RoadAccident {
            accident_id: "A1".to_string(),
            longitude: 1.0,
            latitude: 2.5,
            road_surface_conditions: "Dry".to_string(),
            weather_conditions: String::new(),
            district_authority: "X".to_string(),
        }
    }

    #[test]
    fn text_accidents_show_missing_values() {
        let a = accident();
        let text = render_accidents(&[&a], OutputFormat::Text).unwrap();
        let row = text.lines().nth(2).unwrap();
        assert!(row.starts_with("A1"));
        assert!(row.contains("2.500000"));
        assert!(row.contains("(none)"));
        assert!(text.ends_with("1 accident(s)\n"));
    }

    #[test]
    fn json_accidents_use_camel_case() {
        let a = accident();
        let json = render_accidents(&[&a], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["accidentId"], "A1");
        assert_eq!(value[0]["roadSurfaceConditions"], "Dry");
    }

    #[test]
    fn ranking_is_numbered_from_one() {
        let ranked = vec![
            ConditionCount {
                condition: "Rain".to_string(),
                count: 2,
            },
            ConditionCount {
                condition: "Snow".to_string(),
                count: 1,
            },
        ];
        let text = render_ranking(&ranked, OutputFormat::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1. Rain"));
        assert!(lines[1].trim_end().ends_with('1'));
    }

    #[test]
    fn text_counts_list_every_key() {
        let counts: BTreeMap<String, u64> =
            [(String::new(), 1), ("Dry".to_string(), 2)].into();
        let text = render_counts("ROAD SURFACE", &counts, OutputFormat::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ROAD SURFACE"));
        assert!(lines[2].starts_with("(none)"));
        assert!(lines[3].starts_with("Dry"));
        assert!(lines[3].ends_with(" 2"));
    }

    #[test]
    fn text_groups_list_ids_under_authority() {
        let groups: BTreeMap<String, Vec<String>> =
            [("X".to_string(), vec!["A1".to_string(), "A2".to_string()])].into();
        let text = render_groups(&groups, OutputFormat::Text).unwrap();
        assert_eq!(text, "X (2)\n  A1, A2\n");
    }

    #[test]
    fn text_summary_contains_each_section() {
        let summary = AccidentSummary {
            total: 3,
            by_road_surface: [("Dry".to_string(), 3)].into(),
            top_weather: vec![ConditionCount {
                condition: "Rain".to_string(),
                count: 3,
            }],
            by_authority: [("X".to_string(), 3)].into(),
        };
        let text = render_summary(&summary, OutputFormat::Text).unwrap();
        assert!(text.starts_with("Total accidents: 3\n"));
        assert!(text.contains("ROAD SURFACE"));
        assert!(text.contains(" 1. Rain"));
        assert!(text.contains("AUTHORITY"));
    }

    #[test]
    fn json_groups_keep_identifier_order() {
        let groups: BTreeMap<String, Vec<String>> =
            [("X".to_string(), vec!["A2".to_string(), "A1".to_string()])].into();
        let json = render_groups(&groups, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["X"][0], "A2");
        assert_eq!(value["X"][1], "A1");
    }
}
