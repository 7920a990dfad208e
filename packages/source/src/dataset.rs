//! Config-driven dataset definition.
//!
//! [`DatasetDefinition`] captures everything that differs between accident
//! extracts (column names, delimiter, code tables) so one loader handles
//! them all. The STATS19 definition is embedded at compile time.

use std::collections::BTreeMap;
use std::path::Path;

use road_accidents_accident_models::AccidentField;
use serde::Deserialize;

use crate::SourceError;

/// Embedded definition for the DfT STATS19 accidents table.
const STATS19_TOML: &str = include_str!("../datasets/stats19.toml");

// ── Top-level definition ─────────────────────────────────────────────────

/// A complete description of one accident CSV layout.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetDefinition {
    /// Unique identifier (e.g., `"stats19"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Single-byte field delimiter. Defaults to `,`.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Header names for each record attribute.
    pub columns: ColumnMapping,
    /// Code-to-label tables for categorical columns.
    #[serde(default)]
    pub labels: LabelTables,
}

const fn default_delimiter() -> char {
    ','
}

impl DatasetDefinition {
    /// The delimiter as the byte the CSV reader expects.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidDefinition`] if the delimiter is not a
    /// single ASCII character.
    pub fn delimiter_byte(&self) -> Result<u8, SourceError> {
        if self.delimiter.is_ascii() {
            u8::try_from(self.delimiter).map_err(|_| self.bad_delimiter())
        } else {
            Err(self.bad_delimiter())
        }
    }

    fn bad_delimiter(&self) -> SourceError {
        SourceError::InvalidDefinition {
            message: format!(
                "{}: delimiter {:?} is not a single ASCII character",
                self.id, self.delimiter
            ),
        }
    }

    fn validate(&self) -> Result<(), SourceError> {
        self.delimiter_byte()?;
        for (attribute, column) in self.columns.named() {
            if column.trim().is_empty() {
                return Err(SourceError::InvalidDefinition {
                    message: format!("{}: column for {attribute} is empty", self.id),
                });
            }
        }
        Ok(())
    }
}

// ── Columns ──────────────────────────────────────────────────────────────

/// CSV header names for each [`RoadAccident`] attribute.
///
/// [`RoadAccident`]: road_accidents_accident_models::RoadAccident
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMapping {
    /// Identifier column.
    pub accident_id: String,
    /// Longitude column.
    pub longitude: String,
    /// Latitude column.
    pub latitude: String,
    /// Road surface condition column.
    pub road_surface_conditions: String,
    /// Weather condition column.
    pub weather_conditions: String,
    /// District authority column.
    pub district_authority: String,
}

impl ColumnMapping {
    /// Pairs each attribute name with its configured column.
    #[must_use]
    pub fn named(&self) -> [(&'static str, &str); 6] {
        [
            ("accident_id", self.accident_id.as_str()),
            ("longitude", self.longitude.as_str()),
            ("latitude", self.latitude.as_str()),
            ("road_surface_conditions", self.road_surface_conditions.as_str()),
            ("weather_conditions", self.weather_conditions.as_str()),
            ("district_authority", self.district_authority.as_str()),
        ]
    }
}

// ── Labels ───────────────────────────────────────────────────────────────

/// Optional code-to-label tables, one per categorical attribute.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelTables {
    /// Road surface codes.
    #[serde(default)]
    pub road_surface_conditions: BTreeMap<String, String>,
    /// Weather codes.
    #[serde(default)]
    pub weather_conditions: BTreeMap<String, String>,
    /// District authority codes.
    #[serde(default)]
    pub district_authority: BTreeMap<String, String>,
}

impl LabelTables {
    /// The table for the given attribute (possibly empty).
    #[must_use]
    pub const fn for_field(&self, field: AccidentField) -> &BTreeMap<String, String> {
        match field {
            AccidentField::RoadSurfaceConditions => &self.road_surface_conditions,
            AccidentField::WeatherConditions => &self.weather_conditions,
            AccidentField::DistrictAuthority => &self.district_authority,
        }
    }
}

// ── Loading definitions ──────────────────────────────────────────────────

/// Parses and validates a dataset definition from TOML text.
///
/// # Errors
///
/// Returns [`SourceError::Toml`] for malformed TOML and
/// [`SourceError::InvalidDefinition`] for unusable values.
pub fn parse_dataset_toml(toml_str: &str) -> Result<DatasetDefinition, SourceError> {
    let definition: DatasetDefinition = toml::from_str(toml_str)?;
    definition.validate()?;
    Ok(definition)
}

/// Reads a dataset definition from a TOML file.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be read or parsed.
pub fn load_dataset_file(path: &Path) -> Result<DatasetDefinition, SourceError> {
    let text = std::fs::read_to_string(path)?;
    let definition = parse_dataset_toml(&text)?;
    log::info!(
        "Loaded dataset definition '{}' from {}",
        definition.id,
        path.display()
    );
    Ok(definition)
}

/// Returns the embedded STATS19 definition.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (covered by tests, since the
/// file is compiled in).
#[must_use]
pub fn default_dataset() -> DatasetDefinition {
    parse_dataset_toml(STATS19_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse embedded stats19.toml: {e}"))
}
