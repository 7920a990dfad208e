//! CSV accident loader.
//!
//! Reads a CSV extract (optionally gzip-compressed) described by a
//! [`DatasetDefinition`] and returns every usable row as a
//! [`RoadAccident`], preserving file order. Rows without an identifier or
//! with unusable coordinates are skipped and counted.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use road_accidents_accident_models::{AccidentField, RoadAccident};

use crate::dataset::DatasetDefinition;
use crate::label_mapping::map_label;
use crate::parsing::{parse_latitude, parse_longitude};
use crate::progress::ProgressCallback;
use crate::SourceError;

/// Rows between progress updates.
const PROGRESS_BATCH: u64 = 10_000;

/// Skipped rows logged individually before switching to the summary only.
const MAX_LOGGED_SKIPS: u64 = 5;

/// Options for a single load.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Stop after this many accidents have been kept.
    pub limit: Option<u64>,
}

/// The result of a load.
#[derive(Debug, Clone, Default)]
pub struct LoadedDataset {
    /// Accidents in file order.
    pub accidents: Vec<RoadAccident>,
    /// Rows dropped for a missing identifier or bad coordinates.
    pub skipped: u64,
}

/// Header positions of each configured column.
struct ColumnIndexes {
    accident_id: usize,
    longitude: usize,
    latitude: usize,
    road_surface_conditions: usize,
    weather_conditions: usize,
    district_authority: usize,
}

impl ColumnIndexes {
    fn resolve(headers: &[String], definition: &DatasetDefinition) -> Result<Self, SourceError> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| SourceError::MissingColumn {
                    column: column.to_string(),
                })
        };
        let columns = &definition.columns;

        Ok(Self {
            accident_id: find(&columns.accident_id)?,
            longitude: find(&columns.longitude)?,
            latitude: find(&columns.latitude)?,
            road_surface_conditions: find(&columns.road_surface_conditions)?,
            weather_conditions: find(&columns.weather_conditions)?,
            district_authority: find(&columns.district_authority)?,
        })
    }

    const fn for_field(&self, field: AccidentField) -> usize {
        match field {
            AccidentField::RoadSurfaceConditions => self.road_surface_conditions,
            AccidentField::WeatherConditions => self.weather_conditions,
            AccidentField::DistrictAuthority => self.district_authority,
        }
    }
}

/// Loads accidents from a CSV file. Files ending in `.gz` are decompressed
/// on the fly.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be opened, the header lacks a
/// configured column, or the CSV is malformed.
pub fn load_accidents(
    path: &Path,
    definition: &DatasetDefinition,
    options: LoadOptions,
    progress: &dyn ProgressCallback,
) -> Result<LoadedDataset, SourceError> {
    let file = File::open(path)?;
    let is_gzipped = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));

    log::info!(
        "Loading '{}' accidents from {}{}",
        definition.id,
        path.display(),
        if is_gzipped { " (gzip)" } else { "" }
    );

    let reader: Box<dyn Read> = if is_gzipped {
        Box::new(flate2::read::GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    load_accidents_from_reader(reader, definition, options, progress)
}

/// Loads accidents from any CSV byte stream.
///
/// # Errors
///
/// Returns [`SourceError`] if the header lacks a configured column or the
/// CSV is malformed.
pub fn load_accidents_from_reader<R: Read>(
    reader: R,
    definition: &DatasetDefinition,
    options: LoadOptions,
    progress: &dyn ProgressCallback,
) -> Result<LoadedDataset, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(definition.delimiter_byte()?)
        .flexible(true)
        .from_reader(reader);

    // Spreadsheet exports often prefix the first header with a BOM.
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_owned())
        .collect();

    let indexes = ColumnIndexes::resolve(&headers, definition)?;

    progress.set_message(format!("Loading {}", definition.name));

    let mut loaded = LoadedDataset::default();
    let mut rows: u64 = 0;

    for result in reader.records() {
        if let Some(limit) = options.limit
            && loaded.accidents.len() as u64 >= limit
        {
            log::info!("Reached limit ({limit}), stopping CSV parse");
            break;
        }

        let record = result?;
        rows += 1;

        if rows % PROGRESS_BATCH == 0 {
            progress.inc(PROGRESS_BATCH);
        }

        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let accident_id = cell(indexes.accident_id);
        let coordinates = parse_longitude(cell(indexes.longitude))
            .zip(parse_latitude(cell(indexes.latitude)));

        let Some((longitude, latitude)) = coordinates.filter(|_| !accident_id.is_empty()) else {
            loaded.skipped += 1;
            if loaded.skipped <= MAX_LOGGED_SKIPS {
                let line = record.position().map_or(0, csv::Position::line);
                log::warn!(
                    "Skipping line {line}: id='{accident_id}' lon='{}' lat='{}'",
                    cell(indexes.longitude),
                    cell(indexes.latitude)
                );
            }
            continue;
        };

        let label = |field: AccidentField| {
            map_label(
                cell(indexes.for_field(field)),
                definition.labels.for_field(field),
            )
        };

        loaded.accidents.push(RoadAccident {
            accident_id: accident_id.to_string(),
            longitude,
            latitude,
            road_surface_conditions: label(AccidentField::RoadSurfaceConditions),
            weather_conditions: label(AccidentField::WeatherConditions),
            district_authority: label(AccidentField::DistrictAuthority),
        });
    }

    progress.inc(rows % PROGRESS_BATCH);

    if loaded.skipped > 0 {
        log::warn!(
            "Skipped {} of {rows} rows with a missing id or unusable coordinates",
            loaded.skipped
        );
    }
    log::info!(
        "Loaded {} accidents from '{}'",
        loaded.accidents.len(),
        definition.id
    );
    progress.finish(format!("Loaded {} accidents", loaded.accidents.len()));

    Ok(loaded)
}
