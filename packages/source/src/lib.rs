#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Road accident dataset loading.
//!
//! A [`dataset::DatasetDefinition`] describes which CSV columns hold each
//! attribute and how coded values translate to labels. The loader reads a
//! (optionally gzipped) CSV file with it and hands back an ordered
//! `Vec<RoadAccident>` ready for the query engine.

pub mod csv_loader;
pub mod dataset;
pub mod label_mapping;
pub mod parsing;
pub mod progress;

pub use csv_loader::{LoadOptions, LoadedDataset, load_accidents, load_accidents_from_reader};
pub use dataset::{DatasetDefinition, default_dataset, load_dataset_file, parse_dataset_toml};

/// Errors that can occur while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Dataset definition TOML is malformed.
    #[error("Dataset definition parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Dataset definition parsed but is not usable.
    #[error("Invalid dataset definition: {message}")]
    InvalidDefinition {
        /// Description of what went wrong.
        message: String,
    },

    /// A column named by the definition is absent from the CSV header.
    #[error("CSV header has no column '{column}'")]
    MissingColumn {
        /// The configured column name.
        column: String,
    },
}
