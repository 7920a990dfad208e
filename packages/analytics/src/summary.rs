//! Combined report over a whole collection.

use std::collections::BTreeMap;

use road_accidents_accident_models::{AccidentField, ConditionCount};
use serde::{Deserialize, Serialize};

use crate::QueryEngine;

/// Every aggregate the engine offers, computed in one go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccidentSummary {
    /// Number of accidents in the collection.
    pub total: u64,
    /// Accidents per road surface condition.
    pub by_road_surface: BTreeMap<String, u64>,
    /// Most frequent weather conditions with their counts.
    pub top_weather: Vec<ConditionCount>,
    /// Accidents per district authority.
    pub by_authority: BTreeMap<String, u64>,
}

impl AccidentSummary {
    /// Builds the summary, keeping at most `top_k` weather conditions.
    #[must_use]
    pub fn build(engine: &QueryEngine<'_>, top_k: usize) -> Self {
        Self {
            total: engine.len() as u64,
            by_road_surface: engine.count_by_road_surface_condition(),
            top_weather: engine.top_weather_condition_counts(top_k),
            by_authority: engine.count_by(AccidentField::DistrictAuthority),
        }
    }
}
