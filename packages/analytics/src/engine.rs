//! Query execution over a borrowed accident collection.
//!
//! Grouping queries build a [`BTreeMap`] in a single pass, so map output is
//! always ordered by key. Rankings break count ties by ascending key.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use road_accidents_accident_models::{AccidentField, BoundingBox, ConditionCount, RoadAccident};

use crate::AnalyticsError;

/// Number of entries in the fixed weather report.
pub const TOP_THREE: usize = 3;

/// Read-only query facade over a slice of accidents.
///
/// The engine never mutates the collection, so any number of engines may
/// share one slice, including across threads.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    accidents: &'a [RoadAccident],
}

impl<'a> QueryEngine<'a> {
    /// Wraps an already loaded collection.
    #[must_use]
    pub const fn new(accidents: &'a [RoadAccident]) -> Self {
        Self { accidents }
    }

    /// The underlying collection, in load order.
    #[must_use]
    pub const fn accidents(&self) -> &'a [RoadAccident] {
        self.accidents
    }

    /// Number of accidents in the collection.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.accidents.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.accidents.is_empty()
    }

    /// Returns the first accident whose identifier equals `id`.
    ///
    /// Duplicate identifiers are not rejected at load time; the earliest
    /// record wins.
    #[must_use]
    pub fn find_by_identifier(&self, id: &str) -> Option<&'a RoadAccident> {
        let found = self.accidents.iter().find(|a| a.accident_id == id);
        log::debug!("find_by_identifier({id}): found={}", found.is_some());
        found
    }

    /// Like [`Self::find_by_identifier`], but reports absence as an error.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::NotFound`] if no accident has this identifier.
    pub fn require_by_identifier(&self, id: &str) -> Result<&'a RoadAccident, AnalyticsError> {
        self.find_by_identifier(id)
            .ok_or_else(|| AnalyticsError::NotFound { id: id.to_string() })
    }

    /// Returns every accident inside `bbox` (edges inclusive), in load order.
    ///
    /// An inverted or NaN-bounded box matches nothing.
    #[must_use]
    pub fn filter_by_bounding_box(&self, bbox: &BoundingBox) -> Vec<&'a RoadAccident> {
        if bbox.is_degenerate() {
            log::debug!("filter_by_bounding_box: degenerate box {bbox:?}, no matches");
            return Vec::new();
        }

        let matches: Vec<&'a RoadAccident> = self
            .accidents
            .iter()
            .filter(|a| bbox.contains(a.longitude, a.latitude))
            .collect();

        log::debug!(
            "filter_by_bounding_box: {} of {} accidents inside {bbox:?}",
            matches.len(),
            self.accidents.len()
        );
        matches
    }

    /// Counts accidents per distinct value of `field`.
    ///
    /// Counts always sum to [`Self::len`].
    #[must_use]
    pub fn count_by(&self, field: AccidentField) -> BTreeMap<String, u64> {
        let mut counts: BTreeMap<&'a str, u64> = BTreeMap::new();
        for accident in self.accidents {
            *counts.entry(accident.field(field)).or_insert(0) += 1;
        }

        log::debug!("count_by({field}): {} distinct values", counts.len());

        counts
            .into_iter()
            .map(|(value, count)| (value.to_string(), count))
            .collect()
    }

    /// Counts accidents per road surface condition.
    #[must_use]
    pub fn count_by_road_surface_condition(&self) -> BTreeMap<String, u64> {
        self.count_by(AccidentField::RoadSurfaceConditions)
    }

    /// Counts accidents per weather condition.
    #[must_use]
    pub fn count_by_weather_condition(&self) -> BTreeMap<String, u64> {
        self.count_by(AccidentField::WeatherConditions)
    }

    /// Ranks the values of `field` by descending count, keeping at most `k`.
    ///
    /// Equal counts are ordered by ascending value, so the result is the
    /// same on every call for the same collection.
    #[must_use]
    pub fn rank_by(&self, field: AccidentField, k: usize) -> Vec<ConditionCount> {
        if k == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<ConditionCount> = self
            .count_by(field)
            .into_iter()
            .map(|(condition, count)| ConditionCount { condition, count })
            .collect();

        // BTreeMap iteration is already key-ascending; the explicit
        // secondary key keeps the rule independent of that.
        ranked.sort_by(|a, b| {
            Reverse(a.count)
                .cmp(&Reverse(b.count))
                .then_with(|| a.condition.cmp(&b.condition))
        });
        ranked.truncate(k);
        ranked
    }

    /// Returns up to `k` values of `field`, most frequent first.
    #[must_use]
    pub fn top_values(&self, field: AccidentField, k: usize) -> Vec<String> {
        self.rank_by(field, k)
            .into_iter()
            .map(|c| c.condition)
            .collect()
    }

    /// Returns up to `k` weather conditions, most frequent first.
    #[must_use]
    pub fn top_weather_conditions(&self, k: usize) -> Vec<String> {
        self.top_values(AccidentField::WeatherConditions, k)
    }

    /// Signed entry point for callers that take `k` from untrusted input.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidArgument`] if `k` is negative.
    pub fn try_top_weather_conditions(&self, k: i64) -> Result<Vec<String>, AnalyticsError> {
        Ok(self.top_weather_conditions(checked_k(k)?))
    }

    /// The three weather conditions with the most accidents.
    #[must_use]
    pub fn top_three_weather_conditions(&self) -> Vec<String> {
        self.top_weather_conditions(TOP_THREE)
    }

    /// Returns up to `k` weather conditions with their counts.
    #[must_use]
    pub fn top_weather_condition_counts(&self, k: usize) -> Vec<ConditionCount> {
        self.rank_by(AccidentField::WeatherConditions, k)
    }

    /// Groups accident identifiers by the value of `field`.
    ///
    /// Within each group identifiers keep their load order.
    #[must_use]
    pub fn group_identifiers_by(&self, field: AccidentField) -> BTreeMap<String, Vec<String>> {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for accident in self.accidents {
            let key = accident.field(field);
            if let Some(ids) = groups.get_mut(key) {
                ids.push(accident.accident_id.clone());
            } else {
                groups.insert(key.to_string(), vec![accident.accident_id.clone()]);
            }
        }

        log::debug!("group_identifiers_by({field}): {} groups", groups.len());
        groups
    }

    /// Groups accident identifiers by district authority.
    #[must_use]
    pub fn group_identifiers_by_authority(&self) -> BTreeMap<String, Vec<String>> {
        self.group_identifiers_by(AccidentField::DistrictAuthority)
    }
}

/// Converts a signed ranking size into `usize`, rejecting negatives.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidArgument`] if `k` is negative.
pub fn checked_k(k: i64) -> Result<usize, AnalyticsError> {
    usize::try_from(k).map_err(|_| AnalyticsError::InvalidArgument {
        message: format!("k must be >= 0, got {k}"),
    })
}
