//! Per-parcel observation index
//!
//! [`ParcelObservationIndex`] maps each parcel returned by a group-observations
//! query to its observations, in the order the API returned them. It is
//! read-only once built: vocabulary queries compute their unions on demand and
//! [`ParcelObservationIndex::filter`] returns a new index holding a subset of
//! the entries.

use super::{
    measure::MeasureTypeDef, observation::Observation, predicate::MeasureFilter,
    wire::parse_group_observations,
};
use crate::error::Result;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

const DEFAULT_START_DATE: &str = "0000-01-01";
const DEFAULT_END_DATE: &str = "9999-12-31";

/// Date bounds of a group-observations fetch
///
/// Unset bounds cover the full range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObservationWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl ObservationWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// `startDate` query value
    pub fn start_param(&self) -> String {
        self.start
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| DEFAULT_START_DATE.to_string())
    }

    /// `endDate` query value
    pub fn end_param(&self) -> String {
        self.end
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| DEFAULT_END_DATE.to_string())
    }

    pub fn query_params(&self) -> Vec<(String, String)> {
        vec![
            ("startDate".to_string(), self.start_param()),
            ("endDate".to_string(), self.end_param()),
        ]
    }
}

/// Observations of a single parcel
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelObservations {
    pub parcel_id: String,
    pub observations: Vec<Observation>,
}

impl ParcelObservations {
    /// Union of the type codes measured across all observations
    pub fn measured_types(&self) -> BTreeSet<&str> {
        Observation::union_measured_types(&self.observations)
    }

    pub fn measured_type_defs(&self) -> BTreeSet<MeasureTypeDef> {
        self.observations
            .iter()
            .flat_map(|obs| obs.measures.values())
            .map(|m| m.type_def())
            .collect()
    }
}

/// Ordered mapping from parcel id to that parcel's observations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParcelObservationIndex {
    /// Server order
    entries: Vec<ParcelObservations>,
    /// Parcel id -> position in `entries`
    positions: HashMap<String, usize>,
    window: ObservationWindow,
}

impl ParcelObservationIndex {
    pub fn empty(window: ObservationWindow) -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
            window,
        }
    }

    fn from_entries(entries: Vec<ParcelObservations>, window: ObservationWindow) -> Self {
        let positions = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.parcel_id.clone(), i))
            .collect();

        Self {
            entries,
            positions,
            window,
        }
    }

    /// Parse a group-observations response body
    pub fn from_json(body: &Value, window: ObservationWindow) -> Result<Self> {
        parse_group_observations(body, window)
    }

    /// Insert or replace a parcel's observations
    ///
    /// A replaced parcel keeps its original position.
    pub(crate) fn insert(&mut self, parcel_id: String, observations: Vec<Observation>) {
        match self.positions.get(&parcel_id) {
            Some(&position) => {
                log::warn!("Duplicate parcel {} in observations, keeping the last entry", parcel_id);
                self.entries[position].observations = observations;
            }
            None => {
                self.positions.insert(parcel_id.clone(), self.entries.len());
                self.entries.push(ParcelObservations {
                    parcel_id,
                    observations,
                });
            }
        }
    }

    /// Date bounds this index was fetched with
    pub fn window(&self) -> ObservationWindow {
        self.window
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, parcel_id: &str) -> bool {
        self.entry(parcel_id).is_some()
    }

    /// Observations for a parcel; `None` if the query did not return it
    pub fn get(&self, parcel_id: &str) -> Option<&[Observation]> {
        self.entry(parcel_id).map(|e| e.observations.as_slice())
    }

    fn entry(&self, parcel_id: &str) -> Option<&ParcelObservations> {
        self.positions.get(parcel_id).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParcelObservations> {
        self.entries.iter()
    }

    pub fn parcel_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.parcel_id.as_str())
    }

    /// Type codes measured at least once for a parcel
    pub fn measured_types(&self, parcel_id: &str) -> Option<BTreeSet<&str>> {
        self.entry(parcel_id).map(ParcelObservations::measured_types)
    }

    /// Measure type vocabulary of each parcel, in index order
    pub fn measured_type_defs_by_parcel(&self) -> Vec<(&str, BTreeSet<MeasureTypeDef>)> {
        self.entries
            .iter()
            .map(|e| (e.parcel_id.as_str(), e.measured_type_defs()))
            .collect()
    }

    /// Measure type vocabulary across all parcels (empty for an empty index)
    pub fn measured_type_defs(&self) -> BTreeSet<MeasureTypeDef> {
        self.entries
            .iter()
            .fold(BTreeSet::new(), |mut all, entry| {
                all.extend(entry.measured_type_defs());
                all
            })
    }

    /// New index holding the parcels whose measured types satisfy `filter`
    pub fn filter(&self, filter: &MeasureFilter) -> ParcelObservationIndex {
        let predicate = filter.predicate();
        let entries: Vec<ParcelObservations> = self
            .entries
            .iter()
            .filter(|e| predicate(&e.measured_types()))
            .cloned()
            .collect();

        log::debug!(
            "Measure filter kept {} of {} parcels",
            entries.len(),
            self.entries.len()
        );

        ParcelObservationIndex::from_entries(entries, self.window)
    }
}

impl FromIterator<(String, Vec<Observation>)> for ParcelObservationIndex {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Observation>)>>(iter: I) -> Self {
        let mut index = ParcelObservationIndex::default();
        for (parcel_id, observations) in iter {
            index.insert(parcel_id, observations);
        }
        index
    }
}

impl<'a> IntoIterator for &'a ParcelObservationIndex {
    type Item = &'a ParcelObservations;
    type IntoIter = std::slice::Iter<'a, ParcelObservations>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
