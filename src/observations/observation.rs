use super::measure::Measure;
use chrono::{DateTime, Local, NaiveDateTime};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

/// One dated measurement event for a parcel
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub id: String,
    /// Wall-clock time in the local timezone of the running process
    pub date: NaiveDateTime,
    /// Epoch milliseconds as sent by the API
    pub timestamp_ms: i64,
    /// Link to the source picture or document
    pub url: String,
    /// Measures keyed by type code; a missing code means "not measured"
    pub measures: BTreeMap<String, Measure>,
}

impl Observation {
    /// Type codes measured in this event
    pub fn measured_types(&self) -> impl Iterator<Item = &str> {
        self.measures.keys().map(String::as_str)
    }

    pub fn measure(&self, type_code: &str) -> Option<&Measure> {
        self.measures.get(type_code)
    }

    /// Codes measured in any of the given observations
    pub fn union_measured_types<'a, I>(observations: I) -> BTreeSet<&'a str>
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        observations
            .into_iter()
            .flat_map(Observation::measured_types)
            .collect()
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%Y-%m-%d %H:%M"))
    }
}

/// Convert epoch milliseconds to local wall-clock time
///
/// Returns `None` when the instant is outside chrono's representable range.
pub fn local_datetime_from_millis(timestamp_ms: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(timestamp_ms).map(|utc| utc.with_timezone(&Local).naive_local())
}
