//! Translation from the group-observations wire schema to the in-memory model
//!
//! Wire format (current schema):
//!
//! ```json
//! [
//!   {
//!     "parcelUuid": "PA-...",
//!     "observations": [
//!       {
//!         "id": "...",
//!         "date": 1700000000000,
//!         "url": "https://...",
//!         "data": {
//!           "COLL_00070": { "label": "Rain", "value": 12.3, "type": "float", "valueLabel": "12.3 mm" }
//!         }
//!       }
//!     ]
//!   }
//! ]
//! ```
//!
//! All schema knowledge lives here. Parsing is fail-fast: the first malformed
//! element aborts the whole document.

use super::{
    index::{ObservationWindow, ParcelObservationIndex},
    measure::Measure,
    observation::{local_datetime_from_millis, Observation},
};
use crate::error::{LandfilesError, Result};
use serde::Deserialize;
use serde_json::{Number, Value};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct WireParcelObservations {
    #[serde(rename = "parcelUuid")]
    parcel_uuid: String,
    observations: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct WireObservation {
    id: String,
    date: Number,
    url: String,
    data: BTreeMap<String, WireMeasure>,
}

#[derive(Debug, Deserialize)]
struct WireMeasure {
    label: String,
    value: Value,
    #[serde(rename = "type")]
    value_type: String,
    #[serde(rename = "valueLabel", default)]
    value_label: Option<String>,
}

/// Build one [`Observation`] from its JSON object
pub fn parse_observation(raw: &Value) -> Result<Observation> {
    parse_observation_in(raw, "observation")
}

fn parse_observation_in(raw: &Value, context: &str) -> Result<Observation> {
    let wire = WireObservation::deserialize(raw)
        .map_err(|e| LandfilesError::malformed(context, e))?;

    let timestamp_ms = epoch_millis(&wire.date)
        .ok_or_else(|| LandfilesError::malformed(context, format!("invalid `date` {}", wire.date)))?;
    let date = local_datetime_from_millis(timestamp_ms).ok_or_else(|| {
        LandfilesError::malformed(context, format!("`date` {} out of range", timestamp_ms))
    })?;

    let measures = wire
        .data
        .into_iter()
        .map(|(type_code, m)| {
            let measure = Measure {
                type_code: type_code.clone(),
                label: m.label,
                value: m.value,
                value_type: m.value_type,
                value_label: m.value_label,
            };
            (type_code, measure)
        })
        .collect();

    Ok(Observation {
        id: wire.id,
        date,
        timestamp_ms,
        url: wire.url,
        measures,
    })
}

/// Build a [`ParcelObservationIndex`] from a group-observations response body
pub fn parse_group_observations(
    body: &Value,
    window: ObservationWindow,
) -> Result<ParcelObservationIndex> {
    let entries = body.as_array().ok_or_else(|| {
        LandfilesError::malformed("group observations", "expected a JSON array of parcels")
    })?;

    let mut index = ParcelObservationIndex::empty(window);
    for (position, entry) in entries.iter().enumerate() {
        let context = format!("group observations[{}]", position);
        let parcel = WireParcelObservations::deserialize(entry)
            .map_err(|e| LandfilesError::malformed(context.as_str(), e))?;

        let observations = parcel
            .observations
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let context = format!("parcel {} observation[{}]", parcel.parcel_uuid, i);
                parse_observation_in(raw, &context)
            })
            .collect::<Result<Vec<_>>>()?;

        index.insert(parcel.parcel_uuid, observations);
    }

    log::debug!(
        "Parsed group observations: {} parcels ({} → {})",
        index.len(),
        window.start_param(),
        window.end_param()
    );
    Ok(index)
}

fn epoch_millis(date: &Number) -> Option<i64> {
    if let Some(ms) = date.as_i64() {
        return Some(ms);
    }
    date.as_f64()
        .filter(|ms| ms.is_finite() && ms.abs() < i64::MAX as f64)
        .map(|ms| ms.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_observation() -> Value {
        json!({
            "id": "o1",
            "date": 1_700_000_000_000_i64,
            "url": "http://x",
            "data": {
                "COLL_00070": {"label": "Rain", "value": 12.3, "type": "float"},
                "COLL_00404": {"label": "Stage", "value": "BBCH 31", "type": "string", "valueLabel": "Stem elongation"}
            }
        })
    }

    #[test]
    fn test_parse_observation() {
        let obs = parse_observation(&raw_observation()).unwrap();

        assert_eq!(obs.id, "o1");
        assert_eq!(obs.url, "http://x");
        assert_eq!(obs.timestamp_ms, 1_700_000_000_000);
        assert_eq!(obs.date, local_datetime_from_millis(1_700_000_000_000).unwrap());

        let rain = &obs.measures["COLL_00070"];
        assert_eq!(rain.type_code, "COLL_00070");
        assert_eq!(rain.label, "Rain");
        assert_eq!(rain.value, json!(12.3));
        assert_eq!(rain.value_type, "float");
        assert_eq!(rain.value_label, None);

        let stage = &obs.measures["COLL_00404"];
        assert_eq!(stage.to_string(), "Stage = Stem elongation");
    }

    #[test]
    fn test_missing_required_keys() {
        for key in ["id", "date", "url", "data"] {
            let mut raw = raw_observation();
            raw.as_object_mut().unwrap().remove(key);
            let err = parse_observation(&raw).unwrap_err();
            assert!(
                err.to_string().contains(key),
                "error for missing `{}` should name it: {}",
                key,
                err
            );
        }

        for key in ["label", "value", "type"] {
            let mut raw = raw_observation();
            raw["data"]["COLL_00070"].as_object_mut().unwrap().remove(key);
            assert!(matches!(
                parse_observation(&raw),
                Err(LandfilesError::MalformedRecord { .. })
            ));
        }
    }

    #[test]
    fn test_null_value_counts_as_present() {
        let mut raw = raw_observation();
        raw["data"]["COLL_00070"]["value"] = Value::Null;
        raw["data"]["COLL_00070"]["valueLabel"] = Value::Null;

        let obs = parse_observation(&raw).unwrap();
        assert_eq!(obs.measures["COLL_00070"].value, Value::Null);
        assert_eq!(obs.measures["COLL_00070"].value_label, None);
    }

    #[test]
    fn test_float_epoch_millis() {
        let mut raw = raw_observation();
        raw["date"] = json!(1_700_000_000_000.0_f64);
        assert_eq!(parse_observation(&raw).unwrap().timestamp_ms, 1_700_000_000_000);
    }

    #[test]
    fn test_group_body_must_be_array() {
        let err = parse_group_observations(&json!({"parcels": []}), ObservationWindow::default())
            .unwrap_err();
        assert!(matches!(err, LandfilesError::MalformedRecord { .. }));
    }

    #[test]
    fn test_group_entry_missing_parcel_uuid() {
        let body = json!([{"observations": []}]);
        let err = parse_group_observations(&body, ObservationWindow::default()).unwrap_err();
        assert!(err.to_string().contains("parcelUuid"));
    }
}
