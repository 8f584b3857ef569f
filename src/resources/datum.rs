//! Legacy `data` entries carried by parcels and publications
//!
//! Shape: `{"dataId": "COLL_00070", "dataLabel": "Rain", "valueLabel": "12 mm"}`

use crate::error::{LandfilesError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceDatum {
    #[serde(rename = "dataId")]
    pub data_id: String,
    #[serde(rename = "dataLabel")]
    pub data_label: String,
    /// Display value as sent; only key presence is required
    #[serde(rename = "valueLabel")]
    pub value_label: Value,
}

impl ResourceDatum {
    /// `value_label` rendered for display: strings unquoted, null as empty
    pub fn value_str(&self) -> String {
        match &self.value_label {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ResourceDatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.data_label, self.value_str())
    }
}

/// Parse the optional `data` list of a resource, keyed by `dataId`
///
/// A resource without `data` has no entries.
pub fn parse_resource_data(resource: &Value, context: &str) -> Result<BTreeMap<String, ResourceDatum>> {
    let Some(items) = resource.get("data") else {
        return Ok(BTreeMap::new());
    };

    let items = items
        .as_array()
        .ok_or_else(|| LandfilesError::malformed(context, "`data` is not a list"))?;

    items
        .iter()
        .map(|item| {
            let datum = ResourceDatum::deserialize(item)
                .map_err(|e| LandfilesError::malformed(context, e))?;
            Ok((datum.data_id.clone(), datum))
        })
        .collect()
}

/// Data codes present on a resource
pub fn data_codes(data: &BTreeMap<String, ResourceDatum>) -> BTreeSet<&str> {
    data.keys().map(String::as_str).collect()
}
