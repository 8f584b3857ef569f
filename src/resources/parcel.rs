use super::{
    datum::{data_codes, parse_resource_data, ResourceDatum},
    record::ApiRecord,
};
use crate::{error::Result, observations::MeasureFilter};
use serde_json::Value;
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

/// A unit of farmland, as listed under a farm
#[derive(Debug, Clone, PartialEq)]
pub struct Parcel {
    record: ApiRecord,
    data: BTreeMap<String, ResourceDatum>,
}

impl Parcel {
    pub fn from_json(raw: Value) -> Result<Self> {
        let record = ApiRecord::new("Parcel", raw, "id", Some("name"))?;
        let data = parse_resource_data(record.data(), &record.describe())?;
        Ok(Self { record, data })
    }

    pub fn id(&self) -> &str {
        self.record.id()
    }

    pub fn raw(&self) -> &Value {
        self.record.data()
    }

    /// Latest data values keyed by data code
    pub fn data(&self) -> &BTreeMap<String, ResourceDatum> {
        &self.data
    }

    pub fn data_codes(&self) -> BTreeSet<&str> {
        data_codes(&self.data)
    }

    pub fn matches(&self, filter: &MeasureFilter) -> bool {
        filter.matches(&self.data_codes())
    }
}

impl fmt::Display for Parcel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.record, f)
    }
}
