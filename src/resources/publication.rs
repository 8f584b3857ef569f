use super::{
    datum::{parse_resource_data, ResourceDatum},
    record::ApiRecord,
};
use crate::{error::Result, transport::Transport};
use serde_json::Value;
use std::{collections::BTreeMap, fmt, sync::Arc};

/// A picture published on a farm, with the data read from it
#[derive(Clone)]
pub struct Publication {
    record: ApiRecord,
    data: BTreeMap<String, ResourceDatum>,
    transport: Arc<dyn Transport>,
}

impl Publication {
    pub fn from_json(raw: Value, transport: Arc<dyn Transport>) -> Result<Self> {
        let record = ApiRecord::new("Publication", raw, "uuid", None)?;
        let data = parse_resource_data(record.data(), &record.describe())?;
        Ok(Self {
            record,
            data,
            transport,
        })
    }

    pub fn id(&self) -> &str {
        self.record.id()
    }

    pub fn raw(&self) -> &Value {
        self.record.data()
    }

    pub fn data(&self) -> &BTreeMap<String, ResourceDatum> {
        &self.data
    }

    /// URL of the published image, `None` if the API lists none
    pub async fn image_url(&self) -> Result<Option<String>> {
        let endpoint = format!("/filesservice/v1/pictures/image/{}", self.id());
        let body = self.transport.fetch(&endpoint, &[]).await?;

        let url = body
            .as_array()
            .and_then(|urls| urls.first())
            .map(|first| match first {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });
        Ok(url)
    }
}

impl fmt::Debug for Publication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publication")
            .field("record", &self.record)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Publication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.record, f)
    }
}
