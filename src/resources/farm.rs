use super::{
    parcel::Parcel,
    publication::Publication,
    record::{array_items, required, ApiRecord},
};
use crate::{error::Result, observations::MeasureFilter, transport::Transport};
use serde_json::Value;
use std::{fmt, sync::Arc};

/// A farm; one GET per navigation call, nothing cached
#[derive(Clone)]
pub struct Farm {
    record: ApiRecord,
    transport: Arc<dyn Transport>,
}

impl Farm {
    /// Wrap a farm body whose id lives in `uuid` (own-farm endpoints)
    pub fn from_json(raw: Value, transport: Arc<dyn Transport>) -> Result<Self> {
        Self::with_id_field(raw, "uuid", transport)
    }

    /// Wrap a farm body whose id lives in `id_field`
    ///
    /// Farms listed under a group carry their id in `id`.
    pub fn with_id_field(raw: Value, id_field: &str, transport: Arc<dyn Transport>) -> Result<Self> {
        let record = ApiRecord::new("Farm", raw, id_field, Some("name"))?;
        Ok(Self { record, transport })
    }

    pub fn id(&self) -> &str {
        self.record.id()
    }

    pub fn raw(&self) -> &Value {
        self.record.data()
    }

    pub async fn list_parcels(&self) -> Result<Vec<Parcel>> {
        let endpoint = format!("/landfilesservice/v1/external/parcels/farms/{}", self.id());
        let body = self.transport.fetch(&endpoint, &[]).await?;

        let context = format!("{} parcels", self.record.describe());
        let parcels = array_items(required(&body, "parcels", &context)?, &context)?
            .iter()
            .cloned()
            .map(Parcel::from_json)
            .collect::<Result<Vec<_>>>()?;

        log::debug!("{}: {} parcels", self.record.describe(), parcels.len());
        Ok(parcels)
    }

    /// Parcels whose data codes satisfy `filter`
    pub async fn list_parcels_matching(&self, filter: &MeasureFilter) -> Result<Vec<Parcel>> {
        let parcels = self.list_parcels().await?;
        Ok(parcels.into_iter().filter(|p| p.matches(filter)).collect())
    }

    pub async fn list_publications(&self) -> Result<Vec<Publication>> {
        let query = [("farmUuid".to_string(), self.id().to_string())];
        let body = self
            .transport
            .fetch("/landfilesservice/v1/external/pictures", &query)
            .await?;

        let context = format!("{} publications", self.record.describe());
        array_items(&body, &context)?
            .iter()
            .cloned()
            .map(|raw| Publication::from_json(raw, self.transport.clone()))
            .collect()
    }
}

impl fmt::Debug for Farm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Farm")
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Farm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.record, f)
    }
}
