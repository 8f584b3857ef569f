use super::{
    farm::Farm,
    parcel::Parcel,
    record::{array_items, required, ApiRecord},
};
use crate::{
    error::Result,
    observations::{MeasureFilter, ObservationWindow, ParcelObservationIndex},
    transport::Transport,
};
use serde_json::Value;
use std::{fmt, sync::Arc};

/// A collection of farms
#[derive(Clone)]
pub struct Group {
    record: ApiRecord,
    transport: Arc<dyn Transport>,
}

impl Group {
    pub fn from_json(raw: Value, transport: Arc<dyn Transport>) -> Result<Self> {
        let record = ApiRecord::new("Group", raw, "uuid", Some("name"))?;
        Ok(Self { record, transport })
    }

    pub fn id(&self) -> &str {
        self.record.id()
    }

    pub fn raw(&self) -> &Value {
        self.record.data()
    }

    pub async fn list_farms(&self) -> Result<Vec<Farm>> {
        let endpoint = format!("/landfilesservice/v1/external/farms/groups/{}", self.id());
        let body = self.transport.fetch(&endpoint, &[]).await?;

        let context = format!("{} farms", self.record.describe());
        array_items(required(&body, "farms", &context)?, &context)?
            .iter()
            .cloned()
            .map(|raw| Farm::with_id_field(raw, "id", self.transport.clone()))
            .collect()
    }

    /// Parcels of every farm in the group, farm by farm
    pub async fn list_parcels(&self) -> Result<Vec<Parcel>> {
        let mut parcels = Vec::new();
        for farm in self.list_farms().await? {
            parcels.extend(farm.list_parcels().await?);
        }
        Ok(parcels)
    }

    pub async fn list_parcels_matching(&self, filter: &MeasureFilter) -> Result<Vec<Parcel>> {
        let mut parcels = Vec::new();
        for farm in self.list_farms().await? {
            parcels.extend(farm.list_parcels_matching(filter).await?);
        }
        Ok(parcels)
    }

    /// Fetch the group's observations within `window` and index them by parcel
    pub async fn list_observations(&self, window: ObservationWindow) -> Result<ParcelObservationIndex> {
        let endpoint = format!("/landfilesservice/v1/external/observations/groups/{}", self.id());
        let body = self.transport.fetch(&endpoint, &window.query_params()).await?;

        let index = ParcelObservationIndex::from_json(&body, window)?;
        log::info!(
            "{}: {} parcels with observations",
            self.record.describe(),
            index.len()
        );
        Ok(index)
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.record, f)
    }
}
