use crate::{
    auth::Credentials,
    config::ClientConfig,
    error::Result,
    resources::{
        record::array_items,
        Farm, Group, Publication,
    },
    transport::{HttpTransport, Transport},
};
use std::sync::Arc;

/// Entry point to the Landfiles API
///
/// Every call is a fresh fetch; results are point-in-time snapshots with no
/// consistency guarantee across calls.
#[derive(Clone)]
pub struct LandfilesClient {
    transport: Arc<dyn Transport>,
}

impl LandfilesClient {
    /// Authenticate and build a client
    ///
    /// # Returns
    /// * `Ok(LandfilesClient)` - Token acquired
    /// * `Err(Authentication)` - No `access_token` in the token response
    /// * `Err(Transport)` - Token endpoint unreachable
    pub async fn connect(config: ClientConfig, credentials: &Credentials) -> Result<Self> {
        log::info!("Connecting to {}", config.base_url);
        let transport = HttpTransport::connect(config, credentials).await?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Build a client over an already-authenticated transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        self.transport.clone()
    }

    pub async fn list_farms(&self) -> Result<Vec<Farm>> {
        let body = self
            .transport
            .fetch("/landfilesservice/v1/farms/me", &[])
            .await?;

        array_items(&body, "my farms")?
            .iter()
            .cloned()
            .map(|raw| Farm::from_json(raw, self.transport.clone()))
            .collect()
    }

    pub async fn get_farm(&self, farm_id: &str) -> Result<Farm> {
        let endpoint = format!("/landfilesservice/v1/farms/{}", farm_id);
        let body = self.transport.fetch(&endpoint, &[]).await?;
        Farm::from_json(body, self.transport.clone())
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        let body = self
            .transport
            .fetch("/landfilesservice/v1/groups/me", &[])
            .await?;

        array_items(&body, "my groups")?
            .iter()
            .cloned()
            .map(|raw| Group::from_json(raw, self.transport.clone()))
            .collect()
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Group> {
        let endpoint = format!("/landfilesservice/v1/groups/{}", group_id);
        let body = self.transport.fetch(&endpoint, &[]).await?;
        Group::from_json(body, self.transport.clone())
    }

    /// The `n` most recent publications across the user's groups
    pub async fn list_n_last_publications(&self, n: usize) -> Result<Vec<Publication>> {
        let endpoint = format!("/landfilesservice/v1/external/pictures/groups/{}", n);
        let body = self.transport.fetch(&endpoint, &[]).await?;

        array_items(&body, "last publications")?
            .iter()
            .cloned()
            .map(|raw| Publication::from_json(raw, self.transport.clone()))
            .collect()
    }
}
