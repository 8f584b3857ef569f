//! # landfiles
//!
//! Client for the Landfiles agricultural-data REST API.
//!
//! - `auth` - OAuth2 password grant, bearer token acquisition
//! - `transport` - the single `fetch(endpoint, query)` seam to the HTTP layer
//! - `client` / `resources` - farms, groups, parcels and publications
//! - `observations` - per-parcel observation index with vocabulary and
//!   measured / not-measured filtering
//!
//! ## Usage
//!
//! ```rust,no_run
//! use landfiles::{ClientConfig, Credentials, LandfilesClient, MeasureFilter, ObservationWindow};
//!
//! # async fn run() -> landfiles::Result<()> {
//! let credentials = Credentials::ClientCredentials {
//!     client_id: "id".into(),
//!     client_secret: "secret".into(),
//!     username: "user".into(),
//!     password: "password".into(),
//! };
//! let client = LandfilesClient::connect(ClientConfig::from_env()?, &credentials).await?;
//!
//! let group = client.get_group("GR-...").await?;
//! let observations = group.list_observations(ObservationWindow::default()).await?;
//! let complete = observations.filter(&MeasureFilter::new().all_measured(["COLL_00070", "COLL_00404"]));
//! println!("{} of {} parcels fully measured", complete.len(), observations.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod observations;
pub mod resources;
pub mod transport;

pub use auth::Credentials;
pub use client::LandfilesClient;
pub use config::ClientConfig;
pub use error::{ConfigError, LandfilesError, Result};
pub use observations::{
    Measure, MeasureCriterion, MeasureFilter, MeasureTypeDef, Observation, ObservationWindow,
    ParcelObservationIndex, ParcelObservations,
};
pub use resources::{Farm, Group, Parcel, Publication, ResourceDatum};
pub use transport::{HttpTransport, Transport};
