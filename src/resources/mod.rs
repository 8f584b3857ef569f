//! Thin wrappers over the Landfiles resource JSON
//!
//! Each wrapper keeps the raw body and resolves its id up front; navigation
//! methods issue one request per call through the shared [`Transport`](crate::transport::Transport).

pub mod datum;
pub mod farm;
pub mod group;
pub mod parcel;
pub mod publication;
pub mod record;

pub use datum::ResourceDatum;
pub use farm::Farm;
pub use group::Group;
pub use parcel::Parcel;
pub use publication::Publication;
pub use record::ApiRecord;
