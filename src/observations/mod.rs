//! # Group observations
//!
//! In-memory model of the per-parcel measurement observations returned by the
//! group-observations endpoint, and the set queries run over it.
//!
//! ## Module Organization
//!
//! - `measure` - `Measure` values and `MeasureTypeDef` vocabulary entries
//! - `observation` - one dated measurement event
//! - `index` - `ParcelObservationIndex`, vocabulary extraction and filtering
//! - `predicate` - `MeasureFilter` requests and the tests they build
//! - `wire` - JSON schema translation (the only module aware of field names)
//!
//! Nothing here touches the network; every query is a pure function over an
//! already-fetched index.

pub mod index;
pub mod measure;
pub mod observation;
pub mod predicate;
pub mod wire;

pub use index::{ObservationWindow, ParcelObservationIndex, ParcelObservations};
pub use measure::{Measure, MeasureTypeDef};
pub use observation::Observation;
pub use predicate::{MeasureCriterion, MeasureFilter};
