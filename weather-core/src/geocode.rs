use async_trait::async_trait;
use std::fmt::Debug;

use crate::model::GeoLocation;

pub mod nominatim;

pub use nominatim::NominatimGeocoder;

/// Resolves a place name to coordinates.
///
/// A miss and an unreachable service look the same to callers: both are `None`.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, city: &str) -> Option<GeoLocation>;
}
