use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::model::GeoLocation;

use super::Geocoder;

/// Forward geocoding through Nominatim (OpenStreetMap). No API key required.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        let base_url: String = base_url.into();
        Self { base_url: base_url.trim_end_matches('/').to_string(), http }
    }

    async fn search(&self, city: &str) -> Result<Option<GeoLocation>, String> {
        let url = format!("{}/search", self.base_url);
        debug!("Geocoding '{}' via {}", city, url);

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = res.status();
        if !status.is_success() {
            return Err(format!("status {status}"));
        }

        let places: Vec<NominatimPlace> =
            res.json().await.map_err(|e| format!("parse error: {e}"))?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        let latitude: f64 =
            place.lat.parse().map_err(|e| format!("bad lat '{}': {e}", place.lat))?;
        let longitude: f64 =
            place.lon.parse().map_err(|e| format!("bad lon '{}': {e}", place.lon))?;

        Ok(Some(GeoLocation { latitude, longitude }))
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, city: &str) -> Option<GeoLocation> {
        match self.search(city).await {
            Ok(Some(location)) => {
                debug!(
                    "Resolved '{}' to ({:.4}, {:.4})",
                    city, location.latitude, location.longitude
                );
                Some(location)
            }
            Ok(None) => {
                debug!("No geocoding match for '{}'", city);
                None
            }
            Err(e) => {
                debug!("Geocoding '{}' failed: {}", city, e);
                None
            }
        }
    }
}
