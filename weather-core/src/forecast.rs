use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::model::{Forecast, GeoLocation};

pub mod open_meteo;

pub use open_meteo::OpenMeteoProvider;

/// Failure to obtain a forecast at all. A response that parses but lacks
/// fields is not an error here; see [`crate::model::PayloadError`].
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("forecast request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("forecast request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse forecast JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch(&self, location: GeoLocation) -> Result<Forecast, ForecastError>;
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
