//! Core library for the `weather` dashboard.
//!
//! This crate defines:
//! - City list parsing
//! - Geocoding and forecast adapters behind small traits
//! - Validation of forecast payloads into render-ready cards
//! - Display formatting helpers and CSV export
//! - Configuration handling
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod cities;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod forecast;
pub mod format;
pub mod geocode;
pub mod language;
pub mod model;

pub use cities::parse_cities;
pub use config::{Config, EndpointConfig};
pub use dashboard::Dashboard;
pub use forecast::{ForecastError, ForecastProvider, OpenMeteoProvider};
pub use geocode::{Geocoder, NominatimGeocoder};
pub use language::Language;
pub use model::{CityCard, CityOutcome, CityReport, GeoLocation};
