//! Per-city pipeline: geocode, fetch, validate.
//!
//! Cities are handled strictly in order and every failure stays with its own
//! city; the result is one [`CityReport`] per input name.

use anyhow::Result;
use tracing::{debug, warn};

use crate::{
    Config,
    forecast::{ForecastProvider, OpenMeteoProvider},
    geocode::{Geocoder, NominatimGeocoder},
    model::{CityCard, CityOutcome, CityReport},
};

#[derive(Debug)]
pub struct Dashboard {
    geocoder: Box<dyn Geocoder>,
    provider: Box<dyn ForecastProvider>,
}

impl Dashboard {
    pub fn new(geocoder: Box<dyn Geocoder>, provider: Box<dyn ForecastProvider>) -> Self {
        Self { geocoder, provider }
    }

    /// Nominatim + Open-Meteo, pointed at the configured endpoints.
    pub fn from_config(config: &Config) -> Result<Self> {
        let endpoints = &config.endpoints;
        let http = endpoints.http_client()?;

        Ok(Self::new(
            Box::new(NominatimGeocoder::new(&endpoints.geocoder_url, http.clone())),
            Box::new(OpenMeteoProvider::new(&endpoints.forecast_url, http)),
        ))
    }

    pub async fn report(&self, city: &str) -> CityReport {
        let outcome = self.outcome(city).await;
        CityReport { city: city.to_string(), outcome }
    }

    async fn outcome(&self, city: &str) -> CityOutcome {
        let Some(location) = self.geocoder.resolve(city).await else {
            warn!("City not found: {}", city);
            return CityOutcome::NotFound;
        };

        let forecast = match self.provider.fetch(location).await {
            Ok(f) => f,
            Err(e) => {
                warn!("Forecast for '{}' failed: {}", city, e);
                return CityOutcome::FetchFailed(e.to_string());
            }
        };

        match CityCard::from_forecast(city, location, forecast) {
            Ok(card) => {
                debug!("Card ready for '{}'", city);
                CityOutcome::Ready(Box::new(card))
            }
            Err(e) => {
                warn!("Incomplete weather payload for '{}': {}", city, e);
                CityOutcome::MissingWeatherPayload
            }
        }
    }

    /// One report per city, in input order.
    pub async fn build(&self, cities: &[String]) -> Vec<CityReport> {
        let mut reports = Vec::with_capacity(cities.len());
        for city in cities {
            reports.push(self.report(city).await);
        }
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::ForecastError;
    use crate::model::{CurrentWeather, DailySeries, Forecast, GeoLocation};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default)]
    struct FakeGeocoder {
        known: HashMap<String, GeoLocation>,
    }

    impl FakeGeocoder {
        fn with(cities: &[(&str, f64, f64)]) -> Self {
            let known = cities
                .iter()
                .map(|(name, lat, lon)| {
                    (name.to_string(), GeoLocation { latitude: *lat, longitude: *lon })
                })
                .collect();
            Self { known }
        }
    }

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn resolve(&self, city: &str) -> Option<GeoLocation> {
            self.known.get(city).copied()
        }
    }

    #[derive(Debug)]
    enum Reply {
        Full,
        EmptyCurrent,
        RaggedDaily,
        Status(u16),
    }

    #[derive(Debug)]
    struct FakeProvider {
        reply: Reply,
        calls: Arc<Mutex<Vec<GeoLocation>>>,
    }

    impl FakeProvider {
        fn new(reply: Reply) -> Self {
            Self { reply, calls: Arc::default() }
        }
    }

    fn daily() -> DailySeries {
        DailySeries {
            time: vec!["2024-06-05".into(), "2024-06-06".into()],
            temperature_2m_max: vec![Some(25.0), Some(27.0)],
            temperature_2m_min: vec![Some(15.0), Some(16.0)],
            sunrise: vec!["2024-06-05T05:01".into(), "2024-06-06T05:00".into()],
            sunset: vec!["2024-06-05T20:41".into(), "2024-06-06T20:42".into()],
        }
    }

    #[async_trait]
    impl ForecastProvider for FakeProvider {
        async fn fetch(&self, location: GeoLocation) -> Result<Forecast, ForecastError> {
            self.calls.lock().unwrap().push(location);

            let mut forecast = Forecast {
                current: Some(CurrentWeather {
                    temperature_c: 22.0,
                    wind_speed: 8.5,
                    wind_direction_deg: 90.0,
                    weather_code: 0,
                }),
                daily: Some(daily()),
                hourly_humidity: vec![Some(55.0)],
                timezone: "America/New_York".into(),
            };

            match self.reply {
                Reply::Full => {}
                Reply::EmptyCurrent => forecast.current = None,
                Reply::RaggedDaily => {
                    if let Some(d) = forecast.daily.as_mut() {
                        d.temperature_2m_min.pop();
                    }
                }
                Reply::Status(status) => {
                    return Err(ForecastError::Status { status, body: "down".into() });
                }
            }
            Ok(forecast)
        }
    }

    fn dashboard(reply: Reply) -> Dashboard {
        Dashboard::new(
            Box::new(FakeGeocoder::with(&[("New York", 40.7, -74.0), ("Tokyo", 35.7, 139.7)])),
            Box::new(FakeProvider::new(reply)),
        )
    }

    fn names(cities: &[&str]) -> Vec<String> {
        cities.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn unknown_city_does_not_stop_the_others() {
        let reports = dashboard(Reply::Full)
            .build(&names(&["New York", "Atlantis", "Tokyo"]))
            .await;

        assert_eq!(reports.len(), 3);
        assert!(reports[0].card().is_some());
        assert_eq!(reports[1].city, "Atlantis");
        assert_eq!(reports[1].outcome, CityOutcome::NotFound);
        assert_eq!(reports[2].card().unwrap().location.latitude, 35.7);
    }

    #[tokio::test]
    async fn empty_current_weather_is_header_only() {
        let report = dashboard(Reply::EmptyCurrent).report("Tokyo").await;
        assert_eq!(report.outcome, CityOutcome::MissingWeatherPayload);
    }

    #[tokio::test]
    async fn ragged_daily_arrays_fail_closed() {
        let report = dashboard(Reply::RaggedDaily).report("Tokyo").await;
        assert_eq!(report.outcome, CityOutcome::MissingWeatherPayload);
    }

    #[tokio::test]
    async fn fetch_error_is_reported_per_city() {
        let reports = dashboard(Reply::Status(503))
            .build(&names(&["Atlantis", "Tokyo"]))
            .await;

        assert_eq!(reports[0].outcome, CityOutcome::NotFound);
        match &reports[1].outcome {
            CityOutcome::FetchFailed(msg) => assert!(msg.contains("503")),
            other => panic!("expected FetchFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn no_fetch_for_unresolved_city() {
        let provider = FakeProvider::new(Reply::Full);
        let calls = Arc::clone(&provider.calls);
        let dash = Dashboard::new(
            Box::new(FakeGeocoder::with(&[("Tokyo", 35.7, 139.7)])),
            Box::new(provider),
        );

        dash.build(&names(&["Atlantis", "Tokyo"])).await;

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], GeoLocation { latitude: 35.7, longitude: 139.7 });
    }

    #[tokio::test]
    async fn duplicates_render_independently_in_order() {
        let reports = dashboard(Reply::Full)
            .build(&names(&["Tokyo", "New York", "Tokyo"]))
            .await;

        let cities: Vec<_> = reports.iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, ["Tokyo", "New York", "Tokyo"]);
        assert!(reports.iter().all(|r| r.card().is_some()));
    }

    #[tokio::test]
    async fn empty_city_list_builds_nothing() {
        assert!(dashboard(Reply::Full).build(&[]).await.is_empty());
    }
}
