use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::model::{CurrentWeather, DailySeries, Forecast, GeoLocation};

use super::{ForecastError, ForecastProvider, truncate_body};

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,sunrise,sunset";
const HOURLY_FIELDS: &str = "relative_humidity_2m";
const FALLBACK_TIMEZONE: &str = "UTC";

/// Open-Meteo forecast client: current conditions, 7 days of daily data and
/// hourly humidity in one request, timezone resolved by the API.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        let base_url: String = base_url.into();
        Self { base_url: base_url.trim_end_matches('/').to_string(), http }
    }
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    #[serde(default)]
    current_weather: Option<OmCurrent>,
    #[serde(default)]
    daily: Option<DailySeries>,
    #[serde(default)]
    hourly: Option<OmHourly>,
    #[serde(default)]
    timezone: Option<String>,
}

/// Every field optional so that `{}` deserializes instead of failing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OmCurrent {
    temperature: Option<f64>,
    windspeed: Option<f64>,
    winddirection: Option<f64>,
    weathercode: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    #[serde(default)]
    relative_humidity_2m: Vec<Option<f64>>,
}

impl OmCurrent {
    fn into_current(self) -> Option<CurrentWeather> {
        Some(CurrentWeather {
            temperature_c: self.temperature?,
            wind_speed: self.windspeed?,
            wind_direction_deg: self.winddirection?,
            weather_code: self.weathercode.unwrap_or(0),
        })
    }
}

impl OmResponse {
    fn into_forecast(self) -> Forecast {
        Forecast {
            current: self.current_weather.and_then(OmCurrent::into_current),
            daily: self.daily,
            hourly_humidity: self.hourly.map(|h| h.relative_humidity_2m).unwrap_or_default(),
            timezone: self.timezone.unwrap_or_else(|| FALLBACK_TIMEZONE.to_string()),
        }
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn fetch(&self, location: GeoLocation) -> Result<Forecast, ForecastError> {
        let url = format!("{}/v1/forecast", self.base_url);
        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();

        debug!("Open-Meteo request for ({}, {})", latitude, longitude);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current_weather", "true"),
                ("daily", DAILY_FIELDS),
                ("hourly", HOURLY_FIELDS),
                ("timezone", "auto"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ForecastError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: OmResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_forecast())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Forecast {
        serde_json::from_str::<OmResponse>(json).unwrap().into_forecast()
    }

    #[test]
    fn full_response_maps_all_sections() {
        let f = parse(
            r#"{
                "timezone": "Asia/Tokyo",
                "current_weather": {"temperature": 21.5, "windspeed": 9.4,
                                    "winddirection": 135, "weathercode": 61,
                                    "time": "2024-06-05T12:00", "is_day": 1},
                "daily": {"time": ["2024-06-05"], "temperature_2m_max": [25.1],
                          "temperature_2m_min": [17.0], "sunrise": ["2024-06-05T04:25"],
                          "sunset": ["2024-06-05T18:54"]},
                "hourly": {"time": ["2024-06-05T00:00"], "relative_humidity_2m": [78]}
            }"#,
        );

        let current = f.current.unwrap();
        assert_eq!(current.temperature_c, 21.5);
        assert_eq!(current.wind_direction_deg, 135.0);
        assert_eq!(current.weather_code, 61);
        assert_eq!(f.timezone, "Asia/Tokyo");
        assert_eq!(f.hourly_humidity, vec![Some(78.0)]);
        assert_eq!(f.daily.unwrap().time, vec!["2024-06-05"]);
    }

    #[test]
    fn empty_current_weather_is_none() {
        let f = parse(r#"{"current_weather": {}, "timezone": "UTC"}"#);
        assert!(f.current.is_none());
    }

    #[test]
    fn missing_sections_default() {
        let f = parse("{}");

        assert!(f.current.is_none());
        assert!(f.daily.is_none());
        assert!(f.hourly_humidity.is_empty());
        assert_eq!(f.timezone, "UTC");
    }

    #[test]
    fn missing_weathercode_defaults_to_clear() {
        let f = parse(r#"{"current_weather": {"temperature": 1, "windspeed": 2, "winddirection": 3}}"#);
        assert_eq!(f.current.unwrap().weather_code, 0);
    }
}
