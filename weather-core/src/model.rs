use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coordinates resolved from a city name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// Instantaneous conditions as reported by the forecast API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature_c: f64,
    /// km/h, the forecast API's default unit.
    pub wind_speed: f64,
    pub wind_direction_deg: f64,
    pub weather_code: i32,
}

/// Daily fields exactly as delivered: parallel arrays indexed by day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailySeries {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub sunrise: Vec<String>,
    pub sunset: Vec<String>,
}

/// One validated day of the weekly forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub sunrise: NaiveDateTime,
    pub sunset: NaiveDateTime,
}

/// Raw result of one forecast request.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    /// `None` when the API sent an empty or incomplete `current_weather`.
    pub current: Option<CurrentWeather>,
    pub daily: Option<DailySeries>,
    pub hourly_humidity: Vec<Option<f64>>,
    /// IANA zone name resolved by the API.
    pub timezone: String,
}

/// Reasons a successful response still cannot produce a full card.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    #[error("response has no current weather")]
    MissingCurrent,

    #[error("response has no daily forecast")]
    MissingDaily,

    #[error("daily arrays differ in length: {0}")]
    LengthMismatch(String),

    #[error("daily value missing: {field}[{index}]")]
    MissingValue { field: &'static str, index: usize },

    #[error("invalid date or time '{0}'")]
    InvalidTimestamp(String),

    #[error("response has no hourly humidity")]
    MissingHumidity,
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

impl DailySeries {
    /// Zip the parallel arrays into rows. Fails when lengths differ, any value
    /// is null or unparsable, or there are no days at all.
    pub fn validate(&self) -> Result<Vec<DailyEntry>, PayloadError> {
        let len = self.time.len();
        let lens = [
            self.temperature_2m_max.len(),
            self.temperature_2m_min.len(),
            self.sunrise.len(),
            self.sunset.len(),
        ];
        if lens.iter().any(|&l| l != len) {
            return Err(PayloadError::LengthMismatch(format!(
                "time={len}, max={}, min={}, sunrise={}, sunset={}",
                lens[0], lens[1], lens[2], lens[3]
            )));
        }
        if len == 0 {
            return Err(PayloadError::MissingDaily);
        }

        (0..len)
            .map(|i| -> Result<DailyEntry, PayloadError> {
                Ok(DailyEntry {
                    date: parse_date(&self.time[i])?,
                    temp_max_c: self.temperature_2m_max[i].ok_or(PayloadError::MissingValue {
                        field: "temperature_2m_max",
                        index: i,
                    })?,
                    temp_min_c: self.temperature_2m_min[i].ok_or(PayloadError::MissingValue {
                        field: "temperature_2m_min",
                        index: i,
                    })?,
                    sunrise: parse_datetime(&self.sunrise[i])?,
                    sunset: parse_datetime(&self.sunset[i])?,
                })
            })
            .collect()
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, PayloadError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| PayloadError::InvalidTimestamp(s.to_string()))
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime, PayloadError> {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .map_err(|_| PayloadError::InvalidTimestamp(s.to_string()))
}

/// Everything needed to draw a complete card for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct CityCard {
    pub city: String,
    pub location: GeoLocation,
    pub current: CurrentWeather,
    pub timezone: String,
    pub humidity_pct: f64,
    pub daily: Vec<DailyEntry>,
}

impl CityCard {
    /// Build a card from a fetched forecast, or explain why it can't be built.
    pub fn from_forecast(
        city: &str,
        location: GeoLocation,
        forecast: Forecast,
    ) -> Result<Self, PayloadError> {
        let current = forecast.current.ok_or(PayloadError::MissingCurrent)?;
        let daily = forecast.daily.ok_or(PayloadError::MissingDaily)?.validate()?;
        let humidity_pct = forecast
            .hourly_humidity
            .first()
            .copied()
            .flatten()
            .ok_or(PayloadError::MissingHumidity)?;

        Ok(Self {
            city: city.to_string(),
            location,
            current,
            timezone: forecast.timezone,
            humidity_pct,
            daily,
        })
    }

    /// First day of the forecast. Cards from `from_forecast` always have one.
    pub fn today(&self) -> Option<&DailyEntry> {
        self.daily.first()
    }
}

/// What happened for a single city.
#[derive(Debug, Clone, PartialEq)]
pub enum CityOutcome {
    Ready(Box<CityCard>),
    NotFound,
    FetchFailed(String),
    /// Fetch succeeded but the payload can't fill a card; header only.
    MissingWeatherPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityReport {
    pub city: String,
    pub outcome: CityOutcome,
}

impl CityReport {
    pub fn card(&self) -> Option<&CityCard> {
        match &self.outcome {
            CityOutcome::Ready(card) => Some(&**card),
            _ => None,
        }
    }
}
