//! Turning raw forecast fields into display strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Icon shown for any weather code outside the table.
pub const DEFAULT_ICON: &str = "🌍";

const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Icon for a WMO weather code.
/// See: https://open-meteo.com/en/docs#weathervariables
pub fn weather_icon(code: i32) -> &'static str {
    match code {
        0 => "☀",
        1 => "🌤",
        2 => "⛅",
        3 => "☁",
        45 | 48 => "🌫",
        51 => "🌦",
        61 | 80 => "🌧",
        71 => "❄",
        95 => "⛈",
        _ => DEFAULT_ICON,
    }
}

/// Nearest of the eight compass points for a bearing in degrees.
///
/// Each point owns the 45° sector centered on it; exact sector edges round
/// half to even, so 22.5° is `N` and 67.5° is `E`.
pub fn compass_direction(bearing_deg: f64) -> &'static str {
    let sector = (bearing_deg / 45.0).round_ties_even() as i64;
    COMPASS[sector.rem_euclid(8) as usize]
}

/// Wall-clock time in `timezone` as `HH:MM AM/PM`.
///
/// Unknown zone names fall back to UTC.
pub fn local_time(timezone: &str, now: DateTime<Utc>) -> String {
    match timezone.parse::<Tz>() {
        Ok(tz) => now.with_timezone(&tz).format("%I:%M %p").to_string(),
        Err(_) => {
            tracing::warn!("Unknown timezone '{}', showing UTC", timezone);
            now.format("%I:%M %p").to_string()
        }
    }
}

/// Time-of-day part of a timestamp, date discarded, e.g. `05:12`.
pub fn time_of_day(at: NaiveDateTime) -> String {
    at.format("%H:%M").to_string()
}

/// Chart/CSV label for a forecast day, e.g. `05 Jun`.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%d %b").to_string()
}
