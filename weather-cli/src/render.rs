//! Terminal layout: a banner followed by a grid of bordered city cards.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use weather_core::{
    CityCard, CityOutcome, CityReport, Language,
    export::export_filename,
    format::{compass_direction, day_label, local_time, time_of_day, weather_icon},
};

const TITLE: &str = "❄️🍂 Clima Sphere 🌞☔";
const CAPTION: &str = "Live weather updates, forecasts & trends, powered by Open-Meteo API";

const MAX_BAR: char = '█';
const MIN_BAR: char = '░';
const LABEL_WIDTH: usize = 6;
const VALUE_WIDTH: usize = 6;

/// Page-wide layout settings, fixed before any city is rendered.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub cards_per_row: usize,
    /// Columns available inside a card's border.
    pub card_width: usize,
    pub now: DateTime<Utc>,
}

impl RenderOptions {
    pub fn new(cards_per_row: usize, now: DateTime<Utc>) -> Self {
        Self { cards_per_row: cards_per_row.max(1), card_width: 36, now }
    }
}

/// Result of the CSV download action for one card.
#[derive(Debug, Clone, PartialEq)]
pub enum Export {
    Saved(PathBuf),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Tile {
    pub report: CityReport,
    pub export: Option<Export>,
}

pub fn render_page(language: Language, tiles: &[Tile], opts: &RenderOptions) -> String {
    let mut out = vec![
        TITLE.to_string(),
        CAPTION.to_string(),
        format!("🌐 Language: {language}"),
        String::new(),
    ];

    let cards: Vec<Vec<String>> = tiles.iter().map(|t| render_card(t, opts)).collect();
    for (i, row) in cards.chunks(opts.cards_per_row).enumerate() {
        if i > 0 {
            out.push(String::new());
        }
        out.extend(join_row(row, opts.card_width + 4));
    }

    let mut page = out.join("\n");
    page.push('\n');
    page
}

/// Place cards side by side, padding shorter ones with blank lines.
fn join_row(cards: &[Vec<String>], outer_width: usize) -> Vec<String> {
    let height = cards.iter().map(Vec::len).max().unwrap_or(0);
    let blank = " ".repeat(outer_width);

    (0..height)
        .map(|line| {
            cards
                .iter()
                .map(|card| card.get(line).map_or(blank.as_str(), String::as_str))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect()
}

/// One bordered card. Every returned line has the same display width.
pub fn render_card(tile: &Tile, opts: &RenderOptions) -> Vec<String> {
    let width = opts.card_width;
    let mut body = vec![center(&format!("📍 {}", tile.report.city), width)];

    match &tile.report.outcome {
        CityOutcome::Ready(card) => body.extend(card_body(card, tile.export.as_ref(), opts)),
        CityOutcome::NotFound => body.push("❌ City not found.".to_string()),
        CityOutcome::FetchFailed(_) => body.push("⚠ Failed to fetch weather data.".to_string()),
        CityOutcome::MissingWeatherPayload => {}
    }

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(format!("╭{}╮", "─".repeat(width + 2)));
    lines.extend(body.iter().map(|l| format!("│ {} │", fit(l, width))));
    lines.push(format!("╰{}╯", "─".repeat(width + 2)));
    lines
}

fn card_body(card: &CityCard, export: Option<&Export>, opts: &RenderOptions) -> Vec<String> {
    let width = opts.card_width;
    let current = &card.current;
    let MapPin { coords, link } = map_pin(card);

    let mut lines = vec![
        center(weather_icon(current.weather_code), width),
        metric("🌡 Temperature", &format!("{} °C", current.temperature_c)),
        metric("💨 Wind Speed", &format!("{} km/h", current.wind_speed)),
        metric("🧭 Direction", compass_direction(current.wind_direction_deg)),
        metric("🕒 Local Time", &local_time(&card.timezone, opts.now)),
    ];
    if let Some(today) = card.today() {
        lines.push(format!(
            "🌅 Sunrise: {} | 🌇 Sunset: {}",
            time_of_day(today.sunrise),
            time_of_day(today.sunset)
        ));
    }
    lines.extend([
        metric("💧 Humidity", &format!("{}%", card.humidity_pct)),
        format!("🗺 {coords}"),
        format!("   {link}"),
        String::new(),
    ]);
    lines.extend(weekly_chart(card, width));

    match export {
        Some(Export::Saved(path)) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| export_filename(&card.city));
            lines.push(format!("📥 Saved {name}"));
        }
        Some(Export::Failed(e)) => lines.push(format!("⚠ Export failed: {e}")),
        None => {}
    }

    lines
}

fn metric(label: &str, value: &str) -> String {
    format!("{} {value}", pad(label, 16))
}

struct MapPin {
    coords: String,
    link: String,
}

/// Single-point map: coordinates and an OpenStreetMap link centered on them.
fn map_pin(card: &CityCard) -> MapPin {
    let (lat, lon) = (card.location.latitude, card.location.longitude);
    MapPin {
        coords: format!("{lat:.4}, {lon:.4}"),
        link: format!("osm.org/#map=10/{lat:.2}/{lon:.2}"),
    }
}

/// Grouped horizontal bars: per day a max bar directly above a min bar.
fn weekly_chart(card: &CityCard, width: usize) -> Vec<String> {
    let bar_width = width.saturating_sub(LABEL_WIDTH + VALUE_WIDTH + 2).max(1);

    let lo = card
        .daily
        .iter()
        .map(|d| d.temp_min_c.min(d.temp_max_c))
        .fold(0.0_f64, f64::min);
    let hi = card
        .daily
        .iter()
        .map(|d| d.temp_max_c.max(d.temp_min_c))
        .fold(lo, f64::max);
    let span = hi - lo;

    let bar = |value: f64, fill: char| -> String {
        let len = if span > 0.0 {
            (((value - lo) / span) * bar_width as f64).round() as usize
        } else {
            0
        };
        fill.to_string().repeat(len.min(bar_width))
    };

    let mut lines = vec!["📊 Weekly Temperature (°C)".to_string()];
    for day in &card.daily {
        lines.push(format!(
            "{} {} {}",
            pad(&day_label(day.date), LABEL_WIDTH),
            pad(&bar(day.temp_max_c, MAX_BAR), bar_width),
            day.temp_max_c
        ));
        lines.push(format!(
            "{} {} {}",
            " ".repeat(LABEL_WIDTH),
            pad(&bar(day.temp_min_c, MIN_BAR), bar_width),
            day.temp_min_c
        ));
    }
    lines.push(format!("{MAX_BAR} Max Temp   {MIN_BAR} Min Temp"));
    lines
}

fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(w)))
}

fn center(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    let left = width.saturating_sub(w) / 2;
    format!("{}{s}", " ".repeat(left))
}

const ELLIPSIS: char = '…';

/// Pad to exactly `width` display columns. Longer text is cut and ends in `…`.
fn fit(s: &str, width: usize) -> String {
    if UnicodeWidthStr::width(s) <= width {
        return pad(s, width);
    }

    let budget = width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    if width > 0 {
        out.push(ELLIPSIS);
        used += 1;
    }
    out.push_str(&" ".repeat(width - used));
    out
}
