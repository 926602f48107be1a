use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{format::day_label, model::CityCard};

pub const CSV_HEADER: [&str; 3] = ["Day", "Max Temp (°C)", "Min Temp (°C)"];

/// File name offered for a city's weekly data.
///
/// Path separators and characters that are not portable in file names become
/// `_`, so the result is always a single component inside the export directory.
pub fn export_filename(city: &str) -> String {
    let safe: String = city
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{safe}_weather.csv")
}

/// Weekly max/min temperatures as UTF-8 CSV, one row per forecast day.
pub fn weekly_csv(card: &CityCard) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADER).context("Failed to write CSV header")?;
    for day in &card.daily {
        wtr.write_record([
            day_label(day.date),
            day.temp_max_c.to_string(),
            day.temp_min_c.to_string(),
        ])
        .with_context(|| format!("Failed to write CSV row for {}", day.date))?;
    }

    wtr.into_inner().map_err(|e| anyhow!("Failed to flush CSV: {}", e.error()))
}

/// Write the city's CSV into `dir`, creating it if needed. Returns the file path.
pub fn write_weekly_csv(card: &CityCard, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;

    let path = dir.join(export_filename(&card.city));
    let bytes = weekly_csv(card)?;

    fs::write(&path, bytes)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;

    tracing::debug!("Exported {} days to {}", card.daily.len(), path.display());
    Ok(path)
}
