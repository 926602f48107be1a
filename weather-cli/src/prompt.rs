//! Interactive prompts: the language selector, the city list field and
//! `weather configure`.

use anyhow::{Context, Result};
use inquire::{CustomType, Select, Text};
use std::path::PathBuf;

use weather_core::{Config, Language};

pub fn select_language(current: Language) -> Result<Language> {
    let options = Language::all().to_vec();
    let start = options.iter().position(|l| *l == current).unwrap_or(0);

    Select::new("🌐 Choose language:", options)
        .with_starting_cursor(start)
        .prompt()
        .context("Language selection cancelled")
}

pub fn city_list(default: &str) -> Result<String> {
    Text::new("🏙 Enter city names:")
        .with_default(default)
        .with_help_message("Comma-separated, e.g. Paris, Rome")
        .prompt()
        .context("City input cancelled")
}

/// Ask for every dashboard default, starting from the current values.
pub fn configure(mut config: Config) -> Result<Config> {
    let cities = city_list(config.default_cities())?;
    config.default_cities = Some(cities);

    let language = select_language(config.language().unwrap_or_default())?;
    config.set_language(language);

    let per_row = CustomType::<usize>::new("Cards per row:")
        .with_default(config.cards_per_row())
        .with_error_message("Please enter a whole number")
        .prompt()
        .context("Cards per row input cancelled")?;
    config.cards_per_row = Some(per_row.max(1));

    let current_dir = config
        .export_dir
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let export_dir = Text::new("CSV export directory (empty to disable):")
        .with_default(&current_dir)
        .prompt()
        .context("Export directory input cancelled")?;
    let export_dir = export_dir.trim();
    config.export_dir = (!export_dir.is_empty()).then(|| PathBuf::from(export_dir));

    Ok(config)
}
