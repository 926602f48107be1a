use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use weather_core::{
    CityOutcome, CityReport, Config, Dashboard, Language, export::write_weekly_csv,
    parse_cities,
};

use crate::{
    prompt,
    render::{Export, RenderOptions, Tile, render_page},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set default cities, language, layout and export directory.
    Configure,

    /// Show weather cards for a comma-separated list of cities.
    Show {
        /// City names, e.g. "New York, London, Tokyo". Defaults to the configured list.
        cities: Option<String>,

        /// Display language (display only; labels stay in English).
        #[arg(long)]
        language: Option<String>,

        /// Write `<city>_weather.csv` for every city into this directory.
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,

        /// Cards per grid row.
        #[arg(long)]
        per_row: Option<usize>,

        /// Prompt for the language and the city list.
        #[arg(short, long)]
        interactive: bool,
    },
}

/// Page settings resolved once, before any city is fetched.
#[derive(Debug)]
struct PageSettings {
    language: Language,
    cities: Vec<String>,
    cards_per_row: usize,
    export_dir: Option<PathBuf>,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => {
                let updated = prompt::configure(config)?;
                let path = updated.save()?;
                println!("Configuration saved to {}", path.display());
            }
            Command::Show { cities, language, export, per_row, interactive } => {
                let mut language = match language {
                    Some(l) => Language::try_from(l.as_str())?,
                    None => config.language()?,
                };
                let mut input = cities.unwrap_or_else(|| config.default_cities().to_string());

                if interactive {
                    language = prompt::select_language(language)?;
                    input = prompt::city_list(&input)?;
                }

                let settings = PageSettings {
                    language,
                    cities: parse_cities(&input),
                    cards_per_row: per_row.unwrap_or_else(|| config.cards_per_row()),
                    export_dir: export.or(config.export_dir.clone()),
                };

                show(&config, settings).await?;
            }
        }

        Ok(())
    }
}

async fn show(config: &Config, settings: PageSettings) -> Result<()> {
    tracing::debug!("Rendering {} cities: {:?}", settings.cities.len(), settings.cities);

    let dashboard = Dashboard::from_config(config)?;
    let reports = dashboard.build(&settings.cities).await;

    let tiles: Vec<Tile> = reports
        .into_iter()
        .map(|report| {
            let export = settings.export_dir.as_deref().and_then(|dir| export_csv(&report, dir));
            Tile { report, export }
        })
        .collect();

    let opts = RenderOptions::new(settings.cards_per_row, Utc::now());
    print!("{}", render_page(settings.language, &tiles, &opts));

    Ok(())
}

/// Download action for one card; only complete cards have data to export.
fn export_csv(report: &CityReport, dir: &Path) -> Option<Export> {
    let CityOutcome::Ready(card) = &report.outcome else {
        return None;
    };

    Some(match write_weekly_csv(card, dir) {
        Ok(path) => Export::Saved(path),
        Err(e) => {
            tracing::warn!("CSV export for '{}' failed: {:#}", card.city, e);
            Export::Failed(e.to_string())
        }
    })
}
