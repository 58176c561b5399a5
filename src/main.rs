mod catalog;
mod config;
mod fetch;
mod parser;
mod writer;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::warn;

use catalog::Catalog;
use config::Settings;
use writer::ExportOutcome;

#[derive(Parser)]
#[command(
    name = "bunpro_scraper",
    about = "Scrape Bunpro's grammar point index into a collapsible spreadsheet"
)]
struct Cli {
    /// Parse a saved copy of the grammar page instead of fetching it
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Spreadsheet to write
    #[arg(short, long, default_value = config::OUTPUT_FILE)]
    output: PathBuf,
    /// Flat table written when the formatted spreadsheet fails
    #[arg(long, default_value = config::FALLBACK_FILE)]
    fallback_output: PathBuf,
    /// Also export the catalog as JSON for the grammar viewer
    #[arg(long)]
    json: Option<PathBuf>,
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            output: cli.output,
            fallback_output: cli.fallback_output,
            json_output: cli.json,
            ..Settings::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let settings = Settings::from(Cli::parse());

    println!("--- Starting Bunpro Grammar Scraper (Collapsible Output) ---");
    if let Err(e) = run(&settings) {
        println!("Error: {:#}", e);
    }
    println!("\n--- Scraper Finished ---");

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("Done in {}", format_duration(elapsed));
    }

    Ok(())
}

/// Fetch (or load), extract, export. Every failure comes back as an error for
/// `main` to print; nothing here panics.
fn run(settings: &Settings) -> anyhow::Result<()> {
    let html = match &settings.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            println!("Fetching data from: {}\n", settings.url);
            fetch::fetch_page(&settings.url).context("Error fetching the page")?
        }
    };

    let catalog = parser::extract(&html, &settings.link_base);

    if let Some(path) = &settings.json_output {
        export_json(&catalog, path);
    }

    match writer::export(catalog, &settings.output, &settings.fallback_output) {
        Ok(ExportOutcome::NothingScraped) => {
            println!(
                "\nNo grammar points were scraped. Please check the website structure or your internet connection."
            );
        }
        Ok(ExportOutcome::Formatted { path, points }) => {
            println!(
                "\nSuccessfully scraped {} grammar points and saved to '{}' with hierarchical and collapsible formatting.",
                points,
                path.display()
            );
        }
        Ok(ExportOutcome::Fallback { path, rows, cause }) => {
            println!("Error saving to Excel with collapsible formatting: {}.", cause);
            println!(
                "Saved {} rows without hierarchical formatting to '{}' as a fallback.",
                rows,
                path.display()
            );
        }
        Ok(ExportOutcome::NoFallbackData { cause }) => {
            println!("Error saving to Excel with collapsible formatting: {}.", cause);
            println!("No data collected for even a flat fallback save.");
        }
        Err(e) => {
            println!("Critical error: Could not save to Excel at all: {}", e);
        }
    }

    Ok(())
}

/// The JSON copy is optional; a failure here never blocks the spreadsheet.
fn export_json(catalog: &Catalog, path: &Path) {
    if !catalog.has_output() {
        warn!("Nothing to export to {}", path.display());
        return;
    }
    match writer::json::write_json(catalog, path) {
        Ok(()) => println!("Saved JSON catalog to '{}'.", path.display()),
        Err(e) => {
            warn!("JSON export failed: {}", e);
            println!("Could not save JSON catalog: {}", e);
        }
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
