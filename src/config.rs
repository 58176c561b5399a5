use std::path::PathBuf;

pub const GRAMMAR_LIST_URL: &str = "https://bunpro.jp/grammar_points";
pub const GRAMMAR_POINT_BASE_URL: &str = "https://bunpro.jp/grammar_points/";
pub const USER_AGENT: &str = concat!("bunpro_scraper/", env!("CARGO_PKG_VERSION"));

pub const OUTPUT_FILE: &str = "bunpro_grammar_points_collapsible.xlsx";
pub const FALLBACK_FILE: &str = "bunpro_grammar_points_flat_fallback.xlsx";
pub const SHEET_NAME: &str = "Grammar Points";

/// Widths for the index, grammar point and link columns.
pub const COLUMN_WIDTHS: [f64; 3] = [5.0, 35.0, 60.0];

/// Where a run reads its markup from and writes its results to.
#[derive(Debug, Clone)]
pub struct Settings {
    pub url: String,
    pub link_base: String,
    pub input: Option<PathBuf>,
    pub output: PathBuf,
    pub fallback_output: PathBuf,
    pub json_output: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: GRAMMAR_LIST_URL.to_string(),
            link_base: GRAMMAR_POINT_BASE_URL.to_string(),
            input: None,
            output: PathBuf::from(OUTPUT_FILE),
            fallback_output: PathBuf::from(FALLBACK_FILE),
            json_output: None,
        }
    }
}
