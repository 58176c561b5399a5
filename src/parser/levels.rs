use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::catalog::Level;

static LEVEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(N\d|No JLPT Level)").unwrap());
static HEADING_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2, h3, strong").unwrap());
static TEXT_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div, span").unwrap());

/// Work out which level a `search-container_level` section belongs to.
///
/// Prefers a heading element; otherwise the first div/span whose text
/// mentions a level. A section with neither is `Unknown`.
pub fn detect_level(section: ElementRef) -> Level {
    let heading = section.select(&HEADING_SEL).next().or_else(|| {
        section
            .select(&TEXT_SEL)
            .find(|el| LEVEL_RE.is_match(&el.text().collect::<String>()))
    });

    match heading {
        Some(el) => parse_label(&collapse_whitespace(el)),
        None => Level::Unknown,
    }
}

/// Normalise heading text into a level label.
pub fn parse_label(text: &str) -> Level {
    if let Some(m) = LEVEL_RE.find(text) {
        let tag = m.as_str().to_uppercase();
        return if tag == "NO JLPT LEVEL" {
            Level::NonJlpt
        } else {
            Level::from_tag(&tag)
        };
    }

    let cleaned = text.replace("Grammar", "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        Level::Unknown
    } else if cleaned.eq_ignore_ascii_case("non-jlpt") {
        Level::NonJlpt
    } else {
        Level::Other(cleaned.to_string())
    }
}

fn collapse_whitespace(el: ElementRef) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
