pub mod levels;
pub mod tiles;

use std::sync::LazyLock;

use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::catalog::{Catalog, Level};

static RESULTS_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul.search-container_results").unwrap());
static LEVEL_SECTION_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.search-container_level").unwrap());

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not find the main 'search-container_results' list; the site structure might have changed")]
    ResultsMissing,
    #[error("could not find any 'search-container_level' sections; the site structure might have changed")]
    LevelSectionsMissing,
}

/// Parse the grammar index page into a catalog.
///
/// Structural failures are logged and yield an empty catalog.
pub fn extract(html: &str, link_base: &str) -> Catalog {
    match try_extract(html, link_base) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("{}", e);
            Catalog::new()
        }
    }
}

/// Walk level sections, then their lesson lists, then the tiles in each list.
pub fn try_extract(html: &str, link_base: &str) -> Result<Catalog, ExtractError> {
    let doc = Html::parse_document(html);
    let results = doc
        .select(&RESULTS_SEL)
        .next()
        .ok_or(ExtractError::ResultsMissing)?;

    let sections: Vec<_> = results.select(&LEVEL_SECTION_SEL).collect();
    if sections.is_empty() {
        return Err(ExtractError::LevelSectionsMissing);
    }

    let mut catalog = Catalog::new();
    for section in sections {
        let level = levels::detect_level(section);
        match &level {
            Level::Unknown => {
                warn!("Level section without a recognisable label, filing under {}", level)
            }
            _ => info!("Processing {}...", level),
        }

        if catalog.contains(&level) {
            warn!("Second section labelled {}, merging its lessons", level);
        }
        catalog.ensure_level(level.clone());

        match tiles::extract_lessons(section, link_base) {
            Some(lessons) => {
                for lesson in lessons {
                    catalog.push_lesson(level.clone(), lesson);
                }
                let total = catalog.lessons(&level).map_or(0, <[_]>::len);
                debug!("{}: {} lessons so far", level, total);
            }
            None => warn!("No 'js_search-container_tiles' lists found for {}, skipping", level),
        }
    }

    for (level, points) in catalog.dropped_levels() {
        warn!("Dropping unrecognised level '{}' ({} grammar points)", level, points);
    }

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://bunpro.jp/grammar_points/";

    fn fixture() -> String {
        std::fs::read_to_string("tests/fixtures/grammar_points.html").unwrap()
    }

    fn texts(catalog: &Catalog, level: &Level) -> Vec<Vec<String>> {
        catalog
            .lessons(level)
            .unwrap()
            .iter()
            .map(|lesson| lesson.iter().map(|gp| gp.text().to_string()).collect())
            .collect()
    }

    #[test]
    fn two_lessons_in_one_level() {
        let html = r#"
            <ul class="search-container_results">
              <li class="search-container_level">
                <h2>N5 Grammar</h2>
                <ul class="js_search-container_tiles">
                  <li id="grammar-point-id-1" data-grammar-point="A"></li>
                  <li id="grammar-point-id-2" data-grammar-point="B"></li>
                </ul>
                <ul class="js_search-container_tiles">
                  <li id="grammar-point-id-3" data-grammar-point="C"></li>
                </ul>
              </li>
            </ul>"#;
        let catalog = try_extract(html, BASE).unwrap();
        assert_eq!(texts(&catalog, &Level::N5), vec![vec!["A", "B"], vec!["C"]]);
        assert_eq!(catalog.iter().count(), 1);
    }

    #[test]
    fn repeated_level_sections_merge_in_document_order() {
        let html = r#"
            <ul class="search-container_results">
              <li class="search-container_level">
                <h2>N5 Grammar</h2>
                <ul class="js_search-container_tiles">
                  <li id="grammar-point-id-1" data-grammar-point="A"></li>
                </ul>
              </li>
              <li class="search-container_level">
                <h2>N4 Grammar</h2>
                <ul class="js_search-container_tiles">
                  <li id="grammar-point-id-2" data-grammar-point="X"></li>
                </ul>
              </li>
              <li class="search-container_level">
                <h2>N5 Grammar</h2>
                <ul class="js_search-container_tiles">
                  <li id="grammar-point-id-3" data-grammar-point="B"></li>
                  <li id="grammar-point-id-4" data-grammar-point="C"></li>
                </ul>
              </li>
            </ul>"#;
        let catalog = try_extract(html, BASE).unwrap();
        assert_eq!(texts(&catalog, &Level::N5), vec![vec!["A"], vec!["B", "C"]]);
        assert_eq!(texts(&catalog, &Level::N4), vec![vec!["X"]]);
    }

    #[test]
    fn missing_results_container_is_empty() {
        let html = r#"<ul class="something-else"><li class="search-container_level"></li></ul>"#;
        assert!(matches!(try_extract(html, BASE), Err(ExtractError::ResultsMissing)));
        assert_eq!(extract(html, BASE), Catalog::new());
    }

    #[test]
    fn missing_level_sections_is_empty() {
        let html = r#"<ul class="search-container_results"><li class="other"></li></ul>"#;
        assert!(matches!(
            try_extract(html, BASE),
            Err(ExtractError::LevelSectionsMissing)
        ));
        assert_eq!(extract(html, BASE), Catalog::new());
    }

    #[test]
    fn fixture_levels_and_lessons() {
        let catalog = try_extract(&fixture(), BASE).unwrap();

        assert_eq!(texts(&catalog, &Level::N5), vec![vec!["だ", "です"], vec!["じゃない"]]);
        assert_eq!(
            texts(&catalog, &Level::N4),
            vec![vec!["てもいい", "〜ても/でも"]]
        );
        assert_eq!(texts(&catalog, &Level::NonJlpt), vec![vec!["Verb + ましょう"]]);
        assert_eq!(texts(&catalog, &Level::Unknown), vec![vec!["謎"]]);

        // Seen without any lesson lists.
        assert!(catalog.contains(&Level::N2));
        assert!(catalog.lessons(&Level::N2).unwrap().is_empty());

        assert!(!catalog.contains(&Level::N1));
        assert!(catalog.contains(&Level::Other("Bonus".into())));
    }

    #[test]
    fn fixture_lessons_are_never_empty() {
        let catalog = try_extract(&fixture(), BASE).unwrap();
        assert!(catalog
            .iter()
            .flat_map(|(_, lessons)| lessons)
            .all(|lesson| !lesson.is_empty()));
    }

    #[test]
    fn fixture_output_order_ignores_document_order() {
        let catalog = try_extract(&fixture(), BASE).unwrap();
        let order: Vec<_> = catalog.output_levels().map(|(l, _)| l.label()).collect();
        assert_eq!(order, ["N5", "N4", "Non-JLPT", "Unknown N-Level"]);
        assert_eq!(catalog.point_count(), 7);
    }

    #[test]
    fn extraction_is_idempotent() {
        let html = fixture();
        assert_eq!(extract(&html, BASE), extract(&html, BASE));
    }

    #[test]
    fn links_decode_back_to_text() {
        let catalog = try_extract(&fixture(), BASE).unwrap();
        for (_, lessons) in catalog.iter() {
            for gp in lessons.iter().flatten() {
                let segment = gp.link().strip_prefix(BASE).unwrap();
                assert_eq!(urlencoding::decode(segment).unwrap(), gp.text());
            }
        }
    }
}
