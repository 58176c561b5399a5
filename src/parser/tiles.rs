use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::catalog::{GrammarPoint, Lesson};

const TEXT_ATTR: &str = "data-grammar-point";

static TILE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"grammar-point-id-\d+").unwrap());
static LESSON_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul.js_search-container_tiles").unwrap());
static TILE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li[id]").unwrap());

/// Every tile list in a level section, one lesson per list.
///
/// `None` when the section has no tile lists at all. Lessons that end up
/// with no usable tiles are left out.
pub fn extract_lessons(section: ElementRef, link_base: &str) -> Option<Vec<Lesson>> {
    let lists: Vec<_> = section.select(&LESSON_SEL).collect();
    if lists.is_empty() {
        return None;
    }

    Some(
        lists
            .into_iter()
            .map(|list| extract_tiles(list, link_base))
            .filter(|lesson| !lesson.is_empty())
            .collect(),
    )
}

/// Tiles whose id matches and which carry non-empty text. Anything else is skipped.
pub fn extract_tiles(list: ElementRef, link_base: &str) -> Lesson {
    list.select(&TILE_SEL)
        .filter(|tile| tile.value().id().is_some_and(|id| TILE_ID_RE.is_match(id)))
        .filter_map(|tile| tile.value().attr(TEXT_ATTR))
        .filter_map(|text| GrammarPoint::new(text, link_base))
        .collect()
}
