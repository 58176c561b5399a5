use std::collections::BTreeMap;
use std::fmt;

/// One grammar point tile: the display text and its detail-page link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarPoint {
    text: String,
    link: String,
}

impl GrammarPoint {
    /// Build a point from raw tile text. Returns `None` for empty text.
    pub fn new(text: &str, link_base: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            link: format!("{}{}", link_base, urlencoding::encode(text)),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn link(&self) -> &str {
        &self.link
    }
}

/// Lessons carry no label of their own, only their position within a level.
pub type Lesson = Vec<GrammarPoint>;

/// JLPT level label. Variant order is the output order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    N5,
    N4,
    N3,
    N2,
    N1,
    NonJlpt,
    Unknown,
    /// Heading text that names no known level. Never written out.
    Other(String),
}

impl Level {
    /// Map an upper-cased `N<digit>` tag onto a level.
    pub fn from_tag(tag: &str) -> Level {
        match tag {
            "N5" => Level::N5,
            "N4" => Level::N4,
            "N3" => Level::N3,
            "N2" => Level::N2,
            "N1" => Level::N1,
            other => Level::Other(other.to_string()),
        }
    }

    pub fn is_output(&self) -> bool {
        !matches!(self, Level::Other(_))
    }

    pub fn label(&self) -> &str {
        match self {
            Level::N5 => "N5",
            Level::N4 => "N4",
            Level::N3 => "N3",
            Level::N2 => "N2",
            Level::N1 => "N1",
            Level::NonJlpt => "Non-JLPT",
            Level::Unknown => "Unknown N-Level",
            Level::Other(s) => s.as_str(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Level → lessons, in output priority order.
///
/// A level seen in the source but holding no lessons keeps an empty entry,
/// so "seen, no data" stays distinguishable from "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    levels: BTreeMap<Level, Vec<Lesson>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn ensure_level(&mut self, level: Level) {
        self.levels.entry(level).or_default();
    }

    /// Append a lesson under `level`. Empty lessons are discarded.
    pub(crate) fn push_lesson(&mut self, level: Level, lesson: Lesson) {
        let lessons = self.levels.entry(level).or_default();
        if !lesson.is_empty() {
            lessons.push(lesson);
        }
    }

    pub fn lessons(&self, level: &Level) -> Option<&[Lesson]> {
        self.levels.get(level).map(Vec::as_slice)
    }

    pub fn contains(&self, level: &Level) -> bool {
        self.levels.contains_key(level)
    }

    /// Every level the extractor saw, in priority order, including empty and
    /// unrecognised ones.
    pub fn iter(&self) -> impl Iterator<Item = (&Level, &[Lesson])> {
        self.levels.iter().map(|(l, v)| (l, v.as_slice()))
    }

    /// Levels that make it into the spreadsheet: known labels with data.
    pub fn output_levels(&self) -> impl Iterator<Item = (&Level, &[Lesson])> {
        self.iter()
            .filter(|(level, lessons)| level.is_output() && !lessons.is_empty())
    }

    pub fn has_output(&self) -> bool {
        self.output_levels().next().is_some()
    }

    /// Points across all output levels.
    pub fn point_count(&self) -> usize {
        self.output_levels()
            .flat_map(|(_, lessons)| lessons)
            .map(Vec::len)
            .sum()
    }

    /// Unrecognised labels and the number of points they hold.
    pub fn dropped_levels(&self) -> Vec<(&Level, usize)> {
        self.iter()
            .filter(|(level, _)| !level.is_output())
            .map(|(level, lessons)| (level, lessons.iter().map(Vec::len).sum()))
            .collect()
    }
}
