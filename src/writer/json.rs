use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use super::WriteError;
use crate::catalog::Catalog;

#[derive(Debug, Serialize)]
struct LessonEntry<'a> {
    lesson_num: usize,
    grammar_points: Vec<PointEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct PointEntry<'a> {
    text: &'a str,
    link: &'a str,
}

/// Catalog as `{ "<level>": [{ "lesson_num", "grammar_points": [{ "text", "link" }] }] }`,
/// the shape the grammar viewer page loads.
pub fn to_value(catalog: &Catalog) -> Result<Value, serde_json::Error> {
    let mut levels = Map::new();
    for (level, lessons) in catalog.output_levels() {
        let entries: Vec<LessonEntry> = lessons
            .iter()
            .enumerate()
            .map(|(i, lesson)| LessonEntry {
                lesson_num: i + 1,
                grammar_points: lesson
                    .iter()
                    .map(|gp| PointEntry {
                        text: gp.text(),
                        link: gp.link(),
                    })
                    .collect(),
            })
            .collect();
        levels.insert(level.label().to_string(), serde_json::to_value(entries)?);
    }
    Ok(Value::Object(levels))
}

pub fn write_json(catalog: &Catalog, path: &Path) -> Result<(), WriteError> {
    let body = serde_json::to_string_pretty(&to_value(catalog)?)?;
    std::fs::write(path, body).map_err(|source| WriteError::JsonIo {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{GrammarPoint, Level};
    use serde_json::json;

    const BASE: &str = "https://bunpro.jp/grammar_points/";

    #[test]
    fn lessons_are_numbered_per_level() {
        let mut catalog = Catalog::new();
        let gp = |t: &str| GrammarPoint::new(t, BASE).unwrap();
        catalog.push_lesson(Level::N5, vec![gp("A"), gp("B")]);
        catalog.push_lesson(Level::N5, vec![gp("C")]);
        catalog.push_lesson(Level::N2, Vec::new());

        let value = to_value(&catalog).unwrap();
        assert_eq!(
            value,
            json!({
                "N5": [
                    { "lesson_num": 1, "grammar_points": [
                        { "text": "A", "link": "https://bunpro.jp/grammar_points/A" },
                        { "text": "B", "link": "https://bunpro.jp/grammar_points/B" }
                    ]},
                    { "lesson_num": 2, "grammar_points": [
                        { "text": "C", "link": "https://bunpro.jp/grammar_points/C" }
                    ]}
                ]
            })
        );
    }

    #[test]
    fn writes_pretty_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grammar.json");
        let mut catalog = Catalog::new();
        catalog.push_lesson(Level::Unknown, vec![GrammarPoint::new("謎", BASE).unwrap()]);

        write_json(&catalog, &path).unwrap();
        let parsed: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["Unknown N-Level"][0]["grammar_points"][0]["text"], "謎");
    }
}
