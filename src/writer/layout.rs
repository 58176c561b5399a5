use crate::catalog::{Catalog, GrammarPoint, Level};

/// One spreadsheet row, in sheet order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row<'a> {
    LevelHeader(&'a Level),
    Spacer,
    /// 1-based lesson number within its level.
    LessonHeader(usize),
    ColumnHeader,
    /// 1-based index within the lesson.
    Point { index: usize, point: &'a GrammarPoint },
    LessonEnd,
    LevelEnd,
}

/// Where a row sits in the sheet's outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outline {
    pub depth: u8,
    pub hidden: bool,
}

impl Row<'_> {
    pub fn outline(&self) -> Outline {
        let (depth, hidden) = match self {
            Row::LevelHeader(_) | Row::LevelEnd => (0, false),
            Row::Spacer | Row::LessonHeader(_) => (1, false),
            Row::ColumnHeader | Row::Point { .. } | Row::LessonEnd => (2, true),
        };
        Outline { depth, hidden }
    }
}

/// A run of consecutive rows grouped one outline level deeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    pub first: usize,
    pub last: usize,
    pub collapsed: bool,
}

/// Lay out every output level with data as a flat list of rows.
pub fn plan(catalog: &Catalog) -> Vec<Row<'_>> {
    let mut rows = Vec::new();
    for (level, lessons) in catalog.output_levels() {
        rows.push(Row::LevelHeader(level));
        rows.push(Row::Spacer);
        for (lesson_idx, lesson) in lessons.iter().enumerate() {
            rows.push(Row::LessonHeader(lesson_idx + 1));
            rows.push(Row::ColumnHeader);
            rows.extend(
                lesson
                    .iter()
                    .enumerate()
                    .map(|(i, point)| Row::Point { index: i + 1, point }),
            );
            rows.push(Row::LessonEnd);
        }
        rows.push(Row::LevelEnd);
    }
    rows
}

/// Outline groups for a row plan, outermost first.
///
/// Each maximal run of rows at depth >= d becomes one group at level d. A
/// run made only of hidden rows starts collapsed. Every collapsed run is
/// followed by a visible row, which carries the group's toggle.
pub fn outline_groups(rows: &[Row]) -> Vec<Group> {
    let max_depth = rows.iter().map(|r| r.outline().depth).max().unwrap_or(0);
    let mut groups = Vec::new();

    for depth in 1..=max_depth {
        let mut start: Option<usize> = None;
        for i in 0..=rows.len() {
            let inside = rows.get(i).is_some_and(|r| r.outline().depth >= depth);
            match (inside, start) {
                (true, None) => start = Some(i),
                (false, Some(first)) => {
                    let last = i - 1;
                    let collapsed = rows[first..=last].iter().all(|r| r.outline().hidden);
                    groups.push(Group { first, last, collapsed });
                    start = None;
                }
                _ => {}
            }
        }
    }

    groups
}

pub fn point_rows(rows: &[Row]) -> usize {
    rows.iter().filter(|r| matches!(r, Row::Point { .. })).count()
}
