use std::path::Path;

use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, FormatUnderline, Url, Workbook, XlsxError,
};

use super::layout::{self, Row};
use super::FlatRecord;
use crate::catalog::{Catalog, Level};
use crate::config::{COLUMN_WIDTHS, SHEET_NAME};

const HEADER_ROW_HEIGHT: f64 = 25.0;
const COLUMN_TITLES: [&str; 3] = ["#", "Grammar Point", "Bunpro Link"];
const FLAT_TITLES: [&str; 3] = ["N-Level", "Grammar Point", "Bunpro Link"];

/// Header fill and font colour per level, easiest (green) to hardest (red).
fn level_colors(level: &Level) -> (u32, Option<Color>) {
    match level {
        Level::N5 => (0xD9EAD3, None),
        Level::N4 => (0xC9E2B6, None),
        Level::N3 => (0xFFF2CC, None),
        Level::N2 => (0xFFD8B2, None),
        Level::N1 => (0xEA9999, None),
        Level::NonJlpt => (0xD9D9D9, None),
        Level::Unknown | Level::Other(_) => (0xFF0000, Some(Color::White)),
    }
}

fn level_format(level: &Level) -> Format {
    let (fill, font) = level_colors(level);
    let format = Format::new()
        .set_bold()
        .set_font_size(16)
        .set_background_color(Color::RGB(fill))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);
    match font {
        Some(color) => format.set_font_color(color),
        None => format,
    }
}

struct Styles {
    lesson: Format,
    columns: Format,
    data: Format,
    link: Format,
}

impl Styles {
    fn new() -> Self {
        Self {
            lesson: Format::new()
                .set_bold()
                .set_font_size(12)
                .set_background_color(Color::RGB(0xF2F2F2))
                .set_border_bottom(FormatBorder::Thin),
            columns: Format::new()
                .set_bold()
                .set_font_size(11)
                .set_background_color(Color::RGB(0xEFEFEF)),
            data: Format::new().set_font_size(10),
            link: Format::new()
                .set_font_size(10)
                .set_font_color(Color::Blue)
                .set_underline(FormatUnderline::Single),
        }
    }
}

/// Write the grouped, collapsible sheet. Returns the number of grammar point
/// rows written.
pub fn write_formatted(catalog: &Catalog, path: &Path) -> Result<usize, XlsxError> {
    let rows = layout::plan(catalog);
    let styles = Styles::new();

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    for (col, width) in COLUMN_WIDTHS.into_iter().enumerate() {
        sheet.set_column_width(col as u16, width)?;
    }

    let mut written = 0;
    for (i, row) in rows.iter().enumerate() {
        let r = i as u32;
        match row {
            Row::LevelHeader(level) => {
                let title = format!("{} Grammar", level);
                sheet.merge_range(r, 0, r, 2, &title, &level_format(level))?;
                sheet.set_row_height(r, HEADER_ROW_HEIGHT)?;
            }
            Row::LessonHeader(n) => {
                sheet.write_string_with_format(r, 0, format!("Lesson {}", n), &styles.lesson)?;
            }
            Row::ColumnHeader => {
                for (col, title) in COLUMN_TITLES.into_iter().enumerate() {
                    sheet.write_string_with_format(r, col as u16, title, &styles.columns)?;
                }
            }
            Row::Point { index, point } => {
                sheet.write_string_with_format(r, 0, format!("{}.", index), &styles.data)?;
                sheet.write_string_with_format(r, 1, point.text(), &styles.data)?;
                sheet.write_url_with_format(r, 2, Url::new(point.link()), &styles.link)?;
                written += 1;
            }
            Row::Spacer | Row::LessonEnd | Row::LevelEnd => {}
        }
    }

    // Outline symbols stay below each group, where rust_xlsxwriter puts the
    // collapsed flag: on the row right after the group.
    for group in layout::outline_groups(&rows) {
        let (first, last) = (group.first as u32, group.last as u32);
        if group.collapsed {
            sheet.group_rows_collapsed(first, last)?;
        } else {
            sheet.group_rows(first, last)?;
        }
    }

    debug_assert_eq!(written, layout::point_rows(&rows));
    workbook.save(path)?;
    Ok(written)
}

/// Write records as a plain table: a title row, then one row per record.
pub fn write_flat(records: &[FlatRecord], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, title) in FLAT_TITLES.into_iter().enumerate() {
        sheet.write_string(0, col as u16, title)?;
    }
    for (i, record) in records.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, record.level.label())?;
        sheet.write_string(r, 1, record.point.text())?;
        sheet.write_string(r, 2, record.point.link())?;
    }

    workbook.save(path)?;
    Ok(())
}
