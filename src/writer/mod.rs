pub mod json;
pub mod layout;
pub mod xlsx;

use std::path::{Path, PathBuf};

use rust_xlsxwriter::XlsxError;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::catalog::{Catalog, GrammarPoint, Level};

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("could not save fallback file {path}: {source}")]
    Fallback {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },
    #[error("could not encode JSON export: {0}")]
    JsonEncode(#[from] serde_json::Error),
    #[error("could not write JSON export {path}: {source}")]
    JsonIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What an export run ended up producing.
#[derive(Debug)]
pub enum ExportOutcome {
    /// No level had any data; nothing was written.
    NothingScraped,
    Formatted { path: PathBuf, points: usize },
    /// Formatting failed and the flat table was written instead.
    Fallback {
        path: PathBuf,
        rows: usize,
        cause: XlsxError,
    },
    /// Formatting failed and there was nothing to flatten. `export` returns
    /// `NothingScraped` first for any catalog `flatten` would leave empty, so
    /// this only guards the two drifting apart.
    NoFallbackData { cause: XlsxError },
}

/// One row of the flat fallback table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatRecord<'a> {
    pub level: &'a Level,
    pub point: &'a GrammarPoint,
}

/// Every output record in sheet order, without lesson structure.
pub fn flatten(catalog: &Catalog) -> Vec<FlatRecord<'_>> {
    catalog
        .output_levels()
        .flat_map(|(level, lessons)| {
            lessons
                .iter()
                .flatten()
                .map(move |point| FlatRecord { level, point })
        })
        .collect()
}

/// Write the catalog as a collapsible sheet, falling back to a flat table.
///
/// Only a failed fallback write is an error.
pub fn export(
    catalog: Catalog,
    output: &Path,
    fallback: &Path,
) -> Result<ExportOutcome, WriteError> {
    if !catalog.has_output() {
        return Ok(ExportOutcome::NothingScraped);
    }

    let cause = match xlsx::write_formatted(&catalog, output) {
        Ok(points) => {
            debug_assert_eq!(points, catalog.point_count());
            info!("Wrote {} grammar points to {}", points, output.display());
            return Ok(ExportOutcome::Formatted {
                path: output.to_path_buf(),
                points,
            });
        }
        Err(e) => e,
    };

    warn!("Formatted export to {} failed: {}", output.display(), cause);
    let records = flatten(&catalog);
    if records.is_empty() {
        return Ok(ExportOutcome::NoFallbackData { cause });
    }

    xlsx::write_flat(&records, fallback).map_err(|source| {
        error!("Fallback export to {} failed: {}", fallback.display(), source);
        WriteError::Fallback {
            path: fallback.to_path_buf(),
            source,
        }
    })?;

    info!("Wrote {} flat rows to {}", records.len(), fallback.display());
    Ok(ExportOutcome::Fallback {
        path: fallback.to_path_buf(),
        rows: records.len(),
        cause,
    })
}
