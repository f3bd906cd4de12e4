// RoleLens - core/export.rs
//
// CSV and JSON export of the current view.
// Core layer: writes to any Write trait object; the caller owns the file.

use crate::core::codec;
use crate::core::model::{Dataset, RowRecord};
use crate::core::stats::Stats;
use crate::util::error::ExportError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Export the rows selected by `indices` (in that order) as CSV with the
/// report's original headers.
pub fn export_csv<W: Write>(
    dataset: &Dataset,
    indices: &[usize],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let rows = indices.iter().filter_map(|&idx| dataset.rows().get(idx));
    codec::write_csv(dataset.headers(), rows, writer).map_err(|e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    })
}

#[derive(Serialize)]
struct JsonRow<'a> {
    interesting: bool,
    fields: RowRecord<'a>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    headers: &'a [String],
    stats: &'a Stats,
    rows: Vec<JsonRow<'a>>,
}

/// Export the view as a JSON document:
/// `{ "headers": [...], "stats": {...}, "rows": [{ "interesting", "fields" }] }`.
pub fn export_json<W: Write>(
    dataset: &Dataset,
    indices: &[usize],
    interesting: &[bool],
    stats: &Stats,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let rows: Vec<JsonRow<'_>> = indices
        .iter()
        .zip(interesting)
        .filter_map(|(&idx, &interesting)| {
            dataset.rows().get(idx).map(|row| JsonRow {
                interesting,
                fields: RowRecord {
                    headers: dataset.headers(),
                    row,
                },
            })
        })
        .collect();
    let count = rows.len();

    let report = JsonReport {
        headers: dataset.headers(),
        stats,
        rows,
    };
    serde_json::to_writer_pretty(writer, &report).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(count)
}
