// RoleLens - ui/table.rs
//
// Plain-text table of the current view.
//
// Layout: marker column ("*" on interesting rows), 1-based position in the
// view, then every report column. The sorted column header carries a
// direction arrow. URLs wider than the configured width are truncated with
// "...". Output is capped at `max_rows` rows.

use crate::app::state::AppState;
use crate::util::constants::INTERESTING_MARKER;
use std::fmt::Write;

const COLUMN_GAP: &str = "  ";
const ELLIPSIS: &str = "...";

/// Render options taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct TableOptions {
    pub max_rows: usize,
    pub url_width: usize,
}

/// Render the view as an aligned text table followed by the
/// "Showing N of M endpoints" footer.
pub fn render(state: &AppState, options: TableOptions) -> String {
    let schema = state.schema();
    let url_idx = schema.url_column().index();

    let mut headers: Vec<String> = schema.headers().to_vec();
    if let Some(column) = state.sort().column {
        if let Some(name) = headers.get_mut(column.index()) {
            name.push(' ');
            name.push_str(state.sort().direction.arrow());
        }
    }

    let shown: Vec<(bool, Vec<String>)> = state
        .view_rows()
        .take(options.max_rows)
        .map(|(row, interesting)| {
            let cells = row
                .values()
                .iter()
                .enumerate()
                .map(|(idx, value)| {
                    if idx == url_idx {
                        truncate(value, options.url_width)
                    } else {
                        value.clone()
                    }
                })
                .collect();
            (interesting, cells)
        })
        .collect();

    let number_width = shown.len().max(1).to_string().len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for (_, cells) in &shown {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let marker_width = INTERESTING_MARKER.chars().count();
    let mut out = String::new();

    let _ = write!(out, "{:marker_width$} {:>number_width$}", "", "#");
    for (header, &width) in headers.iter().zip(&widths) {
        let _ = write!(out, "{COLUMN_GAP}{header:<width$}");
    }
    out.truncate(out.trim_end().len());
    out.push('\n');

    for (pos, (interesting, cells)) in shown.iter().enumerate() {
        let marker = if *interesting { INTERESTING_MARKER } else { "" };
        let _ = write!(out, "{marker:marker_width$} {:>number_width$}", pos + 1);
        for (cell, &width) in cells.iter().zip(&widths) {
            let _ = write!(out, "{COLUMN_GAP}{cell:<width$}");
        }
        out.truncate(out.trim_end().len());
        out.push('\n');
    }

    let total_shown = state.view().indices.len();
    if total_shown > shown.len() {
        let _ = writeln!(
            out,
            "... {} more rows (raise [display] max_rows to see them)",
            total_shown - shown.len()
        );
    }

    let _ = writeln!(
        out,
        "Showing {total_shown} of {} endpoints",
        state.dataset().len()
    );
    out
}

/// Cut `value` to at most `width` characters, ending in "..." when cut.
fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let keep = width.saturating_sub(ELLIPSIS.len());
    let mut cut: String = value.chars().take(keep).collect();
    cut.push_str(ELLIPSIS);
    cut
}
