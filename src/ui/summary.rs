// RoleLens - ui/summary.rs
//
// Stat cards for the current view: the total, then one card per canonical
// status present in the unauth column.

use crate::app::state::AppState;
use std::fmt::Write;

/// Render the stat cards on one line, e.g. `Total: 3 | ACCESSIBLE: 2 | DENIED: 1`.
///
/// When the report has no unauth column only the total is shown, with a
/// note naming the missing column.
pub fn render(state: &AppState) -> String {
    let stats = &state.view().stats;
    let mut out = format!("Total: {}", stats.total);

    for card in &stats.breakdown {
        let _ = write!(out, " | {}: {}", card.status, card.count);
    }

    match state.schema().unauth() {
        Some(unauth) => {
            let _ = write!(out, "  (by '{}')", state.schema().role_name(unauth));
        }
        None => out.push_str("  (no unauth column; status breakdown unavailable)"),
    }

    out.push('\n');
    out
}
