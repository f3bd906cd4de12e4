// RoleLens - core/stats.rs
//
// Summary counts for the current view: row total plus the canonical status
// breakdown of the unauth column.

use crate::core::model::{Row, Status};
use crate::core::schema::Schema;
use serde::Serialize;

/// Number of view rows whose unauth outcome is `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: Status,
    pub count: usize,
}

/// Aggregate statistics for a view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Rows in the view.
    pub total: usize,

    /// Non-zero counts in canonical status order. Empty when the report
    /// has no unauth column.
    pub breakdown: Vec<StatusCount>,
}

impl Stats {
    /// Count for a single status (0 when absent from the breakdown).
    pub fn count(&self, status: Status) -> usize {
        self.breakdown
            .iter()
            .find(|c| c.status == status)
            .map_or(0, |c| c.count)
    }
}

/// Compute stats over the rows selected by `indices`.
///
/// Unauth values outside the canonical set count towards `total` only.
pub fn compute_stats(rows: &[Row], indices: &[usize], schema: &Schema) -> Stats {
    let total = indices.len();

    let Some(unauth) = schema.unauth() else {
        return Stats {
            total,
            breakdown: Vec::new(),
        };
    };

    let mut counts = [0usize; 5];
    for row in indices.iter().filter_map(|&idx| rows.get(idx)) {
        if let Some(status) = row.role(unauth).and_then(Status::from_cell) {
            counts[status as usize] += 1;
        }
    }

    let breakdown = Status::all()
        .iter()
        .map(|&status| StatusCount {
            status,
            count: counts[status as usize],
        })
        .filter(|c| c.count > 0)
        .collect();

    Stats { total, breakdown }
}
