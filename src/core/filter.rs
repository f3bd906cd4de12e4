// RoleLens - core/filter.rs
//
// Composable filter engine for report rows.
// All active filters are AND-combined.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::classify::is_interesting;
use crate::core::model::{RoleId, Row};
use crate::core::schema::Schema;
use crate::util::constants::OPTIONS_METHOD;
use std::collections::BTreeMap;

/// Complete filter state. All fields are AND-combined when applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// URL substring search (case-insensitive). Empty = no filter.
    pub url_substring: String,

    /// Exact HTTP method. None or empty = all methods.
    pub method: Option<String>,

    /// Exact outcome required per role. Empty value = all outcomes.
    pub per_role: BTreeMap<RoleId, String>,

    /// Drop OPTIONS requests.
    pub hide_options: bool,

    /// Keep only interesting rows (unauth ACCESSIBLE, non-OPTIONS). With no
    /// unauth column this only drops OPTIONS.
    pub only_interesting: bool,
}

impl FilterSpec {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.url_substring.is_empty()
            && self.method.as_deref().map_or(true, str::is_empty)
            && self.per_role.values().all(String::is_empty)
            && !self.hide_options
            && !self.only_interesting
    }

    /// Require `role` to report exactly `value`.
    pub fn with_role(mut self, role: RoleId, value: impl Into<String>) -> Self {
        self.per_role.insert(role, value.into());
        self
    }

    /// Quick filter: likely authorization gaps only.
    pub fn interesting_only() -> Self {
        Self {
            only_interesting: true,
            ..Default::default()
        }
    }
}

/// Apply filters to the rows, returning indices of matching rows.
///
/// Indices are ascending, so the result is an order-preserving subsequence
/// of `rows`.
pub fn apply_filters(rows: &[Row], schema: &Schema, filter: &FilterSpec) -> Vec<usize> {
    if filter.is_empty() {
        return (0..rows.len()).collect();
    }

    let url_lower = filter.url_substring.to_lowercase();

    rows.iter()
        .enumerate()
        .filter(|(_, row)| matches_all(row, schema, filter, &url_lower))
        .map(|(idx, _)| idx)
        .collect()
}

/// Check if a single row matches all active filters.
fn matches_all(row: &Row, schema: &Schema, filter: &FilterSpec, url_lower: &str) -> bool {
    if !url_lower.is_empty() && !row.url().to_lowercase().contains(url_lower) {
        return false;
    }

    if let Some(method) = filter.method.as_deref() {
        if !method.is_empty() && row.method() != method {
            return false;
        }
    }

    if filter.hide_options && row.method() == OPTIONS_METHOD {
        return false;
    }

    for (role, wanted) in &filter.per_role {
        if !wanted.is_empty() && row.role(*role) != Some(wanted.as_str()) {
            return false;
        }
    }

    // Without an unauth column the quick filter only drops OPTIONS.
    if filter.only_interesting {
        let keep = match schema.unauth() {
            Some(_) => is_interesting(row, schema),
            None => row.method() != OPTIONS_METHOD,
        };
        if !keep {
            return false;
        }
    }

    true
}
