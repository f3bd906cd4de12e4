// RoleLens - core/sort.rs
//
// Single-column sort over a filtered view.
//
// The sort is stable in both directions: rows with equal keys keep the order
// the filter produced them in. Descending reverses the comparison rather than
// the output, which is what keeps ties in input order.

use crate::core::model::{ColumnId, Row};
use feruca::{Collator, Tailoring};
use std::cmp::Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Arrow shown next to the sorted column header.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "^",
            SortDirection::Desc => "v",
        }
    }
}

/// Which column to sort by, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    /// None = keep filter order.
    pub column: Option<ColumnId>,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn by(column: ColumnId, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction,
        }
    }

    /// Header-click behaviour: clicking the sorted column flips direction,
    /// clicking any other column sorts it ascending.
    pub fn toggle(self, column: ColumnId) -> Self {
        if self.column == Some(column) {
            Self {
                column: Some(column),
                direction: self.direction.flipped(),
            }
        } else {
            Self::by(column, SortDirection::Asc)
        }
    }
}

/// Sort `indices` (into `rows`) by the spec's column.
pub fn apply_sort(rows: &[Row], mut indices: Vec<usize>, spec: &SortSpec) -> Vec<usize> {
    let Some(column) = spec.column else {
        return indices;
    };

    let mut collator = locale_collator();
    // slice::sort_by is a stable merge sort.
    indices.sort_by(|&a, &b| {
        let cmp = collator.collate(sort_key(rows, a, column), sort_key(rows, b, column));
        match spec.direction {
            SortDirection::Asc => cmp,
            SortDirection::Desc => cmp.reverse(),
        }
    });
    indices
}

/// Cell value used as the sort key. Missing values sort as empty strings.
fn sort_key(rows: &[Row], idx: usize, column: ColumnId) -> &str {
    rows.get(idx).and_then(|row| row.value(column)).unwrap_or("")
}

/// Unicode Collation Algorithm over the CLDR root order.
///
/// Punctuation is non-ignorable, so `/`, `_` and `~` in paths order before
/// digits and letters instead of vanishing. Strings that collate equal fall
/// back to byte order.
fn locale_collator() -> Collator {
    Collator::new(Tailoring::default(), false, true)
}

/// Human-oriented string ordering: accents and case are secondary and
/// tertiary differences, lowercase before uppercase.
///
/// Builds a collator per call; `apply_sort` reuses one for the whole sort.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    locale_collator().collate(a, b)
}
