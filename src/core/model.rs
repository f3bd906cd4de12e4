// RoleLens - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

// =============================================================================
// Column identifiers
// =============================================================================

/// Position of a column in the report headers.
///
/// Only issued by [`crate::core::schema::Schema`] lookups, so holding one
/// means the column exists in the dataset it was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(pub(crate) usize);

impl ColumnId {
    /// Zero-based header position.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A role column: any column after Method and URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoleId(pub(crate) usize);

impl RoleId {
    /// The underlying column of this role.
    pub fn column(self) -> ColumnId {
        ColumnId(self.0)
    }
}

impl From<RoleId> for ColumnId {
    fn from(role: RoleId) -> Self {
        role.column()
    }
}

// =============================================================================
// Row
// =============================================================================

/// One endpoint of the audit: Method, URL, then one outcome per role.
///
/// Values are positionally aligned with the dataset headers. A `Row` inside a
/// [`Dataset`] always has exactly one value per header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    values: Vec<String>,
}

impl Row {
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// HTTP verb (header position 0).
    pub fn method(&self) -> &str {
        self.values.first().map(String::as_str).unwrap_or("")
    }

    /// Request path (header position 1).
    pub fn url(&self) -> &str {
        self.values.get(1).map(String::as_str).unwrap_or("")
    }

    /// Value of any column. `None` only if the id came from another dataset.
    pub fn value(&self, column: ColumnId) -> Option<&str> {
        self.values.get(column.0).map(String::as_str)
    }

    /// Outcome recorded for a role.
    pub fn role(&self, role: RoleId) -> Option<&str> {
        self.value(role.column())
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// A loaded report: headers plus rows in file order.
///
/// Immutable once built. Loading another report builds a new `Dataset`
/// rather than patching this one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset, admitting only candidates whose field count matches
    /// the header count. Mismatched candidates are dropped without error.
    pub fn new<I>(headers: Vec<String>, candidates: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut dropped = 0usize;
        let rows: Vec<Row> = candidates
            .into_iter()
            .filter_map(|values| {
                if values.len() == headers.len() {
                    Some(Row { values })
                } else {
                    dropped += 1;
                    None
                }
            })
            .collect();

        if dropped > 0 {
            tracing::debug!(
                dropped,
                admitted = rows.len(),
                columns = headers.len(),
                "Skipped rows with mismatched field count"
            );
        }

        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Serialises a row as a `{ header: value }` object in header order.
pub struct RowRecord<'a> {
    pub headers: &'a [String],
    pub row: &'a Row,
}

impl Serialize for RowRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.headers.len()))?;
        for (header, value) in self.headers.iter().zip(self.row.values()) {
            map.serialize_entry(header, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Status
// =============================================================================

/// Canonical outcome classifications used for aggregate reporting.
///
/// Cells may hold any string; only these five are counted in stats.
/// Variant order is the fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Accessible,
    Redirect,
    Denied,
    Error,
    Unknown,
}

impl Status {
    /// Returns all variants in display order.
    pub fn all() -> &'static [Status] {
        &[
            Status::Accessible,
            Status::Redirect,
            Status::Denied,
            Status::Error,
            Status::Unknown,
        ]
    }

    /// Exact cell text for this status.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Accessible => "ACCESSIBLE",
            Status::Redirect => "REDIRECT",
            Status::Denied => "DENIED",
            Status::Error => "ERROR",
            Status::Unknown => "UNKNOWN",
        }
    }

    /// Classify a cell value. Matching is exact: "accessible" is not canonical.
    pub fn from_cell(value: &str) -> Option<Status> {
        Status::all().iter().copied().find(|s| s.label() == value)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dataset_drops_mismatched_rows() {
        let dataset = Dataset::new(
            strings(&["Method", "URL", "Admin"]),
            vec![
                strings(&["GET", "/a", "DENIED"]),
                strings(&["GET", "/b"]),
                strings(&["GET", "/c", "DENIED", "extra"]),
                strings(&["POST", "/d", "ACCESSIBLE"]),
            ],
        );
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows()[0].url(), "/a");
        assert_eq!(dataset.rows()[1].url(), "/d");
    }

    #[test]
    fn test_row_accessors() {
        let dataset = Dataset::new(
            strings(&["Method", "URL", "Admin"]),
            vec![strings(&["PUT", "/x", "REDIRECT"])],
        );
        let row = &dataset.rows()[0];
        assert_eq!(row.method(), "PUT");
        assert_eq!(row.url(), "/x");
        assert_eq!(row.role(RoleId(2)), Some("REDIRECT"));
        assert_eq!(row.value(ColumnId(3)), None);
    }

    #[test]
    fn test_status_from_cell_is_exact() {
        assert_eq!(Status::from_cell("DENIED"), Some(Status::Denied));
        assert_eq!(Status::from_cell("denied"), None);
        assert_eq!(Status::from_cell("TIMEOUT"), None);
    }

    #[test]
    fn test_status_display_order() {
        let labels: Vec<_> = Status::all().iter().map(Status::label).collect();
        assert_eq!(
            labels,
            ["ACCESSIBLE", "REDIRECT", "DENIED", "ERROR", "UNKNOWN"]
        );
    }

    #[test]
    fn test_row_record_serialises_in_header_order() {
        let dataset = Dataset::new(
            strings(&["Method", "URL", "Zeta", "Alpha"]),
            vec![strings(&["GET", "/a", "DENIED", "ACCESSIBLE"])],
        );
        let record = RowRecord {
            headers: dataset.headers(),
            row: &dataset.rows()[0],
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"Method":"GET","URL":"/a","Zeta":"DENIED","Alpha":"ACCESSIBLE"}"#
        );
    }
}
