// RoleLens - core/schema.rs
//
// Column roles derived once from the report headers.
//
// Position 0 is always treated as Method and position 1 as URL; the names
// are not checked unless the caller asks for `check_conventional_headers`.
// Everything after them is a role column. The unauth column is found by
// name and may be absent, in which case the features built on it become
// no-ops rather than errors.

use crate::core::model::{ColumnId, RoleId};
use crate::util::constants::{FIXED_COLUMN_COUNT, METHOD_COLUMN, UNAUTH_MARKER, URL_COLUMN};
use crate::util::error::{LoadError, QueryError};

/// Resolved column layout of a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    headers: Vec<String>,
    roles: Vec<RoleId>,
    unauth: Option<RoleId>,
}

impl Schema {
    /// Derive the schema from header names.
    pub fn derive(headers: &[String]) -> Self {
        let roles: Vec<RoleId> = (FIXED_COLUMN_COUNT..headers.len()).map(RoleId).collect();

        let unauth = roles
            .iter()
            .copied()
            .find(|role| headers[role.0].to_lowercase().contains(UNAUTH_MARKER));

        match unauth {
            Some(role) => tracing::debug!(
                roles = roles.len(),
                unauth = %headers[role.0],
                "Schema derived"
            ),
            None => tracing::debug!(
                roles = roles.len(),
                "Schema derived without an unauth column; interesting-row and status \
                 breakdown features are disabled"
            ),
        }

        Self {
            headers: headers.to_vec(),
            roles,
            unauth,
        }
    }

    /// Fail unless the headers start with the Method, URL columns.
    pub fn check_conventional_headers(&self) -> Result<(), LoadError> {
        let conventional = self.headers.len() >= FIXED_COLUMN_COUNT
            && self.headers[0] == METHOD_COLUMN
            && self.headers[1] == URL_COLUMN;
        if conventional {
            Ok(())
        } else {
            Err(LoadError::MalformedHeader {
                found: self.headers.clone(),
            })
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Column holding the HTTP verb.
    pub fn method_column(&self) -> ColumnId {
        ColumnId(0)
    }

    /// Column holding the request path.
    pub fn url_column(&self) -> ColumnId {
        ColumnId(1)
    }

    /// Role columns in header order.
    pub fn roles(&self) -> &[RoleId] {
        &self.roles
    }

    /// The designated unauthenticated role, if any header looks like one.
    pub fn unauth(&self) -> Option<RoleId> {
        self.unauth
    }

    pub fn column_name(&self, column: ColumnId) -> &str {
        self.headers.get(column.0).map(String::as_str).unwrap_or("")
    }

    pub fn role_name(&self, role: RoleId) -> &str {
        self.column_name(role.column())
    }

    pub fn role_names(&self) -> Vec<String> {
        self.roles
            .iter()
            .map(|role| self.role_name(*role).to_string())
            .collect()
    }

    /// First column whose header equals `name`.
    pub fn column(&self, name: &str) -> Option<ColumnId> {
        self.headers.iter().position(|h| h == name).map(ColumnId)
    }

    /// First role column whose header equals `name`.
    pub fn role(&self, name: &str) -> Option<RoleId> {
        self.roles
            .iter()
            .copied()
            .find(|role| self.headers[role.0] == name)
    }

    /// Like [`Schema::column`], but reports the available columns on failure.
    pub fn resolve_column(&self, name: &str) -> Result<ColumnId, QueryError> {
        self.column(name).ok_or_else(|| QueryError::UnknownColumn {
            name: name.to_string(),
            available: self.headers.clone(),
        })
    }

    /// Like [`Schema::role`], but reports the available roles on failure.
    pub fn resolve_role(&self, name: &str) -> Result<RoleId, QueryError> {
        self.role(name).ok_or_else(|| QueryError::UnknownRole {
            name: name.to_string(),
            available: self.role_names(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_roles_exclude_first_two_columns() {
        let schema = Schema::derive(&headers(&["Method", "URL", "Guest", "Admin"]));
        assert_eq!(schema.role_names(), ["Guest", "Admin"]);
        assert_eq!(schema.roles()[0].column().index(), 2);
    }

    #[test]
    fn test_unauth_detection_is_case_insensitive() {
        let schema = Schema::derive(&headers(&["Method", "URL", "Admin", "UNAUTHENTICATED"]));
        let unauth = schema.unauth().expect("unauth column");
        assert_eq!(schema.role_name(unauth), "UNAUTHENTICATED");
    }

    #[test]
    fn test_unauth_picks_first_match() {
        let schema = Schema::derive(&headers(&["Method", "URL", "unauth_a", "Unauth_b"]));
        assert_eq!(schema.role_name(schema.unauth().unwrap()), "unauth_a");
    }

    #[test]
    fn test_unauth_ignores_fixed_columns() {
        // A URL column named like the marker must not become the unauth role.
        let schema = Schema::derive(&headers(&["Method", "unauth_url", "Admin"]));
        assert!(schema.unauth().is_none());
    }

    #[test]
    fn test_no_unauth_column() {
        let schema = Schema::derive(&headers(&["Method", "URL", "Admin", "User"]));
        assert!(schema.unauth().is_none());
    }

    #[test]
    fn test_short_headers_have_no_roles() {
        let schema = Schema::derive(&headers(&["Method"]));
        assert!(schema.roles().is_empty());
        assert!(schema.unauth().is_none());
    }

    #[test]
    fn test_resolve_role_rejects_fixed_columns() {
        let schema = Schema::derive(&headers(&["Method", "URL", "Admin"]));
        assert!(schema.resolve_role("Admin").is_ok());
        assert!(matches!(
            schema.resolve_role("URL"),
            Err(QueryError::UnknownRole { .. })
        ));
        assert_eq!(schema.resolve_column("URL").unwrap(), schema.url_column());
    }

    #[test]
    fn test_resolve_column_unknown() {
        let schema = Schema::derive(&headers(&["Method", "URL"]));
        match schema.resolve_column("Status") {
            Err(QueryError::UnknownColumn { name, available }) => {
                assert_eq!(name, "Status");
                assert_eq!(available, ["Method", "URL"]);
            }
            other => panic!("expected UnknownColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_conventional_header_check() {
        assert!(Schema::derive(&headers(&["Method", "URL", "Admin"]))
            .check_conventional_headers()
            .is_ok());
        assert!(matches!(
            Schema::derive(&headers(&["Path", "Verb", "Admin"])).check_conventional_headers(),
            Err(LoadError::MalformedHeader { .. })
        ));
        assert!(Schema::derive(&headers(&["Method"]))
            .check_conventional_headers()
            .is_err());
    }
}
