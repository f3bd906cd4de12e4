// RoleLens - app/query.rs
//
// Turns loosely-typed user input (column names, NAME=STATUS pairs) into a
// typed FilterSpec and a sequence of sort clicks, resolving every name
// against the loaded schema before any of it reaches the core.

use crate::app::state::AppState;
use crate::core::filter::FilterSpec;
use crate::core::model::RoleId;
use crate::core::schema::Schema;
use crate::util::error::QueryError;

/// A query as supplied by the front end.
#[derive(Debug, Clone, Default)]
pub struct QueryRequest {
    pub url: Option<String>,
    pub method: Option<String>,
    /// `NAME=STATUS` pairs; an empty STATUS clears that role's filter.
    pub roles: Vec<String>,
    pub hide_options: bool,
    pub only_interesting: bool,
    /// Column names, applied in order as header clicks.
    pub sort_clicks: Vec<String>,
}

/// Split `NAME=STATUS` and resolve NAME to a role column.
///
/// The split is on the last `=`, so role names may themselves contain `=`.
pub fn parse_role_filter(schema: &Schema, raw: &str) -> Result<(RoleId, String), QueryError> {
    let (name, value) = raw
        .rsplit_once('=')
        .ok_or_else(|| QueryError::InvalidRoleFilter {
            raw: raw.to_string(),
        })?;
    let role = schema.resolve_role(name.trim())?;
    Ok((role, value.trim().to_string()))
}

/// Build a filter spec from the request, validating every role name.
pub fn build_filter_spec(
    schema: &Schema,
    request: &QueryRequest,
) -> Result<FilterSpec, QueryError> {
    let mut spec = FilterSpec {
        url_substring: request.url.clone().unwrap_or_default(),
        method: request.method.clone(),
        hide_options: request.hide_options,
        only_interesting: request.only_interesting,
        ..Default::default()
    };

    for raw in &request.roles {
        let (role, value) = parse_role_filter(schema, raw)?;
        spec = spec.with_role(role, value);
    }

    if spec.only_interesting && schema.unauth().is_none() {
        tracing::warn!("No unauth column in this report; interesting-only will only hide OPTIONS");
    }

    Ok(spec)
}

/// Apply the whole request to `state`: filter first, then each sort click.
pub fn apply_request(state: AppState, request: &QueryRequest) -> Result<AppState, QueryError> {
    let filter = build_filter_spec(state.schema(), request)?;
    let columns = request
        .sort_clicks
        .iter()
        .map(|name| state.schema().resolve_column(name))
        .collect::<Result<Vec<_>, _>>()?;

    let mut state = state.with_filter(filter);
    for column in columns {
        state = state.sort_by_column(column);
    }

    tracing::debug!(
        shown = state.view().indices.len(),
        clicks = request.sort_clicks.len(),
        "Query applied"
    );
    Ok(state)
}
