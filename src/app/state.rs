// RoleLens - app/state.rs
//
// Application state management. Holds the loaded report, its schema, the
// current query, and the view derived from them.
//
// State is replaced, never patched: every transition consumes the old
// `AppState` and returns a new one with the view recomputed in full, so the
// view can never drift from (dataset, schema, filter, sort).

use crate::core::classify::is_interesting;
use crate::core::codec;
use crate::core::filter::{apply_filters, FilterSpec};
use crate::core::model::{ColumnId, Dataset, RoleId, Row};
use crate::core::schema::Schema;
use crate::core::sort::{apply_sort, SortSpec};
use crate::core::stats::{compute_stats, Stats};
use std::collections::BTreeSet;

/// Everything a renderer needs for the current query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    /// Indices into the dataset rows, filtered then sorted.
    pub indices: Vec<usize>,

    /// Interesting flag per entry of `indices`.
    pub interesting: Vec<bool>,

    /// Stats over the view rows.
    pub stats: Stats,
}

/// Distinct values available to each filter control, taken from the full
/// dataset rather than the current view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Sorted distinct Method values.
    pub methods: Vec<String>,

    /// Sorted distinct values per role column, in header order.
    pub roles: Vec<(RoleId, Vec<String>)>,
}

/// Top-level application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    dataset: Dataset,
    schema: Schema,
    filter: FilterSpec,
    sort: SortSpec,
    view: View,
}

impl AppState {
    /// Parse report text into a fresh state with no filter and no sort.
    pub fn load(text: &str) -> Self {
        let dataset = codec::parse(text);
        let schema = Schema::derive(dataset.headers());
        tracing::info!(
            rows = dataset.len(),
            roles = schema.roles().len(),
            has_unauth = schema.unauth().is_some(),
            "Report loaded"
        );
        Self::derive(dataset, schema, FilterSpec::default(), SortSpec::default())
    }

    /// Replace the filter.
    pub fn with_filter(self, filter: FilterSpec) -> Self {
        Self::derive(self.dataset, self.schema, filter, self.sort)
    }

    /// Replace the sort.
    pub fn with_sort(self, sort: SortSpec) -> Self {
        Self::derive(self.dataset, self.schema, self.filter, sort)
    }

    /// Header click on `column`.
    pub fn sort_by_column(self, column: ColumnId) -> Self {
        let sort = self.sort.toggle(column);
        self.with_sort(sort)
    }

    /// Clear every filter and the sort.
    pub fn reset(self) -> Self {
        Self::derive(
            self.dataset,
            self.schema,
            FilterSpec::default(),
            SortSpec::default(),
        )
    }

    fn derive(dataset: Dataset, schema: Schema, filter: FilterSpec, sort: SortSpec) -> Self {
        let filtered = apply_filters(dataset.rows(), &schema, &filter);
        let indices = apply_sort(dataset.rows(), filtered, &sort);
        let interesting = indices
            .iter()
            .map(|&idx| is_interesting(&dataset.rows()[idx], &schema))
            .collect();
        let stats = compute_stats(dataset.rows(), &indices, &schema);

        tracing::debug!(
            shown = indices.len(),
            total = dataset.len(),
            sorted = sort.column.is_some(),
            "View recomputed"
        );

        Self {
            dataset,
            schema,
            filter,
            sort,
            view: View {
                indices,
                interesting,
                stats,
            },
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// View rows in display order, paired with their interesting flag.
    pub fn view_rows(&self) -> impl Iterator<Item = (&Row, bool)> + '_ {
        self.view
            .indices
            .iter()
            .zip(&self.view.interesting)
            .map(|(&idx, &flag)| (&self.dataset.rows()[idx], flag))
    }

    /// Distinct sorted values for the Method filter and each role filter.
    pub fn filter_options(&self) -> FilterOptions {
        let rows = self.dataset.rows();
        let methods: BTreeSet<&str> = rows.iter().map(Row::method).collect();
        let roles = self
            .schema
            .roles()
            .iter()
            .map(|&role| {
                let values: BTreeSet<&str> = rows.iter().filter_map(|r| r.role(role)).collect();
                (role, values.into_iter().map(str::to_string).collect())
            })
            .collect();

        FilterOptions {
            methods: methods.into_iter().map(str::to_string).collect(),
            roles,
        }
    }

    /// The view as CSV text with the original headers.
    pub fn export_text(&self) -> String {
        codec::serialize(self.dataset.headers(), self.view_rows().map(|(row, _)| row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Status;
    use crate::core::sort::SortDirection;

    const REPORT: &str = "Method,URL,Unauth,AdminRole\n\
                          GET,/a,ACCESSIBLE,DENIED\n\
                          OPTIONS,/a,ACCESSIBLE,DENIED\n\
                          POST,/b,DENIED,ACCESSIBLE";

    #[test]
    fn test_load_shows_everything_in_file_order() {
        let state = AppState::load(REPORT);
        assert_eq!(state.view().indices, vec![0, 1, 2]);
        assert_eq!(state.view().interesting, vec![true, false, false]);
        assert_eq!(state.view().stats.total, 3);
        assert_eq!(state.view().stats.count(Status::Accessible), 2);
        assert_eq!(state.view().stats.count(Status::Denied), 1);
    }

    #[test]
    fn test_filter_updates_view_and_stats_together() {
        let state = AppState::load(REPORT).with_filter(FilterSpec::interesting_only());
        assert_eq!(state.view().indices, vec![0]);
        assert_eq!(state.view().stats.total, 1);
        assert_eq!(state.view().stats.count(Status::Accessible), 1);
    }

    #[test]
    fn test_sort_clicks_toggle_direction() {
        let state = AppState::load(REPORT);
        let method = state.schema().method_column();

        let state = state.sort_by_column(method);
        assert_eq!(state.sort().direction, SortDirection::Asc);
        assert_eq!(state.view().indices, vec![0, 1, 2]);

        let state = state.sort_by_column(method);
        assert_eq!(state.sort().direction, SortDirection::Desc);
        assert_eq!(state.view().indices, vec![2, 1, 0]);
    }

    #[test]
    fn test_sort_applies_after_filter() {
        let state = AppState::load(REPORT)
            .with_filter(FilterSpec {
                hide_options: true,
                ..Default::default()
            })
            .with_sort(SortSpec::by(ColumnId(1), SortDirection::Desc));
        assert_eq!(state.view().indices, vec![2, 0]);
        assert_eq!(state.view().interesting, vec![false, true]);
    }

    #[test]
    fn test_reset_clears_filter_and_sort() {
        let state = AppState::load(REPORT)
            .with_filter(FilterSpec::interesting_only())
            .sort_by_column(ColumnId(1))
            .reset();
        assert_eq!(state.filter(), &FilterSpec::default());
        assert_eq!(state.sort(), &SortSpec::default());
        assert_eq!(state.view().indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_load_replaces_everything() {
        let first = AppState::load(REPORT).with_filter(FilterSpec::interesting_only());
        assert_eq!(first.view().indices.len(), 1);

        let second = AppState::load("Method,URL,Admin\nGET,/x,DENIED");
        assert_eq!(second.dataset().len(), 1);
        assert!(second.schema().unauth().is_none());
        assert_eq!(second.filter(), &FilterSpec::default());
        assert!(second.view().stats.breakdown.is_empty());
    }

    #[test]
    fn test_filter_options_come_from_full_dataset() {
        let state = AppState::load(REPORT).with_filter(FilterSpec::interesting_only());
        let options = state.filter_options();
        assert_eq!(options.methods, ["GET", "OPTIONS", "POST"]);
        assert_eq!(options.roles.len(), 2);
        assert_eq!(state.schema().role_name(options.roles[0].0), "Unauth");
        assert_eq!(options.roles[0].1, ["ACCESSIBLE", "DENIED"]);
        assert_eq!(options.roles[1].1, ["ACCESSIBLE", "DENIED"]);
    }

    #[test]
    fn test_export_text_is_the_view() {
        let state = AppState::load(REPORT).with_filter(FilterSpec::interesting_only());
        assert_eq!(
            state.export_text(),
            "Method,URL,Unauth,AdminRole\nGET,/a,ACCESSIBLE,DENIED\n"
        );
    }

    #[test]
    fn test_default_state_is_empty() {
        let state = AppState::default();
        assert!(state.dataset().is_empty());
        assert!(state.view().indices.is_empty());
        assert_eq!(state.view().stats.total, 0);
    }
}
