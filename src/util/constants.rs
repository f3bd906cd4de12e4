// RoleLens - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.
// Format conventions of the audit CSV live here too so the core never
// hard-codes a column name or status string inline.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "RoleLens";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "RoleLens";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Audit report format
// =============================================================================

/// Expected name of header position 0 (the HTTP verb column).
pub const METHOD_COLUMN: &str = "Method";

/// Expected name of header position 1 (the request path column).
pub const URL_COLUMN: &str = "URL";

/// Number of fixed leading columns before the role columns begin.
pub const FIXED_COLUMN_COUNT: usize = 2;

/// Case-insensitive marker identifying the unauthenticated role column.
pub const UNAUTH_MARKER: &str = "unauth";

/// HTTP method excluded from "interesting" classification and from
/// `hide_options` views.
pub const OPTIONS_METHOD: &str = "OPTIONS";

/// File extension the loader expects (anything else loads with a warning).
pub const REPORT_EXTENSION: &str = "csv";

// =============================================================================
// Load limits
// =============================================================================

/// Maximum size of an input report in bytes.
///
/// Reports hold thousands of endpoint/role combinations; anything far beyond
/// that is almost certainly the wrong file.
pub const MAX_INPUT_FILE_SIZE: u64 = 256 * 1024 * 1024; // 256 MB

// =============================================================================
// Display defaults
// =============================================================================

/// Default number of view rows printed by the table renderer.
pub const DEFAULT_MAX_DISPLAY_ROWS: usize = 500;

/// Minimum user-configurable display row cap.
pub const MIN_MAX_DISPLAY_ROWS: usize = 1;

/// Maximum user-configurable display row cap.
pub const ABSOLUTE_MAX_DISPLAY_ROWS: usize = 100_000;

/// Default width (characters) of the URL column before truncation.
pub const DEFAULT_URL_WIDTH: usize = 60;

/// Minimum user-configurable URL column width.
pub const MIN_URL_WIDTH: usize = 10;

/// Maximum user-configurable URL column width.
pub const MAX_URL_WIDTH: usize = 400;

/// Marker printed in the first column of interesting rows.
pub const INTERESTING_MARKER: &str = "*";

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Kept at "warn" so stdout report output is not
/// interleaved with progress chatter on stderr.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Export
// =============================================================================

/// Default file name for CSV exports of the current view.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "filtered_role_test_report.csv";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
