// RoleLens - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// The core engine (codec, filter, sort, stats) is infallible once text is in
// hand; these types only cover the edges: file load, query resolution from
// user input, export, and configuration.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all RoleLens operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum RoleLensError {
    /// Loading the report file failed.
    Load(LoadError),

    /// A filter or sort request referenced something the report lacks.
    Query(QueryError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for RoleLensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "Load error: {e}"),
            Self::Query(e) => write!(f, "Query error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for RoleLensError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::Query(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Errors related to reading an audit report from disk.
#[derive(Debug)]
pub enum LoadError {
    /// The report file could not be read.
    Io { path: PathBuf, source: io::Error },

    /// Report file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Headers do not start with the Method, URL columns. Only raised when
    /// strict header checking was requested.
    MalformedHeader { found: Vec<String> },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Cannot read report '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Report '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::MalformedHeader { found } => {
                let shown: Vec<&str> = found.iter().take(2).map(String::as_str).collect();
                write!(
                    f,
                    "Header row must start with '{}', '{}' but starts with {shown:?}",
                    crate::util::constants::METHOD_COLUMN,
                    crate::util::constants::URL_COLUMN,
                )
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<LoadError> for RoleLensError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

// ---------------------------------------------------------------------------
// Query errors
// ---------------------------------------------------------------------------

/// Errors raised while resolving user-supplied column or role names against
/// the loaded schema.
#[derive(Debug)]
pub enum QueryError {
    /// Sort column name is not one of the report's headers.
    UnknownColumn {
        name: String,
        available: Vec<String>,
    },

    /// Role filter names a column that is not a role column.
    UnknownRole {
        name: String,
        available: Vec<String>,
    },

    /// Role filter argument is not of the form `NAME=STATUS`.
    InvalidRoleFilter { raw: String },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownColumn { name, available } => write!(
                f,
                "Unknown column '{name}'. Available columns: {}",
                available.join(", ")
            ),
            Self::UnknownRole { name, available } => {
                if available.is_empty() {
                    write!(f, "Unknown role '{name}'. This report has no role columns")
                } else {
                    write!(
                        f,
                        "Unknown role '{name}'. Available roles: {}",
                        available.join(", ")
                    )
                }
            }
            Self::InvalidRoleFilter { raw } => write!(
                f,
                "Invalid role filter '{raw}'. Expected NAME=STATUS, e.g. 'Admin=DENIED'"
            ),
        }
    }
}

impl std::error::Error for QueryError {}

impl From<QueryError> for RoleLensError {
    fn from(e: QueryError) -> Self {
        Self::Query(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for RoleLensError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for RoleLensError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for RoleLens results.
pub type Result<T> = std::result::Result<T, RoleLensError>;
