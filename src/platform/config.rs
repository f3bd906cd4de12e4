// RoleLens - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for RoleLens configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/rolelens/ or %APPDATA%\RoleLens\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[logging]` section.
    pub logging: LoggingSection,
    /// `[export]` section.
    pub export: ExportSection,
    /// `[display]` section.
    pub display: DisplaySection,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// File name used when --export is given without a path.
    pub file_name: Option<String>,
}

/// `[display]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Rows printed by the table view.
    pub max_rows: Option<usize>,
    /// URL column width before truncation.
    pub url_width: Option<usize>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,

    // -- Export --
    pub export_file_name: String,

    // -- Display --
    pub max_display_rows: usize,
    pub url_width: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            log_file: None,
            export_file_name: constants::DEFAULT_EXPORT_FILE_NAME.to_string(),
            max_display_rows: constants::DEFAULT_MAX_DISPLAY_ROWS,
            url_width: constants::DEFAULT_URL_WIDTH,
        }
    }
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal problems.
/// A missing file yields defaults with no warnings (first run). An unreadable
/// or unparseable file yields defaults plus the error, so the tool still runs
/// but the user is told why their settings were ignored.
///
/// Called before logging is initialised (the log level comes from here), so
/// problems are returned rather than logged.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<ConfigError>) {
    let mut warnings: Vec<ConfigError> = Vec::new();

    if !config_path.exists() {
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    // Validate each field against named constants, accumulating all errors.
    let mut config = AppConfig::default();

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[logging] level".to_string(),
                value: level.clone(),
                expected: constants::VALID_LOG_LEVELS.join(", "),
            });
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file.clone());
        }
    }

    // -- Export: file_name --
    if let Some(ref name) = raw.export.file_name {
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.contains(['/', '\\']) {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[export] file_name".to_string(),
                value: name.clone(),
                expected: "a bare file name without directories".to_string(),
            });
        } else {
            config.export_file_name = trimmed.to_string();
        }
    }

    // -- Display: max_rows --
    if let Some(rows) = raw.display.max_rows {
        if (constants::MIN_MAX_DISPLAY_ROWS..=constants::ABSOLUTE_MAX_DISPLAY_ROWS).contains(&rows)
        {
            config.max_display_rows = rows;
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[display] max_rows".to_string(),
                value: rows.to_string(),
                expected: format!(
                    "{}-{}",
                    constants::MIN_MAX_DISPLAY_ROWS,
                    constants::ABSOLUTE_MAX_DISPLAY_ROWS
                ),
            });
        }
    }

    // -- Display: url_width --
    if let Some(width) = raw.display.url_width {
        if (constants::MIN_URL_WIDTH..=constants::MAX_URL_WIDTH).contains(&width) {
            config.url_width = width;
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[display] url_width".to_string(),
                value: width.to_string(),
                expected: format!("{}-{}", constants::MIN_URL_WIDTH, constants::MAX_URL_WIDTH),
            });
        }
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(constants::CONFIG_FILE_NAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_gives_defaults_without_warnings() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(&dir.path().join("absent.toml"));
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_valid_config_is_applied() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[logging]
level = "DEBUG"
file = "/tmp/rolelens.log"

[export]
file_name = "gaps.csv"

[display]
max_rows = 50
url_width = 120
"#,
        );
        let (config, warnings) = load_config(&path);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.log_file.as_deref(), Some("/tmp/rolelens.log"));
        assert_eq!(config.export_file_name, "gaps.csv");
        assert_eq!(config.max_display_rows, 50);
        assert_eq!(config.url_width, 120);
    }

    #[test]
    fn test_out_of_range_values_fall_back_with_warnings() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[logging]
level = "verbose"

[export]
file_name = "../escape.csv"

[display]
max_rows = 0
url_width = 5
"#,
        );
        let (config, warnings) = load_config(&path);
        assert_eq!(warnings.len(), 4);
        assert!(warnings
            .iter()
            .all(|w| matches!(w, ConfigError::ValueOutOfRange { .. })));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_unparseable_file_gives_defaults_and_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[display\nmax_rows = ");
        let (config, warnings) = load_config(&path);
        assert_eq!(config, AppConfig::default());
        assert!(matches!(warnings.as_slice(), [ConfigError::TomlParse { .. }]));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[future]\nshiny = true\n[display]\nmax_rows = 10\n");
        let (config, warnings) = load_config(&path);
        assert!(warnings.is_empty());
        assert_eq!(config.max_display_rows, 10);
    }
}
