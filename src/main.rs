// RoleLens - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading
// 3. Logging initialisation (debug mode support)
// 4. Report load, query, render, and export

pub use rolelens::app;
pub use rolelens::core;
pub use rolelens::platform;
pub use rolelens::ui;
pub use rolelens::util;

use app::query::QueryRequest;
use app::state::AppState;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use util::error::{ExportError, RoleLensError};

/// RoleLens - HTTP endpoint access-control audit report viewer.
///
/// Loads a CSV with one row per Method+URL and one column per tested role,
/// then filters, sorts, summarises, and re-exports it.
#[derive(Parser, Debug)]
#[command(name = "RoleLens", version, about)]
struct Cli {
    /// Audit report CSV to load.
    path: PathBuf,

    /// Case-insensitive URL substring.
    #[arg(short = 'u', long = "url")]
    url: Option<String>,

    /// Exact HTTP method (e.g. GET).
    #[arg(short = 'm', long = "method")]
    method: Option<String>,

    /// Exact outcome for a role, as NAME=STATUS (repeatable).
    #[arg(short = 'r', long = "role", value_name = "NAME=STATUS")]
    roles: Vec<String>,

    /// Hide OPTIONS requests.
    #[arg(long = "hide-options")]
    hide_options: bool,

    /// Show only endpoints the unauth role can reach (non-OPTIONS).
    #[arg(short = 'i', long = "only-interesting")]
    only_interesting: bool,

    /// Sort by column, like clicking its header; repeat a column to
    /// flip to descending (repeatable).
    #[arg(short = 's', long = "sort", value_name = "COLUMN")]
    sort: Vec<String>,

    /// Write the current view as CSV (default file name from config).
    #[arg(short = 'e', long = "export", value_name = "PATH")]
    export: Option<Option<PathBuf>>,

    /// Print the view as JSON instead of a table.
    #[arg(long = "json")]
    json: bool,

    /// List the values each filter accepts.
    #[arg(long = "values")]
    values: bool,

    /// Refuse reports whose first two headers are not Method, URL.
    #[arg(long = "strict-headers")]
    strict_headers: bool,

    /// Configuration file (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config first: it supplies the log level.
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| platform::config::PlatformPaths::resolve().config_file());
    let (config, config_warnings) = platform::config::load_config(&config_path);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "RoleLens starting"
    );
    for warning in &config_warnings {
        tracing::warn!(error = %warning, "Configuration warning");
    }

    if let Err(e) = run(&cli, &config) {
        tracing::error!(error = %e, "RoleLens failed");
        eprintln!("Error: {e}");
        let code = match e {
            RoleLensError::Query(_) => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

fn run(cli: &Cli, config: &platform::config::AppConfig) -> util::error::Result<()> {
    let text = platform::fs::read_report(&cli.path)?;
    let state = AppState::load(&text);
    if cli.strict_headers {
        state.schema().check_conventional_headers()?;
    }

    let request = QueryRequest {
        url: cli.url.clone(),
        method: cli.method.clone(),
        roles: cli.roles.clone(),
        hide_options: cli.hide_options,
        only_interesting: cli.only_interesting,
        sort_clicks: cli.sort.clone(),
    };
    let state = app::query::apply_request(state, &request)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let stdout_path = Path::new("<stdout>");
    let stdout_err = |e: std::io::Error| RoleLensError::Io {
        path: stdout_path.to_path_buf(),
        operation: "write",
        source: e,
    };

    if cli.values {
        out.write_all(ui::values::render(&state).as_bytes())
            .map_err(stdout_err)?;
    } else if cli.json {
        let view = state.view();
        crate::core::export::export_json(
            state.dataset(),
            &view.indices,
            &view.interesting,
            &view.stats,
            &mut out,
            stdout_path,
        )?;
        writeln!(out).map_err(stdout_err)?;
    } else {
        let options = ui::table::TableOptions {
            max_rows: config.max_display_rows,
            url_width: config.url_width,
        };
        out.write_all(ui::table::render(&state, options).as_bytes())
            .map_err(stdout_err)?;
        out.write_all(ui::summary::render(&state).as_bytes())
            .map_err(stdout_err)?;
    }

    if let Some(target) = &cli.export {
        let path = target
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.export_file_name));
        let count = export_view(&state, &path)?;
        tracing::info!(path = %path.display(), rows = count, "View exported");
        eprintln!("Exported {count} rows to {}", path.display());
    }

    Ok(())
}

fn export_view(state: &AppState, path: &Path) -> Result<usize, ExportError> {
    platform::fs::write_atomic(path, |writer| {
        crate::core::export::export_csv(state.dataset(), &state.view().indices, writer, path)
    })
}
