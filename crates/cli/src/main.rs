// EditGrid CLI - interactive grid demo and CSV inspection

mod data;
mod exit_codes;
mod tui;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use editgrid_config::Settings;
use editgrid_interact::ControllerOptions;

use data::GridData;
use exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "egrid")]
#[command(about = "Editable grid demo (cell selection, drag ranges, type-to-edit)")]
#[command(version)]
struct Cli {
    /// Log filter (overrides the settings file), e.g. "debug" or
    /// "editgrid_interact=trace"
    #[arg(long, env = "EDITGRID_LOG", global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open an interactive grid in the terminal
    #[command(after_help = "\
Examples:
  egrid demo
  egrid demo orders.csv --headers

Keys:
  arrows        move the selection
  shift+arrows  extend the range
  enter         edit the cell (toggles boolean cells)
  typing        starts an edit on text/number cells
  esc           quit (or cancel an edit)")]
    Demo {
        /// CSV file to load (omit for built-in sample data)
        file: Option<PathBuf>,

        /// First row is headers
        #[arg(long)]
        headers: bool,
    },

    /// Print a CSV file's field names, inferred kinds, and dimensions
    #[command(after_help = "\
Examples:
  egrid inspect orders.csv --headers
  egrid inspect data.csv --json")]
    Inspect {
        /// CSV file to inspect
        file: PathBuf,

        /// First row is headers
        #[arg(long)]
        headers: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = Settings::load();
    let filter = cli.log.clone().unwrap_or_else(|| settings.log_filter.clone());
    // The TUI owns the terminal, so logs go to a file. The guard must outlive
    // the event loop or buffered lines are lost.
    let _log_guard = init_logging(&filter);

    let result = match cli.command {
        None => {
            eprintln!("Usage: egrid <command> [options]");
            eprintln!("       egrid --help for more information");
            Ok(())
        }
        Some(Commands::Demo { file, headers }) => cmd_demo(file, headers, &settings),
        Some(Commands::Inspect { file, headers, json }) => cmd_inspect(file, headers, json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn init_logging(filter: &str) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let dir = dirs::cache_dir()?.join("editgrid");
    std::fs::create_dir_all(&dir).ok()?;
    let appender = tracing_appender::rolling::never(dir, "egrid.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

#[derive(Debug)]
struct CliError {
    code: u8,
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    fn run(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// demo
// ============================================================================

fn cmd_demo(file: Option<PathBuf>, headers: bool, settings: &Settings) -> Result<(), CliError> {
    let (grid, name) = load_grid(file, headers)?;
    let options = ControllerOptions {
        type_to_edit: settings.type_to_edit,
        select_on_edit: settings.select_on_edit,
    };
    tui::run(grid, name, options).map_err(CliError::run)
}

fn load_grid(file: Option<PathBuf>, headers: bool) -> Result<(GridData, String), CliError> {
    match file {
        Some(path) => {
            let name = path.display().to_string();
            let grid = GridData::load_csv(&path, headers)
                .map_err(|e| CliError::run(format!("{}: {}", name, e)))?;
            if grid.num_cols() == 0 {
                return Err(CliError::args(format!("{}: no columns found", name))
                    .with_hint("is the file empty?"));
            }
            Ok((grid, name))
        }
        None => Ok((GridData::sample(), "sample data".to_string())),
    }
}

// ============================================================================
// inspect
// ============================================================================

fn cmd_inspect(file: PathBuf, headers: bool, json: bool) -> Result<(), CliError> {
    let name = file.display().to_string();
    let grid = GridData::load_csv(&file, headers)
        .map_err(|e| CliError::run(format!("{}: {}", name, e)))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        let fields: Vec<serde_json::Value> = grid
            .fields
            .iter()
            .zip(&grid.kinds)
            .enumerate()
            .map(|(col, (field, kind))| {
                serde_json::json!({
                    "col": col,
                    "field": field,
                    "kind": kind,
                })
            })
            .collect();
        let doc = serde_json::json!({
            "file": name,
            "rows": grid.num_rows(),
            "cols": grid.num_cols(),
            "fields": fields,
        });
        let mut bytes = serde_json::to_vec_pretty(&doc)
            .map_err(|e| CliError::run(e.to_string()))?;
        bytes.push(b'\n');
        out.write_all(&bytes).map_err(|e| CliError::run(e.to_string()))?;
        return Ok(());
    }

    writeln!(out, "{}: {} rows x {} cols", name, grid.num_rows(), grid.num_cols())
        .map_err(|e| CliError::run(e.to_string()))?;
    for (col, (field, kind)) in grid.fields.iter().zip(&grid.kinds).enumerate() {
        writeln!(out, "  {:<20} {:?}  (width {})", field, kind, grid.col_widths[col])
            .map_err(|e| CliError::run(e.to_string()))?;
    }
    Ok(())
}
