//! tablesync - Entry Point
//!
//! Mounts a table view over an in-memory sample grid, applies actions from flags and an
//! optional action script, and prints the resulting state as JSON.

use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::rc::Rc;
use tablesync::config::CliOverrides;
use tablesync::integration::{apply_script, process_lines, StateSnapshot};
use tablesync::model::{
    hide_table_column, remove_column_filter, set_column_filters, set_hidden_rows,
    show_table_column, toggle_table_column_visibility, AppError, ColumnFilter, TableAction,
};
use tablesync::sync::{TableProps, TableView};
use tablesync::widget::{GridHandle, MemoryGrid};
use tracing::{info, warn};

/// tablesync - drive a data grid through its view-state store
#[derive(Parser, Debug)]
#[command(name = "tablesync")]
#[command(version)]
#[command(about = "Apply table view actions to a sample grid and print the resulting state")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of rows in the sample grid
    #[arg(long)]
    pub rows: Option<usize>,

    /// Number of columns in the sample grid
    #[arg(long)]
    pub columns: Option<usize>,

    /// Hide a column (repeatable)
    #[arg(long = "hide", value_name = "COL")]
    pub hide: Vec<usize>,

    /// Show a column (repeatable)
    #[arg(long = "show", value_name = "COL")]
    pub show: Vec<usize>,

    /// Toggle a column's visibility (repeatable)
    #[arg(long = "toggle", value_name = "COL")]
    pub toggle: Vec<usize>,

    /// Add a column filter, e.g. `2:between:[10,20]` (repeatable)
    #[arg(long = "filter", value_name = "COL:OP[:ARGS]")]
    pub filter: Vec<String>,

    /// Remove every filter on a column (repeatable)
    #[arg(long = "remove-filter", value_name = "COL")]
    pub remove_filter: Vec<usize>,

    /// JSONL action script to apply (`-` reads from stdin)
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Fail on the first invalid script line instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Print a text summary instead of JSON
    #[arg(long, conflicts_with = "pretty")]
    pub summary: bool,

    /// Path to the log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level when RUST_LOG is unset
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Actions requested through flags, in flag-group order.
    fn actions(&self) -> Result<Vec<TableAction>, AppError> {
        let mut actions: Vec<TableAction> = Vec::new();
        actions.extend(self.hide.iter().copied().map(hide_table_column));
        actions.extend(self.show.iter().copied().map(show_table_column));
        actions.extend(self.toggle.iter().copied().map(toggle_table_column_visibility));
        for spec in &self.filter {
            let filter = ColumnFilter::parse_compact(spec).map_err(AppError::InvalidFilter)?;
            actions.push(TableAction::AddColumnFilter(filter));
        }
        actions.extend(self.remove_filter.iter().copied().map(remove_column_filter));
        Ok(actions)
    }
}

fn read_script(path: &PathBuf) -> Result<String, AppError> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = tablesync::config::load_config_with_precedence(args.config.clone())?;
        let merged = tablesync::config::merge_config(config_file);
        let with_env = tablesync::config::apply_env_overrides(merged);
        tablesync::config::apply_cli_overrides(
            with_env,
            CliOverrides {
                rows: args.rows,
                columns: args.columns,
                // Only an explicit flag overrides the file
                strict: args.strict.then_some(true),
                log_file_path: args.log_file.clone(),
            },
        )
    };

    let level = if args.verbose { "debug" } else { tablesync::logging::DEFAULT_LEVEL };
    tablesync::logging::init(&config.log_file_path, level)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let grid = Rc::new(MemoryGrid::sample(config.rows, config.columns));
    let mut view = TableView::mount_attached(
        TableProps::with_hidden_columns(config.hidden_columns.clone()),
        grid.clone() as Rc<dyn GridHandle>,
    );

    // Startup state from the config file
    let mut startup = Vec::new();
    if !config.hidden_rows.is_empty() {
        startup.push(set_hidden_rows(config.hidden_rows.clone()));
    }
    if !config.filters.is_empty() {
        startup.push(set_column_filters(config.filters.clone()));
    }
    view.batch(startup);

    view.batch(args.actions()?);

    if let Some(path) = &args.script {
        let text = read_script(path)?;
        if config.strict {
            let lines = text.lines().map(str::to_string).collect();
            let (actions, errors) = process_lines(lines, 1);
            if let Some(error) = errors.into_iter().next() {
                return Err(error.into());
            }
            view.batch(actions);
        } else {
            let errors = apply_script(&mut view, &text);
            for error in &errors {
                eprintln!("skipped: {error}");
            }
            if !errors.is_empty() {
                warn!(count = errors.len(), "action script had invalid lines");
            }
        }
    }

    let snapshot = StateSnapshot::capture(&view, &grid);
    if args.summary {
        print!("{}", snapshot.summary());
    } else if args.pretty {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", serde_json::to_string(&snapshot)?);
    }

    let final_state = view.unmount();
    info!(
        hidden_columns = ?final_state.hidden_columns,
        "Table view unmounted"
    );
    Ok(())
}
