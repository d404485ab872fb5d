use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use n8n_status_config::{
  DB_PATH_ENV, DbPath, DbPathSource, Env, Settings, resolve_db_path, resolve_limit,
};
use n8n_status_enrich::{DisplayStatus, EnrichedExecution, Enricher};
use n8n_status_report::render_table;
use n8n_status_store::SqliteStore;

const AFTER_HELP: &str = "\
Failed executions get an extra line `Error: <message> (<node>)`.
Retried executions get an extra line `Retry of execution <id>` naming the
execution that was retried. The retry count is not stored, so none is shown.

Config file: .n8n-status-config.ini (section [n8n-status], keys db_path and
limit) in the current directory, then the home directory.";

/// n8n workflow execution status viewer for SQLite
#[derive(Parser)]
#[command(name = "n8n-status")]
#[command(version, about, long_about = None, after_help = AFTER_HELP)]
struct Cli {
  /// Path to the n8n SQLite database file
  #[arg(long)]
  db_path: Option<PathBuf>,

  /// Maximum number of execution records to display. Overrides N8N_STATUS_LIMIT, which overrides
  /// the config file limit (default: 15)
  #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
  limit: Option<u32>,

  /// Show only executions with errors
  #[arg(short, long)]
  errors: bool,

  /// Show only running executions
  #[arg(short, long)]
  running: bool,

  /// Show only waiting executions
  #[arg(short, long)]
  waiting: bool,

  /// Filter by workflow name (case insensitive substring match)
  #[arg(long)]
  workflow: Option<String>,

  /// Show details for a specific execution ID
  #[arg(long)]
  id: Option<String>,

  /// Print executions as JSON instead of a table
  #[arg(long)]
  json: bool,

  /// Disable colored output
  #[arg(long)]
  no_color: bool,
}

/// Post-query filters, combined with AND.
#[derive(Debug, Default)]
struct Filters {
  errors: bool,
  running: bool,
  waiting: bool,
  workflow: Option<String>,
}

impl Filters {
  fn from_cli(cli: &Cli) -> Self {
    Self {
      errors: cli.errors,
      running: cli.running,
      waiting: cli.waiting,
      workflow: cli.workflow.as_ref().map(|w| w.to_lowercase()),
    }
  }

  fn matches(&self, execution: &EnrichedExecution) -> bool {
    (!self.errors || execution.record.status == "error")
      && (!self.running || execution.display_status == DisplayStatus::Running)
      && (!self.waiting || execution.display_status == DisplayStatus::Waiting)
      && self.workflow.as_ref().is_none_or(|needle| {
        execution
          .record
          .workflow_name
          .to_lowercase()
          .contains(needle.as_str())
      })
  }
}

fn main() -> Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let env = Env::capture();
  let settings = Settings::load(&env);

  let db = match resolve_db_path(cli.db_path.as_deref(), &settings, &env) {
    Ok(db) => db,
    Err(e) => {
      eprintln!("Error: {e}");
      eprintln!("Please specify a valid database path with --db-path or {DB_PATH_ENV}.\n");
      Cli::command().print_help()?;
      return Ok(ExitCode::FAILURE);
    }
  };

  if db.source != DbPathSource::CommandLine {
    eprintln!("Using database path from {}: {}", db.source, db.path.display());
  }

  let limit = resolve_limit(cli.limit, &settings, &env);
  debug!(path = %db.path.display(), source = %db.source, limit, "resolved configuration");

  show_status(cli, db, limit)?;
  Ok(ExitCode::SUCCESS)
}

fn show_status(cli: Cli, db: DbPath, limit: u32) -> Result<()> {
  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("failed to start async runtime")?;
  rt.block_on(async { show_status_async(cli, db, limit).await })
}

async fn show_status_async(cli: Cli, db: DbPath, limit: u32) -> Result<()> {
  let enricher = Enricher::new(SqliteStore::open(&db.path));
  let now = chrono::Utc::now();

  let executions = match &cli.id {
    Some(id) => match enricher.by_id(id, now).await {
      Some(execution) => vec![execution],
      None => {
        println!("No execution found with ID: {id}");
        return Ok(());
      }
    },
    None => {
      let filters = Filters::from_cli(&cli);
      enricher
        .recent(limit, now)
        .await
        .into_iter()
        .filter(|e| filters.matches(e))
        .collect()
    }
  };

  if cli.json {
    println!("{}", serde_json::to_string_pretty(&executions)?);
  } else {
    let colors = !cli.no_color && console::colors_enabled();
    print!("{}", render_table(&executions, colors));
  }

  Ok(())
}
