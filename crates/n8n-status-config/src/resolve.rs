use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::{DEFAULT_LIMIT, Env, LIMIT_ENV, Settings};

/// Where the database path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbPathSource {
  CommandLine,
  Environment,
  ConfigFile,
  /// Found at one of the default n8n locations.
  Discovered,
}

impl fmt::Display for DbPathSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let source = match self {
      Self::CommandLine => "command line",
      Self::Environment => "environment",
      Self::ConfigFile => "config file",
      Self::Discovered => "default location",
    };
    f.write_str(source)
  }
}

/// A database path that exists, with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbPath {
  pub path: PathBuf,
  pub source: DbPathSource,
}

/// Pick the database file to read.
///
/// An explicit command-line path is used as given and must exist. Otherwise
/// the environment, the config file and the default n8n locations are tried
/// in that order, skipping candidates that do not exist.
pub fn resolve_db_path(
  cli: Option<&Path>,
  settings: &Settings,
  env: &Env,
) -> Result<DbPath, ConfigError> {
  if let Some(path) = cli {
    if !path.exists() {
      return Err(ConfigError::DatabaseNotFoundAt(path.to_path_buf()));
    }
    return Ok(DbPath {
      path: path.to_path_buf(),
      source: DbPathSource::CommandLine,
    });
  }

  let configured = [
    (env.db_path.as_ref().map(PathBuf::from), DbPathSource::Environment),
    (settings.db_path.clone(), DbPathSource::ConfigFile),
  ];

  let discovered = default_locations(env)
    .into_iter()
    .map(|path| (Some(path), DbPathSource::Discovered));

  for (path, source) in configured.into_iter().chain(discovered) {
    let Some(path) = path else { continue };
    if path.exists() {
      return Ok(DbPath { path, source });
    }
    debug!(path = %path.display(), %source, "database candidate does not exist");
  }

  Err(ConfigError::DatabaseNotFound)
}

fn default_locations(env: &Env) -> Vec<PathBuf> {
  let mut locations = Vec::new();
  if let Some(home) = &env.home_dir {
    locations.push(home.join(".n8n").join("database.sqlite"));
  }
  locations.push(env.current_dir.join("database.sqlite"));
  locations
}

/// Pick the number of executions to show.
///
/// Priority: command line, then [`LIMIT_ENV`], then the config file, then
/// [`DEFAULT_LIMIT`]. An environment value that is not a positive integer is
/// logged and skipped.
pub fn resolve_limit(cli: Option<u32>, settings: &Settings, env: &Env) -> u32 {
  let from_env = env.limit.as_deref().and_then(|raw| {
    match raw.trim().parse::<u32>() {
      Ok(limit) if limit > 0 => Some(limit),
      _ => {
        warn!(var = LIMIT_ENV, value = raw, "limit must be a positive integer, ignoring");
        None
      }
    }
  });

  cli
    .filter(|limit| *limit > 0)
    .or(from_env)
    .or(settings.limit)
    .unwrap_or(DEFAULT_LIMIT)
}
