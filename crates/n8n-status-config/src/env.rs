use std::path::PathBuf;

use crate::{DB_PATH_ENV, LIMIT_ENV};

/// The process environment the configuration is resolved against.
///
/// Captured once at startup so resolution itself never reads globals.
#[derive(Debug, Clone, Default)]
pub struct Env {
  /// Value of [`DB_PATH_ENV`].
  pub db_path: Option<String>,
  /// Value of [`LIMIT_ENV`].
  pub limit: Option<String>,
  pub home_dir: Option<PathBuf>,
  pub current_dir: PathBuf,
}

impl Env {
  /// Capture the current process environment.
  pub fn capture() -> Self {
    Self {
      db_path: non_empty_var(DB_PATH_ENV),
      limit: non_empty_var(LIMIT_ENV),
      home_dir: dirs::home_dir(),
      current_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
  }
}

fn non_empty_var(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
