use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("SQLite database file not found at {}", .0.display())]
  DatabaseNotFoundAt(PathBuf),

  #[error("SQLite database file not found")]
  DatabaseNotFound,

  #[error("could not read config file {}: {source}", path.display())]
  Io {
    path: PathBuf,
    source: std::io::Error,
  },

  #[error("could not parse config file {}: {source}", path.display())]
  Ini {
    path: PathBuf,
    source: ini::ParseError,
  },

  #[error("could not parse config file {}: {source}", path.display())]
  Toml {
    path: PathBuf,
    source: toml::de::Error,
  },
}
