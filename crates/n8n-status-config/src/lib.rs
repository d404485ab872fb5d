//! n8n-status Config
//!
//! Settings come from three places, highest priority first:
//! - command-line flags (passed in by the binary)
//! - environment variables ([`DB_PATH_ENV`], [`LIMIT_ENV`])
//! - an INI config file named [`CONFIG_FILE_NAME`], looked up in the current
//!   directory and then the home directory
//!
//! ```ini
//! [n8n-status]
//! db_path = ~/.n8n/database.sqlite
//! limit = 25
//! ```
//!
//! A TOML file named [`TOML_CONFIG_FILE_NAME`] with the same table and keys is
//! also accepted; the INI file wins when both sit in the same directory.
//!
//! When no database path is configured anywhere, the usual n8n locations are
//! tried. Only a missing database is fatal; an unreadable config file or a
//! bad limit is logged and ignored.

mod env;
mod error;
mod resolve;
mod settings;

pub use env::Env;
pub use error::ConfigError;
pub use resolve::{DbPath, DbPathSource, resolve_db_path, resolve_limit};
pub use settings::Settings;

/// Name of the INI config file.
pub const CONFIG_FILE_NAME: &str = ".n8n-status-config.ini";

/// Name of the TOML config file.
pub const TOML_CONFIG_FILE_NAME: &str = ".n8n-status-config.toml";

/// Section holding the settings, in either file format.
pub const CONFIG_SECTION: &str = "n8n-status";

/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "N8N_DB_PATH";

/// Environment variable overriding the number of executions shown.
pub const LIMIT_ENV: &str = "N8N_STATUS_LIMIT";

/// Number of executions shown when nothing else is configured.
pub const DEFAULT_LIMIT: u32 = 15;
