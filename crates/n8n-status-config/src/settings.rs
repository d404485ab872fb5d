use std::path::{Path, PathBuf};

use ini::Ini;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::{CONFIG_FILE_NAME, CONFIG_SECTION, Env, TOML_CONFIG_FILE_NAME};

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
  #[serde(rename = "n8n-status", default)]
  section: Option<Section>,
}

#[derive(Debug, Default, Deserialize)]
struct Section {
  db_path: Option<String>,
  limit: Option<i64>,
}

impl Section {
  fn into_settings(self, home_dir: Option<&Path>) -> Settings {
    let db_path = self
      .db_path
      .filter(|p| !p.trim().is_empty())
      .map(|p| expand_home(&p, home_dir));

    let limit = self.limit.and_then(|limit| match u32::try_from(limit) {
      Ok(limit) if limit > 0 => Some(limit),
      _ => {
        warn!(limit, "config limit must be a positive integer, ignoring");
        None
      }
    });

    Settings { db_path, limit }
  }
}

/// Values read from the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
  /// Database path with `~` expanded.
  pub db_path: Option<PathBuf>,
  /// Positive limit, if one was configured.
  pub limit: Option<u32>,
}

impl Settings {
  /// Load settings from the first config file found.
  ///
  /// A missing file gives empty settings. A file that cannot be read or
  /// parsed is logged and also gives empty settings.
  pub fn load(env: &Env) -> Self {
    let Some(path) = find_config_file(&env.current_dir, env.home_dir.as_deref()) else {
      return Self::default();
    };

    match Self::from_file(&path, env.home_dir.as_deref()) {
      Ok(settings) => {
        debug!(path = %path.display(), "loaded config file");
        settings
      }
      Err(e) => {
        warn!(error = %e, "ignoring config file");
        Self::default()
      }
    }
  }

  /// Read settings from a config file. Files ending in `.toml` are read as
  /// TOML, everything else as INI.
  pub fn from_file(path: &Path, home_dir: Option<&Path>) -> Result<Self, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;

    if path.extension().is_some_and(|ext| ext == "toml") {
      Self::from_toml_str(&contents, home_dir).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
      })
    } else {
      Self::from_ini_str(&contents, home_dir).map_err(|source| ConfigError::Ini {
        path: path.to_path_buf(),
        source,
      })
    }
  }

  /// Parse settings from INI text.
  ///
  /// ```ini
  /// [n8n-status]
  /// db_path = ~/.n8n/database.sqlite
  /// limit = 25
  /// ```
  pub fn from_ini_str(contents: &str, home_dir: Option<&Path>) -> Result<Self, ini::ParseError> {
    let ini = Ini::load_from_str(contents)?;
    let Some(props) = ini.section(Some(CONFIG_SECTION)) else {
      return Ok(Self::default());
    };

    let limit = props.get("limit").and_then(|raw| match raw.trim().parse::<i64>() {
      Ok(limit) => Some(limit),
      Err(_) => {
        warn!(limit = raw, "config limit is not an integer, ignoring");
        None
      }
    });

    let section = Section {
      db_path: props.get("db_path").map(str::to_string),
      limit,
    };
    Ok(section.into_settings(home_dir))
  }

  /// Parse settings from TOML text.
  pub fn from_toml_str(contents: &str, home_dir: Option<&Path>) -> Result<Self, toml::de::Error> {
    let file: ConfigFile = toml::from_str(contents)?;
    Ok(file.section.unwrap_or_default().into_settings(home_dir))
  }
}

/// Find the config file. The current directory wins over home, and within a
/// directory the INI file wins over the TOML file.
pub(crate) fn find_config_file(current_dir: &Path, home_dir: Option<&Path>) -> Option<PathBuf> {
  std::iter::once(current_dir)
    .chain(home_dir)
    .flat_map(|dir| [dir.join(CONFIG_FILE_NAME), dir.join(TOML_CONFIG_FILE_NAME)])
    .find(|path| path.is_file())
}

/// Expand a leading `~` to the home directory.
pub(crate) fn expand_home(raw: &str, home_dir: Option<&Path>) -> PathBuf {
  match (raw.strip_prefix('~'), home_dir) {
    (Some(""), Some(home)) => home.to_path_buf(),
    (Some(rest), Some(home)) if rest.starts_with('/') => home.join(rest.trim_start_matches('/')),
    _ => PathBuf::from(raw),
  }
}
