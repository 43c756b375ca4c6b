//! Global vaxtrack configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};

static DEFAULT_DATA_PATH: &str = "~/vaccinations";
static DEFAULT_DATE_FORMAT: &str = "%-d/%-m/%Y";

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "VAXTRACK_CONFIG";
/// Prefix for per-key environment overrides, e.g. `VAXTRACK_DATA_DIR`.
pub const ENV_PREFIX: &str = "VAXTRACK";

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn is_default_data_path(p: &PathBuf) -> bool {
    *p == default_data_path()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn is_default_date_format(s: &String) -> bool {
    s == DEFAULT_DATE_FORMAT
}

/// Configuration at ~/.config/vaxtrack/config.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TrackerConfig {
    #[serde(default = "default_data_path", skip_serializing_if = "is_default_data_path")]
    pub data_dir: PathBuf,

    /// Child (id or name) used when a command doesn't name one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_child: Option<String>,

    /// strftime format for dates shown in the terminal.
    #[serde(default = "default_date_format", skip_serializing_if = "is_default_date_format")]
    pub date_format: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            data_dir: default_data_path(),
            default_child: None,
            date_format: default_date_format(),
        }
    }
}

impl TrackerConfig {
    pub fn config_path() -> TrackerResult<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| TrackerError::Config("Could not determine config directory".into()))?
            .join("vaxtrack");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented default file on first run.
    pub fn load() -> TrackerResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be missing) plus `VAXTRACK_*` environment overrides.
    pub fn load_from(path: &Path) -> TrackerResult<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// The file is always TOML, whatever its extension.
    fn load_with_env(path: &Path, env: Environment) -> TrackerResult<Self> {
        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(env)
            .build()
            .map_err(|e| TrackerError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TrackerError::Config(e.to_string()))
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn save_to(&self, path: &Path) -> TrackerResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| TrackerError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TrackerError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| TrackerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TrackerResult<()> {
        let contents = format!(
            "\
# vaxtrack configuration

# Where children and vaccination records are stored:
# data_dir = \"{}\"

# Child shown when a command doesn't name one (id or name):
# default_child = \"Asha\"

# How dates are printed:
# date_format = \"{}\"
",
            DEFAULT_DATA_PATH, DEFAULT_DATE_FORMAT
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TrackerError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TrackerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
