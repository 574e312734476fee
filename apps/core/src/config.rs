use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::ranking_tool::DEFAULT_TOOL_NAME;

pub const CONFIG_FILE_NAME: &str = "plugin.toml";
pub const HOST_TOOL_PATH_KEY: &str = "zoxide_path";
pub const HOST_TOOL_PATH_ALIAS: &str = "toolPath";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tool_path: String,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let base = plugin_dir();
        Self {
            tool_path: DEFAULT_TOOL_NAME.to_string(),
            log_level: "info".to_string(),
            log_dir: base.join("logs"),
            config_path: base.join(CONFIG_FILE_NAME),
        }
    }
}

/// Keys accepted in `plugin.toml`; everything is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    #[serde(alias = "zoxide_path")]
    tool_path: Option<String>,
    log_level: Option<String>,
    log_dir: Option<PathBuf>,
}

impl Config {
    /// Overlays the settings object the host sends with each request.
    pub fn apply_host_settings(&mut self, settings: &Map<String, Value>) {
        let configured = settings
            .get(HOST_TOOL_PATH_KEY)
            .or_else(|| settings.get(HOST_TOOL_PATH_ALIAS))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty());
        if let Some(tool_path) = configured {
            self.tool_path = tool_path.to_string();
        }
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(tool_path) = file.tool_path.filter(|v| !v.trim().is_empty()) {
            self.tool_path = tool_path.trim().to_string();
        }
        if let Some(level) = file.log_level {
            self.log_level = level.trim().to_ascii_lowercase();
        }
        if let Some(dir) = file.log_dir {
            self.log_dir = dir;
        }
    }
}

/// Directory holding the plugin executable, falling back to the working
/// directory.
pub fn plugin_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Builds the config from defaults and the optional TOML file. A missing
/// file is not an error.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = Config::default();
    if let Some(path) = path {
        config.config_path = path.to_path_buf();
    }

    let raw = match std::fs::read_to_string(&config.config_path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(config),
        Err(source) => {
            return Err(ConfigError::Read {
                path: config.config_path,
                source,
            })
        }
    };

    let file: FileConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: config.config_path.clone(),
        source,
    })?;
    config.apply_file(file);
    validate(&config)?;
    Ok(config)
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.tool_path.trim().is_empty() {
        return Err(ConfigError::Invalid("tool_path is required".into()));
    }

    if tracing::Level::from_str(&cfg.log_level).is_err() {
        return Err(ConfigError::Invalid(format!(
            "unknown log_level '{}'",
            cfg.log_level
        )));
    }

    if cfg.log_dir.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("log_dir is required".into()));
    }

    Ok(())
}
