use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::logger::Logger;

/// Files probed in the working directory, first match wins.
const CONFIG_FILES: [&str; 4] = ["config.yaml", "config.yml", "config.env", "config"];

#[derive(Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub server_endpoint: String,
    pub server_username: String,
    pub server_password: String,
}

/// Top-level YAML keys as written, before case folding.
#[derive(Deserialize)]
#[serde(transparent)]
struct RawConfig(BTreeMap<String, Value>);

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_endpoint", &self.server_endpoint)
            .field("server_username", &self.server_username)
            .field("server_password", &"********")
            .finish()
    }
}

impl Config {
    pub fn load(dir: &Path) -> Result<Self, String> {
        let config_path = config_path(dir)
            .ok_or_else(|| format!("No config file found in {}", dir.display()))?;
        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read {}: {}", config_path.display(), e))?;
        Config::from_yaml(&config_str)
            .map_err(|e| format!("Failed to parse {}: {}", config_path.display(), e))
    }

    /// Keys match regardless of case, so `server_endpoint` works as well as
    /// `SERVER_ENDPOINT`.
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        let RawConfig(entries) = serde_yaml::from_str(yaml).map_err(|e| e.to_string())?;

        let mut config = Config::default();
        for (key, value) in &entries {
            let field = match key.to_ascii_uppercase().as_str() {
                "SERVER_ENDPOINT" => &mut config.server_endpoint,
                "SERVER_USERNAME" => &mut config.server_username,
                "SERVER_PASSWORD" => &mut config.server_password,
                _ => continue,
            };
            *field = scalar_to_string(value);
        }
        Ok(config)
    }

    /// Missing or broken config falls back to empty values; arangodump will
    /// complain about the connection itself.
    pub fn load_or_default(dir: &Path, logger: &Logger) -> Self {
        match Config::load(dir) {
            Ok(config) => {
                logger.log(&format!("Loaded configuration for endpoint '{}'", config.server_endpoint)).ok();
                config
            }
            Err(e) => {
                logger.log(&format!("{}. Using empty configuration.", e)).ok();
                Config::default()
            }
        }
    }
}

// Unquoted numbers and booleans are read as their text, anything else as empty.
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn config_path(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}
