use std::{
    fs,
    path::{Path, PathBuf},
};

use nest_storage_json::write_atomic;

use crate::{Config, ConfigError};

const CONFIG_FILE_NAME: &str = "config.json";

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn with_base_dir(base: &Path) -> Result<Self, ConfigError> {
        let config_dir = base.join("config");
        fs::create_dir_all(&config_dir)?;
        Ok(Self::new(config_dir.join(CONFIG_FILE_NAME)))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads the stored configuration, falling back to defaults when the file
    /// does not exist yet. Reward rules are validated on load.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let config = if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))?
        } else {
            Config::default()
        };
        config.rewards.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        config.rewards.validate().map_err(ConfigError::Invalid)?;
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        write_atomic(&self.config_path, &json)?;
        Ok(())
    }
}
