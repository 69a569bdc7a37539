use std::path::PathBuf;

use nest_domain::RewardRules;
use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = "DragonNest";

/// User-configurable preferences and reward tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default)]
    pub rewards: RewardRules,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for progress and nest files. Defaults to the
    /// platform data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            rewards: RewardRules::default(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_currency() -> String {
        "USD".into()
    }

    /// Platform base directory used when nothing else is configured.
    pub fn default_base_dir() -> PathBuf {
        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        base.join(APP_DIR_NAME)
    }

    pub fn resolve_data_dir(&self, base: &std::path::Path) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => base.join("data"),
        }
    }
}
