use nest_config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_uses_standard_reward_rules() {
    let cfg = Config::default();

    assert!(!cfg.currency.is_empty());
    assert_eq!(cfg.rewards.xp_per_level, 25);
    assert_eq!(cfg.rewards.base_expense_xp, 5);
    assert!(cfg.data_dir.is_none());
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path()).expect("manager");

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded, Config::default());
    assert!(!manager.config_path().exists());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.currency = "EUR".to_string();
    cfg.rewards.xp_per_level = 50;
    cfg.data_dir = Some(dir.path().join("elsewhere"));

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"rewards": {"photo_bonus": 4}}"#).expect("write");

    let loaded = ConfigManager::new(path).load().expect("load config");
    assert_eq!(loaded.currency, "USD");
    assert_eq!(loaded.rewards.photo_bonus, 4);
    assert_eq!(loaded.rewards.xp_per_level, 25);
}

#[test]
fn zero_xp_per_level_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"rewards": {"xp_per_level": 0}}"#).expect("write");

    let manager = ConfigManager::new(path);
    assert!(matches!(manager.load(), Err(ConfigError::Invalid(_))));

    let mut cfg = Config::default();
    cfg.rewards.xp_per_level = 0;
    assert!(matches!(manager.save(&cfg), Err(ConfigError::Invalid(_))));
}

#[test]
fn malformed_file_reports_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{not json").expect("write");

    let err = ConfigManager::new(path).load().expect_err("malformed");
    assert!(matches!(err, ConfigError::Serde(_)));
}
