use std::io::Write;
use std::time::Duration;

use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

use pricegap::application::EngineConfig;
use pricegap::error::{ConfigError, Error};
use pricegap::infrastructure::config::settings::Config;

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn config_loads_from_file() {
    let toml = r#"
[engine]
round_deadline_ms = 3000
call_deadline_ms = 8000
min_profit_percent = 0.75

[resolver]
cache_ttl_secs = 120

[sources]
enabled = ["Binance", "Bybit", "Raydium"]

[logging]
level = "pricegap=debug"
format = "json"
"#;

    let file = write_temp_config(toml);
    let config = Config::load(file.path()).unwrap();
    let engine = EngineConfig::from(&config);

    assert_eq!(engine.round_deadline, Duration::from_secs(3));
    assert_eq!(engine.call_deadline, Duration::from_secs(8));
    assert_eq!(engine.min_profit_percent, dec!(0.75));
    assert_eq!(engine.round_budget(), Duration::from_secs(3));
    assert_eq!(config.resolver.cache_ttl(), Duration::from_secs(120));
    assert_eq!(config.sources.enabled.len(), 3);
    assert_eq!(config.sources.probe_timeout(), Duration::from_secs(5));
    assert_eq!(config.logging.level, "pricegap=debug");
}

#[test]
fn config_rejects_zero_round_deadline() {
    let file = write_temp_config("[engine]\nround_deadline_ms = 0\n");

    match Config::load(file.path()) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "round_deadline_ms",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid round deadline error, got {err}"),
        Ok(config) => panic!(
            "Expected zero round deadline to be rejected, got {}",
            config.engine.round_deadline_ms
        ),
    }
}

#[test]
fn config_rejects_negative_threshold() {
    let file = write_temp_config("[engine]\nmin_profit_percent = -1\n");

    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "min_profit_percent",
            ..
        }))
    ));
}

#[test]
fn config_rejects_zero_probe_timeout() {
    let file = write_temp_config("[sources]\nprobe_timeout_ms = 0\n");

    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "probe_timeout_ms",
            ..
        }))
    ));
}

#[test]
fn config_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(dir.path().join("absent.toml"));

    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}
