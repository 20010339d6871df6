use std::collections::HashMap;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rstest::rstest;
use tracing::Level;
use tutorbook_app::config::{AppConfig, DEFAULT_REMIND_HOURS, MAX_REMIND_HOURS};

fn config_from(vars: &[(&str, &str)]) -> eyre::Result<AppConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = config_from(&[]).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.data_dir, PathBuf::from("data"));
    assert_eq!(config.remind_window(), chrono::Duration::hours(48));
}

#[test]
fn test_reads_every_variable() {
    let config = config_from(&[
        ("TUTORBOOK_DATA_DIR", "/var/lib/tutorbook"),
        ("LOG_LEVEL", "debug"),
        ("TUTORBOOK_REMIND_HOURS", "24"),
    ])
    .unwrap();

    assert_eq!(config.data_dir, PathBuf::from("/var/lib/tutorbook"));
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(config.remind_window_hours, 24);
}

#[rstest]
#[case("trace", Level::TRACE)]
#[case("warn", Level::WARN)]
#[case("error", Level::ERROR)]
#[case("loud", Level::INFO)]
fn test_log_level(#[case] value: &str, #[case] expected: Level) {
    assert_eq!(config_from(&[("LOG_LEVEL", value)]).unwrap().log_level, expected);
}

#[rstest]
#[case("soon")]
#[case("0")]
#[case("-6")]
#[case("")]
#[case("8785")]
#[case("2500000000")]
#[case("9000000000000000")]
fn test_invalid_remind_hours_fall_back(#[case] value: &str) {
    let config = config_from(&[("TUTORBOOK_REMIND_HOURS", value)]).unwrap();
    assert_eq!(config.remind_window_hours, DEFAULT_REMIND_HOURS);
    assert_eq!(config.remind_window(), chrono::Duration::hours(DEFAULT_REMIND_HOURS));
}

#[test]
fn test_remind_hours_up_to_one_year() {
    let config = config_from(&[("TUTORBOOK_REMIND_HOURS", "8784")]).unwrap();
    assert_eq!(config.remind_window_hours, MAX_REMIND_HOURS);
    assert_eq!(config.remind_window(), chrono::Duration::days(366));
}

#[rstest]
#[case(i64::MAX)]
#[case(i64::MIN)]
#[case(0)]
fn test_out_of_range_window_set_directly_falls_back(#[case] hours: i64) {
    let config = AppConfig {
        remind_window_hours: hours,
        ..AppConfig::default()
    };
    assert_eq!(config.remind_window(), chrono::Duration::hours(DEFAULT_REMIND_HOURS));
}

#[test]
fn test_blank_data_dir_is_rejected() {
    let err = config_from(&[("TUTORBOOK_DATA_DIR", "  ")]).unwrap_err();
    assert!(err.to_string().contains("TUTORBOOK_DATA_DIR"));
}
