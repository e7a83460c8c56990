use super::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[test]
fn test_default_config_validates() {
    let config = DashboardConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.base_url, "http://localhost/api");
    assert_eq!(config.default_period, Period::Week);
    assert_eq!(config.recent_limit, 50);
    assert_eq!(config.request_timeout(), Duration::from_secs(15));
    assert_eq!(config.auto_refresh(), None);
}

#[test]
fn test_yaml_parsing_with_partial_fields() {
    let file = write_config(
        r#"
base_url: "https://platform.example.com/api"
default_period: "30d"
auto_refresh_secs: 60
"#,
    );

    let config = DashboardConfig::load(file.path()).unwrap();
    assert_eq!(config.base_url, "https://platform.example.com/api");
    assert_eq!(config.default_period, Period::Month);
    assert_eq!(config.auto_refresh(), Some(Duration::from_secs(60)));
    assert_eq!(config.recent_limit, 50);
    assert_eq!(config.token, None);
}

#[test]
fn test_empty_file_yields_defaults() {
    let file = write_config("  \n");
    let config = DashboardConfig::load(file.path()).unwrap();
    assert_eq!(config, DashboardConfig::default());
}

#[test]
fn test_unknown_field_fails_to_parse() {
    let file = write_config("base_url: \"http://x\"\nrefresh: 5\n");
    let err = DashboardConfig::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_invalid_period_fails_to_parse() {
    let file = write_config("default_period: \"24h\"\n");
    assert!(DashboardConfig::load(file.path()).is_err());
}

#[test]
fn test_load_or_default_without_files() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("config.yaml");

    let config = DashboardConfig::load_or_default(None, Some(&missing)).unwrap();
    assert_eq!(config, DashboardConfig::default());

    // An explicitly named file has to exist.
    assert!(DashboardConfig::load_or_default(Some(&missing), None).is_err());
}

#[test]
fn test_load_or_default_reads_fallback_location() {
    let file = write_config("recent_limit: 10\n");
    let config = DashboardConfig::load_or_default(None, Some(file.path())).unwrap();
    assert_eq!(config.recent_limit, 10);
}

#[test]
fn test_overrides_win_over_file_values() {
    let mut config = DashboardConfig {
        token: Some("from-file".to_string()),
        ..DashboardConfig::default()
    };
    config.apply_overrides(&ConfigOverrides {
        base_url: Some("https://override.example.com/api".to_string()),
        token: None,
        period: Some(Period::Quarter),
    });

    assert_eq!(config.base_url, "https://override.example.com/api");
    assert_eq!(config.token.as_deref(), Some("from-file"));
    assert_eq!(config.default_period, Period::Quarter);
}

#[test]
fn test_validation_rejects_bad_values() {
    let cases = [
        DashboardConfig {
            base_url: "  ".to_string(),
            ..DashboardConfig::default()
        },
        DashboardConfig {
            base_url: "localhost/api".to_string(),
            ..DashboardConfig::default()
        },
        DashboardConfig {
            recent_limit: 0,
            ..DashboardConfig::default()
        },
        DashboardConfig {
            request_timeout_secs: 0,
            ..DashboardConfig::default()
        },
        DashboardConfig {
            auto_refresh_secs: Some(0),
            ..DashboardConfig::default()
        },
    ];

    for config in cases {
        assert!(config.validate().is_err(), "expected rejection: {:?}", config);
    }
}
