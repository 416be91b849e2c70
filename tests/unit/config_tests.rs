//! 配置加载测试

use chargelog::config::Settings;
use serial_test::serial;
use std::fs;
use std::time::Duration;

#[test]
#[serial]
fn test_load_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("default.toml"),
        r#"
[api]
base_url = "https://logs.example.com/api"

[session]
expiry_redirect_delay_ms = 500
"#,
    )
    .unwrap();

    std::env::remove_var("APP_ENV");
    let settings = Settings::load_from(dir.path()).unwrap();

    assert_eq!(settings.api.base_url, "https://logs.example.com/api");
    assert_eq!(settings.redirect_delay(), Duration::from_millis(500));
    // 未配置的段落使用默认值
    assert_eq!(settings.draft.ttl_seconds, 86_400);
    assert_eq!(settings.notice.operator(), Duration::from_millis(3000));
}

#[test]
#[serial]
fn test_environment_file_overrides_default() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("default.toml"), "[logging]\nformat = \"pretty\"\n").unwrap();
    fs::write(dir.path().join("staging.toml"), "[logging]\nformat = \"json\"\n").unwrap();

    std::env::set_var("APP_ENV", "staging");
    let settings = Settings::load_from(dir.path());
    std::env::remove_var("APP_ENV");

    assert_eq!(settings.unwrap().logging.format, "json");
}

#[test]
#[serial]
fn test_env_variables_override_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("default.toml"), "[draft]\nkey_prefix = \"from-file\"\n").unwrap();

    std::env::set_var("CHARGELOG_DRAFT__KEY_PREFIX", "from-env");
    let settings = Settings::load_from(dir.path());
    std::env::remove_var("CHARGELOG_DRAFT__KEY_PREFIX");

    assert_eq!(settings.unwrap().draft.key_prefix, "from-env");
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::env::remove_var("APP_ENV");

    let settings = Settings::load_from(&dir.path().join("absent")).unwrap();
    assert_eq!(settings.api.base_url, "http://localhost:5000/api");
    assert_eq!(settings.notice.admin(), Duration::from_millis(2500));
}
