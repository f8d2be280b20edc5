use super::*;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    path
}

const SAMPLE: &str = r#"
default_connection_name = "dev"

[connections.dev]
account = "acme"
user = "jdoe"
password = "secret"
port = 443
client_session_keep_alive = true

[connections.prod]
account = "acme-prod"
user = "svc"
port = "8443"

[cli.logs]
save_logs = false
level = "debug"
"#;

#[test]
fn test_load_creates_missing_file_with_logs_section() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config::load(&path).unwrap();
    assert!(path.exists());
    assert!(config.section_exists(&[CLI_SECTION, LOGS_SECTION]));

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("[cli.logs]"));
    assert!(content.contains("save_logs = true"));
}

#[cfg(unix)]
#[test]
fn test_created_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    Config::load(&path).unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
    assert!(check_file_permissions(&path).is_ok());
}

#[cfg(unix)]
#[test]
fn test_check_file_permissions_rejects_wide_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    let err = check_file_permissions(&path).unwrap_err();
    match err {
        CoreError::ConfigTooWidePermissions { mode, .. } => assert_eq!(mode, 0o644),
        other => panic!("Expected ConfigTooWidePermissions, got {other:?}"),
    }
}

#[test]
fn test_load_invalid_toml() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[connections.dev\naccount = ");
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigParseError { .. }));
}

#[test]
#[serial_test::serial]
fn test_get_connection() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(&write_config(&dir, SAMPLE)).unwrap();

    let dev = config.get_connection("dev").unwrap();
    assert_eq!(dev.account.as_deref(), Some("acme"));
    assert_eq!(dev.user.as_deref(), Some("jdoe"));
    assert_eq!(dev.port, Some(443));
    assert_eq!(
        dev.extra.get("client_session_keep_alive"),
        Some(&toml::Value::Boolean(true))
    );

    let prod = config.get_connection("prod").unwrap();
    assert_eq!(prod.port, Some(8443));
}

#[test]
fn test_get_connection_missing() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(&write_config(&dir, SAMPLE)).unwrap();
    let err = config.get_connection("staging").unwrap_err();
    assert!(matches!(err, CoreError::ConnectionNotFound { ref name } if name == "staging"));
    assert!(err.to_string().contains("Connection staging is not configured"));
    assert!(!config.connection_exists("staging"));
    assert!(config.connection_exists("dev"));
}

#[test]
#[serial_test::serial]
fn test_connection_env_override() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(&write_config(&dir, SAMPLE)).unwrap();

    std::env::set_var("SNOWFLAKE_CONNECTIONS_DEV_PASSWORD", "from-env");
    std::env::set_var("SNOWFLAKE_CONNECTIONS_DEV_WAREHOUSE", "xsmall");
    std::env::set_var("SNOWFLAKE_CONNECTIONS_DEV_PORT", "8080");
    let dev = config.get_connection("dev");
    std::env::remove_var("SNOWFLAKE_CONNECTIONS_DEV_PASSWORD");
    std::env::remove_var("SNOWFLAKE_CONNECTIONS_DEV_WAREHOUSE");
    std::env::remove_var("SNOWFLAKE_CONNECTIONS_DEV_PORT");

    let dev = dev.unwrap();
    assert_eq!(dev.password.as_deref(), Some("from-env"));
    assert_eq!(dev.warehouse.as_deref(), Some("xsmall"));
    assert_eq!(dev.port, Some(8080));

    // Overrides are read-time only
    let content = std::fs::read_to_string(config.path()).unwrap();
    assert!(!content.contains("from-env"));
}

#[test]
#[serial_test::serial]
fn test_env_override_does_not_leak_into_prefix_connection() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(&write_config(
        &dir,
        "[connections.dev]\naccount = \"a\"\n\n[connections.dev_x]\naccount = \"b\"\n",
    ))
    .unwrap();

    std::env::set_var("SNOWFLAKE_CONNECTIONS_DEV_X_PASSWORD", "topsecret");
    let dev = config.get_connection("dev");
    let dev_x = config.get_connection("dev_x");
    std::env::remove_var("SNOWFLAKE_CONNECTIONS_DEV_X_PASSWORD");

    let dev = dev.unwrap();
    assert!(dev.extra.is_empty(), "{:?}", dev.extra);
    assert_eq!(dev.password, None);
    assert_eq!(dev_x.unwrap().password.as_deref(), Some("topsecret"));
}

#[test]
#[serial_test::serial]
fn test_env_override_skips_nested_section() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(&write_config(&dir, "[cli]\n\n[cli.logs]\n")).unwrap();

    std::env::set_var("SNOWFLAKE_CLI_LOGS_LEVEL", "debug");
    let cli = config.get_section(&[CLI_SECTION]);
    std::env::remove_var("SNOWFLAKE_CLI_LOGS_LEVEL");

    assert!(!cli.unwrap().contains_key("logs_level"));
}

#[test]
#[serial_test::serial]
fn test_connection_env_override_invalid_port() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(&write_config(&dir, SAMPLE)).unwrap();

    std::env::set_var("SNOWFLAKE_CONNECTIONS_PROD_PORT", "not-a-port");
    let result = config.get_connection("prod");
    std::env::remove_var("SNOWFLAKE_CONNECTIONS_PROD_PORT");

    let err = result.unwrap_err();
    assert!(matches!(err, CoreError::ConfigParseError { .. }));
}

#[test]
#[serial_test::serial]
fn test_get_value_prefers_env() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(&write_config(&dir, SAMPLE)).unwrap();

    assert_eq!(
        config.get_value(&[CONNECTIONS_SECTION, "dev"], "user"),
        Some(toml::Value::String("jdoe".to_string()))
    );
    assert_eq!(config.get_value(&[CONNECTIONS_SECTION, "dev"], "role"), None);

    std::env::set_var("SNOWFLAKE_CONNECTIONS_DEV_USER", "override");
    let value = config.get_value(&[CONNECTIONS_SECTION, "dev"], "user");
    std::env::remove_var("SNOWFLAKE_CONNECTIONS_DEV_USER");
    assert_eq!(value, Some(toml::Value::String("override".to_string())));
}

#[test]
fn test_env_variable_name() {
    assert_eq!(
        env_variable_name(&[CONNECTIONS_SECTION, "dev"], "password"),
        "SNOWFLAKE_CONNECTIONS_DEV_PASSWORD"
    );
    assert_eq!(
        env_variable_name(&[], "default_connection_name"),
        "SNOWFLAKE_DEFAULT_CONNECTION_NAME"
    );
}

#[test]
#[serial_test::serial]
fn test_connections_sorted() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(&write_config(&dir, SAMPLE)).unwrap();
    let names: Vec<String> = config.connections().unwrap().into_keys().collect();
    assert_eq!(names, vec!["dev".to_string(), "prod".to_string()]);
}

#[test]
fn test_connections_empty() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(&dir.path().join("config.toml")).unwrap();
    assert!(config.connections().unwrap().is_empty());
}

#[test]
#[serial_test::serial]
fn test_add_connection_persists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let mut config = Config::load(&path).unwrap();

    let params = ConnectionParams {
        account: Some("acme".to_string()),
        user: Some("jdoe".to_string()),
        port: Some(443),
        ..Default::default()
    };
    config.add_connection("new_conn", &params).unwrap();

    let reloaded = Config::load(&path).unwrap();
    assert!(reloaded.connection_exists("new_conn"));
    assert_eq!(reloaded.get_connection("new_conn").unwrap(), params);
    // Existing sections survive
    assert!(reloaded.section_exists(&[CLI_SECTION, LOGS_SECTION]));
}

#[test]
#[serial_test::serial]
fn test_add_connection_replaces_existing() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::load(&write_config(&dir, SAMPLE)).unwrap();
    let params = ConnectionParams {
        account: Some("other".to_string()),
        ..Default::default()
    };
    config.add_connection("dev", &params).unwrap();
    let dev = config.get_connection("dev").unwrap();
    assert_eq!(dev.account.as_deref(), Some("other"));
    assert_eq!(dev.user, None);
}

#[test]
fn test_add_connection_rejects_bad_name() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::load(&dir.path().join("config.toml")).unwrap();
    for name in ["", "my conn", "a.b", "[x]", "\"q\""] {
        let err = config
            .add_connection(name, &ConnectionParams::default())
            .unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidConnectionName { .. }),
            "{name:?}"
        );
    }
}

#[test]
#[serial_test::serial]
fn test_default_connection() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::load(&write_config(&dir, SAMPLE)).unwrap();
    assert_eq!(config.default_connection_name(), "dev");
    assert_eq!(
        config.default_connection().unwrap().account.as_deref(),
        Some("acme")
    );

    config.set_default_connection("prod").unwrap();
    let reloaded = Config::load(config.path()).unwrap();
    assert_eq!(reloaded.default_connection_name(), "prod");

    assert!(matches!(
        config.set_default_connection("missing"),
        Err(CoreError::ConnectionNotFound { .. })
    ));
}

#[test]
#[serial_test::serial]
fn test_default_connection_name_env_and_fallback() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config.default_connection_name(), DEFAULT_CONNECTION_NAME);

    std::env::set_var("SNOWFLAKE_DEFAULT_CONNECTION_NAME", "from_env");
    let name = config.default_connection_name();
    std::env::remove_var("SNOWFLAKE_DEFAULT_CONNECTION_NAME");
    assert_eq!(name, "from_env");
}

#[test]
fn test_masked_connection() {
    let params = ConnectionParams {
        user: Some("jdoe".to_string()),
        password: Some("secret".to_string()),
        ..Default::default()
    };
    let masked = params.masked();
    assert_eq!(masked.password.as_deref(), Some("****"));
    assert_eq!(masked.user.as_deref(), Some("jdoe"));
    assert_eq!(ConnectionParams::default().masked().password, None);
}

#[test]
fn test_masked_connection_hides_secret_extra_keys() {
    let mut params = ConnectionParams::default();
    params
        .extra
        .insert("x_password".to_string(), toml::Value::String("topsecret".to_string()));
    params
        .extra
        .insert("oauth_token".to_string(), toml::Value::String("tok".to_string()));
    params
        .extra
        .insert("client_session_keep_alive".to_string(), toml::Value::Boolean(true));

    let masked = params.masked();
    assert_eq!(
        masked.extra.get("x_password"),
        Some(&toml::Value::String("****".to_string()))
    );
    assert_eq!(
        masked.extra.get("oauth_token"),
        Some(&toml::Value::String("****".to_string()))
    );
    assert_eq!(
        masked.extra.get("client_session_keep_alive"),
        Some(&toml::Value::Boolean(true))
    );
}

#[test]
#[serial_test::serial]
fn test_logs_config() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(&write_config(&dir, SAMPLE)).unwrap();
    let logs = config.logs_config().unwrap();
    assert!(!logs.save_logs);
    assert_eq!(logs.level, "debug");
    assert_eq!(logs.path, Some(dir.path().join("logs")));
}

#[test]
#[serial_test::serial]
fn test_logs_config_defaults_and_env() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(&write_config(&dir, "")).unwrap();
    let logs = config.logs_config().unwrap();
    assert!(logs.save_logs);
    assert_eq!(logs.level, "info");

    let config = Config::load(&write_config(&dir, "[cli.logs]\n")).unwrap();
    std::env::set_var("SNOWFLAKE_CLI_LOGS_SAVE_LOGS", "false");
    let logs = config.logs_config();
    std::env::remove_var("SNOWFLAKE_CLI_LOGS_SAVE_LOGS");
    assert!(!logs.unwrap().save_logs);
}

#[test]
fn test_validate_connection_name() {
    assert!(validate_connection_name("dev").is_ok());
    assert!(validate_connection_name("my-conn_2").is_ok());
    assert!(validate_connection_name("with space").is_err());
}
