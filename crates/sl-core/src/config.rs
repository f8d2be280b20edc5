//! Connection configuration stored in `config.toml`.
//!
//! The file holds named connections under `[connections.<name>]`, the
//! default connection name, and CLI settings under `[cli]`. Any key can be
//! overridden at read time by an environment variable named
//! `SNOWFLAKE_<SECTION PATH>_<KEY>`, all upper case and joined by `_`;
//! overrides are never written back to the file.

use crate::error::{CoreError, CoreResult};
use crate::serde_helpers::{bool_from_bool_or_str, default_true, port_from_int_or_str};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level table holding named connections
pub const CONNECTIONS_SECTION: &str = "connections";

/// Top-level table holding CLI settings
pub const CLI_SECTION: &str = "cli";

/// Table under [`CLI_SECTION`] holding logging settings
pub const LOGS_SECTION: &str = "logs";

/// Prefix shared by every environment override
pub const ENV_PREFIX: &str = "SNOWFLAKE";

/// Connection used when none is configured as default
pub const DEFAULT_CONNECTION_NAME: &str = "default";

const DEFAULT_CONNECTION_KEY: &str = "default_connection_name";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Fragments marking a connection key as secret; matched case-insensitively.
const SENSITIVE_KEY_MARKERS: [&str; 5] = ["password", "passcode", "passphrase", "secret", "token"];
const MASK: &str = "****";

fn is_sensitive_key(key: &str) -> bool {
    let key = key.to_lowercase();
    SENSITIVE_KEY_MARKERS.iter().any(|marker| key.contains(marker))
}

/// Parameters of a single named connection.
///
/// Keys the CLI does not know about are preserved in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "port_from_int_or_str"
    )]
    pub port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key_path: Option<String>,

    /// Any other connector parameters
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

impl ConnectionParams {
    /// Copy of these parameters with the password and any secret-looking
    /// extra key hidden, for display.
    pub fn masked(&self) -> Self {
        let mut masked = self.clone();
        if masked.password.is_some() {
            masked.password = Some(MASK.to_string());
        }
        for (key, value) in masked.extra.iter_mut() {
            if is_sensitive_key(key) {
                *value = toml::Value::String(MASK.to_string());
            }
        }
        masked
    }
}

/// Logging settings from `[cli.logs]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogsConfig {
    /// Whether logs are written to a file
    #[serde(default = "default_true", deserialize_with = "bool_from_bool_or_str")]
    pub save_logs: bool,

    /// Log level filter, e.g. `info` or `debug`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files; defaults to `logs/` next to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            save_logs: true,
            level: default_log_level(),
            path: None,
        }
    }
}

/// A loaded configuration file
#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    document: toml::Table,
}

/// Location of the config file when none is given explicitly.
///
/// `SNOWFLAKE_HOME` takes precedence over `~/.snowflake`.
pub fn default_config_path() -> CoreResult<PathBuf> {
    if let Ok(home) = std::env::var("SNOWFLAKE_HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home).join("config.toml"));
        }
    }
    let home = dirs::home_dir().ok_or(CoreError::HomeDirNotFound)?;
    Ok(home.join(".snowflake").join("config.toml"))
}

/// Environment variable prefix for a section path, including the trailing `_`.
fn env_prefix(path: &[&str]) -> String {
    let mut prefix = ENV_PREFIX.to_string();
    for part in path {
        prefix.push('_');
        prefix.push_str(&part.to_uppercase());
    }
    prefix.push('_');
    prefix
}

/// Name of the environment variable overriding `key` under `path`.
pub fn env_variable_name(path: &[&str], key: &str) -> String {
    format!("{}{}", env_prefix(path), key.to_uppercase())
}

/// All environment overrides for a section, keyed by lower-cased key name.
///
/// Variables starting with one of the `shadowed` prefixes belong to another
/// section and are skipped.
fn env_overrides(path: &[&str], shadowed: &[String]) -> toml::Table {
    let prefix = env_prefix(path);
    std::env::vars()
        .filter(|(name, _)| !shadowed.iter().any(|other| name.starts_with(other.as_str())))
        .filter_map(|(name, value)| {
            let key = name.strip_prefix(&prefix)?;
            if key.is_empty() {
                return None;
            }
            Some((key.to_lowercase(), toml::Value::String(value)))
        })
        .collect()
}

/// Check that a connection name can be used as a TOML section key and an
/// environment variable fragment.
pub fn validate_connection_name(name: &str) -> CoreResult<()> {
    let reason = if name.is_empty() {
        Some("name cannot be empty")
    } else if name.chars().any(char::is_whitespace) {
        Some("name cannot contain whitespace")
    } else if name.contains(['.', '[', ']', '"', '\'']) {
        Some("name cannot contain '.', '[', ']' or quotes")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CoreError::InvalidConnectionName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Reject a config file that group or other users can access.
#[cfg(unix)]
pub fn check_file_permissions(path: &Path) -> CoreResult<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path).map_err(|e| CoreError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })?;
    let mode = metadata.permissions().mode() & 0o777;
    if mode & 0o077 != 0 {
        return Err(CoreError::ConfigTooWidePermissions {
            path: path.display().to_string(),
            mode,
        });
    }
    Ok(())
}

#[cfg(not(unix))]
pub fn check_file_permissions(_path: &Path) -> CoreResult<()> {
    Ok(())
}

impl Config {
    /// Load the config file at the default location, creating it if needed.
    ///
    /// An existing default file must not be readable by group or others.
    pub fn load_default() -> CoreResult<Self> {
        let path = default_config_path()?;
        if path.exists() {
            check_file_permissions(&path)?;
        }
        Self::load(&path)
    }

    /// Load the config file at `path`, creating it with default CLI settings
    /// when it does not exist.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Self::initialise(path);
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let document: toml::Table =
            toml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        log::debug!("Loaded configuration from {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    fn initialise(path: &Path) -> CoreResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CoreError::IoWithPath {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let mut logs = toml::Table::new();
        logs.insert("save_logs".to_string(), toml::Value::Boolean(true));
        logs.insert(
            "level".to_string(),
            toml::Value::String(DEFAULT_LOG_LEVEL.to_string()),
        );
        let mut cli = toml::Table::new();
        cli.insert(LOGS_SECTION.to_string(), toml::Value::Table(logs));
        let mut document = toml::Table::new();
        document.insert(CLI_SECTION.to_string(), toml::Value::Table(cli));

        let config = Self {
            path: path.to_path_buf(),
            document,
        };
        config.save()?;
        log::info!("Created configuration file at {}", path.display());
        Ok(config)
    }

    /// Write the configuration back to its file.
    ///
    /// Environment overrides are not persisted. New files are created with
    /// owner-only permissions.
    pub fn save(&self) -> CoreResult<()> {
        use std::io::Write;

        let content = toml::to_string(&self.document)?;
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let io_err = |e: std::io::Error| CoreError::IoWithPath {
            path: self.path.display().to_string(),
            source: e,
        };
        let mut file = options.open(&self.path).map_err(io_err)?;
        file.write_all(content.as_bytes()).map_err(io_err)?;
        Ok(())
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Find the raw table at `path`, without environment overrides.
    fn find_section(&self, path: &[&str]) -> Option<&toml::Table> {
        let mut section = &self.document;
        for part in path {
            section = section.get(*part)?.as_table()?;
        }
        Some(section)
    }

    /// Whether a table exists at `path`.
    pub fn section_exists(&self, path: &[&str]) -> bool {
        self.find_section(path).is_some()
    }

    /// Environment prefixes of other sections that extend the prefix of the
    /// section at `path`.
    ///
    /// With `[connections.dev]` and `[connections.dev_x]`, the variable
    /// `SNOWFLAKE_CONNECTIONS_DEV_X_PASSWORD` belongs to `dev_x`. The same
    /// holds for nested tables such as `[cli.logs]` under `[cli]`.
    fn shadowed_prefixes(&self, path: &[&str]) -> Vec<String> {
        let own = env_prefix(path);
        let mut candidates: Vec<Vec<&str>> = Vec::new();
        if let Some((_, parent)) = path.split_last() {
            if let Some(parent_section) = self.find_section(parent) {
                for (name, value) in parent_section {
                    if value.is_table() {
                        let mut sibling = parent.to_vec();
                        sibling.push(name.as_str());
                        candidates.push(sibling);
                    }
                }
            }
        }
        if let Some(section) = self.find_section(path) {
            for (name, value) in section {
                if value.is_table() {
                    let mut child = path.to_vec();
                    child.push(name.as_str());
                    candidates.push(child);
                }
            }
        }
        candidates
            .iter()
            .map(|other| env_prefix(other))
            .filter(|other| other.len() > own.len() && other.starts_with(&own))
            .collect()
    }

    /// The table at `path` merged with its environment overrides.
    pub fn get_section(&self, path: &[&str]) -> Option<toml::Table> {
        let mut section = self.find_section(path)?.clone();
        let overrides = env_overrides(path, &self.shadowed_prefixes(path));
        if !overrides.is_empty() {
            log::debug!(
                "Applying {} environment override(s) to [{}]",
                overrides.len(),
                path.join(".")
            );
        }
        section.extend(overrides);
        Some(section)
    }

    /// Look up `key` under `path`; an environment override wins over the file.
    pub fn get_value(&self, path: &[&str], key: &str) -> Option<toml::Value> {
        if let Ok(value) = std::env::var(env_variable_name(path, key)) {
            if !value.is_empty() {
                return Some(toml::Value::String(value));
            }
        }
        self.find_section(path)?.get(key).cloned()
    }

    pub fn connection_exists(&self, name: &str) -> bool {
        self.section_exists(&[CONNECTIONS_SECTION, name])
    }

    /// Parameters of the connection `name`, with environment overrides.
    pub fn get_connection(&self, name: &str) -> CoreResult<ConnectionParams> {
        let section = self
            .get_section(&[CONNECTIONS_SECTION, name])
            .ok_or_else(|| CoreError::ConnectionNotFound {
                name: name.to_string(),
            })?;
        section_into(section, &self.path)
    }

    /// All configured connections, sorted by name.
    pub fn connections(&self) -> CoreResult<BTreeMap<String, ConnectionParams>> {
        let Some(section) = self.find_section(&[CONNECTIONS_SECTION]) else {
            return Ok(BTreeMap::new());
        };
        section
            .iter()
            .filter(|(_, value)| value.is_table())
            .map(|(name, _)| Ok((name.clone(), self.get_connection(name)?)))
            .collect()
    }

    /// Insert or replace the connection `name` and persist the file.
    pub fn add_connection(&mut self, name: &str, params: &ConnectionParams) -> CoreResult<()> {
        validate_connection_name(name)?;
        let table = match toml::Value::try_from(params)? {
            toml::Value::Table(table) => table,
            _ => toml::Table::new(),
        };

        let connections = self
            .document
            .entry(CONNECTIONS_SECTION)
            .or_insert(toml::Value::Table(toml::Table::new()));
        if !connections.is_table() {
            log::warn!(
                "Replacing non-table '{}' entry in {}",
                CONNECTIONS_SECTION,
                self.path.display()
            );
            *connections = toml::Value::Table(toml::Table::new());
        }
        if let toml::Value::Table(connections) = connections {
            connections.insert(name.to_string(), toml::Value::Table(table));
        }

        self.save()
    }

    /// Name of the default connection.
    ///
    /// `SNOWFLAKE_DEFAULT_CONNECTION_NAME` wins over the file; falls back to
    /// [`DEFAULT_CONNECTION_NAME`].
    pub fn default_connection_name(&self) -> String {
        match self.get_value(&[], DEFAULT_CONNECTION_KEY) {
            Some(toml::Value::String(name)) => name,
            _ => DEFAULT_CONNECTION_NAME.to_string(),
        }
    }

    /// Parameters of the default connection.
    pub fn default_connection(&self) -> CoreResult<ConnectionParams> {
        self.get_connection(&self.default_connection_name())
    }

    /// Make `name` the default connection and persist the file.
    pub fn set_default_connection(&mut self, name: &str) -> CoreResult<()> {
        if !self.connection_exists(name) {
            return Err(CoreError::ConnectionNotFound {
                name: name.to_string(),
            });
        }
        self.document.insert(
            DEFAULT_CONNECTION_KEY.to_string(),
            toml::Value::String(name.to_string()),
        );
        self.save()
    }

    /// Logging settings, with defaults for anything not configured.
    pub fn logs_config(&self) -> CoreResult<LogsConfig> {
        let path = [CLI_SECTION, LOGS_SECTION];
        let mut logs = match self.get_section(&path) {
            Some(section) => section_into(section, &self.path)?,
            None => LogsConfig::default(),
        };
        if logs.path.is_none() {
            let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
            logs.path = Some(dir.join("logs"));
        }
        Ok(logs)
    }
}

fn section_into<T: serde::de::DeserializeOwned>(
    section: toml::Table,
    path: &Path,
) -> CoreResult<T> {
    toml::Value::Table(section)
        .try_into()
        .map_err(|e: toml::de::Error| CoreError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
