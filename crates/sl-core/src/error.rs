//! Error types for sl-core

use thiserror::Error;

/// Core error type for Snowline
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Programmer error, such as a negative qualification depth
    #[error("[C001] Invalid argument: {0}")]
    InvalidArgument(String),

    /// C002: String is neither a valid quoted nor unquoted identifier
    #[error("[C002] Invalid identifier: {identifier}")]
    InvalidIdentifier { identifier: String },

    /// C003: Object name does not match the qualified-name grammar
    #[error("[C003] '{name}' is not a valid object name (at most {max_parts} part(s) allowed)")]
    InvalidObjectName { name: String, max_parts: usize },

    /// C004: Failed to parse the configuration file
    #[error("[C004] Failed to parse config {path}: {message}")]
    ConfigParseError { path: String, message: String },

    /// C005: Connection is not configured
    #[error("[C005] Connection {name} is not configured")]
    ConnectionNotFound { name: String },

    /// C006: Connection name cannot be used as a config section
    #[error("[C006] Invalid connection name '{name}': {reason}")]
    InvalidConnectionName { name: String, reason: String },

    /// C007: Config file readable by group or others
    #[error("[C007] Configuration file {path} has too wide permissions ({mode:o}), run `chmod 0600 \"{path}\"`")]
    ConfigTooWidePermissions { path: String, mode: u32 },

    /// C008: Home directory could not be determined
    #[error("[C008] Could not determine home directory for the default config location")]
    HomeDirNotFound,

    /// C009: IO error
    #[error("[C009] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// C010: IO error with file path context
    #[error("[C010] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C011: Config serialization error
    #[error("[C011] Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
