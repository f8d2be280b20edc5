//! Error types for sl-sql

use sl_core::CoreError;
use thiserror::Error;

/// Statement construction errors
#[derive(Error, Debug)]
pub enum SqlError {
    /// Name failed validation for the object kind (Q001)
    #[error("[Q001] '{name}' is not a valid {kind} name.")]
    InvalidName { kind: String, name: String },

    /// A SET/UNSET statement without any property (Q002)
    #[error("[Q002] {0}")]
    NoPropertiesProvided(String),

    /// Maximum node count below the minimum (Q003)
    #[error("[Q003] max_nodes must be greater or equal to min_nodes (min_nodes={min}, max_nodes={max})")]
    InvalidNodeRange { min: u32, max: u32 },

    /// Property value out of range or malformed (Q004)
    #[error("[Q004] {0}")]
    InvalidValue(String),

    /// Unknown or disallowed `IN <scope>` clause (Q005)
    #[error("[Q005] {0}")]
    InvalidScope(String),

    /// Object type name not recognised (Q006)
    #[error("[Q006] Unknown object type '{0}'")]
    UnknownObjectType(String),

    /// Operation not available for the object type (Q007)
    #[error("[Q007] {operation} is not supported for object type {object_type}")]
    UnsupportedOperation {
        operation: String,
        object_type: String,
    },

    /// Maximum instance count below the minimum (Q008)
    #[error("[Q008] max_instances must be greater or equal to min_instances (min_instances={min}, max_instances={max})")]
    InvalidInstanceRange { min: u32, max: u32 },

    /// Service specification that cannot be embedded in a statement (Q009)
    #[error("[Q009] Invalid service specification: {0}")]
    InvalidSpecification(String),

    /// Error from sl-core
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
