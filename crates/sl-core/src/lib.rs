//! sl-core - Core library for Snowline
//!
//! This crate provides the identifier and string-literal grammar used to
//! build SQL text safely, validated object names, and the connection
//! configuration store shared by all Snowline components.

pub mod config;
pub mod error;
pub mod identifier;
pub mod literal;
pub mod object_name;
pub(crate) mod serde_helpers;

pub use config::{Config, ConnectionParams, LogsConfig};
pub use error::{CoreError, CoreResult};
pub use identifier::{
    append_to_identifier, clean_identifier, extract_schema, is_valid_identifier,
    is_valid_object_name, is_valid_quoted_identifier, is_valid_unquoted_identifier,
    split_object_name, to_identifier, unquote_identifier, Identifier, DEFAULT_MAX_DEPTH,
};
pub use literal::{
    escape_like_pattern, escape_like_pattern_with, identifier_to_show_like_pattern,
    is_valid_string_literal, to_string_literal,
};
pub use object_name::ObjectName;
