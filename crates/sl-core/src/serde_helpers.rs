//! Shared serde helper functions for config values that may arrive as
//! strings from environment overrides.

use serde::{Deserialize, Deserializer};

/// Serde default function that returns `true`.
pub fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    Str(String),
}

/// Accept a port written either as a TOML integer or as a numeric string.
pub fn port_from_int_or_str<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<IntOrString>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(IntOrString::Int(n)) => u16::try_from(n)
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("port {} is out of range", n))),
        Some(IntOrString::Str(s)) => s
            .trim()
            .parse::<u16>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("Value of port must be integer, got '{}'", s))),
    }
}

/// Accept a boolean written either as a TOML boolean or as a string such as
/// `"true"`, `"0"`, or `"no"`.
pub fn bool_from_bool_or_str<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected a boolean, got '{}'",
                other
            ))),
        },
    }
}
