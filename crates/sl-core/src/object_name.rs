//! Strongly-typed, validated object name.

use crate::error::{CoreError, CoreResult};
use crate::identifier::{
    extract_schema, is_valid_object_name, split_object_name, unquote_identifier,
    DEFAULT_MAX_DEPTH,
};
use crate::literal::identifier_to_show_like_pattern;
use serde::Serialize;
use std::fmt;
use std::ops::Deref;

/// An object name in the form `name`, `schema.name`, or `database.schema.name`.
///
/// Construction validates the name against the identifier grammar, so every
/// segment is either a valid quoted or unquoted identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ObjectName(String);

impl ObjectName {
    /// Parse `name`, allowing at most `max_depth` qualifying segments.
    ///
    /// # Errors
    /// [`CoreError::InvalidArgument`] for a negative `max_depth`,
    /// [`CoreError::InvalidObjectName`] when `name` does not match.
    pub fn parse(name: impl Into<String>, max_depth: i32) -> CoreResult<Self> {
        let name = name.into();
        if is_valid_object_name(&name, max_depth)? {
            Ok(Self(name))
        } else {
            Err(CoreError::InvalidObjectName {
                name,
                max_parts: max_depth as usize + 1,
            })
        }
    }

    /// Return the name as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Identifier segments, outermost first.
    pub fn parts(&self) -> Vec<&str> {
        split_object_name(&self.0).unwrap_or_else(|| vec![self.0.as_str()])
    }

    /// The unqualified object identifier (last segment).
    pub fn name(&self) -> &str {
        self.parts().last().copied().unwrap_or(self.0.as_str())
    }

    /// The schema segment, if the name is schema-qualified.
    pub fn schema(&self) -> Option<&str> {
        extract_schema(&self.0)
    }

    /// The database segment of a three-part name.
    pub fn database(&self) -> Option<&str> {
        match self.parts().as_slice() {
            [database, _, _] => Some(*database),
            _ => None,
        }
    }

    pub fn is_qualified(&self) -> bool {
        self.parts().len() > 1
    }

    /// The unqualified name as stored by the platform.
    pub fn canonical_name(&self) -> String {
        unquote_identifier(self.name())
    }

    /// Quoted `SHOW ... LIKE` pattern matching exactly this object's name.
    pub fn show_like_pattern(&self) -> String {
        identifier_to_show_like_pattern(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for ObjectName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ObjectName::parse(s, DEFAULT_MAX_DEPTH).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<&str> for ObjectName {
    type Error = CoreError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        ObjectName::parse(s, DEFAULT_MAX_DEPTH)
    }
}

impl TryFrom<String> for ObjectName {
    type Error = CoreError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        ObjectName::parse(s, DEFAULT_MAX_DEPTH)
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ObjectName {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ObjectName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ObjectName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "object_name_test.rs"]
mod tests;
