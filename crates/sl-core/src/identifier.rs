//! Identifier grammar for platform object names.
//!
//! Unquoted identifiers are case-insensitive and stored upper-cased by the
//! platform. Quoted identifiers are case-preserving, may contain any
//! character, and escape an embedded double quote by doubling it.
//!
//! Every function here is pure: the compiled patterns are process-wide
//! immutable data, initialised once on first use.

use crate::error::{CoreError, CoreResult};
use regex::Regex;
use std::sync::OnceLock;

/// Unquoted identifier: a letter or underscore followed by up to 254
/// letters, digits, underscores or dollar signs.
pub const UNQUOTED_IDENTIFIER_REGEX: &str = r"([a-zA-Z_])([a-zA-Z0-9_$]{0,254})";

/// Quoted identifier: up to 255 units of content between double quotes, where a
/// unit is either an escaped quote (`""`) or any non-quote character.
pub const QUOTED_IDENTIFIER_REGEX: &str = r#""((""|[^"]){0,255})""#;

/// Either identifier form.
pub const VALID_IDENTIFIER_REGEX: &str =
    r#"(?:([a-zA-Z_])([a-zA-Z0-9_$]{0,254})|"((""|[^"]){0,255})")"#;

/// Default depth for [`is_valid_object_name`]: `database.schema.object`.
pub const DEFAULT_MAX_DEPTH: i32 = 2;

/// Maximum length of an unquoted identifier.
const MAX_UNQUOTED_LEN: usize = 255;

static UNQUOTED_RE: OnceLock<Regex> = OnceLock::new();
static QUOTED_RE: OnceLock<Regex> = OnceLock::new();

fn unquoted_regex() -> &'static Regex {
    UNQUOTED_RE.get_or_init(|| {
        Regex::new(&format!("^(?:{})$", UNQUOTED_IDENTIFIER_REGEX)).expect("valid regex literal")
    })
}

fn quoted_regex() -> &'static Regex {
    QUOTED_RE.get_or_init(|| {
        Regex::new(&format!("^(?:{})$", QUOTED_IDENTIFIER_REGEX)).expect("valid regex literal")
    })
}

/// Whether `identifier` is a valid unquoted identifier.
///
/// # Examples
/// ```
/// use sl_core::identifier::is_valid_unquoted_identifier;
/// assert!(is_valid_unquoted_identifier("_aA1"));
/// assert!(!is_valid_unquoted_identifier("1a"));
/// ```
pub fn is_valid_unquoted_identifier(identifier: &str) -> bool {
    unquoted_regex().is_match(identifier)
}

/// Whether `identifier` is a valid quoted identifier.
///
/// An empty quoted identifier (`""`) is valid.
///
/// # Examples
/// ```
/// use sl_core::identifier::is_valid_quoted_identifier;
/// assert!(is_valid_quoted_identifier(r#""""#));
/// assert!(is_valid_quoted_identifier(r#""a""b""#));
/// assert!(!is_valid_quoted_identifier(r#""a"b""#));
/// ```
pub fn is_valid_quoted_identifier(identifier: &str) -> bool {
    quoted_regex().is_match(identifier)
}

/// Whether `identifier` is a valid quoted or unquoted identifier.
pub fn is_valid_identifier(identifier: &str) -> bool {
    is_valid_unquoted_identifier(identifier) || is_valid_quoted_identifier(identifier)
}

/// A single identifier tagged by its surface syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identifier<'a> {
    /// Bare identifier, folded to upper case by the platform
    Unquoted(&'a str),
    /// Identifier including its surrounding double quotes
    Quoted(&'a str),
}

impl<'a> Identifier<'a> {
    /// Classify `s`, returning `None` if it is not a valid identifier.
    pub fn parse(s: &'a str) -> Option<Self> {
        if is_valid_unquoted_identifier(s) {
            Some(Identifier::Unquoted(s))
        } else if is_valid_quoted_identifier(s) {
            Some(Identifier::Quoted(s))
        } else {
            None
        }
    }

    /// The identifier exactly as written.
    pub fn as_str(&self) -> &'a str {
        match self {
            Identifier::Unquoted(s) | Identifier::Quoted(s) => s,
        }
    }

    pub fn is_quoted(&self) -> bool {
        matches!(self, Identifier::Quoted(_))
    }

    /// The name as the platform stores it.
    ///
    /// A `Quoted` value built by hand without its surrounding quotes is
    /// taken as the bare quoted body.
    pub fn canonical(&self) -> String {
        match self {
            Identifier::Unquoted(s) => s.to_uppercase(),
            Identifier::Quoted(s) => s
                .strip_prefix('"')
                .and_then(|body| body.strip_suffix('"'))
                .unwrap_or(s)
                .replace("\"\"", "\""),
        }
    }
}

impl std::fmt::Display for Identifier<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a dotted name into its raw segments without validating them.
///
/// A segment starting with `"` runs to the first quote that is not part of a
/// doubled pair, so dots inside quoted segments do not split. Returns `None`
/// for an unterminated quoted segment or trailing text after a closing quote.
fn split_segments(name: &str) -> Option<Vec<&str>> {
    let bytes = name.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    let mut i = 0;

    loop {
        if bytes.get(i) == Some(&b'"') {
            i += 1;
            loop {
                match bytes.get(i) {
                    None => return None,
                    Some(b'"') if bytes.get(i + 1) == Some(&b'"') => i += 2,
                    Some(b'"') => {
                        i += 1;
                        break;
                    }
                    Some(_) => i += 1,
                }
            }
        } else {
            while i < bytes.len() && bytes[i] != b'.' {
                i += 1;
            }
        }

        parts.push(&name[start..i]);

        match bytes.get(i) {
            None => return Some(parts),
            Some(b'.') => {
                i += 1;
                start = i;
            }
            Some(_) => return None,
        }
    }
}

/// Split a qualified name into identifier segments.
///
/// Returns `None` if any segment is not a valid identifier.
///
/// # Examples
/// ```
/// use sl_core::identifier::split_object_name;
/// assert_eq!(split_object_name(r#"db."my.schema".t"#), Some(vec!["db", r#""my.schema""#, "t"]));
/// assert_eq!(split_object_name("db..t"), None);
/// ```
pub fn split_object_name(name: &str) -> Option<Vec<&str>> {
    let parts = split_segments(name)?;
    parts
        .iter()
        .all(|part| is_valid_identifier(part))
        .then_some(parts)
}

/// Whether `name` is 1 to `max_depth + 1` valid identifiers joined by `.`.
///
/// A `max_depth` of 0 only admits a single identifier (account-level
/// objects cannot be qualified by a database or schema).
///
/// # Errors
/// Returns [`CoreError::InvalidArgument`] if `max_depth` is negative.
pub fn is_valid_object_name(name: &str, max_depth: i32) -> CoreResult<bool> {
    if max_depth < 0 {
        return Err(CoreError::InvalidArgument(
            "max_depth must be non-negative".to_string(),
        ));
    }
    Ok(split_object_name(name).is_some_and(|parts| parts.len() <= max_depth as usize + 1))
}

/// Whether `s` has the shape of a quoted identifier, ignoring the length
/// limit.
fn is_quoted_form(s: &str) -> bool {
    s.len() >= 2
        && s.starts_with('"')
        && s.ends_with('"')
        && !s[1..s.len() - 1].replace("\"\"", "").contains('"')
}

/// Convert `name` to a valid identifier.
///
/// Valid identifiers are returned unchanged; anything else is double quoted
/// with embedded quotes doubled. The conversion is idempotent: a name that
/// is too long to be valid once quoted is not quoted a second time.
///
/// # Examples
/// ```
/// use sl_core::identifier::to_identifier;
/// assert_eq!(to_identifier("abc"), "abc");
/// assert_eq!(to_identifier("abc def"), r#""abc def""#);
/// assert_eq!(to_identifier(r#"abc"def"#), r#""abc""def""#);
/// ```
pub fn to_identifier(name: &str) -> String {
    if is_valid_identifier(name) || is_quoted_form(name) {
        return name.to_string();
    }
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Append `suffix` to a valid identifier.
///
/// For an unquoted identifier the result is re-checked with
/// [`to_identifier`], so a suffix with characters outside the unquoted
/// alphabet quotes the whole result. For a quoted identifier the suffix is
/// inserted verbatim before the closing quote; the caller must pass a suffix
/// whose quotes are already escaped.
///
/// # Errors
/// Returns [`CoreError::InvalidIdentifier`] if `identifier` is not valid.
pub fn append_to_identifier(identifier: &str, suffix: &str) -> CoreResult<String> {
    match Identifier::parse(identifier) {
        Some(Identifier::Unquoted(id)) => Ok(to_identifier(&format!("{}{}", id, suffix))),
        Some(Identifier::Quoted(id)) => Ok(format!("\"{}{}\"", &id[1..id.len() - 1], suffix)),
        None => Err(CoreError::InvalidIdentifier {
            identifier: identifier.to_string(),
        }),
    }
}

/// Return the stored form of an identifier.
///
/// Quoted identifiers lose their delimiters and have `""` collapsed to `"`;
/// anything else is upper-cased. Suitable for URLs, `LIKE` patterns, and
/// comparing against names returned by the service.
pub fn unquote_identifier(identifier: &str) -> String {
    if is_valid_quoted_identifier(identifier) {
        return Identifier::Quoted(identifier).canonical();
    }
    identifier.to_uppercase()
}

/// Lower-case `input` and drop every character an unquoted identifier cannot
/// contain.
pub fn clean_identifier(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '$'))
        .collect()
}

/// Segment check for [`extract_schema`]: quoted segments have no length
/// limit and unquoted segments accept any alphanumeric character after an
/// ASCII letter or underscore.
fn is_loose_identifier(segment: &str) -> bool {
    if segment.starts_with('"') {
        // split_segments already guarantees balanced, doubled quotes
        return segment.len() >= 2 && segment.ends_with('"');
    }
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    segment.chars().count() <= MAX_UNQUOTED_LEN
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Extract the schema from `schema.object` or `database.schema.object`.
///
/// The segment is returned as written, quotes included. Returns `None` for
/// an unqualified name or one that does not parse as a qualified name.
///
/// # Examples
/// ```
/// use sl_core::identifier::extract_schema;
/// assert_eq!(extract_schema("db.schema.obj"), Some("schema"));
/// assert_eq!(extract_schema("schema.obj"), Some("schema"));
/// assert_eq!(extract_schema("obj"), None);
/// ```
pub fn extract_schema(qualified_name: &str) -> Option<&str> {
    let parts = split_segments(qualified_name)?;
    if !parts.iter().all(|part| is_loose_identifier(part)) {
        return None;
    }
    match parts.as_slice() {
        [_, schema, _] => Some(*schema),
        [schema, _] => Some(*schema),
        _ => None,
    }
}

#[cfg(test)]
#[path = "identifier_test.rs"]
mod tests;
