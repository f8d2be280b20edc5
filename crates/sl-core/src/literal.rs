//! Single-quoted string literals and `LIKE` pattern escaping.

use crate::identifier::unquote_identifier;
use regex::Regex;
use std::sync::OnceLock;

/// Single-quoted literal whose body is a sequence of backslash escapes,
/// doubled single quotes, or characters other than `'` and a bare newline.
pub const SINGLE_QUOTED_STRING_LITERAL_REGEX: &str = r"'((?:\\.|''|[^'\n])*?)'";

/// Escape sequence used by `SHOW ... LIKE`: a backslash, itself escaped for
/// the enclosing string literal.
pub const LIKE_ESCAPE_SEQUENCE: &str = r"\\";

static STRING_LITERAL_RE: OnceLock<Regex> = OnceLock::new();

fn string_literal_regex() -> &'static Regex {
    STRING_LITERAL_RE.get_or_init(|| {
        Regex::new(&format!("^(?:{})$", SINGLE_QUOTED_STRING_LITERAL_REGEX))
            .expect("valid regex literal")
    })
}

/// Whether `literal` is a valid single-quoted string literal.
///
/// # Examples
/// ```
/// use sl_core::literal::is_valid_string_literal;
/// assert!(is_valid_string_literal("'abc'"));
/// assert!(is_valid_string_literal(r"'it\'s'"));
/// assert!(!is_valid_string_literal("'a\nbc'"));
/// ```
pub fn is_valid_string_literal(literal: &str) -> bool {
    string_literal_regex().is_match(literal)
}

/// Convert `raw` to an escaped, single-quoted string literal.
///
/// Control characters use their two-character escapes where one exists and
/// `\xHH` otherwise; code points outside printable ASCII are written as
/// `\xHH`, `\uHHHH` or `\UHHHHHHHH`. Every single quote becomes `\'`.
///
/// # Examples
/// ```
/// use sl_core::literal::to_string_literal;
/// assert_eq!(to_string_literal("a\nbc"), r"'a\nbc'");
/// assert_eq!(to_string_literal("a'c"), r"'a\'c'");
/// ```
pub fn to_string_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('\'');
    for c in raw.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '\'' => out.push_str(r"\'"),
            '\n' => out.push_str(r"\n"),
            '\r' => out.push_str(r"\r"),
            '\t' => out.push_str(r"\t"),
            '\u{0c}' => out.push_str(r"\f"),
            '\u{08}' => out.push_str(r"\b"),
            '\u{0b}' => out.push_str(r"\v"),
            ' '..='~' => out.push(c),
            c if u32::from(c) <= 0xff => {
                out.push_str(&format!("\\x{:02x}", u32::from(c)));
            }
            c if u32::from(c) <= 0xffff => {
                out.push_str(&format!("\\u{:04x}", u32::from(c)));
            }
            c => {
                out.push_str(&format!("\\U{:08x}", u32::from(c)));
            }
        }
    }
    out.push('\'');
    out
}

/// Escape `%` and `_` with the default `SHOW ... LIKE` escape sequence.
///
/// # Examples
/// ```
/// use sl_core::literal::escape_like_pattern;
/// assert_eq!(escape_like_pattern("underscore_table"), r"underscore\\_table");
/// ```
pub fn escape_like_pattern(pattern: &str) -> String {
    escape_like_pattern_with(pattern, LIKE_ESCAPE_SEQUENCE)
}

/// Escape `%` and `_` in `pattern` by prefixing `escape_sequence`, so the
/// pattern matches its text literally.
///
/// The escape sequence must match the one declared with
/// `<subject> LIKE <pattern> ESCAPE <escape>`.
pub fn escape_like_pattern_with(pattern: &str, escape_sequence: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c == '%' || c == '_' {
            out.push_str(escape_sequence);
        }
        out.push(c);
    }
    out
}

/// Build the quoted `SHOW ... LIKE` pattern that matches exactly the object
/// named by `identifier`.
///
/// # Examples
/// ```
/// use sl_core::literal::identifier_to_show_like_pattern;
/// assert_eq!(identifier_to_show_like_pattern("my_pool"), r"'MY\\_POOL'");
/// assert_eq!(identifier_to_show_like_pattern(r#""My Pool""#), "'My Pool'");
/// ```
pub fn identifier_to_show_like_pattern(identifier: &str) -> String {
    format!("'{}'", escape_like_pattern(&unquote_identifier(identifier)))
}

#[cfg(test)]
#[path = "literal_test.rs"]
mod tests;
