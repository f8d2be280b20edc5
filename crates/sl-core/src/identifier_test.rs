use super::*;

const VALID_UNQUOTED: &[&str] = &["_", "____", "A", "a", "_aA1", "a$1"];

const INVALID_UNQUOTED: &[&str] = &[
    "1a",  // leading digit
    "$a",  // leading dollar sign
    "a#",  // invalid character
    "(a)", // invalid character
    "",    // empty
];

const VALID_QUOTED: &[&str] = &[
    r#""""#, // empty quoted identifier
    r#""_""#,
    r#""a""#,
    r#""A""#,
    r#""1""#,
    r#""a$1""#,
    r#""a""1""""#,
    r#""a'1'""#,
    r#""""""#,
    r#""(abc def)""#,
];

const INVALID_QUOTED: &[&str] = &[
    r#""abc"#,      // unterminated quote
    r#"abc""#,      // missing leading quote
    r#""abc"def""#, // improperly escaped inner quote
];

fn long_unquoted(len: usize) -> String {
    "a".repeat(len)
}

#[test]
fn test_is_valid_unquoted_identifier() {
    for id in VALID_UNQUOTED {
        assert!(is_valid_unquoted_identifier(id), "{id}");
    }
    assert!(is_valid_unquoted_identifier(&long_unquoted(255)));

    for id in VALID_QUOTED
        .iter()
        .chain(INVALID_UNQUOTED)
        .chain(INVALID_QUOTED)
    {
        assert!(!is_valid_unquoted_identifier(id), "{id}");
    }
    assert!(!is_valid_unquoted_identifier(&long_unquoted(256)));
}

#[test]
fn test_is_valid_quoted_identifier() {
    for id in VALID_QUOTED {
        assert!(is_valid_quoted_identifier(id), "{id}");
    }

    for id in VALID_UNQUOTED
        .iter()
        .chain(INVALID_UNQUOTED)
        .chain(INVALID_QUOTED)
    {
        assert!(!is_valid_quoted_identifier(id), "{id}");
    }
}

#[test]
fn test_quoted_identifier_length_limit() {
    let max = format!("\"{}\"", "x".repeat(255));
    let over = format!("\"{}\"", "x".repeat(256));
    assert!(is_valid_quoted_identifier(&max));
    assert!(!is_valid_quoted_identifier(&over));

    // An escaped quote counts as a single unit of content
    let escaped = format!("\"{}\"", "\"\"".repeat(255));
    assert!(is_valid_quoted_identifier(&escaped));
}

#[test]
fn test_quoted_identifier_allows_newlines_and_unicode() {
    assert!(is_valid_quoted_identifier("\"line\nbreak\""));
    assert!(is_valid_quoted_identifier("\"größe\""));
    assert!(!is_valid_unquoted_identifier("größe"));
}

#[test]
fn test_is_valid_identifier() {
    for id in VALID_UNQUOTED.iter().chain(VALID_QUOTED) {
        assert!(is_valid_identifier(id), "{id}");
    }
    for id in INVALID_UNQUOTED.iter().chain(INVALID_QUOTED) {
        assert!(!is_valid_identifier(id), "{id}");
    }
}

#[test]
fn test_is_valid_object_name_combinations() {
    let valid: Vec<&str> = VALID_UNQUOTED.iter().chain(VALID_QUOTED).copied().collect();

    for a in &valid {
        assert!(is_valid_object_name(a, DEFAULT_MAX_DEPTH).unwrap(), "{a}");
        assert!(is_valid_object_name(a, 0).unwrap(), "{a}");
        for b in &valid {
            let two = format!("{a}.{b}");
            assert!(is_valid_object_name(&two, DEFAULT_MAX_DEPTH).unwrap(), "{two}");
            assert!(!is_valid_object_name(&two, 0).unwrap(), "{two}");
            assert!(is_valid_object_name(&two, 1).unwrap(), "{two}");
        }
    }
}

#[test]
fn test_is_valid_object_name_three_parts() {
    assert!(is_valid_object_name("a.b.c", DEFAULT_MAX_DEPTH).unwrap());
    assert!(!is_valid_object_name("a.b.c", 0).unwrap());
    assert!(!is_valid_object_name("a.b.c", 1).unwrap());
    assert!(is_valid_object_name(r#""my db"."my.schema"."t""x""#, 2).unwrap());
    assert!(!is_valid_object_name("a.b.c.d", DEFAULT_MAX_DEPTH).unwrap());
    assert!(is_valid_object_name("a.b.c.d", 3).unwrap());
}

#[test]
fn test_is_valid_object_name_rejects_invalid_segments() {
    let invalid: Vec<&str> = INVALID_UNQUOTED.iter().chain(INVALID_QUOTED).copied().collect();
    for bad in &invalid {
        for good in VALID_UNQUOTED.iter().chain(VALID_QUOTED) {
            for name in [
                bad.to_string(),
                format!("{bad}.{good}"),
                format!("{good}.{bad}"),
                format!("{good}.{bad}.{good}"),
            ] {
                assert!(!is_valid_object_name(&name, DEFAULT_MAX_DEPTH).unwrap(), "{name}");
            }
        }
    }
}

#[test]
fn test_is_valid_object_name_rejects_whitespace_and_empty_parts() {
    for name in [" a.b", "a.b ", "a. b", "a..b", ".a", "a.", ""] {
        assert!(!is_valid_object_name(name, DEFAULT_MAX_DEPTH).unwrap(), "{name:?}");
    }
}

#[test]
fn test_is_valid_object_name_negative_depth() {
    let err = is_valid_object_name("a", -1).unwrap_err();
    assert!(matches!(err, CoreError::InvalidArgument(_)));
    assert!(err.to_string().contains("C001"));
}

#[test]
fn test_split_object_name() {
    assert_eq!(split_object_name("a"), Some(vec!["a"]));
    assert_eq!(
        split_object_name(r#"db."a.b"."c""d""#),
        Some(vec!["db", r#""a.b""#, r#""c""d""#])
    );
    assert_eq!(split_object_name(r#"""."""#), Some(vec![r#""""#, r#""""#]));
    assert_eq!(split_object_name(r#""abc"#), None);
    assert_eq!(split_object_name(r#""abc"x.y"#), None);
    assert_eq!(split_object_name("a.1b"), None);
}

#[test]
fn test_identifier_parse() {
    assert_eq!(Identifier::parse("abc"), Some(Identifier::Unquoted("abc")));
    assert_eq!(
        Identifier::parse(r#""a b""#),
        Some(Identifier::Quoted(r#""a b""#))
    );
    assert_eq!(Identifier::parse("a b"), None);

    let quoted = Identifier::parse(r#""Say ""hi""""#).unwrap();
    assert!(quoted.is_quoted());
    assert_eq!(quoted.canonical(), r#"Say "hi""#);
    assert_eq!(quoted.to_string(), r#""Say ""hi""""#);

    let unquoted = Identifier::parse("mixedCase").unwrap();
    assert!(!unquoted.is_quoted());
    assert_eq!(unquoted.canonical(), "MIXEDCASE");
}

#[test]
fn test_canonical_of_hand_built_quoted_identifier() {
    assert_eq!(Identifier::Quoted("").canonical(), "");
    assert_eq!(Identifier::Quoted("\"").canonical(), "\"");
    assert_eq!(Identifier::Quoted("a b").canonical(), "a b");
    assert_eq!(Identifier::Quoted("\"\"").canonical(), "");
}

#[test]
fn test_to_identifier() {
    for id in VALID_UNQUOTED.iter().chain(VALID_QUOTED) {
        assert_eq!(to_identifier(id), *id);
    }

    assert_eq!(to_identifier("abc def"), r#""abc def""#);
    assert_eq!(to_identifier(r#"abc"def"#), r#""abc""def""#);
    assert_eq!(to_identifier("abc'def"), r#""abc'def""#);
    assert_eq!(to_identifier("(A)"), r#""(A)""#);
    assert_eq!(to_identifier(""), r#""""#);
}

#[test]
fn test_to_identifier_is_idempotent_on_fixed_cases() {
    for raw in ["abc def", r#"abc"def"#, r#""abc"#, "1a", "", "a.b"] {
        let once = to_identifier(raw);
        assert_eq!(to_identifier(&once), once, "{raw}");
    }
}

#[test]
fn test_to_identifier_long_names() {
    let long = "a b".repeat(100);
    let once = to_identifier(&long);
    assert_eq!(once, format!("\"{}\"", long));
    assert!(!is_valid_identifier(&once));
    assert_eq!(to_identifier(&once), once);

    let long_unquoted = long_unquoted(300);
    assert_eq!(to_identifier(&long_unquoted), format!("\"{}\"", long_unquoted));
}

#[test]
fn test_append_to_identifier() {
    assert_eq!(append_to_identifier("abc", "_suffix").unwrap(), "abc_suffix");
    assert_eq!(append_to_identifier("_", "_suffix").unwrap(), "__suffix");
    assert_eq!(
        append_to_identifier(r#""abc""#, "_suffix").unwrap(),
        r#""abc_suffix""#
    );
    assert_eq!(
        append_to_identifier(r#""abc def""#, "_suffix").unwrap(),
        r#""abc def_suffix""#
    );
    assert_eq!(
        append_to_identifier(r#""abc""def""#, "_suffix").unwrap(),
        r#""abc""def_suffix""#
    );
    assert_eq!(
        append_to_identifier("abc", " def ghi").unwrap(),
        r#""abc def ghi""#
    );
}

#[test]
fn test_append_to_identifier_invalid() {
    let err = append_to_identifier("1abc", "_x").unwrap_err();
    assert!(matches!(err, CoreError::InvalidIdentifier { .. }));
    assert!(append_to_identifier(r#""abc"#, "_x").is_err());
}

#[test]
fn test_append_to_quoted_identifier_does_not_escape_suffix() {
    // The suffix is inserted verbatim, so an unescaped quote breaks the result
    let appended = append_to_identifier(r#""abc""#, r#"x"y"#).unwrap();
    assert_eq!(appended, r#""abcx"y""#);
    assert!(!is_valid_identifier(&appended));
}

#[test]
fn test_unquote_identifier() {
    assert_eq!(unquote_identifier("abc"), "ABC");
    assert_eq!(unquote_identifier("_aA1"), "_AA1");
    assert_eq!(unquote_identifier(r#""abc""#), "abc");
    assert_eq!(unquote_identifier(r#""a""b""#), r#"a"b"#);
    assert_eq!(unquote_identifier(r#""""#), "");
    assert_eq!(unquote_identifier("not valid"), "NOT VALID");
}

#[test]
fn test_clean_identifier() {
    assert_eq!(clean_identifier("My Project-Name!"), "myprojectname");
    assert_eq!(clean_identifier("user_1$"), "user_1$");
    assert_eq!(clean_identifier("Ünïcode"), "ncode");
    assert_eq!(clean_identifier(""), "");
}

#[test]
fn test_extract_schema() {
    assert_eq!(extract_schema("db.schema.obj"), Some("schema"));
    assert_eq!(extract_schema("schema.obj"), Some("schema"));
    assert_eq!(extract_schema(r#"db."My Schema".obj"#), Some(r#""My Schema""#));
    assert_eq!(extract_schema(r#""a.b".obj"#), Some(r#""a.b""#));
    assert_eq!(extract_schema("obj"), None);
    assert_eq!(extract_schema("a.b.c.d"), None);
    assert_eq!(extract_schema("1db.schema.obj"), None);
    assert_eq!(extract_schema(""), None);
}
