use super::*;

#[test]
fn test_classify() {
    assert_eq!(classify("abc", 2).as_deref(), Some("unquoted identifier"));
    assert_eq!(classify(r#""a b""#, 0).as_deref(), Some("quoted identifier"));
    assert_eq!(
        classify(r#"db."my schema".t"#, 2).as_deref(),
        Some("object name with 3 parts")
    );
    assert_eq!(classify("db.s.t", 1), None);
    assert_eq!(classify("a b", 2), None);
    assert_eq!(classify("", 2), None);
}
