use super::*;

fn lex_all(text: &str) -> Vec<TokenKind> {
    Lexer::new(text)
        .map(|r| r.expect("lex failure").kind)
        .collect()
}

#[test]
fn test_simple_tokens() {
    let kinds = lex_all("schema s { id i32; }");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident("schema".to_string()),
            TokenKind::Ident("s".to_string()),
            TokenKind::LBrace,
            TokenKind::Ident("id".to_string()),
            TokenKind::Ident("i32".to_string()),
            TokenKind::Semi,
            TokenKind::RBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_arrow_and_pipeline() {
    let kinds = lex_all("a -> root;");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident("a".to_string()),
            TokenKind::Arrow,
            TokenKind::Ident("root".to_string()),
            TokenKind::Semi,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_numeric_literals_with_suffix() {
    let kinds = lex_all("100.0_fp64 42_i32 7");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Float {
                value: 100.0,
                suffix: Some("fp64".to_string()),
            },
            TokenKind::Integer {
                value: 42,
                suffix: Some("i32".to_string()),
            },
            TokenKind::Integer {
                value: 7,
                suffix: None,
            },
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_negative_numbers() {
    let kinds = lex_all("-5 -2.5");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Integer {
                value: -5,
                suffix: None,
            },
            TokenKind::Float {
                value: -2.5,
                suffix: None,
            },
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_string_escapes() {
    let kinds = lex_all(r#""a \"b\" \n\t\\c""#);
    assert_eq!(
        kinds,
        vec![
            TokenKind::Str {
                value: "a \"b\" \n\t\\c".to_string(),
                suffix: None,
            },
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_comments_skipped() {
    let kinds = lex_all("a // trailing comment\n// full line\nb");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident("a".to_string()),
            TokenKind::Ident("b".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_unterminated_string() {
    let result: Result<Vec<_>, _> = Lexer::new("\"never closed").collect();
    assert!(matches!(result, Err(LexError::UnterminatedString { .. })));
}

#[test]
fn test_invalid_escape() {
    let result: Result<Vec<_>, _> = Lexer::new(r#""bad \q escape""#).collect();
    assert!(matches!(result, Err(LexError::InvalidEscape { escape: 'q', .. })));
}

#[test]
fn test_invalid_number() {
    let result: Result<Vec<_>, _> = Lexer::new("12abc").collect();
    assert!(matches!(result, Err(LexError::InvalidNumber { .. })));
}

#[test]
fn test_unexpected_character() {
    let result: Result<Vec<_>, _> = Lexer::new("@").collect();
    assert!(matches!(
        result,
        Err(LexError::UnexpectedCharacter { ch: '@', .. })
    ));
}

#[test]
fn test_spans_track_lines() {
    let mut lexer = Lexer::new("a\n  b");
    let a = lexer.next_token().unwrap();
    assert_eq!(a.span, Span::new(1, 1));
    let b = lexer.next_token().unwrap();
    assert_eq!(b.span, Span::new(2, 3));
}
