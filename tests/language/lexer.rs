//! Integration tests for the lexer
//!
//! Tests tokenization of declaration sources.

use webshape_language::{Lexer, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize_all(source).into_iter().map(|t| t.kind).collect()
}

#[test]
fn lex_declaration_head() {
    assert_eq!(
        kinds("(class: GainNode :extends AudioNode)"),
        vec![
            TokenKind::LParen,
            TokenKind::Symbol("class:".into()),
            TokenKind::Symbol("GainNode".into()),
            TokenKind::Keyword("extends".into()),
            TokenKind::Symbol("AudioNode".into()),
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn lex_qualified_and_special_symbols() {
    assert_eq!(
        kinds("?AudioBuffer !AudioParam * ? AudioContext/createGain"),
        vec![
            TokenKind::Symbol("?AudioBuffer".into()),
            TokenKind::Symbol("!AudioParam".into()),
            TokenKind::Symbol("*".into()),
            TokenKind::Symbol("?".into()),
            TokenKind::Symbol("AudioContext/createGain".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn lex_literals() {
    assert_eq!(
        kinds(r#""installing" 42 -1 0.5 true false"#),
        vec![
            TokenKind::String("installing".into()),
            TokenKind::Int(42),
            TokenKind::Int(-1),
            TokenKind::Float(0.5),
            TokenKind::True,
            TokenKind::False,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn lex_collections_and_commas() {
    assert_eq!(
        kinds("[a, b] {:k v}"),
        vec![
            TokenKind::LBracket,
            TokenKind::Symbol("a".into()),
            TokenKind::Symbol("b".into()),
            TokenKind::RBracket,
            TokenKind::LBrace,
            TokenKind::Keyword("k".into()),
            TokenKind::Symbol("v".into()),
            TokenKind::RBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn lex_comments_and_discard() {
    let tokens = kinds("; Web Audio\n#_ (class: Old)");
    assert!(matches!(tokens[0], TokenKind::Comment(_)));
    assert_eq!(tokens[1], TokenKind::Ignore);
    assert_eq!(tokens[2], TokenKind::LParen);
}

#[test]
fn lex_tracks_lines_and_columns() {
    let tokens = Lexer::tokenize_all("(class: A)\n  (class: B)");
    let b = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Symbol("B".into()))
        .unwrap();
    assert_eq!((b.span.line, b.span.column), (2, 11));
}

#[test]
fn lex_unterminated_string_is_error_token() {
    let tokens = kinds("\"never closed");
    assert!(matches!(tokens[0], TokenKind::Error(_)));
}
