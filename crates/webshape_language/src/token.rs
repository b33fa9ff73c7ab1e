//! Token types for declaration sources.
//!
//! Tokens are the output of the lexer and input to the parser.

use crate::span::Span;

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The type and value of this token.
    pub kind: TokenKind,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the text this token covers in the given source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }

    /// Returns true if this token is an opening delimiter.
    #[must_use]
    pub const fn is_open_delimiter(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace
        )
    }

    /// Returns true if this token is a closing delimiter.
    #[must_use]
    pub const fn is_close_delimiter(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace
        )
    }

    /// Returns true if this token can open a top-level declaration.
    #[must_use]
    pub const fn opens_declaration(&self) -> bool {
        matches!(self.kind, TokenKind::LParen) && self.span.starts_line()
    }
}

/// Token types.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Delimiters
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,

    // Literals
    /// `true`
    True,
    /// `false`
    False,
    /// Integer literal like `42` or `-17`
    Int(i64),
    /// Float literal like `0.5` or `-1.0`
    Float(f64),
    /// String literal like `"installing"`
    String(String),
    /// Symbol like `AudioNode`, `class:` or `?AudioBuffer`
    Symbol(String),
    /// Keyword like `:extends`
    Keyword(String),

    // Meta
    /// Comment text (including `;`)
    Comment(String),
    /// `#_` for ignoring next form
    Ignore,
    /// End of input
    Eof,
    /// Lexer error
    Error(String),
}

impl TokenKind {
    /// Returns true if this token kind should be ignored during parsing.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Comment(_))
    }

    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::True => "true",
            Self::False => "false",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Keyword(_) => "keyword",
            Self::Comment(_) => "comment",
            Self::Ignore => "ignore",
            Self::Eof => "end of input",
            Self::Error(_) => "error",
        }
    }
}
