//! Parser for declaration sources.
//!
//! The parser converts a stream of tokens into an abstract syntax tree.
//! Besides the fail-fast [`parse`], [`parse_recovering`] keeps going after a
//! malformed form by skipping ahead to the next `(` in column 1, so one bad
//! declaration does not hide the rest of a file.

use webshape_foundation::{Error, Result};

use crate::ast::Ast;
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Parser over one declaration source.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
    /// Source text (for error messages).
    source: &'src str,
    /// Nesting depth of the form being parsed.
    depth: usize,
    /// Treat a column-1 `(` inside a form as the start of the next declaration.
    recovering: bool,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            source,
            depth: 0,
            recovering: false,
        }
    }

    /// Parses a single form from the source.
    ///
    /// # Errors
    /// Returns an error if the source cannot be parsed.
    pub fn parse(&mut self) -> Result<Ast> {
        self.skip_trivia()?;
        self.parse_form()
    }

    /// Parses all forms from the source.
    ///
    /// # Errors
    /// Returns the first parse error.
    pub fn parse_all(&mut self) -> Result<Vec<Ast>> {
        let mut forms = Vec::new();
        self.skip_trivia()?;

        while self.current.kind != TokenKind::Eof {
            forms.push(self.parse_form()?);
            self.skip_trivia()?;
        }

        Ok(forms)
    }

    /// Parses all forms, collecting errors instead of stopping at the first.
    ///
    /// After an error the parser skips to the next `(` in column 1.
    pub fn parse_all_recovering(&mut self) -> (Vec<Ast>, Vec<Error>) {
        self.recovering = true;
        let mut forms = Vec::new();
        let mut errors = Vec::new();

        loop {
            if let Err(e) = self.skip_trivia() {
                errors.push(e);
                self.synchronize();
                continue;
            }
            if self.current.kind == TokenKind::Eof {
                break;
            }

            let start = self.current.span.start;
            self.depth = 0;
            match self.parse_form() {
                Ok(form) => forms.push(form),
                Err(e) => {
                    errors.push(e);
                    if self.current.span.start == start {
                        self.advance();
                    }
                    self.synchronize();
                }
            }
        }

        (forms, errors)
    }

    /// Skips tokens until the next declaration opener or end of input.
    fn synchronize(&mut self) {
        while self.current.kind != TokenKind::Eof && !self.current.opens_declaration() {
            self.advance();
        }
    }

    fn parse_form(&mut self) -> Result<Ast> {
        self.skip_trivia()?;

        if self.recovering && self.depth > 0 && self.current.opens_declaration() {
            return Err(self.error("unterminated form before next declaration"));
        }

        let span = self.current.span;
        let ast = match &self.current.kind {
            TokenKind::True => Ast::Bool(true, span),
            TokenKind::False => Ast::Bool(false, span),
            TokenKind::Int(n) => Ast::Int(*n, span),
            TokenKind::Float(n) => Ast::Float(*n, span),
            TokenKind::String(s) => Ast::String(s.clone(), span),
            TokenKind::Symbol(name) => Ast::Symbol(name.clone(), span),
            TokenKind::Keyword(name) => Ast::Keyword(name.clone(), span),
            TokenKind::LParen => return self.parse_list(),
            TokenKind::LBracket => return self.parse_vector(),
            TokenKind::LBrace => return self.parse_map(),
            TokenKind::Eof => return Err(self.error("unexpected end of input")),
            TokenKind::Error(msg) => return Err(self.error(msg)),
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                return Err(self.error(&format!("unexpected {}", self.current.kind.name())));
            }
            TokenKind::Comment(_) | TokenKind::Ignore => {
                return Err(self.error("expected form"));
            }
        };
        self.advance();
        Ok(ast)
    }

    /// Parses the elements of a delimited sequence up to `close`.
    fn parse_sequence(&mut self, open: &TokenKind, close: &TokenKind, what: &str) -> Result<(Vec<Ast>, Span)> {
        let start_span = self.current.span;
        self.expect(open)?;
        self.depth += 1;

        let mut elements = Vec::new();
        self.skip_trivia()?;

        while self.current.kind != *close {
            if self.current.kind == TokenKind::Eof {
                return Err(self.error_at(start_span, &format!("unterminated {what}")));
            }
            elements.push(self.parse_form()?);
            self.skip_trivia()?;
        }

        let end_span = self.current.span;
        self.expect(close)?;
        self.depth -= 1;

        Ok((elements, start_span.to(end_span)))
    }

    fn parse_list(&mut self) -> Result<Ast> {
        let (elements, span) = self.parse_sequence(&TokenKind::LParen, &TokenKind::RParen, "list")?;
        Ok(Ast::List(elements, span))
    }

    fn parse_vector(&mut self) -> Result<Ast> {
        let (elements, span) =
            self.parse_sequence(&TokenKind::LBracket, &TokenKind::RBracket, "vector")?;
        Ok(Ast::Vector(elements, span))
    }

    fn parse_map(&mut self) -> Result<Ast> {
        let start_span = self.current.span;
        let (elements, span) = self.parse_sequence(&TokenKind::LBrace, &TokenKind::RBrace, "map")?;

        if elements.len() % 2 != 0 {
            return Err(self.error_at(start_span, "map must have even number of elements"));
        }

        let mut entries = Vec::with_capacity(elements.len() / 2);
        let mut iter = elements.into_iter();
        while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
            entries.push((key, value));
        }

        Ok(Ast::Map(entries, span))
    }

    /// Skips comments and `#_`-discarded forms.
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.current.kind {
                TokenKind::Comment(_) => self.advance(),
                TokenKind::Ignore => {
                    let span = self.current.span;
                    self.advance();
                    self.skip_trivia()?;
                    if matches!(
                        self.current.kind,
                        TokenKind::Eof | TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace
                    ) {
                        return Err(self.error_at(span, "expected form after #_"));
                    }
                    let _discarded = self.parse_form()?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Expects the current token to be of a specific kind, then advances.
    fn expect(&mut self, expected: &TokenKind) -> Result<()> {
        let matches =
            std::mem::discriminant(&self.current.kind) == std::mem::discriminant(expected);

        if matches {
            self.advance();
            Ok(())
        } else {
            let expected_name = expected.name();
            Err(self.error(&format!(
                "expected {expected_name}, found {}",
                self.current.kind.name()
            )))
        }
    }

    fn error(&self, message: &str) -> Error {
        self.error_at(self.current.span, message)
    }

    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::parse(message, span.line, span.column, span.line_text(self.source))
    }
}

/// Parses source into forms, failing on the first error.
///
/// # Errors
/// Returns an error if the source cannot be parsed.
pub fn parse(source: &str) -> Result<Vec<Ast>> {
    Parser::new(source).parse_all()
}

/// Parses a single form from source.
///
/// # Errors
/// Returns an error if the source cannot be parsed.
pub fn parse_one(source: &str) -> Result<Ast> {
    Parser::new(source).parse()
}

/// Parses source into every well-formed top-level form plus the errors
/// encountered along the way.
#[must_use]
pub fn parse_recovering(source: &str) -> (Vec<Ast>, Vec<Error>) {
    Parser::new(source).parse_all_recovering()
}
