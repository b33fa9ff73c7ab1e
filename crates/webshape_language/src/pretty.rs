//! Pretty-printer for AST nodes.
//!
//! [`pretty_print`] renders a form on one line. [`format_form`] lays out
//! declarations the way catalog sources are written by hand: the head and
//! name on the first line, one `:key value` clause per line, and long
//! vectors broken one element per line.
//!
//! # Example
//!
//! ```
//! use webshape_language::{parse_one, pretty::pretty_print};
//!
//! let ast = parse_one("(union Request string)").unwrap();
//! assert_eq!(pretty_print(&ast), "(union Request string)");
//! ```

use std::fmt::Write;

use crate::ast::Ast;

/// Configuration for pretty-printing.
#[derive(Debug, Clone)]
pub struct PrettyConfig {
    /// Number of spaces for each indentation level.
    pub indent_width: usize,
    /// Maximum line width before breaking.
    pub max_width: usize,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            max_width: 80,
        }
    }
}

/// Pretty-print an AST node on a single line.
#[must_use]
pub fn pretty_print(ast: &Ast) -> String {
    let mut printer = PrettyPrinter::new(PrettyConfig::default());
    printer.print(ast);
    printer.output
}

/// Pretty-print multiple AST nodes, one per line.
#[must_use]
pub fn pretty_print_all(asts: &[Ast]) -> String {
    asts.iter().map(pretty_print).collect::<Vec<_>>().join("\n")
}

/// Lay out a form across lines using the default configuration.
#[must_use]
pub fn format_form(ast: &Ast) -> String {
    format_form_with_config(ast, &PrettyConfig::default())
}

/// Lay out a form across lines.
#[must_use]
pub fn format_form_with_config(ast: &Ast, config: &PrettyConfig) -> String {
    let mut printer = PrettyPrinter::new(config.clone());
    printer.layout(ast);
    printer.output
}

/// Lay out a sequence of top-level forms separated by blank lines.
#[must_use]
pub fn format_forms(asts: &[Ast], config: &PrettyConfig) -> String {
    let mut out = asts
        .iter()
        .map(|ast| format_form_with_config(ast, config))
        .collect::<Vec<_>>()
        .join("\n\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Pretty-printer state.
struct PrettyPrinter {
    config: PrettyConfig,
    output: String,
}

impl PrettyPrinter {
    fn new(config: PrettyConfig) -> Self {
        Self {
            config,
            output: String::new(),
        }
    }

    // =========================================================================
    // Single-line printing
    // =========================================================================

    fn print(&mut self, ast: &Ast) {
        match ast {
            Ast::Bool(true, _) => self.output.push_str("true"),
            Ast::Bool(false, _) => self.output.push_str("false"),
            Ast::Int(n, _) => {
                let _ = write!(self.output, "{n}");
            }
            Ast::Float(n, _) => self.print_float(*n),
            Ast::String(s, _) => self.print_string(s),
            Ast::Symbol(s, _) => self.output.push_str(s),
            Ast::Keyword(s, _) => {
                self.output.push(':');
                self.output.push_str(s);
            }
            Ast::List(elements, _) => self.print_delimited('(', elements, ')'),
            Ast::Vector(elements, _) => self.print_delimited('[', elements, ']'),
            Ast::Map(entries, _) => {
                self.output.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        self.output.push(' ');
                    }
                    self.print(key);
                    self.output.push(' ');
                    self.print(value);
                }
                self.output.push('}');
            }
        }
    }

    fn print_float(&mut self, n: f64) {
        let s = n.to_string();
        self.output.push_str(&s);
        if !s.contains('.') && !s.contains('e') && !s.contains('E') {
            self.output.push_str(".0");
        }
    }

    fn print_string(&mut self, s: &str) {
        self.output.push('"');
        for c in s.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }

    fn print_delimited(&mut self, open: char, elements: &[Ast], close: char) {
        self.output.push(open);
        for (i, elem) in elements.iter().enumerate() {
            if i > 0 {
                self.output.push(' ');
            }
            self.print(elem);
        }
        self.output.push(close);
    }

    // =========================================================================
    // Multi-line layout
    // =========================================================================

    fn layout(&mut self, ast: &Ast) {
        if is_declaration(ast) {
            if let Ast::List(elements, _) = ast {
                self.layout_declaration(elements);
                return;
            }
        }

        if self.fits(ast) {
            self.print(ast);
            return;
        }

        match ast {
            Ast::Vector(elements, _) => {
                let column = self.column() + 1;
                self.output.push('[');
                for (i, elem) in elements.iter().enumerate() {
                    if i > 0 {
                        self.newline(column);
                    }
                    self.layout(elem);
                }
                self.output.push(']');
            }
            Ast::Map(entries, _) => {
                let column = self.column() + 1;
                self.output.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        self.newline(column);
                    }
                    self.print(key);
                    self.output.push(' ');
                    self.layout(value);
                }
                self.output.push('}');
            }
            other => self.print(other),
        }
    }

    /// `(head name positional...` then one clause per line.
    fn layout_declaration(&mut self, elements: &[Ast]) {
        let indent = self.column() + self.config.indent_width;
        self.output.push('(');

        let clause_start = elements
            .iter()
            .position(Ast::is_keyword)
            .unwrap_or(elements.len());
        for (i, elem) in elements[..clause_start].iter().enumerate() {
            if i > 0 {
                self.output.push(' ');
            }
            self.layout(elem);
        }

        let mut rest = elements[clause_start..].iter().peekable();
        while let Some(key) = rest.next() {
            self.newline(indent);
            self.print(key);
            if let Some(value) = rest.next_if(|v| !v.is_keyword()) {
                self.output.push(' ');
                self.layout(value);
            }
        }

        self.output.push(')');
    }

    fn fits(&self, ast: &Ast) -> bool {
        let mut trial = PrettyPrinter::new(self.config.clone());
        trial.print(ast);
        self.column() + trial.output.len() <= self.config.max_width
    }

    fn column(&self) -> usize {
        let line_start = self.output.rfind('\n').map_or(0, |i| i + 1);
        self.output[line_start..].chars().count()
    }

    fn newline(&mut self, column: usize) {
        self.output.push('\n');
        self.output.extend(std::iter::repeat_n(' ', column));
    }
}

/// Top-level declaration forms have a head symbol ending in `:`.
fn is_declaration(ast: &Ast) -> bool {
    ast.head().is_some_and(|head| head.len() > 1 && head.ends_with(':'))
}
