//! Declaration analyzer implementation.
//!
//! Contains the `DeclarationAnalyzer` struct and all analysis methods.

use webshape_foundation::{
    Deprecation, EnumDecl, EnumKind, EnumValue, Error, MemberDecl, MemberKind, MethodShape, Param,
    PropertyShape, Result, SymbolRef, TypeDecl, TypeExpr, TypeKind,
};

use super::Declaration;
use super::type_expr::analyze_type_expr;
use super::types::AugmentDecl;
use crate::ast::Ast;
use crate::span::Span;

/// Creates a parse error pointing at a span.
pub(super) fn error_at(span: Span, message: impl Into<String>) -> Error {
    Error::parse(message, span.line, span.column, "")
}

/// Analyzes AST and extracts typed declarations.
pub struct DeclarationAnalyzer;

impl DeclarationAnalyzer {
    // =========================================================================
    // Unified Analysis
    // =========================================================================

    /// Analyze any top-level declaration.
    ///
    /// Returns `Ok(None)` if the form is not a declaration.
    ///
    /// # Errors
    /// Returns a parse error if the form is a declaration but malformed.
    pub fn analyze(ast: &Ast) -> Result<Option<Declaration>> {
        let kind = match ast.head() {
            Some("class:") => TypeKind::Class,
            Some("interface:") => TypeKind::Interface,
            Some("record:") => TypeKind::Record,
            Some("typedef:") => TypeKind::Typedef,
            Some("enum:") => {
                return Ok(Some(Declaration::Enum(Self::analyze_enum(ast)?, ast.span())));
            }
            Some("augment:") => {
                return Ok(Some(Declaration::Augment(
                    Self::analyze_augment(ast)?,
                    ast.span(),
                )));
            }
            _ => return Ok(None),
        };
        Ok(Some(Declaration::Type(Self::analyze_type(ast, kind)?, ast.span())))
    }

    /// Analyze every top-level form, collecting errors instead of stopping.
    ///
    /// Forms that are not declarations are reported as errors.
    #[must_use]
    pub fn analyze_all(forms: &[Ast]) -> (Vec<Declaration>, Vec<Error>) {
        let mut declarations = Vec::new();
        let mut errors = Vec::new();

        for form in forms {
            match Self::analyze(form) {
                Ok(Some(decl)) => declarations.push(decl),
                Ok(None) => errors.push(error_at(
                    form.span(),
                    match form.head() {
                        Some(head) => format!("unknown declaration form `{head}`"),
                        None => format!("expected a declaration, got {}", form.type_name()),
                    },
                )),
                Err(e) => errors.push(e),
            }
        }

        (declarations, errors)
    }

    // =========================================================================
    // Type Declarations
    // =========================================================================

    /// Analyze a `class:`, `interface:`, `record:` or `typedef:` form.
    ///
    /// # Errors
    /// Returns a parse error if the form is malformed.
    pub fn analyze_type(ast: &Ast, kind: TypeKind) -> Result<TypeDecl> {
        let (elements, span) = Self::form(ast, kind.head())?;
        let name = Self::declared_name(elements, span, kind.head())?;

        let mut decl = TypeDecl::new(name, kind);
        let mut rest = &elements[2..];

        if kind == TypeKind::Typedef {
            let Some((alias, tail)) = rest.split_first() else {
                return Err(error_at(span, "typedef: requires an aliased type"));
            };
            decl.alias = Some(analyze_type_expr(alias)?);
            rest = tail;
        }
        if kind == TypeKind::Class {
            decl.constructor = Some(Vec::new());
        }

        for (key, value) in Self::clauses(rest, span)? {
            match (key, kind) {
                ("extends", TypeKind::Class | TypeKind::Interface | TypeKind::Record) => {
                    decl.extends = Some(Self::type_name(value, ":extends")?);
                }
                ("implements", TypeKind::Class | TypeKind::Interface | TypeKind::Record) => {
                    decl.implements = Self::vector(value, ":implements")?
                        .iter()
                        .map(|v| Self::type_name(v, ":implements"))
                        .collect::<Result<_>>()?;
                }
                ("template", TypeKind::Class | TypeKind::Interface | TypeKind::Record) => {
                    decl.template = Self::vector(value, ":template")?
                        .iter()
                        .map(|v| Self::type_name(v, ":template"))
                        .collect::<Result<_>>()?;
                }
                ("params", TypeKind::Class) => {
                    decl.constructor = Some(Self::analyze_params(value)?);
                }
                ("members", TypeKind::Class | TypeKind::Interface | TypeKind::Record) => {
                    decl.members = Self::analyze_members(value)?;
                }
                ("deprecated", _) => decl.deprecated = Self::analyze_deprecation(value)?,
                ("see", _) => decl.see = Self::analyze_see(value)?,
                (other, _) => {
                    return Err(error_at(
                        value.span(),
                        format!("unknown {kind} clause :{other}"),
                    ));
                }
            }
        }

        Ok(decl)
    }

    // =========================================================================
    // Enum and Augment Declarations
    // =========================================================================

    /// Analyze an `enum:` form.
    ///
    /// Repeated symbolic names are kept; validation reports them.
    ///
    /// # Errors
    /// Returns a parse error if the form is malformed or a value does not
    /// match the enum's literal type.
    pub fn analyze_enum(ast: &Ast) -> Result<EnumDecl> {
        let (elements, span) = Self::form(ast, "enum:")?;
        let name = Self::declared_name(elements, span, "enum:")?;

        let mut kind = None;
        let mut values = None;
        let mut deprecated = None;
        let mut see = Vec::new();

        for (key, value) in Self::clauses(&elements[2..], span)? {
            match key {
                "of" => {
                    kind = Some(match value.as_symbol() {
                        Some("string") => EnumKind::String,
                        Some("number") => EnumKind::Number,
                        _ => {
                            return Err(error_at(
                                value.span(),
                                ":of must be `string` or `number`",
                            ));
                        }
                    });
                }
                "values" => {
                    values = Some(value.as_map().ok_or_else(|| {
                        error_at(
                            value.span(),
                            format!(":values must be a map, got {}", value.type_name()),
                        )
                    })?);
                }
                "deprecated" => deprecated = Self::analyze_deprecation(value)?,
                "see" => see = Self::analyze_see(value)?,
                other => {
                    return Err(error_at(value.span(), format!("unknown enum clause :{other}")));
                }
            }
        }

        let kind = kind.ok_or_else(|| error_at(span, "enum: requires :of"))?;
        let mut decl = EnumDecl::new(name, kind);
        decl.deprecated = deprecated;
        decl.see = see;

        for (symbol, literal) in values.unwrap_or_default() {
            let Some(symbol) = symbol.as_keyword() else {
                return Err(error_at(
                    symbol.span(),
                    format!("enum value name must be a keyword, got {}", symbol.type_name()),
                ));
            };
            let value = match literal {
                Ast::String(s, _) => EnumValue::String(s.clone()),
                Ast::Int(n, _) => EnumValue::Int(*n),
                Ast::Float(n, _) => EnumValue::Float(*n),
                other => {
                    return Err(error_at(
                        other.span(),
                        format!("enum value must be a literal, got {}", other.type_name()),
                    ));
                }
            };
            if value.kind() != kind {
                return Err(error_at(
                    literal.span(),
                    format!("value of :{symbol} does not match enum type"),
                ));
            }
            decl = decl.with_variant(symbol, value);
        }

        Ok(decl)
    }

    /// Analyze an `augment:` form.
    ///
    /// # Errors
    /// Returns a parse error if the form is malformed.
    pub fn analyze_augment(ast: &Ast) -> Result<AugmentDecl> {
        let (elements, span) = Self::form(ast, "augment:")?;
        let target = Self::declared_name(elements, span, "augment:")?;

        let mut augment = AugmentDecl::new(target);
        for (key, value) in Self::clauses(&elements[2..], span)? {
            match key {
                "members" => augment.members = Self::analyze_members(value)?,
                other => {
                    return Err(error_at(
                        value.span(),
                        format!("unknown augment clause :{other}"),
                    ));
                }
            }
        }
        Ok(augment)
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Analyze a `:members` vector.
    ///
    /// Repeated member names are kept; validation reports them.
    pub(crate) fn analyze_members(ast: &Ast) -> Result<Vec<MemberDecl>> {
        Self::vector(ast, ":members")?
            .iter()
            .map(Self::analyze_member)
            .collect()
    }

    /// Analyze a `(property ...)` or `(method ...)` form.
    ///
    /// # Errors
    /// Returns a parse error if the form is malformed.
    pub fn analyze_member(ast: &Ast) -> Result<MemberDecl> {
        match ast.head() {
            Some("property") => Self::analyze_property(ast),
            Some("method") => Self::analyze_method(ast),
            _ => Err(error_at(
                ast.span(),
                "member must be a (property ...) or (method ...) form",
            )),
        }
    }

    fn analyze_property(ast: &Ast) -> Result<MemberDecl> {
        let (elements, span) = Self::form(ast, "property")?;
        let name = Self::member_name(elements, span, "property")?;
        let Some(ty) = elements.get(2) else {
            return Err(error_at(span, format!("property {name} requires a type")));
        };

        let mut shape = PropertyShape {
            ty: analyze_type_expr(ty)?,
            readonly: false,
            constant: false,
        };
        let mut member = MemberDecl::property(name, shape.ty.clone());

        let mut i = 3;
        while i < elements.len() {
            let key = Self::keyword(&elements[i])?;
            i += 1;
            match key {
                "readonly" => shape.readonly = true,
                "const" => shape.constant = true,
                "deprecated" | "see" => {
                    let value = Self::clause_value(elements, i, span, key)?;
                    i += 1;
                    Self::apply_member_clause(&mut member, key, value)?;
                }
                other => {
                    return Err(error_at(
                        elements[i - 1].span(),
                        format!("unknown property flag :{other}"),
                    ));
                }
            }
        }

        member.kind = MemberKind::Property(shape);
        Ok(member)
    }

    fn analyze_method(ast: &Ast) -> Result<MemberDecl> {
        let (elements, span) = Self::form(ast, "method")?;
        let name = Self::member_name(elements, span, "method")?;
        let Some(params) = elements.get(2) else {
            return Err(error_at(span, format!("method {name} requires a parameter vector")));
        };
        let params = Self::analyze_params(params)?;

        let mut i = 3;
        let returns = match elements.get(3) {
            Some(ret) if !ret.is_keyword() => {
                i += 1;
                analyze_type_expr(ret)?
            }
            _ => TypeExpr::VOID,
        };

        let mut shape = MethodShape {
            params,
            returns,
            mutates: Vec::new(),
        };
        let mut member = MemberDecl::method(name, Vec::new(), shape.returns.clone());

        while i < elements.len() {
            let key = Self::keyword(&elements[i])?;
            let value = Self::clause_value(elements, i + 1, span, key)?;
            i += 2;
            match key {
                "mutates" => {
                    shape.mutates = Self::vector(value, ":mutates")?
                        .iter()
                        .map(|v| {
                            v.as_symbol().map(str::to_string).ok_or_else(|| {
                                error_at(v.span(), ":mutates entries must be property names")
                            })
                        })
                        .collect::<Result<_>>()?;
                }
                "deprecated" | "see" => Self::apply_member_clause(&mut member, key, value)?,
                other => {
                    return Err(error_at(
                        elements[i - 2].span(),
                        format!("unknown method clause :{other}"),
                    ));
                }
            }
        }

        member.kind = MemberKind::Method(shape);
        Ok(member)
    }

    fn apply_member_clause(member: &mut MemberDecl, key: &str, value: &Ast) -> Result<()> {
        match key {
            "deprecated" => member.deprecated = Self::analyze_deprecation(value)?,
            _ => member.see = Self::analyze_see(value)?,
        }
        Ok(())
    }

    /// Analyze a parameter vector: `[(name Type) (name Type :optional)]`.
    pub(crate) fn analyze_params(ast: &Ast) -> Result<Vec<Param>> {
        let mut params: Vec<Param> = Vec::new();
        for param in Self::vector(ast, "parameter list")? {
            let Some(elements) = param.as_list() else {
                return Err(error_at(
                    param.span(),
                    format!("parameter must be a (name Type) list, got {}", param.type_name()),
                ));
            };
            let (name, ty, optional) = match elements {
                [name, ty] => (name, ty, false),
                [name, ty, flag] if flag.as_keyword() == Some("optional") => (name, ty, true),
                _ => {
                    return Err(error_at(
                        param.span(),
                        "parameter must be (name Type) or (name Type :optional)",
                    ));
                }
            };
            let Some(name) = name.as_symbol() else {
                return Err(error_at(name.span(), "parameter name must be a symbol"));
            };
            if params.iter().any(|p| p.name == name) {
                return Err(error_at(param.span(), format!("duplicate parameter {name}")));
            }
            let ty = analyze_type_expr(ty)?;
            params.push(if optional {
                Param::optional(name, ty)
            } else {
                Param::required(name, ty)
            });
        }
        Ok(params)
    }

    // =========================================================================
    // Shared Clauses
    // =========================================================================

    /// Analyze a `:deprecated` value.
    ///
    /// `true`, a note string, a replacement reference, or a map with
    /// `:replacement` and `:note`. `false` means not deprecated.
    pub(crate) fn analyze_deprecation(ast: &Ast) -> Result<Option<Deprecation>> {
        match ast {
            Ast::Bool(true, _) => Ok(Some(Deprecation::marker())),
            Ast::Bool(false, _) => Ok(None),
            Ast::String(note, _) => Ok(Some(Deprecation::marker().with_note(note.clone()))),
            Ast::Symbol(_, _) => Ok(Some(Deprecation::replaced_by(Self::symbol_ref(ast)?))),
            Ast::Map(entries, _) => {
                let mut deprecation = Deprecation::marker();
                for (key, value) in entries {
                    match key.as_keyword() {
                        Some("replacement") => {
                            deprecation.replacement = Some(Self::symbol_ref(value)?);
                        }
                        Some("note") => {
                            let note = value.as_string().ok_or_else(|| {
                                error_at(value.span(), ":note must be a string")
                            })?;
                            deprecation.note = Some(note.to_string());
                        }
                        _ => {
                            return Err(error_at(
                                key.span(),
                                "deprecation map accepts :replacement and :note",
                            ));
                        }
                    }
                }
                Ok(Some(deprecation))
            }
            other => Err(error_at(
                other.span(),
                format!("invalid :deprecated value {}", other.type_name()),
            )),
        }
    }

    /// Analyze a `:see` vector of links.
    pub(crate) fn analyze_see(ast: &Ast) -> Result<Vec<String>> {
        Self::vector(ast, ":see")?
            .iter()
            .map(|link| {
                link.as_string()
                    .map(str::to_string)
                    .ok_or_else(|| error_at(link.span(), ":see entries must be strings"))
            })
            .collect()
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Returns the elements of a list form with the expected head.
    fn form<'a>(ast: &'a Ast, head: &str) -> Result<(&'a [Ast], Span)> {
        match ast {
            Ast::List(elements, span) if ast.head() == Some(head) => Ok((elements.as_slice(), *span)),
            other => Err(error_at(other.span(), format!("expected ({head} ...) form"))),
        }
    }

    /// The declared name in position 1 of a top-level form.
    fn declared_name(elements: &[Ast], span: Span, head: &str) -> Result<String> {
        let Some(name) = elements.get(1) else {
            return Err(error_at(span, format!("{head} requires a name")));
        };
        Self::type_name(name, head)
    }

    /// The member name in position 1 of a member form.
    fn member_name(elements: &[Ast], span: Span, head: &str) -> Result<String> {
        match elements.get(1) {
            Some(Ast::Symbol(name, _)) if is_identifier(name) => Ok(name.clone()),
            Some(other) => Err(error_at(
                other.span(),
                format!("{head} name must be an identifier, got {}", other.type_name()),
            )),
            None => Err(error_at(span, format!("{head} requires a name"))),
        }
    }

    /// A plain type name: a symbol without qualifiers or member part.
    fn type_name(ast: &Ast, what: &str) -> Result<String> {
        match ast {
            Ast::Symbol(name, _) if is_identifier(name) => Ok(name.clone()),
            other => Err(error_at(
                other.span(),
                format!("{what} expects a type name, got {}", other.type_name()),
            )),
        }
    }

    fn symbol_ref(ast: &Ast) -> Result<SymbolRef> {
        ast.as_symbol()
            .and_then(SymbolRef::parse)
            .ok_or_else(|| error_at(ast.span(), "expected a `Type` or `Type/member` reference"))
    }

    fn vector<'a>(ast: &'a Ast, what: &str) -> Result<&'a [Ast]> {
        ast.as_vector().ok_or_else(|| {
            error_at(
                ast.span(),
                format!("{what} must be a vector, got {}", ast.type_name()),
            )
        })
    }

    fn keyword(ast: &Ast) -> Result<&str> {
        ast.as_keyword().ok_or_else(|| {
            error_at(
                ast.span(),
                format!("expected keyword, got {}", ast.type_name()),
            )
        })
    }

    fn clause_value<'a>(elements: &'a [Ast], i: usize, span: Span, key: &str) -> Result<&'a Ast> {
        elements
            .get(i)
            .ok_or_else(|| error_at(span, format!("missing value for :{key}")))
    }

    /// Splits `:key value` pairs, rejecting repeated keys.
    fn clauses(elements: &[Ast], span: Span) -> Result<Vec<(&str, &Ast)>> {
        let mut pairs: Vec<(&str, &Ast)> = Vec::new();
        let mut i = 0;
        while i < elements.len() {
            let key = Self::keyword(&elements[i])?;
            let value = Self::clause_value(elements, i + 1, span, key)?;
            if pairs.iter().any(|(k, _)| *k == key) {
                return Err(error_at(elements[i].span(), format!("duplicate clause :{key}")));
            }
            pairs.push((key, value));
            i += 2;
        }
        Ok(pairs)
    }
}

/// Names must not carry qualifiers, member paths or declaration colons.
fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(['?', '!', '*'])
        && !name.contains('/')
        && !name.ends_with(':')
}
