//! Analysis of type expressions.
//!
//! ```text
//! number string boolean void undefined null   primitives
//! *  ?                                         any, unknown
//! AudioNode  ?AudioNode  !AudioNode            references
//! (? T) (! T)                                  qualified compound types
//! (array T) (buffer float32) (promise T)
//! (union A B ...)                              two or more alternatives
//! (function [A (opt B)] R)                     callback, R defaults to void
//! {:field T ...}                               record shape
//! ```

use webshape_foundation::{BufferKind, CallbackParam, Primitive, Result, TypeExpr};

use super::analyzer::error_at;
use crate::ast::Ast;
use crate::parser::parse_one;
use crate::span::Span;

/// Analyzes a type expression form.
///
/// # Errors
/// Returns a parse error if the form is not a valid type expression.
pub fn analyze_type_expr(ast: &Ast) -> Result<TypeExpr> {
    match ast {
        Ast::Symbol(name, _) => type_from_symbol(name).ok_or_else(|| {
            error_at(ast.span(), format!("invalid type name `{name}`"))
        }),
        Ast::List(elements, span) => {
            let Some((head, args)) = elements.split_first() else {
                return Err(error_at(*span, "empty type expression"));
            };
            let Some(head) = head.as_symbol() else {
                return Err(error_at(
                    head.span(),
                    format!("type constructor must be a symbol, got {}", head.type_name()),
                ));
            };
            analyze_compound(head, args, ast)
        }
        Ast::Map(entries, _) => {
            let mut fields = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                let Some(field) = key.as_keyword() else {
                    return Err(error_at(
                        key.span(),
                        format!("record field must be a keyword, got {}", key.type_name()),
                    ));
                };
                if fields.iter().any(|(name, _)| name == field) {
                    return Err(error_at(key.span(), format!("duplicate record field :{field}")));
                }
                fields.push((field.to_string(), analyze_type_expr(value)?));
            }
            Ok(TypeExpr::Record(fields))
        }
        other => Err(error_at(
            other.span(),
            format!("expected type expression, got {}", other.type_name()),
        )),
    }
}

/// Parses a type expression from source text.
///
/// # Errors
/// Returns a parse error if the text is not a single valid type expression.
pub fn parse_type_expr(source: &str) -> Result<TypeExpr> {
    analyze_type_expr(&parse_one(source)?)
}

fn type_from_symbol(name: &str) -> Option<TypeExpr> {
    match name {
        "" => None,
        "*" => Some(TypeExpr::Any),
        "?" => Some(TypeExpr::Unknown),
        _ => {
            if let Some(rest) = name.strip_prefix('?') {
                return type_from_symbol(rest).map(TypeExpr::nullable);
            }
            if let Some(rest) = name.strip_prefix('!') {
                return type_from_symbol(rest).map(TypeExpr::non_null);
            }
            if name.contains('/') || name.ends_with(':') {
                return None;
            }
            Some(Primitive::from_name(name).map_or_else(|| TypeExpr::named(name), TypeExpr::Primitive))
        }
    }
}

fn single<'a>(args: &'a [Ast], span: Span, what: &str) -> Result<&'a Ast> {
    match args {
        [arg] => Ok(arg),
        _ => Err(error_at(
            span,
            format!("({what} ...) takes exactly one type, got {}", args.len()),
        )),
    }
}

fn analyze_compound(head: &str, args: &[Ast], form: &Ast) -> Result<TypeExpr> {
    let span = form.span();

    match head {
        "?" => Ok(TypeExpr::nullable(analyze_type_expr(single(args, span, "?")?)?)),
        "!" => Ok(TypeExpr::non_null(analyze_type_expr(single(args, span, "!")?)?)),
        "array" => Ok(TypeExpr::array(analyze_type_expr(single(args, span, "array")?)?)),
        "promise" => Ok(TypeExpr::promise(analyze_type_expr(single(args, span, "promise")?)?)),
        "buffer" => {
            let arg = single(args, span, "buffer")?;
            arg.as_symbol()
                .and_then(BufferKind::from_keyword)
                .map(TypeExpr::Buffer)
                .ok_or_else(|| error_at(arg.span(), "unknown buffer element kind"))
        }
        "union" => {
            if args.len() < 2 {
                return Err(error_at(span, "(union ...) needs at least two alternatives"));
            }
            let alternatives = args.iter().map(analyze_type_expr).collect::<Result<Vec<_>>>()?;
            Ok(TypeExpr::union(alternatives))
        }
        "function" => analyze_function(args, form),
        other => Err(error_at(span, format!("unknown type constructor `{other}`"))),
    }
}

fn analyze_function(args: &[Ast], form: &Ast) -> Result<TypeExpr> {
    let (params, returns) = match args {
        [params] => (params, None),
        [params, returns] => (params, Some(returns)),
        _ => {
            return Err(error_at(
                form.span(),
                "(function [params] return) takes a parameter vector and an optional return type",
            ));
        }
    };

    let Some(params) = params.as_vector() else {
        return Err(error_at(
            params.span(),
            format!("callback parameters must be a vector, got {}", params.type_name()),
        ));
    };

    let params = params
        .iter()
        .map(analyze_callback_param)
        .collect::<Result<Vec<_>>>()?;
    let returns = returns.map_or(Ok(TypeExpr::VOID), analyze_type_expr)?;

    Ok(TypeExpr::function(params, returns))
}

fn analyze_callback_param(ast: &Ast) -> Result<CallbackParam> {
    if let Some([head, ty]) = ast.as_list() {
        if head.as_symbol() == Some("opt") {
            return Ok(CallbackParam {
                ty: analyze_type_expr(ty)?,
                optional: true,
            });
        }
    }
    Ok(CallbackParam {
        ty: analyze_type_expr(ast)?,
        optional: false,
    })
}

/// Builds the canonical source form of a type expression.
#[must_use]
pub fn emit_type_expr(ty: &TypeExpr) -> Ast {
    match ty {
        TypeExpr::Primitive(p) => Ast::symbol(p.name()),
        TypeExpr::Any => Ast::symbol("*"),
        TypeExpr::Unknown => Ast::symbol("?"),
        TypeExpr::Named(name) => Ast::symbol(name.clone()),
        TypeExpr::Nullable(inner) => emit_qualified("?", inner),
        TypeExpr::NonNull(inner) => emit_qualified("!", inner),
        TypeExpr::Array(inner) => Ast::list(vec![Ast::symbol("array"), emit_type_expr(inner)]),
        TypeExpr::Buffer(kind) => Ast::list(vec![Ast::symbol("buffer"), Ast::symbol(kind.keyword())]),
        TypeExpr::Union(alternatives) => {
            let mut elements = vec![Ast::symbol("union")];
            elements.extend(alternatives.iter().map(emit_type_expr));
            Ast::list(elements)
        }
        TypeExpr::Promise(inner) => Ast::list(vec![Ast::symbol("promise"), emit_type_expr(inner)]),
        TypeExpr::Function { params, returns } => {
            let params = params
                .iter()
                .map(|p| {
                    let ty = emit_type_expr(&p.ty);
                    if p.optional {
                        Ast::list(vec![Ast::symbol("opt"), ty])
                    } else {
                        ty
                    }
                })
                .collect();
            let mut elements = vec![Ast::symbol("function"), Ast::vector(params)];
            if !returns.is_void() {
                elements.push(emit_type_expr(returns));
            }
            Ast::list(elements)
        }
        TypeExpr::Record(fields) => Ast::map(
            fields
                .iter()
                .map(|(name, ty)| (Ast::keyword(name.clone()), emit_type_expr(ty)))
                .collect(),
        ),
    }
}

/// `?Name` when the inner type prints as a symbol, `(? ...)` otherwise.
fn emit_qualified(prefix: &str, inner: &TypeExpr) -> Ast {
    match emit_type_expr(inner) {
        Ast::Symbol(name, _) => Ast::symbol(format!("{prefix}{name}")),
        compound => Ast::list(vec![Ast::symbol(prefix), compound]),
    }
}
