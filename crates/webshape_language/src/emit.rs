//! Emission of declarations back to source forms.
//!
//! The emitter is the inverse of the analyzer: analyzing an emitted form
//! yields the declaration it came from. Output is canonical, so optional
//! clauses at their defaults are left out.

use webshape_foundation::{
    Deprecation, EnumDecl, EnumKind, EnumValue, MemberDecl, MemberKind, Param, TypeDecl, TypeKind,
};

use crate::ast::Ast;
use crate::declaration::{AugmentDecl, Declaration, emit_type_expr};
use crate::pretty::{PrettyConfig, format_forms};

/// Builds the source form of any declaration.
#[must_use]
pub fn emit_declaration(decl: &Declaration) -> Ast {
    match decl {
        Declaration::Type(decl, _) => emit_type(decl),
        Declaration::Enum(decl, _) => emit_enum(decl),
        Declaration::Augment(decl, _) => emit_augment(decl),
    }
}

/// Builds the source form of a type declaration.
#[must_use]
pub fn emit_type(decl: &TypeDecl) -> Ast {
    let mut form = vec![Ast::symbol(decl.kind.head()), Ast::symbol(decl.name.clone())];

    if let Some(alias) = &decl.alias {
        form.push(emit_type_expr(alias));
    }
    if let Some(parent) = &decl.extends {
        push_clause(&mut form, "extends", Ast::symbol(parent.clone()));
    }
    if !decl.implements.is_empty() {
        push_clause(&mut form, "implements", symbols(&decl.implements));
    }
    if !decl.template.is_empty() {
        push_clause(&mut form, "template", symbols(&decl.template));
    }
    if decl.kind == TypeKind::Class {
        if let Some(params) = decl.constructor.as_deref().filter(|p| !p.is_empty()) {
            push_clause(&mut form, "params", emit_params(params));
        }
    }
    push_annotations(&mut form, decl.deprecated.as_ref(), &decl.see);
    if !decl.members.is_empty() {
        push_clause(&mut form, "members", emit_members(&decl.members));
    }

    Ast::list(form)
}

/// Builds the source form of an enum declaration.
#[must_use]
pub fn emit_enum(decl: &EnumDecl) -> Ast {
    let of = match decl.kind {
        EnumKind::String => "string",
        EnumKind::Number => "number",
    };
    let mut form = vec![Ast::symbol("enum:"), Ast::symbol(decl.name.clone())];
    push_clause(&mut form, "of", Ast::symbol(of));
    push_annotations(&mut form, decl.deprecated.as_ref(), &decl.see);

    let values = decl
        .variants
        .iter()
        .map(|variant| {
            let value = match &variant.value {
                EnumValue::String(s) => Ast::string(s.clone()),
                EnumValue::Int(n) => Ast::int(*n),
                EnumValue::Float(n) => Ast::float(*n),
            };
            (Ast::keyword(variant.name.clone()), value)
        })
        .collect();
    push_clause(&mut form, "values", Ast::map(values));

    Ast::list(form)
}

/// Builds the source form of an augment block.
#[must_use]
pub fn emit_augment(decl: &AugmentDecl) -> Ast {
    let mut form = vec![Ast::symbol("augment:"), Ast::symbol(decl.target.clone())];
    push_clause(&mut form, "members", emit_members(&decl.members));
    Ast::list(form)
}

/// Builds the source form of a member.
#[must_use]
pub fn emit_member(member: &MemberDecl) -> Ast {
    let mut form = Vec::new();
    match &member.kind {
        MemberKind::Property(shape) => {
            form.push(Ast::symbol("property"));
            form.push(Ast::symbol(member.name.clone()));
            form.push(emit_type_expr(&shape.ty));
            if shape.readonly {
                form.push(Ast::keyword("readonly"));
            }
            if shape.constant {
                form.push(Ast::keyword("const"));
            }
        }
        MemberKind::Method(shape) => {
            form.push(Ast::symbol("method"));
            form.push(Ast::symbol(member.name.clone()));
            form.push(emit_params(&shape.params));
            if !shape.returns.is_void() {
                form.push(emit_type_expr(&shape.returns));
            }
            if !shape.mutates.is_empty() {
                push_clause(&mut form, "mutates", symbols(&shape.mutates));
            }
        }
    }
    push_annotations(&mut form, member.deprecated.as_ref(), &member.see);
    Ast::list(form)
}

/// Renders declarations as formatted source text.
#[must_use]
pub fn to_source(decls: &[Declaration]) -> String {
    let forms: Vec<_> = decls.iter().map(emit_declaration).collect();
    format_forms(&forms, &PrettyConfig::default())
}

fn emit_members(members: &[MemberDecl]) -> Ast {
    Ast::vector(members.iter().map(emit_member).collect())
}

fn emit_params(params: &[Param]) -> Ast {
    Ast::vector(
        params
            .iter()
            .map(|p| {
                let mut param = vec![Ast::symbol(p.name.clone()), emit_type_expr(&p.ty)];
                if p.optional {
                    param.push(Ast::keyword("optional"));
                }
                Ast::list(param)
            })
            .collect(),
    )
}

fn emit_deprecation(deprecation: &Deprecation) -> Ast {
    match (&deprecation.replacement, &deprecation.note) {
        (None, None) => Ast::bool_lit(true),
        (Some(replacement), None) => Ast::symbol(replacement.to_string()),
        (None, Some(note)) => Ast::string(note.clone()),
        (Some(replacement), Some(note)) => Ast::map(vec![
            (Ast::keyword("replacement"), Ast::symbol(replacement.to_string())),
            (Ast::keyword("note"), Ast::string(note.clone())),
        ]),
    }
}

fn push_annotations(form: &mut Vec<Ast>, deprecated: Option<&Deprecation>, see: &[String]) {
    if let Some(deprecation) = deprecated {
        push_clause(form, "deprecated", emit_deprecation(deprecation));
    }
    if !see.is_empty() {
        push_clause(
            form,
            "see",
            Ast::vector(see.iter().map(|link| Ast::string(link.clone())).collect()),
        );
    }
}

fn push_clause(form: &mut Vec<Ast>, key: &str, value: Ast) {
    form.push(Ast::keyword(key));
    form.push(value);
}

fn symbols(names: &[String]) -> Ast {
    Ast::vector(names.iter().map(|n| Ast::symbol(n.clone())).collect())
}
