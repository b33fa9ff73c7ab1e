//! Conservative assignability between type expressions.
//!
//! [`is_assignable`] answers true only when a value of the source type can
//! certainly be used where the target type is expected. Anything it cannot
//! prove, such as template parameters or types missing from the catalog, is
//! not assignable unless the two expressions are identical.

use webshape_foundation::{CallbackParam, MemberDecl, MemberKind, Primitive, TypeExpr};

use crate::catalog::Catalog;

/// Typedef chains and nested shapes deeper than this are not followed.
const MAX_DEPTH: usize = 32;

/// Returns true if a value of type `source` may be used as a `target`.
#[must_use]
pub fn is_assignable(catalog: &Catalog, source: &TypeExpr, target: &TypeExpr) -> bool {
    assignable(catalog, source, target, 0)
}

fn assignable(catalog: &Catalog, source: &TypeExpr, target: &TypeExpr, depth: usize) -> bool {
    if source == target || matches!(target.unqualified(), TypeExpr::Any | TypeExpr::Unknown) {
        return true;
    }
    if depth >= MAX_DEPTH {
        return false;
    }
    let depth = depth + 1;

    let source = catalog.resolve_typedef(source);
    let target = catalog.resolve_typedef(target);

    if matches!(source.unqualified(), TypeExpr::Unknown) {
        return true;
    }
    if source.is_nullable() && !target.is_nullable() {
        return false;
    }

    match (source.unqualified(), target.unqualified()) {
        (TypeExpr::Primitive(Primitive::Null), _) => true,
        (TypeExpr::Union(alts), _) => alts.iter().all(|alt| assignable(catalog, alt, target, depth)),
        (_, TypeExpr::Union(alts)) => alts.iter().any(|alt| assignable(catalog, source, alt, depth)),
        (TypeExpr::Primitive(a), TypeExpr::Primitive(b)) => a == b,
        (TypeExpr::Named(a), TypeExpr::Named(b)) => a == b || catalog.is_subtype(a, b),
        (TypeExpr::Buffer(a), TypeExpr::Buffer(b)) => a == b,
        (TypeExpr::Buffer(kind), TypeExpr::Named(name)) => kind.platform_name() == name,
        (TypeExpr::Array(a), TypeExpr::Array(b)) | (TypeExpr::Promise(a), TypeExpr::Promise(b)) => {
            assignable(catalog, a, b, depth)
        }
        (
            TypeExpr::Function {
                params: source_params,
                returns: source_returns,
            },
            TypeExpr::Function {
                params: target_params,
                returns: target_returns,
            },
        ) => {
            callback_accepts(catalog, source_params, target_params, depth)
                && (target_returns.is_void()
                    || assignable(catalog, source_returns, target_returns, depth))
        }
        (TypeExpr::Record(source_fields), TypeExpr::Record(target_fields)) => {
            target_fields.iter().all(|(name, target_ty)| {
                source_fields
                    .iter()
                    .find(|(field, _)| field == name)
                    .is_some_and(|(_, source_ty)| assignable(catalog, source_ty, target_ty, depth))
            })
        }
        _ => false,
    }
}

/// A callback with `source` params can stand in for one with `target` params.
///
/// Every argument the target may be called with must be acceptable to the
/// source, and the source may not require arguments the target never passes.
fn callback_accepts(
    catalog: &Catalog,
    source: &[CallbackParam],
    target: &[CallbackParam],
    depth: usize,
) -> bool {
    source.iter().enumerate().all(|(i, param)| match target.get(i) {
        Some(passed) => assignable(catalog, &passed.ty, &param.ty, depth),
        None => param.optional,
    })
}

/// Checks that `overriding` may shadow `inherited` in a subtype.
///
/// Property types may narrow but not widen. Methods may narrow their return
/// type and accept more than the inherited method, never less. Returns a
/// description of the first incompatibility found.
#[must_use]
pub fn check_override(catalog: &Catalog, inherited: &MemberDecl, overriding: &MemberDecl) -> Option<String> {
    match (&inherited.kind, &overriding.kind) {
        (MemberKind::Property(_), MemberKind::Method(_)) => {
            Some("a property is redeclared as a method".to_string())
        }
        (MemberKind::Method(_), MemberKind::Property(_)) => {
            Some("a method is redeclared as a property".to_string())
        }
        (MemberKind::Property(old), MemberKind::Property(new)) => {
            (!is_assignable(catalog, &new.ty, &old.ty))
                .then(|| format!("type {} widens {}", new.ty, old.ty))
        }
        (MemberKind::Method(old), MemberKind::Method(new)) => {
            if !old.returns.is_void() && !is_assignable(catalog, &new.returns, &old.returns) {
                return Some(format!("return type {} widens {}", new.returns, old.returns));
            }
            for (i, param) in new.params.iter().enumerate() {
                match old.params.get(i) {
                    Some(old_param) if !is_assignable(catalog, &old_param.ty, &param.ty) => {
                        return Some(format!(
                            "parameter {} narrows {} to {}",
                            param.name, old_param.ty, param.ty
                        ));
                    }
                    Some(old_param) if old_param.optional && !param.optional => {
                        return Some(format!("parameter {} is no longer optional", param.name));
                    }
                    None if !param.optional => {
                        return Some(format!("parameter {} is required", param.name));
                    }
                    _ => {}
                }
            }
            None
        }
    }
}
