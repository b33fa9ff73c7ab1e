//! Consistency checks over a loaded catalog.
//!
//! Validation never mutates the catalog and never stops early: every problem
//! found is returned, in declaration order. An empty list means the catalog
//! is internally consistent.

use std::collections::HashSet;

use webshape_foundation::{
    Deprecation, EnumDecl, Error, ErrorContext, ErrorKind, MemberDecl, MemberKind, ReferenceRole,
    SymbolRef, TypeDecl, TypeExpr,
};

use crate::catalog::Catalog;
use crate::subtype::check_override;

/// Checks a catalog with default settings.
///
/// # Example
///
/// ```
/// use webshape_catalog::{Catalog, validate};
/// use webshape_foundation::TypeDecl;
///
/// let catalog = Catalog::from_declarations([TypeDecl::class("GainNode").extending("AudioNode")], []);
/// let problems = validate(&catalog);
/// assert_eq!(problems.len(), 1);
/// assert!(problems[0].is_warning());
/// ```
#[must_use]
pub fn validate(catalog: &Catalog) -> Vec<Error> {
    Validator::new(catalog).run()
}

/// Configurable catalog checker.
#[derive(Clone, Copy, Debug)]
pub struct Validator<'a> {
    catalog: &'a Catalog,
    check_type_references: bool,
}

impl<'a> Validator<'a> {
    /// Creates a validator for a catalog.
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            check_type_references: false,
        }
    }

    /// Also report names in type expressions that the catalog does not declare.
    #[must_use]
    pub fn with_type_reference_check(mut self, enabled: bool) -> Self {
        self.check_type_references = enabled;
        self
    }

    /// Runs every check and returns the problems found.
    #[must_use]
    pub fn run(&self) -> Vec<Error> {
        let mut problems = Vec::new();
        for decl in self.catalog.types() {
            self.check_type(decl, &mut problems);
        }
        for decl in self.catalog.enums() {
            self.check_enum(decl, &mut problems);
        }
        problems
    }

    // =========================================================================
    // Types
    // =========================================================================

    fn check_type(&self, decl: &TypeDecl, out: &mut Vec<Error>) {
        let owner = decl.name.as_str();

        if let Some(cycle) = self.catalog.inheritance_cycle(owner) {
            out.push(at(
                owner,
                ErrorKind::CyclicInheritance {
                    type_name: owner.to_string(),
                    cycle,
                },
            ));
        } else if let Some(parent) = decl.extends.as_deref() {
            if self.catalog.get_type(parent).is_none() {
                out.push(at(owner, unresolved(owner, parent, ReferenceRole::Extends)));
            }
        }

        for capability in &decl.implements {
            if self.catalog.get_type(capability).is_none() {
                out.push(at(owner, unresolved(owner, capability, ReferenceRole::Implements)));
            }
        }

        self.check_deprecation(owner, owner, decl.deprecated.as_ref(), out);

        if let Some(alias) = &decl.alias {
            self.check_type_expr(decl, owner, alias, out);
        }
        for param in decl.constructor.iter().flatten() {
            self.check_type_expr(decl, owner, &param.ty, out);
        }

        let mut seen = HashSet::new();
        for member in &decl.members {
            if !seen.insert(member.name.as_str()) {
                out.push(at(
                    owner,
                    ErrorKind::DuplicateMember {
                        owner: owner.to_string(),
                        member: member.name.clone(),
                    },
                ));
                continue;
            }
            self.check_member(decl, member, out);
        }
    }

    fn check_member(&self, decl: &TypeDecl, member: &MemberDecl, out: &mut Vec<Error>) {
        let owner = decl.name.as_str();
        let path = format!("{owner}/{}", member.name);

        self.check_deprecation(owner, &path, member.deprecated.as_ref(), out);

        match &member.kind {
            MemberKind::Property(shape) => self.check_type_expr(decl, &path, &shape.ty, out),
            MemberKind::Method(shape) => {
                for param in &shape.params {
                    self.check_type_expr(decl, &path, &param.ty, out);
                }
                self.check_type_expr(decl, &path, &shape.returns, out);
                for property in &shape.mutates {
                    self.check_mutation(owner, &member.name, &path, property, out);
                }
            }
        }

        if let Some(ancestor) = self.catalog.override_of(owner, &member.name) {
            let inherited = self
                .catalog
                .get_type(ancestor)
                .and_then(|a| a.member(&member.name));
            if let Some(inherited) = inherited {
                if let Some(reason) = check_override(self.catalog, inherited, member) {
                    out.push(at(
                        owner,
                        ErrorKind::InvalidOverride {
                            owner: owner.to_string(),
                            member: member.name.clone(),
                            ancestor: ancestor.to_string(),
                            reason,
                        },
                    ));
                }
            }
        }
    }

    /// A method may not document a change to a read-only property.
    fn check_mutation(&self, owner: &str, method: &str, path: &str, property: &str, out: &mut Vec<Error>) {
        match self.catalog.resolve_member(owner, property) {
            Ok(found) if found.member.is_readonly() => out.push(at(
                owner,
                ErrorKind::ReadOnlyMutation {
                    owner: owner.to_string(),
                    method: method.to_string(),
                    property: property.to_string(),
                },
            )),
            Ok(found) if !found.member.is_method() => {}
            _ => out.push(at(owner, unresolved(path, property, ReferenceRole::Mutates))),
        }
    }

    fn check_type_expr(&self, decl: &TypeDecl, from: &str, ty: &TypeExpr, out: &mut Vec<Error>) {
        if !self.check_type_references {
            return;
        }
        for name in ty.referenced_names() {
            if !self.catalog.contains(name) && !decl.is_template_param(name) {
                out.push(at(
                    &decl.name,
                    ErrorKind::UnknownTypeReference {
                        from: from.to_string(),
                        name: name.to_string(),
                    },
                ));
            }
        }
    }

    // =========================================================================
    // Enums and Deprecations
    // =========================================================================

    fn check_enum(&self, decl: &EnumDecl, out: &mut Vec<Error>) {
        let mut seen = HashSet::new();
        for variant in &decl.variants {
            if !seen.insert(variant.name.as_str()) {
                out.push(at(
                    &decl.name,
                    ErrorKind::DuplicateEnumValue {
                        enum_name: decl.name.clone(),
                        symbol: variant.name.clone(),
                    },
                ));
            }
        }
        self.check_deprecation(&decl.name, &decl.name, decl.deprecated.as_ref(), out);
    }

    fn check_deprecation(
        &self,
        owner: &str,
        from: &str,
        deprecation: Option<&Deprecation>,
        out: &mut Vec<Error>,
    ) {
        let Some(replacement) = deprecation.and_then(|d| d.replacement.as_ref()) else {
            return;
        };
        if !self.replacement_resolves(replacement) {
            out.push(at(
                owner,
                unresolved(from, replacement.to_string(), ReferenceRole::Replacement),
            ));
        }
    }

    /// `Type` names a type or enum; `Type/member` a member or enum value.
    fn replacement_resolves(&self, replacement: &SymbolRef) -> bool {
        let type_name = replacement.type_name.as_str();
        match replacement.member.as_deref() {
            None => self.catalog.contains(type_name),
            Some(member) => {
                self.catalog.resolve_member(type_name, member).is_ok()
                    || self
                        .catalog
                        .get_enum(type_name)
                        .is_some_and(|e| e.value_of(member).is_some())
            }
        }
    }
}

fn unresolved(from: &str, reference: impl Into<String>, role: ReferenceRole) -> ErrorKind {
    ErrorKind::UnresolvedReference {
        from: from.to_string(),
        reference: reference.into(),
        role,
    }
}

/// Attaches the owning declaration so the loader can add source positions.
fn at(declaration: &str, kind: ErrorKind) -> Error {
    Error::new(kind).with_context(ErrorContext::new().with_declaration(declaration))
}
