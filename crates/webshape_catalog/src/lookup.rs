//! Inheritance-aware queries over a catalog.
//!
//! Member resolution searches a type, then its `extends` chain up to the
//! root, then the capability sets (`:implements`) of every type on that
//! chain. The first declaration found wins, so a type shadows its ancestors
//! and the parent chain shadows capabilities.
//!
//! Lookups never fail on an inconsistent catalog: a dangling parent ends the
//! chain, and a type on an inheritance cycle only exposes its own members.

use std::collections::HashSet;

use webshape_foundation::{EnumValue, Error, ErrorKind, MemberDecl, Result, TypeDecl, TypeExpr};

use crate::catalog::Catalog;

/// A member together with the type that declares it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedMember<'a> {
    /// The type declaring the member.
    pub owner: &'a TypeDecl,
    /// The member declaration.
    pub member: &'a MemberDecl,
}

impl ResolvedMember<'_> {
    /// Name of the declaring type.
    #[must_use]
    pub fn owner_name(&self) -> &str {
        &self.owner.name
    }
}

impl Catalog {
    /// The types searched when resolving a member of `name`, most specific first.
    ///
    /// Empty if `name` is not a declared type.
    #[must_use]
    pub fn search_order(&self, name: &str) -> Vec<&TypeDecl> {
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        self.collect_search_order(name, &mut order, &mut seen);
        order
    }

    fn collect_search_order<'a>(
        &'a self,
        name: &str,
        order: &mut Vec<&'a TypeDecl>,
        seen: &mut HashSet<&'a str>,
    ) {
        let start = order.len();
        let mut current = self.get_type(name);
        while let Some(decl) = current {
            if !seen.insert(decl.name.as_str()) {
                break;
            }
            order.push(decl);
            if self.is_cyclic(&decl.name) {
                break;
            }
            current = decl.extends.as_deref().and_then(|parent| self.get_type(parent));
        }

        let chain = order[start..].to_vec();
        for decl in chain {
            if self.is_cyclic(&decl.name) {
                continue;
            }
            for capability in &decl.implements {
                self.collect_search_order(capability, order, seen);
            }
        }
    }

    /// Resolves a member of a type, considering inheritance.
    ///
    /// # Errors
    ///
    /// Returns `TypeNotFound` if the type is not declared, or
    /// `MemberNotFound` if neither it nor any ancestor declares the member.
    ///
    /// # Example
    ///
    /// ```
    /// use webshape_catalog::Catalog;
    /// use webshape_foundation::{MemberDecl, TypeDecl, TypeExpr};
    ///
    /// let catalog = Catalog::from_declarations(
    ///     [
    ///         TypeDecl::class("BaseType").with_member(MemberDecl::property("value", TypeExpr::NUMBER)),
    ///         TypeDecl::class("DerivedType")
    ///             .extending("BaseType")
    ///             .with_member(MemberDecl::property("rate", TypeExpr::NUMBER)),
    ///     ],
    ///     [],
    /// );
    ///
    /// let found = catalog.resolve_member("DerivedType", "value").unwrap();
    /// assert_eq!(found.owner_name(), "BaseType");
    /// assert!(catalog.resolve_member("DerivedType", "missing").is_err());
    /// ```
    pub fn resolve_member(&self, type_name: &str, member: &str) -> Result<ResolvedMember<'_>> {
        if self.get_type(type_name).is_none() {
            return Err(Error::type_not_found(type_name));
        }
        self.search_order(type_name)
            .into_iter()
            .find_map(|owner| owner.member(member).map(|member| ResolvedMember { owner, member }))
            .ok_or_else(|| Error::member_not_found(type_name, member))
    }

    /// Resolves a member from a type's ancestors only, skipping its own members.
    #[must_use]
    pub fn resolve_inherited(&self, type_name: &str, member: &str) -> Option<ResolvedMember<'_>> {
        self.search_order(type_name)
            .into_iter()
            .skip(1)
            .find_map(|owner| owner.member(member).map(|member| ResolvedMember { owner, member }))
    }

    /// Names of every type a type inherits from, nearest first.
    ///
    /// The parent chain comes before capability sets.
    ///
    /// # Errors
    ///
    /// Returns `TypeNotFound` if the type is not declared.
    pub fn ancestors(&self, type_name: &str) -> Result<Vec<&str>> {
        self.lookup_type(type_name)?;
        Ok(self
            .search_order(type_name)
            .into_iter()
            .skip(1)
            .map(|decl| decl.name.as_str())
            .collect())
    }

    /// Every member visible on a type, own members first.
    ///
    /// A shadowed member appears once, as its most specific declaration.
    ///
    /// # Errors
    ///
    /// Returns `TypeNotFound` if the type is not declared.
    pub fn visible_members(&self, type_name: &str) -> Result<Vec<ResolvedMember<'_>>> {
        self.lookup_type(type_name)?;
        let mut seen = HashSet::new();
        let mut visible = Vec::new();
        for owner in self.search_order(type_name) {
            for member in &owner.members {
                if seen.insert(member.name.as_str()) {
                    visible.push(ResolvedMember { owner, member });
                }
            }
        }
        Ok(visible)
    }

    /// Returns true if `sub` is `sup` or inherits from it.
    #[must_use]
    pub fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        sub == sup || self.search_order(sub).iter().any(|decl| decl.name == sup)
    }

    /// Follows typedef aliases until the expression is not a typedef reference.
    ///
    /// Nullability qualifiers on a typedef reference are looked through.
    /// Alias loops stop at the first repeated name.
    #[must_use]
    pub fn resolve_typedef<'a>(&'a self, ty: &'a TypeExpr) -> &'a TypeExpr {
        let mut seen = HashSet::new();
        let mut current = ty;
        while let TypeExpr::Named(name) = current.unqualified() {
            let Some(alias) = self.get_type(name).and_then(|decl| decl.alias.as_ref()) else {
                break;
            };
            if !seen.insert(name.as_str()) {
                break;
            }
            current = alias;
        }
        current
    }

    /// Looks up the literal value of an enum's symbolic name.
    ///
    /// # Errors
    ///
    /// Returns `EnumNotFound` if no enum has this name, or `EnumValueNotFound`
    /// if the enum has no such symbol.
    pub fn lookup_enum_value(&self, enum_name: &str, symbol: &str) -> Result<&EnumValue> {
        self.lookup_enum(enum_name)?.value_of(symbol).ok_or_else(|| {
            Error::new(ErrorKind::EnumValueNotFound {
                enum_name: enum_name.to_string(),
                symbol: symbol.to_string(),
            })
        })
    }
}
