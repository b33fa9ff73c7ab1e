//! The immutable catalog of declared types and enums.
//!
//! A `Catalog` is built once from declarations and never mutated afterward.
//! It uses persistent data structures, so cloning is O(1) and a modified
//! copy shares structure with the original.

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use webshape_foundation::{EnumDecl, Error, ErrorKind, OrderedMap, Result, TypeDecl};
use webshape_language::pretty::{PrettyConfig, format_forms};
use webshape_language::emit::{emit_enum, emit_type};

/// Declared types and enums, plus indices derived from them.
///
/// The derived indices are the set of types whose `extends` chain loops
/// back to themselves, and for every member that shadows an inherited one,
/// the ancestor it shadows.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Catalog {
    types: OrderedMap<TypeDecl>,
    enums: OrderedMap<EnumDecl>,
    cyclic: im::HashSet<String>,
    overrides: im::HashMap<String, im::HashMap<String, String>>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from declaration maps, computing derived indices.
    #[must_use]
    pub fn from_maps(types: OrderedMap<TypeDecl>, enums: OrderedMap<EnumDecl>) -> Self {
        let cyclic = types
            .keys()
            .filter(|name| cycle_from(&types, name).is_some())
            .map(str::to_string)
            .collect();

        let mut catalog = Self {
            types,
            enums,
            cyclic,
            overrides: im::HashMap::new(),
        };
        catalog.overrides = catalog.compute_overrides();
        catalog
    }

    /// Builds a catalog from declarations.
    ///
    /// A later declaration with an already-used name replaces the earlier one.
    #[must_use]
    pub fn from_declarations(
        types: impl IntoIterator<Item = TypeDecl>,
        enums: impl IntoIterator<Item = EnumDecl>,
    ) -> Self {
        let types = types.into_iter().map(|t| (t.name.clone(), t)).collect();
        let enums = enums.into_iter().map(|e| (e.name.clone(), e)).collect();
        Self::from_maps(types, enums)
    }

    /// Returns a new catalog with the type added or replaced.
    #[must_use]
    pub fn with_type(&self, decl: TypeDecl) -> Self {
        Self::from_maps(self.types.with(decl.name.clone(), decl), self.enums.clone())
    }

    /// Returns a new catalog with the enum added or replaced.
    #[must_use]
    pub fn with_enum(&self, decl: EnumDecl) -> Self {
        Self::from_maps(self.types.clone(), self.enums.with(decl.name.clone(), decl))
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Gets a type declaration by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    /// Looks up a type declaration by name.
    ///
    /// # Errors
    ///
    /// Returns `TypeNotFound` if no type has this name.
    pub fn lookup_type(&self, name: &str) -> Result<&TypeDecl> {
        self.types
            .get(name)
            .ok_or_else(|| Error::type_not_found(name))
    }

    /// Gets an enum declaration by name.
    #[must_use]
    pub fn get_enum(&self, name: &str) -> Option<&EnumDecl> {
        self.enums.get(name)
    }

    /// Looks up an enum declaration by name.
    ///
    /// # Errors
    ///
    /// Returns `EnumNotFound` if no enum has this name.
    pub fn lookup_enum(&self, name: &str) -> Result<&EnumDecl> {
        self.enums
            .get(name)
            .ok_or_else(|| Error::new(ErrorKind::EnumNotFound(name.to_string())))
    }

    /// Returns true if a type or enum has this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name) || self.enums.contains_key(name)
    }

    /// Iterates over type declarations in authoring order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.values()
    }

    /// Iterates over enum declarations in authoring order.
    pub fn enums(&self) -> impl Iterator<Item = &EnumDecl> {
        self.enums.values()
    }

    /// Returns the number of type declarations.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Returns the number of enum declarations.
    #[must_use]
    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    /// Returns true if the catalog declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.enums.is_empty()
    }

    // =========================================================================
    // Derived Indices
    // =========================================================================

    /// Returns true if the type's `extends` chain revisits a type, either
    /// because the type is on a loop or because its chain runs into one.
    ///
    /// Inherited-member lookup is disabled for such types; their own members
    /// remain usable.
    #[must_use]
    pub fn is_cyclic(&self, name: &str) -> bool {
        self.cyclic.contains(name)
    }

    /// Names of all types with a cyclic `extends` chain, in authoring order.
    pub fn cyclic_types(&self) -> impl Iterator<Item = &str> {
        self.types.keys().filter(|name| self.cyclic.contains(*name))
    }

    /// The walk from a type along `extends` up to the first repeated name.
    #[must_use]
    pub fn inheritance_cycle(&self, name: &str) -> Option<Vec<String>> {
        cycle_from(&self.types, name)
    }

    /// Returns the ancestor whose member `owner/member` shadows.
    #[must_use]
    pub fn override_of(&self, owner: &str, member: &str) -> Option<&str> {
        self.overrides
            .get(owner)
            .and_then(|members| members.get(member))
            .map(String::as_str)
    }

    /// Iterates over `(owner, member, ancestor)` for every recorded override,
    /// in authoring order.
    pub fn overrides(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.types.values().flat_map(move |decl| {
            let shadowed = self.overrides.get(decl.name.as_str());
            decl.members.iter().filter_map(move |member| {
                shadowed
                    .and_then(|m| m.get(member.name.as_str()))
                    .map(|ancestor| (decl.name.as_str(), member.name.as_str(), ancestor.as_str()))
            })
        })
    }

    fn compute_overrides(&self) -> im::HashMap<String, im::HashMap<String, String>> {
        let mut overrides = im::HashMap::new();
        for decl in self.types.values() {
            if self.is_cyclic(&decl.name) {
                continue;
            }
            let order = self.search_order(&decl.name);
            let inherited = order.get(1..).unwrap_or_default();
            let mut shadowed = im::HashMap::new();
            for member in &decl.members {
                if let Some(ancestor) = inherited.iter().find(|a| a.member(&member.name).is_some()) {
                    shadowed.insert(member.name.clone(), ancestor.name.clone());
                }
            }
            if !shadowed.is_empty() {
                overrides.insert(decl.name.clone(), shadowed);
            }
        }
        overrides
    }

    // =========================================================================
    // Emission
    // =========================================================================

    /// Renders the catalog as declaration source.
    ///
    /// Types come first, then enums, each in authoring order. Loading the
    /// result yields an equal catalog.
    #[must_use]
    pub fn to_source(&self) -> String {
        let forms: Vec<_> = self
            .types
            .values()
            .map(emit_type)
            .chain(self.enums.values().map(emit_enum))
            .collect();
        format_forms(&forms, &PrettyConfig::default())
    }
}

/// Walks `extends` from `name`; returns the path if it revisits any type.
///
/// The path ends with the first repeated name, which is `name` itself when
/// the type is on the loop and a later type when its chain runs into one.
fn cycle_from(types: &OrderedMap<TypeDecl>, name: &str) -> Option<Vec<String>> {
    let mut path = vec![name.to_string()];
    let mut seen = HashSet::from([name]);
    let mut current = types.get(name)?;

    while let Some(parent) = current.extends.as_deref() {
        path.push(parent.to_string());
        if !seen.insert(parent) {
            return Some(path);
        }
        current = types.get(parent)?;
    }
    None
}
