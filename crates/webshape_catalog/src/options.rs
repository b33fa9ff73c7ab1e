//! Configuration for catalog loading.

/// What to do when two declarations share a name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The first declaration stays; later ones are reported and ignored.
    #[default]
    KeepFirst,
    /// The last declaration replaces earlier ones; every replacement is reported.
    KeepLast,
}

/// Options controlling how sources are turned into a catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Tie-break for duplicate top-level declarations.
    pub duplicates: DuplicatePolicy,
    /// Report names inside type expressions that the catalog does not declare.
    pub check_type_references: bool,
    /// Treat warnings as failures when converting an outcome into a result.
    pub strict: bool,
}

impl LoadOptions {
    /// Warnings fail the load and type references are checked.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            duplicates: DuplicatePolicy::KeepFirst,
            check_type_references: true,
            strict: true,
        }
    }

    /// Last declaration wins and nothing beyond structure is checked.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            duplicates: DuplicatePolicy::KeepLast,
            check_type_references: false,
            strict: false,
        }
    }

    /// Sets the duplicate policy.
    #[must_use]
    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Enables or disables type reference checking.
    #[must_use]
    pub fn with_type_reference_check(mut self, enabled: bool) -> Self {
        self.check_type_references = enabled;
        self
    }

    /// Enables or disables strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
