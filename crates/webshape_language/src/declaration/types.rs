//! Source-level declaration types.
//!
//! Type and enum declarations live in `webshape_foundation`; this module holds
//! the forms that only exist in source and are folded away during loading.

use webshape_foundation::MemberDecl;

/// Members added to a type declared elsewhere.
///
/// Corresponds to `(augment: Navigator :members [...])`. Augments let one
/// source extend host types owned by another, e.g. adding `serviceWorker`
/// to `Navigator`.
#[derive(Clone, Debug, PartialEq)]
pub struct AugmentDecl {
    /// Name of the type being extended.
    pub target: String,
    /// Members to append to the target.
    pub members: Vec<MemberDecl>,
}

impl AugmentDecl {
    /// Creates an empty augment block.
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            members: Vec::new(),
        }
    }

    /// Adds a member.
    #[must_use]
    pub fn with_member(mut self, member: MemberDecl) -> Self {
        self.members.push(member);
        self
    }
}
