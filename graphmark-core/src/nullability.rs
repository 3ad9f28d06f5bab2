// Output nullability of members

use crate::site::DeclarationSite;

/// Nullability of a member's output type.
///
/// Only the non-null marker decides; argument descriptors never influence it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nullability {
    #[default]
    Nullable,
    NonNull,
}

impl Nullability {
    /// Non-null when any site of a visible member carries the marker.
    pub fn of(sites: &[&DeclarationSite]) -> Self {
        if sites.iter().any(|site| site.markers.non_null) {
            Nullability::NonNull
        } else {
            Nullability::Nullable
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Nullability::NonNull)
    }
}
