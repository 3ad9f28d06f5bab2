// Ignore handling

use crate::site::{DeclarationSite, SiteId};

/// Whether a member reaches the schema at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Ignored,
}

impl Visibility {
    /// A member is ignored when any of its sites carries the ignore marker.
    ///
    /// This runs before anything else looks at the member, so nothing on an
    /// ignored site (arguments, non-null, paging) is ever evaluated.
    pub fn of(id: &SiteId, sites: &[&DeclarationSite]) -> Self {
        if sites.iter().any(|site| site.markers.ignore) {
            graphmark_log::debug!(target: "graphmark::visibility", "skipping ignored member {}", id);
            Visibility::Ignored
        } else {
            Visibility::Visible
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Visibility::Visible)
    }
}
