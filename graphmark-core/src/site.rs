// Declaration sites: the places metadata attaches to

use crate::argument::{ArgumentDescriptor, ArgumentGroup};
use crate::naming::sanitize_member_name;
use crate::value_type::ValueType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of member a site is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteKind {
    #[default]
    Field,
    Method,
    PropertyGetter,
    PropertySetter,
}

impl SiteKind {
    /// Accessors take precedence over fields when both carry arguments.
    pub fn is_accessor(&self) -> bool {
        !matches!(self, SiteKind::Field)
    }
}

/// Registration-table key: owning type plus member name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SiteId {
    pub type_name: String,
    pub member: String,
}

impl SiteId {
    pub fn new(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            member: member.into(),
        }
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.member)
    }
}

/// Presence markers on a site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    /// Remove the member from the schema. Wins over everything else.
    #[serde(default)]
    pub ignore: bool,
    /// Render the member's output type as non-null.
    #[serde(default)]
    pub non_null: bool,
}

/// Metadata declared on one field, accessor or property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationSite {
    pub id: SiteId,
    pub kind: SiteKind,
    pub value_type: ValueType,
    pub markers: Markers,
    pub arguments: ArgumentGroup,
    pub description: Option<String>,
    pub deprecation: Option<String>,
    pub forward_paging: bool,
    /// Per-item weight used when scoring query complexity. `Some(0)`
    /// leaves the member out of the score.
    pub complexity: Option<u32>,
}

impl DeclarationSite {
    /// A site for `member` of `type_name`. Accessor names are normalised
    /// (`getTitle` is stored as `title`).
    pub fn new(
        type_name: impl Into<String>,
        member: impl AsRef<str>,
        kind: SiteKind,
        value_type: ValueType,
    ) -> Self {
        let member = member.as_ref();
        let member = if kind.is_accessor() {
            sanitize_member_name(member)
        } else {
            member.to_string()
        };
        Self {
            id: SiteId::new(type_name, member),
            kind,
            value_type,
            markers: Markers::default(),
            arguments: ArgumentGroup::new(),
            description: None,
            deprecation: None,
            forward_paging: false,
            complexity: None,
        }
    }

    pub fn field(type_name: impl Into<String>, member: impl AsRef<str>, value_type: ValueType) -> Self {
        Self::new(type_name, member, SiteKind::Field, value_type)
    }

    pub fn method(type_name: impl Into<String>, member: impl AsRef<str>, value_type: ValueType) -> Self {
        Self::new(type_name, member, SiteKind::Method, value_type)
    }

    pub fn ignore(mut self) -> Self {
        self.markers.ignore = true;
        self
    }

    pub fn non_null(mut self) -> Self {
        self.markers.non_null = true;
        self
    }

    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    pub fn argument(mut self, argument: ArgumentDescriptor) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn arguments(mut self, group: ArgumentGroup) -> Self {
        for argument in group {
            self.arguments.push(argument);
        }
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.deprecation = Some(reason.into());
        self
    }

    pub fn forward_paging(mut self) -> Self {
        self.forward_paging = true;
        self
    }

    pub fn with_complexity(mut self, multiplier: u32) -> Self {
        self.complexity = Some(multiplier);
        self
    }

    pub fn member(&self) -> &str {
        &self.id.member
    }
}
