// Argument roles and their naming postfixes

use crate::error::MetadataError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role an argument plays in the query built behind a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArgumentKind {
    /// Plain equality filter.
    #[default]
    Query,
    /// "Contains" filter.
    QueryContains,
    /// Filter rendered by a named fragment provider.
    QueryCustom,
    /// Field to order by.
    OrderBy,
    /// Ordering direction.
    OrderDirection,
}

impl ArgumentKind {
    pub const ALL: [ArgumentKind; 5] = [
        ArgumentKind::Query,
        ArgumentKind::QueryContains,
        ArgumentKind::QueryCustom,
        ArgumentKind::OrderBy,
        ArgumentKind::OrderDirection,
    ];

    /// Suffix appended when an argument name is synthesized from a member name.
    pub fn postfix(&self) -> &'static str {
        match self {
            ArgumentKind::QueryContains => "CONTAINS",
            ArgumentKind::Query
            | ArgumentKind::QueryCustom
            | ArgumentKind::OrderBy
            | ArgumentKind::OrderDirection => "",
        }
    }

    /// Argument name derived from `base` for this kind.
    ///
    /// ```
    /// use graphmark_core::ArgumentKind;
    ///
    /// assert_eq!(ArgumentKind::QueryContains.synthesize_name("title"), "titleCONTAINS");
    /// assert_eq!(ArgumentKind::OrderBy.synthesize_name("title"), "title");
    /// ```
    pub fn synthesize_name(&self, base: &str) -> String {
        let mut name = String::with_capacity(base.len() + self.postfix().len());
        name.push_str(base);
        name.push_str(self.postfix());
        name
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArgumentKind::Query => "QUERY",
            ArgumentKind::QueryContains => "QUERY_CONTAINS",
            ArgumentKind::QueryCustom => "QUERY_CUSTOM",
            ArgumentKind::OrderBy => "ORDER_BY",
            ArgumentKind::OrderDirection => "ORDER_DIRECTION",
        }
    }
}

impl FromStr for ArgumentKind {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        ArgumentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| MetadataError::UnknownArgumentKind(s.to_string()))
    }
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
