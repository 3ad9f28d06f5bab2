// Argument descriptors and their ordered grouping

use crate::kind::ArgumentKind;
use crate::value_type::ValueType;
use serde::{Deserialize, Serialize};

/// Sentinel meaning "no default value".
pub const NO_DEFAULT_VALUE: &str = "No Default Value";

fn default_nullable() -> bool {
    true
}

fn default_default_value() -> String {
    NO_DEFAULT_VALUE.to_string()
}

/// One GraphQL argument declared on a field, accessor or property.
///
/// # Example
///
/// ```
/// use graphmark_core::{ArgumentDescriptor, ArgumentKind, ValueType};
///
/// let arg = ArgumentDescriptor::new("status", ValueType::String)
///     .with_nullable(false)
///     .with_default_value("PUBLISHED")
///     .with_description("Publication status");
///
/// assert_eq!(arg.kind, ArgumentKind::Query);
/// assert_eq!(arg.resolved_default(), Some("PUBLISHED"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDescriptor {
    /// Explicit name; `None` synthesizes one from the member name and kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub value_type: ValueType,

    #[serde(default)]
    pub kind: ArgumentKind,

    /// Whether the argument itself may be omitted or null.
    #[serde(default = "default_nullable")]
    pub nullable: bool,

    #[serde(default = "default_default_value")]
    pub default_value: String,

    #[serde(default)]
    pub description: String,

    /// Provider name, only read for [`ArgumentKind::QueryCustom`].
    #[serde(default)]
    pub fragment_provider: String,
}

impl ArgumentDescriptor {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::synthesized(value_type)
        }
    }

    /// A descriptor whose name is derived from the member it is attached to.
    pub fn synthesized(value_type: ValueType) -> Self {
        Self {
            name: None,
            value_type,
            kind: ArgumentKind::default(),
            nullable: default_nullable(),
            default_value: default_default_value(),
            description: String::new(),
            fragment_provider: String::new(),
        }
    }

    pub fn with_kind(mut self, kind: ArgumentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Make this a [`ArgumentKind::QueryCustom`] argument backed by `provider`.
    pub fn with_fragment_provider(mut self, provider: impl Into<String>) -> Self {
        self.kind = ArgumentKind::QueryCustom;
        self.fragment_provider = provider.into();
        self
    }

    /// The default value, with the sentinel translated to `None`.
    pub fn resolved_default(&self) -> Option<&str> {
        if self.default_value.eq_ignore_ascii_case(NO_DEFAULT_VALUE) {
            None
        } else {
            Some(&self.default_value)
        }
    }

    pub fn resolved_description(&self) -> Option<&str> {
        (!self.description.is_empty()).then_some(self.description.as_str())
    }

    /// The emitted name: the explicit one, or `base` plus the kind postfix.
    pub fn effective_name(&self, base: &str) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.kind.synthesize_name(base),
        }
    }
}

/// Arguments attached to one declaration site, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArgumentGroup(Vec<ArgumentDescriptor>);

impl ArgumentGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, argument: ArgumentDescriptor) {
        self.0.push(argument);
    }

    pub fn with(mut self, argument: ArgumentDescriptor) -> Self {
        self.push(argument);
        self
    }

    /// Concatenate a singular descriptor ahead of a grouped list.
    pub fn merged(single: Option<ArgumentDescriptor>, group: ArgumentGroup) -> Self {
        let mut merged = Self(single.into_iter().collect());
        merged.0.extend(group.0);
        merged
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArgumentDescriptor> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[ArgumentDescriptor] {
        &self.0
    }
}

impl From<Vec<ArgumentDescriptor>> for ArgumentGroup {
    fn from(arguments: Vec<ArgumentDescriptor>) -> Self {
        Self(arguments)
    }
}

impl FromIterator<ArgumentDescriptor> for ArgumentGroup {
    fn from_iter<I: IntoIterator<Item = ArgumentDescriptor>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ArgumentGroup {
    type Item = ArgumentDescriptor;
    type IntoIter = std::vec::IntoIter<ArgumentDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ArgumentGroup {
    type Item = &'a ArgumentDescriptor;
    type IntoIter = std::slice::Iter<'a, ArgumentDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let arg = ArgumentDescriptor::new("id", ValueType::Id);
        assert!(arg.nullable);
        assert_eq!(arg.kind, ArgumentKind::Query);
        assert_eq!(arg.default_value, NO_DEFAULT_VALUE);
        assert_eq!(arg.resolved_default(), None);
        assert_eq!(arg.resolved_description(), None);
    }

    #[test]
    fn test_sentinel_is_case_insensitive() {
        let arg = ArgumentDescriptor::new("id", ValueType::Id).with_default_value("no default value");
        assert_eq!(arg.resolved_default(), None);
    }

    #[test]
    fn test_literal_sentinel_text_is_not_a_default() {
        let arg = ArgumentDescriptor::new("status", ValueType::String)
            .with_default_value(NO_DEFAULT_VALUE);
        assert_ne!(arg.resolved_default(), Some(NO_DEFAULT_VALUE));
    }

    #[test]
    fn test_fragment_provider_sets_kind() {
        let arg = ArgumentDescriptor::new("near", ValueType::String).with_fragment_provider("geo");
        assert_eq!(arg.kind, ArgumentKind::QueryCustom);
        assert_eq!(arg.fragment_provider, "geo");
    }

    #[test]
    fn test_effective_name() {
        let explicit = ArgumentDescriptor::new("q", ValueType::String)
            .with_kind(ArgumentKind::QueryContains);
        assert_eq!(explicit.effective_name("title"), "q");

        let synthesized = ArgumentDescriptor::synthesized(ValueType::String)
            .with_kind(ArgumentKind::QueryContains);
        assert_eq!(synthesized.effective_name("title"), "titleCONTAINS");
    }

    #[test]
    fn test_group_preserves_order() {
        let group: ArgumentGroup = ["c", "a", "b"]
            .into_iter()
            .map(|name| ArgumentDescriptor::new(name, ValueType::String))
            .collect();
        let names: Vec<_> = group.iter().filter_map(|a| a.name.as_deref()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn test_merged_puts_single_first() {
        let group = ArgumentGroup::new().with(ArgumentDescriptor::new("b", ValueType::Int));
        let merged = ArgumentGroup::merged(Some(ArgumentDescriptor::new("a", ValueType::Int)), group);
        let names: Vec<_> = merged.iter().filter_map(|a| a.name.as_deref()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let arg: ArgumentDescriptor =
            serde_json::from_str(r#"{"name": "first", "type": "Int"}"#).unwrap();
        assert!(arg.nullable);
        assert_eq!(arg.resolved_default(), None);
        assert_eq!(arg.kind, ArgumentKind::Query);
    }
}
