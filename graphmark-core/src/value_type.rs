// Type references carried by declaration sites and argument descriptors

use crate::error::MetadataError;
use crate::naming::is_valid_name;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A reference to a GraphQL type, without nullability.
///
/// Nullability is never part of the reference: output nullability comes from
/// the NonNull marker and argument nullability from the descriptor's
/// `nullable` flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ValueType {
    Id,
    String,
    Int,
    Long,
    Float,
    Boolean,
    Date,
    DateTime,
    /// A registered object, input, interface or enum. Unregistered names
    /// fail reflection.
    Named(String),
    List(Box<ValueType>),
}

impl ValueType {
    pub fn named(name: impl Into<String>) -> Self {
        ValueType::Named(name.into())
    }

    pub fn list_of(inner: ValueType) -> Self {
        ValueType::List(Box::new(inner))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, ValueType::List(_))
    }

    /// The innermost named type, unwrapping any list layers.
    pub fn base(&self) -> &ValueType {
        match self {
            ValueType::List(inner) => inner.base(),
            other => other,
        }
    }

    /// GraphQL name of the innermost type.
    pub fn type_name(&self) -> &str {
        match self {
            ValueType::List(inner) => inner.type_name(),
            ValueType::Id => "ID",
            ValueType::String => "String",
            ValueType::Int => "Int",
            ValueType::Long => "Long",
            ValueType::Float => "Float",
            ValueType::Boolean => "Boolean",
            ValueType::Date => "Date",
            ValueType::DateTime => "DateTime",
            ValueType::Named(name) => name,
        }
    }

    /// Scalars built into every GraphQL schema.
    pub fn is_builtin_scalar(&self) -> bool {
        matches!(
            self,
            ValueType::Id | ValueType::String | ValueType::Int | ValueType::Float | ValueType::Boolean
        )
    }

    /// Scalars graphmark registers on demand.
    pub fn is_extended_scalar(&self) -> bool {
        matches!(self, ValueType::Long | ValueType::Date | ValueType::DateTime)
    }
}

impl FromStr for ValueType {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(inner) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            return inner
                .parse()
                .map(ValueType::list_of)
                .map_err(|_| MetadataError::InvalidValueType(s.to_string()));
        }

        let parsed = match trimmed {
            "ID" => ValueType::Id,
            "String" => ValueType::String,
            "Int" => ValueType::Int,
            "Long" => ValueType::Long,
            "Float" => ValueType::Float,
            "Boolean" => ValueType::Boolean,
            "Date" => ValueType::Date,
            "DateTime" => ValueType::DateTime,
            name if is_valid_name(name) => ValueType::Named(name.to_string()),
            _ => return Err(MetadataError::InvalidValueType(s.to_string())),
        };
        Ok(parsed)
    }
}

impl TryFrom<String> for ValueType {
    type Error = MetadataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ValueType> for String {
    fn from(value: ValueType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::List(inner) => write!(f, "[{}]", inner),
            other => f.write_str(other.type_name()),
        }
    }
}
