// ValueType to async-graphql type references, scalars and default values

use crate::{Result, SchemaError};
use async_graphql::dynamic::{Scalar, TypeRef};
use async_graphql::{Name, Value};
use graphmark_core::{ArgumentSpec, MetadataError, SchemaPlan, SiteId, TypeShape, ValueType};

/// Scalars registered when some member or argument uses them.
pub const EXTENDED_SCALARS: [(&str, &str); 3] = [
    ("Long", "64-bit signed integer"),
    ("Date", "Calendar date, ISO-8601 `YYYY-MM-DD`"),
    ("DateTime", "Date and time, ISO-8601 / RFC 3339"),
];

/// Build the reference for `value_type`. List items are always nullable;
/// only the outermost layer follows `non_null`.
pub fn type_ref(value_type: &ValueType, non_null: bool) -> TypeRef {
    let inner = match value_type {
        ValueType::List(item) => TypeRef::List(Box::new(type_ref(item, false))),
        other => TypeRef::named(other.type_name().to_string()),
    };
    if non_null {
        TypeRef::NonNull(Box::new(inner))
    } else {
        inner
    }
}

pub fn scalars(plan: &SchemaPlan) -> Vec<Scalar> {
    EXTENDED_SCALARS
        .iter()
        .filter(|(name, _)| plan.uses_type(name))
        .map(|(name, description)| Scalar::new(*name).description(*description))
        .collect()
}

/// How the resolver has to shape values of a given type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Scalars, passed through
    Leaf,
    /// Strings become enum values
    Enum,
    /// Objects; nested fields project from the value
    Composite,
    /// Interfaces; the concrete type comes from `__typename`
    Abstract,
}

impl OutputKind {
    pub fn of(plan: &SchemaPlan, value_type: &ValueType) -> Self {
        match plan.get(value_type.type_name()).map(|t| &t.shape) {
            Some(TypeShape::Enum(_)) => OutputKind::Enum,
            Some(TypeShape::Interface) => OutputKind::Abstract,
            Some(TypeShape::Object) | Some(TypeShape::Input) => OutputKind::Composite,
            None => OutputKind::Leaf,
        }
    }
}

/// Turn a resolved default string into a GraphQL value of the argument's type.
pub fn default_value(plan: &SchemaPlan, id: &SiteId, spec: &ArgumentSpec, raw: &str) -> Result<Value> {
    let invalid = || {
        SchemaError::Metadata(MetadataError::InvalidDefaultValue {
            site: id.clone(),
            argument: spec.name.clone(),
            value: raw.to_string(),
            expected: spec.value_type.to_string(),
        })
    };

    let json = match &spec.value_type {
        ValueType::Int | ValueType::Long => raw.trim().parse::<i64>().map(serde_json::Value::from).map_err(|_| invalid())?,
        ValueType::Float => raw.trim().parse::<f64>().map(serde_json::Value::from).map_err(|_| invalid())?,
        ValueType::Boolean => raw.trim().parse::<bool>().map(serde_json::Value::from).map_err(|_| invalid())?,
        ValueType::Id | ValueType::String | ValueType::Date | ValueType::DateTime => {
            serde_json::Value::String(raw.to_string())
        }
        ValueType::Named(name) => match plan.get(name).map(|t| &t.shape) {
            Some(TypeShape::Enum(_)) => return Ok(Value::Enum(Name::new(raw))),
            _ => serde_json::from_str(raw).map_err(|_| invalid())?,
        },
        ValueType::List(_) => serde_json::from_str(raw).map_err(|_| invalid())?,
    };

    Value::from_json(json).map_err(|e| SchemaError::Build(e.to_string()))
}
