// Property projection resolver
//
// Every rendered field reads its value out of the parent object value. Root
// fields read from the `RootValue` attached to the request.

use crate::relay::{self, MUTATION_INPUT, PagingMode, page};
use crate::types::OutputKind;
use async_graphql::dynamic::{FieldValue, ResolverContext};
use async_graphql::{Error, Name, Value};
use graphmark_core::{PAGING_AFTER, PAGING_FIRST};
use std::sync::Arc;

/// Data the query root projects from, attached per request.
#[derive(Debug, Clone, Default)]
pub struct RootValue(pub Value);

impl RootValue {
    pub fn from_json(json: serde_json::Value) -> async_graphql::Result<Self> {
        Ok(Self(Value::from_json(json)?))
    }
}

/// What a field resolver reads and how it shapes the result.
#[derive(Debug, Clone)]
pub struct Projection {
    pub key: String,
    pub kind: OutputKind,
    pub paging: PagingMode,
    /// Echo the `clientMutationId` of the `input` argument onto the value.
    pub client_mutation_id: bool,
}

impl Projection {
    pub fn new(key: impl Into<String>, kind: OutputKind) -> Arc<Self> {
        Self::paged(key, kind, PagingMode::None)
    }

    pub fn paged(key: impl Into<String>, kind: OutputKind, paging: PagingMode) -> Arc<Self> {
        Arc::new(Self {
            key: key.into(),
            kind,
            paging,
            client_mutation_id: false,
        })
    }

    /// A Relay mutation member of the mutation root.
    pub fn mutation(key: impl Into<String>, kind: OutputKind) -> Arc<Self> {
        Arc::new(Self {
            key: key.into(),
            kind,
            paging: PagingMode::None,
            client_mutation_id: true,
        })
    }
}

pub fn resolve<'a>(ctx: &ResolverContext<'a>, projection: &Projection) -> async_graphql::Result<Option<FieldValue<'a>>> {
    let parent = match ctx.parent_value.as_value() {
        Some(Value::Object(map)) => Some(map),
        _ => match ctx.data_opt::<RootValue>() {
            Some(RootValue(Value::Object(map))) => Some(map),
            _ => None,
        },
    };

    let value = match parent.and_then(|map| map.get(projection.key.as_str())) {
        Some(Value::Null) | None => return Ok(None),
        Some(value) => value.clone(),
    };

    let value = match projection.paging {
        PagingMode::None => value,
        mode => {
            // Explicit nulls mean the argument was not given
            let first = match ctx.args.get(PAGING_FIRST) {
                Some(arg) if !arg.is_null() => Some(arg.i64()?),
                _ => None,
            };
            let after = match ctx.args.get(PAGING_AFTER) {
                Some(arg) if !arg.is_null() => Some(arg.string()?.to_string()),
                _ => None,
            };
            page(value, mode, first, after.as_deref())?
        }
    };

    let value = if projection.client_mutation_id {
        let input = ctx.args.get(MUTATION_INPUT).map(|input| input.as_value());
        relay::echo_client_mutation_id(value, input)
    } else {
        value
    };

    let kind = match projection.paging {
        // Connections are plain objects built by `page`
        PagingMode::Connection => OutputKind::Composite,
        _ => projection.kind,
    };
    shape(value, kind).map(Some)
}

fn shape<'a>(value: Value, kind: OutputKind) -> async_graphql::Result<FieldValue<'a>> {
    match value {
        Value::List(items) => {
            let items = items
                .into_iter()
                .map(|item| shape(item, kind))
                .collect::<async_graphql::Result<Vec<_>>>()?;
            Ok(FieldValue::list(items))
        }
        Value::String(s) if kind == OutputKind::Enum => Ok(FieldValue::value(Value::Enum(Name::new(s)))),
        Value::Object(map) if kind == OutputKind::Abstract => {
            let Some(Value::String(type_name)) = map.get("__typename").cloned() else {
                return Err(Error::new("interface value is missing `__typename`"));
            };
            Ok(FieldValue::value(Value::Object(map)).with_type(type_name))
        }
        other => Ok(FieldValue::value(other)),
    }
}
