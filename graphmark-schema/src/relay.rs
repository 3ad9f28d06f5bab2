// Relay conventions: Node, PageInfo, connection types and mutation shapes

use crate::config::{RelayConfig, SchemaConfig};
use crate::resolver::{self, Projection};
use crate::types::{OutputKind, type_ref};
use crate::{Result, SchemaError};
use async_graphql::dynamic::{Field, FieldFuture, InputValue, Interface, InterfaceField, Object, TypeRef};
use async_graphql::{Error, Name, Value};
use graphmark_core::{PlannedType, SchemaPlan, SiteId, TypeShape, ValueType};
use std::collections::BTreeSet;
use std::sync::Arc;

pub const NODE: &str = "Node";
pub const PAGE_INFO: &str = "PageInfo";
/// The single argument of a Relay mutation.
pub const MUTATION_INPUT: &str = "input";
/// Echoed from a mutation's input onto its payload.
pub const CLIENT_MUTATION_ID: &str = "clientMutationId";

/// How a forward-paged member is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingMode {
    None,
    /// Slice the list and return it as is
    Slice,
    /// Slice the list and wrap it into a connection
    Connection,
}

pub fn connection_name(node: &ValueType) -> String {
    format!("{}Connection", node.type_name())
}

pub fn edge_name(node: &ValueType) -> String {
    format!("{}Edge", node.type_name())
}

/// Whether `ty` implements `Node` under `config`.
///
/// Without an explicit scan any object whose `id` member is a non-null `ID`
/// qualifies.
pub fn implements_node(ty: &PlannedType, config: &RelayConfig) -> bool {
    if !config.enabled || ty.shape != TypeShape::Object {
        return false;
    }
    if ty.interfaces.iter().any(|i| i == NODE) {
        return true;
    }
    if config.explicit_node_scan {
        return false;
    }
    ty.member("id")
        .is_some_and(|id| id.value_type == ValueType::Id && id.nullability.is_non_null())
}

pub fn node_interface() -> Interface {
    Interface::new(NODE)
        .description("An object with a globally unique ID")
        .field(InterfaceField::new("id", TypeRef::named_nn(TypeRef::ID)))
}

pub fn page_info() -> Object {
    Object::new(PAGE_INFO)
        .description("Information about pagination in a connection")
        .field(projected("hasNextPage", TypeRef::named_nn(TypeRef::BOOLEAN), OutputKind::Leaf))
        .field(projected("hasPreviousPage", TypeRef::named_nn(TypeRef::BOOLEAN), OutputKind::Leaf))
        .field(projected("startCursor", TypeRef::named(TypeRef::STRING), OutputKind::Leaf))
        .field(projected("endCursor", TypeRef::named(TypeRef::STRING), OutputKind::Leaf))
        .field(projected("total", TypeRef::named(TypeRef::INT), OutputKind::Leaf))
}

/// The connection and edge objects for lists of `node`.
pub fn connection_types(node: &ValueType, node_kind: OutputKind) -> [Object; 2] {
    let connection = connection_name(node);
    let edge = edge_name(node);

    [
        Object::new(&connection)
            .field(projected(
                "edges",
                TypeRef::List(Box::new(TypeRef::named(&edge))),
                OutputKind::Composite,
            ))
            .field(projected("pageInfo", TypeRef::named_nn(PAGE_INFO), OutputKind::Composite)),
        Object::new(&edge)
            .field(projected("node", type_ref(node, false), node_kind))
            .field(projected("cursor", TypeRef::named_nn(TypeRef::STRING), OutputKind::Leaf)),
    ]
}

/// Input and payload types of a Relay mutation root.
///
/// Empty unless relay is on and a mutation root is configured. Every input
/// and payload gains a nullable `clientMutationId` unless it declares one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationShapes {
    pub root: Option<String>,
    pub inputs: BTreeSet<String>,
    pub payloads: BTreeSet<String>,
}

impl MutationShapes {
    /// Check the members of the mutation root and collect their shapes.
    ///
    /// Each member must take exactly one argument, `input`, of an input
    /// object type and return a single object.
    pub fn of(plan: &SchemaPlan, config: &SchemaConfig) -> Result<Self> {
        let mut shapes = Self::default();
        let (true, Some(root)) = (config.relay.enabled, &config.mutation_root) else {
            return Ok(shapes);
        };
        let Some(ty) = plan.get(root) else {
            return Ok(shapes);
        };

        for member in &ty.members {
            let invalid = |reason: &str| SchemaError::InvalidRelayMutation {
                site: member.id.clone(),
                reason: reason.to_string(),
            };
            let [argument] = member.arguments.as_slice() else {
                return Err(invalid("must take exactly one argument"));
            };
            if argument.name != MUTATION_INPUT {
                return Err(invalid("must name its argument `input`"));
            }
            if !has_shape(plan, &argument.value_type, TypeShape::Input) {
                return Err(invalid("must take an input object"));
            }
            if !has_shape(plan, &member.value_type, TypeShape::Object) {
                return Err(invalid("must return a single object"));
            }
            shapes.inputs.insert(argument.value_type.type_name().to_string());
            shapes.payloads.insert(member.value_type.type_name().to_string());
        }

        shapes.root = Some(root.clone());
        Ok(shapes)
    }

    pub fn is_mutation(&self, id: &SiteId) -> bool {
        self.root.as_deref() == Some(id.type_name.as_str())
    }
}

fn has_shape(plan: &SchemaPlan, value_type: &ValueType, shape: TypeShape) -> bool {
    !value_type.is_list() && plan.get(value_type.type_name()).is_some_and(|t| t.shape == shape)
}

pub fn client_mutation_id_field() -> Field {
    projected(CLIENT_MUTATION_ID, TypeRef::named(TypeRef::STRING), OutputKind::Leaf)
}

pub fn client_mutation_id_input() -> InputValue {
    InputValue::new(CLIENT_MUTATION_ID, TypeRef::named(TypeRef::STRING))
}

/// Copy `clientMutationId` from the `input` argument onto a payload.
pub fn echo_client_mutation_id(payload: Value, input: Option<&Value>) -> Value {
    let Value::Object(mut payload) = payload else {
        return payload;
    };
    let id = match input {
        Some(Value::Object(input)) => input.get(CLIENT_MUTATION_ID).cloned().unwrap_or(Value::Null),
        _ => Value::Null,
    };
    payload.insert(Name::new(CLIENT_MUTATION_ID), id);
    Value::Object(payload)
}

fn projected(name: &str, ty: TypeRef, kind: OutputKind) -> Field {
    let projection = Projection::new(name, kind);
    Field::new(name, ty, move |ctx| {
        let projection = Arc::clone(&projection);
        FieldFuture::new(async move { resolver::resolve(&ctx, &projection) })
    })
}

/// Apply `first`/`after` to a list value. Cursors are item offsets.
pub fn page(value: Value, mode: PagingMode, first: Option<i64>, after: Option<&str>) -> async_graphql::Result<Value> {
    let Value::List(items) = value else {
        return Err(Error::new("paged member does not hold a list"));
    };
    let total = items.len();

    let start = match after {
        Some(cursor) => {
            let invalid = || Error::new(format!("invalid cursor `{}`", cursor));
            let offset: usize = cursor.parse().map_err(|_| invalid())?;
            offset.checked_add(1).ok_or_else(invalid)?
        }
        None => 0,
    }
    .min(total);

    let end = match first {
        Some(n) if n < 0 => return Err(Error::new("`first` must not be negative")),
        Some(n) => start.saturating_add(n as usize).min(total),
        None => total,
    };

    let window: Vec<(usize, Value)> = items.into_iter().enumerate().skip(start).take(end - start).collect();

    if mode != PagingMode::Connection {
        return Ok(Value::List(window.into_iter().map(|(_, item)| item).collect()));
    }

    let cursor = |index: usize| Value::String(index.to_string());
    let start_cursor = window.first().map(|(i, _)| cursor(*i)).unwrap_or(Value::Null);
    let end_cursor = window.last().map(|(i, _)| cursor(*i)).unwrap_or(Value::Null);

    let edges = window
        .into_iter()
        .map(|(index, node)| {
            Value::Object(
                [(Name::new("node"), node), (Name::new("cursor"), cursor(index))]
                    .into_iter()
                    .collect(),
            )
        })
        .collect();

    let page_info = [
        ("hasNextPage", Value::Boolean(end < total)),
        ("hasPreviousPage", Value::Boolean(start > 0)),
        ("startCursor", start_cursor),
        ("endCursor", end_cursor),
        ("total", Value::from(total as i64)),
    ];
    let page_info = page_info.into_iter().map(|(k, v)| (Name::new(k), v)).collect();

    let connection = [
        (Name::new("edges"), Value::List(edges)),
        (Name::new("pageInfo"), Value::Object(page_info)),
    ];
    Ok(Value::Object(connection.into_iter().collect()))
}
