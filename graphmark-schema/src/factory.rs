// Planned types to async-graphql dynamic types

use crate::config::SchemaConfig;
use crate::relay::{self, MutationShapes, PagingMode};
use crate::resolver::{self, Projection};
use crate::types::{OutputKind, default_value, type_ref};
use crate::Result;
use async_graphql::dynamic::{
    Enum, EnumItem, Field, FieldFuture, InputObject, InputValue, Interface, InterfaceField, Object, TypeRef,
};
use graphmark_core::{PlannedMember, PlannedType, SchemaPlan, ValueType};
use std::sync::Arc;

/// Builds dynamic types for one plan under one configuration.
pub struct TypeFactory<'a> {
    plan: &'a SchemaPlan,
    config: &'a SchemaConfig,
    mutations: &'a MutationShapes,
}

impl<'a> TypeFactory<'a> {
    pub fn new(plan: &'a SchemaPlan, config: &'a SchemaConfig, mutations: &'a MutationShapes) -> Self {
        Self {
            plan,
            config,
            mutations,
        }
    }

    pub fn object(&self, ty: &PlannedType) -> Result<Object> {
        let mut object = Object::new(&ty.name);
        if let Some(description) = &ty.description {
            object = object.description(description);
        }

        let mut interfaces: Vec<&str> = ty.interfaces.iter().map(String::as_str).collect();
        if relay::implements_node(ty, &self.config.relay) && !interfaces.contains(&relay::NODE) {
            interfaces.push(relay::NODE);
        }
        for interface in interfaces {
            object = object.implement(interface);
        }

        for member in &ty.members {
            object = object.field(self.field(member)?);
        }
        if self.mutations.payloads.contains(&ty.name) && ty.member(relay::CLIENT_MUTATION_ID).is_none() {
            object = object.field(relay::client_mutation_id_field());
        }
        Ok(object)
    }

    pub fn interface(&self, ty: &PlannedType) -> Result<Interface> {
        let mut interface = Interface::new(&ty.name);
        if let Some(description) = &ty.description {
            interface = interface.description(description);
        }

        for member in &ty.members {
            let mut field = InterfaceField::new(member.name(), self.output_type(member));
            if let Some(description) = &member.description {
                field = field.description(description);
            }
            for argument in self.arguments(member)? {
                field = field.argument(argument);
            }
            interface = interface.field(field);
        }
        Ok(interface)
    }

    pub fn input(&self, ty: &PlannedType) -> InputObject {
        let mut input = InputObject::new(&ty.name);
        if let Some(description) = &ty.description {
            input = input.description(description);
        }

        for member in &ty.members {
            let mut field = InputValue::new(
                member.name(),
                type_ref(&member.value_type, member.nullability.is_non_null()),
            );
            if let Some(description) = &member.description {
                field = field.description(description);
            }
            input = input.field(field);
        }
        if self.mutations.inputs.contains(&ty.name) && ty.member(relay::CLIENT_MUTATION_ID).is_none() {
            input = input.field(relay::client_mutation_id_input());
        }
        input
    }

    pub fn enumeration(&self, ty: &PlannedType, values: &[String]) -> Enum {
        let mut enumeration = Enum::new(&ty.name);
        if let Some(description) = &ty.description {
            enumeration = enumeration.description(description);
        }
        for value in values {
            enumeration = enumeration.item(EnumItem::new(value));
        }
        enumeration
    }

    fn paging_mode(&self, member: &PlannedMember) -> PagingMode {
        match (member.forward_paging, self.config.relay.enabled) {
            (false, _) => PagingMode::None,
            (true, false) => PagingMode::Slice,
            (true, true) => PagingMode::Connection,
        }
    }

    /// The member's output type. Relay turns paged lists into connections.
    fn output_type(&self, member: &PlannedMember) -> TypeRef {
        let non_null = member.nullability.is_non_null();
        match (self.paging_mode(member), &member.value_type) {
            (PagingMode::Connection, ValueType::List(node)) => {
                let name = relay::connection_name(node);
                if non_null { TypeRef::named_nn(name) } else { TypeRef::named(name) }
            }
            _ => type_ref(&member.value_type, non_null),
        }
    }

    fn field(&self, member: &PlannedMember) -> Result<Field> {
        let kind = OutputKind::of(self.plan, &member.value_type);
        let projection = if self.mutations.is_mutation(&member.id) {
            Projection::mutation(member.name(), kind)
        } else {
            Projection::paged(member.name(), kind, self.paging_mode(member))
        };

        let mut field = Field::new(member.name(), self.output_type(member), move |ctx| {
            let projection = Arc::clone(&projection);
            FieldFuture::new(async move { resolver::resolve(&ctx, &projection) })
        });

        if let Some(description) = &member.description {
            field = field.description(description);
        }
        if let Some(reason) = &member.deprecation {
            field = field.deprecation(Some(reason.as_str()));
        }
        for argument in self.arguments(member)? {
            field = field.argument(argument);
        }
        Ok(field)
    }

    fn arguments(&self, member: &PlannedMember) -> Result<Vec<InputValue>> {
        member
            .arguments
            .iter()
            .map(|spec| {
                let mut input = InputValue::new(&spec.name, type_ref(&spec.value_type, !spec.nullable));
                if let Some(description) = &spec.description {
                    input = input.description(description);
                }
                if let Some(raw) = &spec.default_value {
                    input = input.default_value(default_value(self.plan, &member.id, spec, raw)?);
                }
                Ok(input)
            })
            .collect()
    }
}
