// The reflection pass: registry in, validated schema plan out

use crate::descriptor::{TypeDescriptor, TypeShape};
use crate::error::{MetadataError, Result};
use crate::nullability::Nullability;
use crate::provider::FragmentProviderRegistry;
use crate::registry::MetadataRegistry;
use crate::resolution::{ArgumentSpec, resolve_arguments};
use crate::site::{DeclarationSite, SiteId, SiteKind};
use crate::value_type::ValueType;
use crate::visibility::Visibility;
use std::collections::BTreeMap;

/// One visible member after all of its sites have been merged.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedMember {
    pub id: SiteId,
    pub value_type: ValueType,
    pub nullability: Nullability,
    pub arguments: Vec<ArgumentSpec>,
    pub description: Option<String>,
    pub deprecation: Option<String>,
    /// Set only for list members that asked for forward paging.
    pub forward_paging: bool,
    /// Complexity weight, accessor sites first.
    pub complexity: Option<u32>,
    /// Kinds of the sites the member was merged from.
    pub kinds: Vec<SiteKind>,
}

impl PlannedMember {
    pub fn name(&self) -> &str {
        &self.id.member
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedType {
    pub name: String,
    pub shape: TypeShape,
    pub description: Option<String>,
    pub interfaces: Vec<String>,
    /// Visible members, alphabetical.
    pub members: Vec<PlannedMember>,
}

impl PlannedType {
    pub fn member(&self, name: &str) -> Option<&PlannedMember> {
        self.members.iter().find(|m| m.name() == name)
    }
}

/// Everything the renderer needs, validated and in a stable order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaPlan {
    types: Vec<PlannedType>,
}

impl SchemaPlan {
    /// Walk every registered type and resolve its members.
    ///
    /// Fails on the first invalid descriptor.
    pub fn reflect(registry: &MetadataRegistry, providers: &FragmentProviderRegistry) -> Result<Self> {
        let types = registry
            .types()
            .map(|descriptor| plan_type(registry, descriptor, providers))
            .collect::<Result<Vec<_>>>()?;

        graphmark_log::debug!(
            target: "graphmark::reflect",
            "reflected {} types with {} members",
            types.len(),
            types.iter().map(|t| t.members.len()).sum::<usize>()
        );
        Ok(Self { types })
    }

    pub fn types(&self) -> &[PlannedType] {
        &self.types
    }

    pub fn get(&self, name: &str) -> Option<&PlannedType> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn member(&self, id: &SiteId) -> Option<&PlannedMember> {
        self.get(&id.type_name)?.member(&id.member)
    }

    /// The argument-binding entry for a site. `None` when the member is
    /// unknown or ignored.
    pub fn arguments(&self, id: &SiteId) -> Option<&[ArgumentSpec]> {
        self.member(id).map(|m| m.arguments.as_slice())
    }

    /// True when any visible member uses `value_type`'s base somewhere.
    pub fn uses_type(&self, name: &str) -> bool {
        self.types.iter().flat_map(|t| &t.members).any(|m| {
            m.value_type.type_name() == name
                || m.arguments.iter().any(|a| a.value_type.type_name() == name)
        })
    }
}

fn plan_type(
    registry: &MetadataRegistry,
    descriptor: &TypeDescriptor,
    providers: &FragmentProviderRegistry,
) -> Result<PlannedType> {
    let mut members = Vec::new();

    if !matches!(descriptor.shape, TypeShape::Enum(_)) {
        let mut grouped: BTreeMap<&str, Vec<&DeclarationSite>> = BTreeMap::new();
        for site in &descriptor.sites {
            grouped.entry(site.member()).or_default().push(site);
        }

        for (member, sites) in grouped {
            let id = SiteId::new(&descriptor.name, member);
            if !Visibility::of(&id, &sites).is_visible() {
                continue;
            }
            members.push(plan_member(registry, descriptor, id, &sites, providers)?);
        }
    }

    Ok(PlannedType {
        name: descriptor.name.clone(),
        shape: descriptor.shape.clone(),
        description: descriptor.description.clone(),
        interfaces: descriptor.interfaces.clone(),
        members,
    })
}

fn plan_member(
    registry: &MetadataRegistry,
    descriptor: &TypeDescriptor,
    id: SiteId,
    sites: &[&DeclarationSite],
    providers: &FragmentProviderRegistry,
) -> Result<PlannedMember> {
    let value_type = merged_type(&id, sites)?;
    check_known(registry, &value_type)?;

    if descriptor.shape == TypeShape::Input
        && sites.iter().any(|s| !s.arguments.is_empty() || s.forward_paging)
    {
        return Err(MetadataError::ConflictingMarkers {
            site: id,
            reason: "input fields cannot take arguments".to_string(),
        });
    }

    let mut arguments = resolve_arguments(&id, sites, &value_type, providers)?;
    for argument in &mut arguments {
        check_known(registry, &argument.value_type)?;
        drop_unknown_enum_default(registry, &id, argument);
    }

    // Accessor metadata is preferred over field metadata
    let preferred = |pick: fn(&DeclarationSite) -> Option<&String>| {
        sites
            .iter()
            .filter(|s| s.kind.is_accessor())
            .chain(sites.iter().filter(|s| !s.kind.is_accessor()))
            .find_map(|s| pick(s))
            .cloned()
    };

    Ok(PlannedMember {
        nullability: Nullability::of(sites),
        forward_paging: value_type.is_list() && sites.iter().any(|s| s.forward_paging),
        description: preferred(|s| s.description.as_ref()),
        deprecation: preferred(|s| s.deprecation.as_ref()),
        complexity: sites
            .iter()
            .filter(|s| s.kind.is_accessor())
            .chain(sites.iter().filter(|s| !s.kind.is_accessor()))
            .find_map(|s| s.complexity),
        kinds: sites.iter().map(|s| s.kind).collect(),
        arguments,
        value_type,
        id,
    })
}

fn merged_type(id: &SiteId, sites: &[&DeclarationSite]) -> Result<ValueType> {
    let first = &sites[0].value_type;
    if let Some(other) = sites.iter().map(|s| &s.value_type).find(|t| *t != first) {
        return Err(MetadataError::ConflictingMarkers {
            site: id.clone(),
            reason: format!("sites declare different types `{}` and `{}`", first, other),
        });
    }
    Ok(first.clone())
}

fn check_known(registry: &MetadataRegistry, value_type: &ValueType) -> Result<()> {
    match value_type.base() {
        ValueType::Named(name) if !registry.contains(name) => Err(MetadataError::UnknownType(name.clone())),
        _ => Ok(()),
    }
}

/// An enum default that is not one of the enum's values is dropped.
fn drop_unknown_enum_default(registry: &MetadataRegistry, id: &SiteId, argument: &mut ArgumentSpec) {
    if argument.value_type.is_list() {
        return;
    }
    let Some(values) = registry
        .get(argument.value_type.type_name())
        .and_then(TypeDescriptor::enum_values)
    else {
        return;
    };
    if let Some(default) = &argument.default_value {
        if !values.iter().any(|v| v == default) {
            graphmark_log::error!(
                target: "graphmark::reflect",
                "default `{}` of argument `{}` on {} is not a value of enum {}; dropping it",
                default,
                argument.name,
                id,
                argument.value_type
            );
            argument.default_value = None;
        }
    }
}
