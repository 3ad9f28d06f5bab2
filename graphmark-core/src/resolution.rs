// Argument descriptor resolution
//
// Turns the argument groups declared on a member's sites into the ordered,
// validated argument list the schema renders.

use crate::argument::ArgumentDescriptor;
use crate::error::{MetadataError, Result};
use crate::kind::ArgumentKind;
use crate::naming::is_valid_name;
use crate::provider::{FragmentProviderRegistry, QueryFragmentProvider};
use crate::site::{DeclarationSite, SiteId};
use crate::value_type::ValueType;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Name of the page size argument added to forward-paged members.
pub const PAGING_FIRST: &str = "first";
/// Name of the cursor argument added to forward-paged members.
pub const PAGING_AFTER: &str = "after";

/// A fully resolved argument, ready to be rendered.
#[derive(Clone)]
pub struct ArgumentSpec {
    pub name: String,
    pub value_type: ValueType,
    pub kind: ArgumentKind,
    pub nullable: bool,
    /// `None` when the descriptor carried the "no default" sentinel.
    pub default_value: Option<String>,
    pub description: Option<String>,
    pub provider_name: Option<String>,
    pub provider: Option<Arc<dyn QueryFragmentProvider>>,
}

impl ArgumentSpec {
    fn paging(name: &str, value_type: ValueType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            kind: ArgumentKind::Query,
            nullable: true,
            default_value: None,
            description: Some(description.to_string()),
            provider_name: None,
            provider: None,
        }
    }

    /// Build the query fragment for `value`, if this argument has a provider.
    pub fn fragment(&self, value: &serde_json::Value) -> Option<String> {
        self.provider
            .as_ref()
            .map(|provider| provider.fragment(&self.name, value))
    }
}

impl fmt::Debug for ArgumentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentSpec")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("kind", &self.kind)
            .field("nullable", &self.nullable)
            .field("default_value", &self.default_value)
            .field("description", &self.description)
            .field("provider_name", &self.provider_name)
            .finish()
    }
}

impl PartialEq for ArgumentSpec {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.value_type == other.value_type
            && self.kind == other.kind
            && self.nullable == other.nullable
            && self.default_value == other.default_value
            && self.description == other.description
            && self.provider_name == other.provider_name
    }
}

/// Resolve the arguments of one visible member.
///
/// `sites` are every site registered under `id`; `value_type` is the member's
/// merged output type. Callers must have dropped ignored members already.
pub fn resolve_arguments(
    id: &SiteId,
    sites: &[&DeclarationSite],
    value_type: &ValueType,
    providers: &FragmentProviderRegistry,
) -> Result<Vec<ArgumentSpec>> {
    let mut specs = Vec::new();
    let mut seen = HashSet::new();

    if forward_paging(id, sites)? {
        if value_type.is_list() {
            for spec in [
                ArgumentSpec::paging(PAGING_FIRST, ValueType::Int, "Number of items to return"),
                ArgumentSpec::paging(PAGING_AFTER, ValueType::String, "Cursor to start after"),
            ] {
                seen.insert(spec.name.clone());
                specs.push(spec);
            }
        } else {
            graphmark_log::warn!(
                target: "graphmark::resolution",
                "forward paging on {} ignored: {} is not a list",
                id,
                value_type
            );
        }
    }

    for descriptor in effective_descriptors(id, sites) {
        let spec = resolve_one(id, descriptor, providers)?;
        if !seen.insert(spec.name.clone()) {
            return Err(MetadataError::DuplicateArgumentName {
                site: id.clone(),
                name: spec.name,
            });
        }
        specs.push(spec);
    }

    Ok(specs)
}

/// Pick the descriptors that apply to a member.
///
/// When both a field and an accessor declare arguments the accessor's win.
fn effective_descriptors<'a>(id: &SiteId, sites: &[&'a DeclarationSite]) -> Vec<&'a ArgumentDescriptor> {
    let collect = |accessor: bool| -> Vec<&'a ArgumentDescriptor> {
        sites
            .iter()
            .copied()
            .filter(|site| site.kind.is_accessor() == accessor)
            .flat_map(|site: &'a DeclarationSite| site.arguments.iter())
            .collect()
    };

    let field = collect(false);
    let accessor = collect(true);

    if !field.is_empty() && !accessor.is_empty() {
        let ignored: Vec<String> = field.iter().map(|d| d.effective_name(&id.member)).collect();
        graphmark_log::warn!(
            target: "graphmark::resolution",
            "{} declares arguments on both field and accessor; ignoring field arguments [{}]",
            id,
            ignored.join(", ")
        );
        return accessor;
    }

    if accessor.is_empty() { field } else { accessor }
}

fn forward_paging(id: &SiteId, sites: &[&DeclarationSite]) -> Result<bool> {
    let on_field = sites.iter().any(|s| s.forward_paging && !s.kind.is_accessor());
    let on_accessor = sites.iter().any(|s| s.forward_paging && s.kind.is_accessor());

    if on_field && on_accessor {
        return Err(MetadataError::ConflictingMarkers {
            site: id.clone(),
            reason: "forward paging declared on both field and accessor".to_string(),
        });
    }
    Ok(on_field || on_accessor)
}

fn resolve_one(
    id: &SiteId,
    descriptor: &ArgumentDescriptor,
    providers: &FragmentProviderRegistry,
) -> Result<ArgumentSpec> {
    let name = descriptor.effective_name(&id.member);
    if !is_valid_name(&name) {
        return Err(MetadataError::InvalidArgumentName {
            site: id.clone(),
            name,
        });
    }

    let (provider_name, provider) = if descriptor.kind == ArgumentKind::QueryCustom {
        if descriptor.fragment_provider.is_empty() {
            return Err(MetadataError::MissingFragmentProvider {
                site: id.clone(),
                argument: name,
            });
        }
        let Some(provider) = providers.get(&descriptor.fragment_provider) else {
            return Err(MetadataError::UnresolvableProviderReference {
                site: id.clone(),
                argument: name,
                provider: descriptor.fragment_provider.clone(),
            });
        };
        (Some(descriptor.fragment_provider.clone()), Some(provider))
    } else {
        (None, None)
    };

    let default_value = descriptor.resolved_default().map(str::to_string);
    if let Some(value) = &default_value {
        check_scalar_default(id, &name, &descriptor.value_type, value)?;
    }

    Ok(ArgumentSpec {
        name,
        value_type: descriptor.value_type.clone(),
        kind: descriptor.kind,
        nullable: descriptor.nullable,
        default_value,
        description: descriptor.resolved_description().map(str::to_string),
        provider_name,
        provider,
    })
}

/// Numeric and boolean defaults must parse as their type.
fn check_scalar_default(id: &SiteId, argument: &str, value_type: &ValueType, value: &str) -> Result<()> {
    // List defaults are free-form
    if value_type.is_list() {
        return Ok(());
    }

    let valid = match value_type {
        ValueType::Int => value.trim().parse::<i32>().is_ok(),
        ValueType::Long => value.trim().parse::<i64>().is_ok(),
        ValueType::Float => value.trim().parse::<f64>().is_ok(),
        ValueType::Boolean => matches!(value.trim(), "true" | "false"),
        _ => true,
    };

    if valid {
        Ok(())
    } else {
        Err(MetadataError::InvalidDefaultValue {
            site: id.clone(),
            argument: argument.to_string(),
            value: value.to_string(),
            expected: value_type.to_string(),
        })
    }
}
