// Declarative manifest: the file form of declaration-site metadata

use crate::{ConfigError, Result};
use graphmark_core::{
    ArgumentGroup, DeclarationSite, Markers, MetadataRegistry, SiteKind, TypeDescriptor, TypeShape, ValueType,
    is_valid_name,
};
use serde::{Deserialize, Serialize};

/// Top-level manifest document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub types: Vec<TypeManifest>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeManifest {
    #[default]
    Object,
    Input,
    Interface,
    Enum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeManifest {
    pub name: String,
    #[serde(default)]
    pub shape: ShapeManifest,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Enum values, only read for `shape = "enum"`.
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub sites: Vec<SiteManifest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteManifest {
    pub member: String,
    #[serde(default)]
    pub kind: SiteKind,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default)]
    pub non_null: bool,
    #[serde(default)]
    pub ignore: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deprecation: Option<String>,
    #[serde(default)]
    pub forward_paging: bool,
    /// Complexity weight; `0` leaves the member out of the score.
    #[serde(default)]
    pub complexity: Option<u32>,
    #[serde(default)]
    pub arguments: ArgumentGroup,
}

impl Manifest {
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::DeserializationError(e.to_string()))
    }

    /// Register every type of this manifest.
    pub fn register_into(self, registry: &mut MetadataRegistry) -> Result<()> {
        for ty in self.types {
            registry.register_type(ty.into_descriptor()?)?;
        }
        Ok(())
    }

    pub fn into_registry(self) -> Result<MetadataRegistry> {
        let mut registry = MetadataRegistry::new();
        self.register_into(&mut registry)?;
        Ok(registry)
    }
}

impl TypeManifest {
    pub fn into_descriptor(self) -> Result<TypeDescriptor> {
        if !is_valid_name(&self.name) {
            return Err(ConfigError::ValidationError(format!(
                "`{}` is not a valid GraphQL type name",
                self.name
            )));
        }

        if self.shape != ShapeManifest::Enum && !self.values.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "only enums take `values`; `{}` is not an enum",
                self.name
            )));
        }

        let shape = match self.shape {
            ShapeManifest::Object => TypeShape::Object,
            ShapeManifest::Input => TypeShape::Input,
            ShapeManifest::Interface => TypeShape::Interface,
            ShapeManifest::Enum => {
                if !self.sites.is_empty() {
                    return Err(ConfigError::ValidationError(format!(
                        "enum `{}` cannot declare sites",
                        self.name
                    )));
                }
                if let Some(bad) = self.values.iter().find(|v| !is_valid_name(v)) {
                    return Err(ConfigError::ValidationError(format!(
                        "`{}` is not a valid value of enum `{}`",
                        bad, self.name
                    )));
                }
                TypeShape::Enum(self.values)
            }
        };

        let mut descriptor = TypeDescriptor::new(self.name, shape);
        descriptor.description = self.description;
        descriptor.interfaces = self.interfaces;

        for site in self.sites {
            let built = site.into_site(&descriptor.name);
            descriptor = descriptor.site(built);
        }
        Ok(descriptor)
    }
}

impl SiteManifest {
    fn into_site(self, type_name: &str) -> DeclarationSite {
        let mut site = DeclarationSite::new(type_name, &self.member, self.kind, self.value_type)
            .with_markers(Markers {
                ignore: self.ignore,
                non_null: self.non_null,
            })
            .arguments(self.arguments);
        site.description = self.description;
        site.deprecation = self.deprecation;
        site.forward_paging = self.forward_paging;
        site.complexity = self.complexity;
        site
    }
}
