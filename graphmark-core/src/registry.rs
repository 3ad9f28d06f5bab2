// Registration table for declaration-site metadata

use crate::descriptor::{Reflect, TypeDescriptor};
use crate::error::{MetadataError, Result};
use crate::site::{DeclarationSite, SiteId};
use std::collections::{BTreeMap, HashSet};

/// All registered types, keyed by GraphQL type name.
///
/// Iteration is alphabetical so every reflection pass over the same
/// registrations yields the same schema.
#[derive(Debug, Clone, Default)]
pub struct MetadataRegistry {
    types: BTreeMap<String, TypeDescriptor>,
}

impl MetadataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type by hand.
    pub fn register_type(&mut self, descriptor: TypeDescriptor) -> Result<()> {
        if self.types.contains_key(&descriptor.name) {
            return Err(MetadataError::DuplicateType(descriptor.name));
        }

        let mut seen = HashSet::new();
        for site in &descriptor.sites {
            if !seen.insert((site.id.member.as_str(), site.kind)) {
                return Err(MetadataError::DuplicateSite(site.id.clone()));
            }
        }

        graphmark_log::debug!(
            "registered type {} with {} declaration sites",
            descriptor.name,
            descriptor.sites.len()
        );
        self.types.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Register a type that describes itself.
    pub fn register<T: Reflect>(&mut self) -> Result<()> {
        self.register_type(T::type_descriptor())
    }

    /// Move every type of `other` into this registry.
    pub fn extend(&mut self, other: MetadataRegistry) -> Result<()> {
        for (_, descriptor) in other.types {
            self.register_type(descriptor)?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Every site registered under `id`; a field and its accessor share one id.
    pub fn site(&self, id: &SiteId) -> Vec<&DeclarationSite> {
        self.types
            .get(&id.type_name)
            .map(|descriptor| descriptor.sites.iter().filter(|site| &site.id == id).collect())
            .unwrap_or_default()
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::SiteKind;
    use crate::value_type::ValueType;

    struct Clip;

    impl Reflect for Clip {
        fn type_descriptor() -> TypeDescriptor {
            TypeDescriptor::object("Clip").field("id", ValueType::Id)
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = MetadataRegistry::new();
        registry.register::<Clip>().unwrap();
        assert!(registry.contains("Clip"));
        assert_eq!(registry.site(&SiteId::new("Clip", "id")).len(), 1);
        assert!(registry.site(&SiteId::new("Clip", "nope")).is_empty());
        assert!(registry.site(&SiteId::new("Nope", "id")).is_empty());
    }

    #[test]
    fn test_duplicate_type_is_rejected() {
        let mut registry = MetadataRegistry::new();
        registry.register::<Clip>().unwrap();
        assert_eq!(
            registry.register::<Clip>(),
            Err(MetadataError::DuplicateType("Clip".to_string()))
        );
    }

    #[test]
    fn test_field_and_accessor_may_share_a_member() {
        let descriptor = TypeDescriptor::object("Video")
            .field("title", ValueType::String)
            .site(DeclarationSite::method("Video", "getTitle", ValueType::String));
        let mut registry = MetadataRegistry::new();
        registry.register_type(descriptor).unwrap();

        let sites = registry.site(&SiteId::new("Video", "title"));
        let kinds: Vec<_> = sites.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, [SiteKind::Field, SiteKind::Method]);
    }

    #[test]
    fn test_duplicate_site_of_same_kind_is_rejected() {
        let descriptor = TypeDescriptor::object("Video")
            .field("title", ValueType::String)
            .field("title", ValueType::String);
        let mut registry = MetadataRegistry::new();
        assert_eq!(
            registry.register_type(descriptor),
            Err(MetadataError::DuplicateSite(SiteId::new("Video", "title")))
        );
    }

    #[test]
    fn test_types_iterate_alphabetically() {
        let mut registry = MetadataRegistry::new();
        registry.register_type(TypeDescriptor::object("Zebra")).unwrap();
        registry.register_type(TypeDescriptor::object("Apple")).unwrap();
        let names: Vec<_> = registry.types().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Apple", "Zebra"]);
    }

    #[test]
    fn test_extend_detects_collisions() {
        let mut first = MetadataRegistry::new();
        first.register::<Clip>().unwrap();
        let mut second = MetadataRegistry::new();
        second.register::<Clip>().unwrap();
        assert!(first.extend(second).is_err());
    }
}
