// Type-level descriptors and the Reflect trait

use crate::site::{DeclarationSite, SiteKind};
use crate::value_type::ValueType;

/// What a registered type renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    Object,
    Input,
    Interface,
    /// Enumeration with its values in declaration order.
    Enum(Vec<String>),
}

/// A registered domain type and the sites declared on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: String,
    pub shape: TypeShape,
    pub description: Option<String>,
    /// Interfaces this type declares it implements.
    pub interfaces: Vec<String>,
    pub sites: Vec<DeclarationSite>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            shape,
            description: None,
            interfaces: Vec::new(),
            sites: Vec::new(),
        }
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self::new(name, TypeShape::Object)
    }

    pub fn input(name: impl Into<String>) -> Self {
        Self::new(name, TypeShape::Input)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeShape::Interface)
    }

    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, TypeShape::Enum(values.into_iter().map(Into::into).collect()))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Attach a site. The site's type name is rewritten to this type's name.
    pub fn site(mut self, mut site: DeclarationSite) -> Self {
        site.id.type_name = self.name.clone();
        self.sites.push(site);
        self
    }

    /// Shorthand for a plain field site.
    pub fn field(self, member: impl AsRef<str>, value_type: ValueType) -> Self {
        let site = DeclarationSite::new(self.name.clone(), member, SiteKind::Field, value_type);
        self.site(site)
    }

    pub fn enum_values(&self) -> Option<&[String]> {
        match &self.shape {
            TypeShape::Enum(values) => Some(values),
            _ => None,
        }
    }
}

/// Types that can describe themselves to the registry.
///
/// Usually derived with `#[derive(Reflect)]`; hand-written impls are fine.
pub trait Reflect {
    fn type_descriptor() -> TypeDescriptor;
}
