// Declaration-site metadata for GraphQL schema generation
//
// Domain types describe, per field or accessor, which GraphQL arguments they
// accept, whether they are hidden, and whether their output is non-null. The
// reflection pass in `reflect` turns a registry of those descriptions into a
// validated plan that a schema renderer consumes.

pub mod argument;
pub mod descriptor;
pub mod error;
pub mod kind;
pub mod naming;
pub mod nullability;
pub mod provider;
pub mod reflect;
pub mod registry;
pub mod resolution;
pub mod site;
pub mod value_type;
pub mod visibility;

pub use argument::{ArgumentDescriptor, ArgumentGroup, NO_DEFAULT_VALUE};
pub use descriptor::{Reflect, TypeDescriptor, TypeShape};
pub use error::{MetadataError, Result};
pub use kind::ArgumentKind;
pub use naming::{compatible_type_name, is_valid_name, sanitize_member_name};
pub use nullability::Nullability;
pub use provider::{FragmentProviderRegistry, QueryFragmentProvider};
pub use reflect::{PlannedMember, PlannedType, SchemaPlan};
pub use registry::MetadataRegistry;
pub use resolution::{ArgumentSpec, PAGING_AFTER, PAGING_FIRST, resolve_arguments};
pub use site::{DeclarationSite, Markers, SiteId, SiteKind};
pub use value_type::ValueType;
pub use visibility::Visibility;
