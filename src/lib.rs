// graphmark - declaration-site GraphQL argument metadata
//
// Types describe, per field or accessor, which GraphQL arguments they accept,
// whether they are hidden, and whether their output is non-null. The schema
// builder reflects that metadata into an async-graphql dynamic schema.

// Re-export core functionality
pub use graphmark_core::*;

// Re-export schema rendering
pub use graphmark_schema::{
    CLIENT_MUTATION_ID, ComplexityScorer, GraphSchema, PagingMode, RelayConfig, RootValue, SchemaBuilder, SchemaConfig,
    SchemaError, async_graphql,
};

// Re-export the logging crate for its configuration API
pub use graphmark_log as log;

// Re-export procedural macros
#[cfg(feature = "macros")]
pub use graphmark_macro::Reflect;

// Re-export optional crates
#[cfg(feature = "config")]
pub use graphmark_config;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ArgumentDescriptor, ArgumentKind, DeclarationSite, FragmentProviderRegistry, GraphSchema, MetadataRegistry,
        QueryFragmentProvider, Reflect, RelayConfig, SchemaBuilder, SchemaConfig, SiteId, TypeDescriptor, ValueType,
    };

    #[cfg(feature = "config")]
    pub use graphmark_config::{Manifest, Settings};
}
