// GraphQL schema rendering for graphmark metadata

pub mod complexity;
pub mod config;
pub mod error;
pub mod factory;
pub mod relay;
pub mod resolver;
pub mod schema_builder;
pub mod types;

pub use async_graphql;
pub use async_graphql::{Request, Response, Variables};

pub use complexity::{ComplexityScorer, DEFAULT_MULTIPLIER};
pub use config::{RelayConfig, SchemaConfig};
pub use error::{Result, SchemaError};
pub use relay::{CLIENT_MUTATION_ID, MutationShapes, PagingMode};
pub use resolver::RootValue;
pub use schema_builder::{GraphSchema, SchemaBuilder};
pub use types::EXTENDED_SCALARS;
