// Error types for schema rendering

use graphmark_config::ConfigError;
use graphmark_core::{MetadataError, SiteId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid metadata: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Query root `{0}` is not a registered object type")]
    MissingQueryRoot(String),

    #[error("Mutation root `{0}` is not a registered object type")]
    MissingMutationRoot(String),

    #[error("Generated type `{0}` collides with a registered type")]
    TypeCollision(String),

    #[error("Relay mutation {site} {reason}")]
    InvalidRelayMutation { site: SiteId, reason: String },

    #[error("Failed to build schema: {0}")]
    Build(String),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
