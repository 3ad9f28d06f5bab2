// Error types raised while reading declaration-site metadata

use crate::site::SiteId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("Duplicate argument name `{name}` on {site}")]
    DuplicateArgumentName { site: SiteId, name: String },

    #[error("Argument `{argument}` on {site} is QUERY_CUSTOM but names no fragment provider")]
    MissingFragmentProvider { site: SiteId, argument: String },

    #[error("Argument `{argument}` on {site} references unknown fragment provider `{provider}`")]
    UnresolvableProviderReference {
        site: SiteId,
        argument: String,
        provider: String,
    },

    #[error("Invalid argument name `{name}` on {site}")]
    InvalidArgumentName { site: SiteId, name: String },

    #[error("Invalid value type `{0}`")]
    InvalidValueType(String),

    #[error("Unknown argument kind `{0}`")]
    UnknownArgumentKind(String),

    #[error("Type `{0}` is already registered")]
    DuplicateType(String),

    #[error("Declaration site {0} is already registered with the same kind")]
    DuplicateSite(SiteId),

    #[error("Conflicting markers on {site}: {reason}")]
    ConflictingMarkers { site: SiteId, reason: String },

    #[error("Default value `{value}` of argument `{argument}` on {site} is not a valid {expected}")]
    InvalidDefaultValue {
        site: SiteId,
        argument: String,
        value: String,
        expected: String,
    },

    #[error("Unknown type `{0}`")]
    UnknownType(String),
}

pub type Result<T> = std::result::Result<T, MetadataError>;
