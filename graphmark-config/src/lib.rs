// Manifest loading and environment settings for graphmark

pub mod env;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod settings;
pub mod validation;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{FileFormat, ManifestLoader};
pub use manifest::{Manifest, ShapeManifest, SiteManifest, TypeManifest};
pub use settings::{ENV_PREFIX, Settings};
pub use validation::{ConfigValidator, Validate};

use graphmark_core::MetadataRegistry;
use std::path::Path;

/// Load a manifest file (format from its extension) into a fresh registry.
pub fn load_registry(path: impl AsRef<Path>) -> Result<MetadataRegistry> {
    let path = path.as_ref();
    ManifestLoader::auto(path)?.load_file(path)?.into_registry()
}
