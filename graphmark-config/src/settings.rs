// Builder settings read from the environment

use crate::loader::ManifestLoader;
use crate::manifest::Manifest;
use crate::validation::{ConfigValidator, Validate};
use crate::{ConfigError, EnvLoader, Result};
use serde::{Deserialize, Serialize};

/// Prefix of every settings variable (`GRAPHMARK_QUERY_ROOT`, ...).
pub const ENV_PREFIX: &str = "GRAPHMARK";

/// Settings for building a schema.
///
/// | variable | field |
/// |----------|-------|
/// | `GRAPHMARK_QUERY_ROOT` | `query_root` |
/// | `GRAPHMARK_MUTATION_ROOT` | `mutation_root` |
/// | `GRAPHMARK_INTROSPECTION` | `introspection` |
/// | `GRAPHMARK_MAX_DEPTH` | `max_depth` |
/// | `GRAPHMARK_MAX_COMPLEXITY` | `max_complexity` |
/// | `GRAPHMARK_COMPLEXITY_MULTIPLIER` | `complexity_multiplier` |
/// | `GRAPHMARK_RELAY` | `relay` |
/// | `GRAPHMARK_EXPLICIT_NODE_SCAN` | `explicit_node_scan` |
/// | `GRAPHMARK_MANIFEST` | `manifest` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub query_root: String,
    pub mutation_root: Option<String>,
    pub introspection: bool,
    pub max_depth: Option<usize>,
    pub max_complexity: Option<usize>,
    /// Weight of members that declare no complexity of their own.
    pub complexity_multiplier: Option<u32>,
    pub relay: bool,
    pub explicit_node_scan: bool,
    /// Path of a manifest to load at startup.
    pub manifest: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            query_root: "Query".to_string(),
            mutation_root: None,
            introspection: true,
            max_depth: None,
            max_complexity: None,
            complexity_multiplier: None,
            relay: false,
            explicit_node_scan: false,
            manifest: None,
        }
    }
}

impl Settings {
    /// Defaults overridden by `GRAPHMARK_*` variables, then validated.
    pub fn from_env() -> Result<Self> {
        Self::from_loader(&EnvLoader::with_prefix(ENV_PREFIX))
    }

    /// Load a `.env` file first. Without a path a missing `.env` is fine.
    pub fn from_dotenv(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        Self::from_env()
    }

    pub fn from_loader(loader: &EnvLoader) -> Result<Self> {
        let defaults = Self::default();
        let settings = Self {
            query_root: loader.load_parsed("QUERY_ROOT")?.unwrap_or(defaults.query_root),
            mutation_root: loader.load_parsed("MUTATION_ROOT")?,
            introspection: loader.load_flag("INTROSPECTION")?.unwrap_or(defaults.introspection),
            max_depth: loader.load_parsed("MAX_DEPTH")?,
            max_complexity: loader.load_parsed("MAX_COMPLEXITY")?,
            complexity_multiplier: loader.load_parsed("COMPLEXITY_MULTIPLIER")?,
            relay: loader.load_flag("RELAY")?.unwrap_or(defaults.relay),
            explicit_node_scan: loader
                .load_flag("EXPLICIT_NODE_SCAN")?
                .unwrap_or(defaults.explicit_node_scan),
            manifest: loader.load_parsed("MANIFEST")?,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// The manifest named by `manifest`, if any.
    pub fn load_manifest(&self) -> Result<Option<Manifest>> {
        match &self.manifest {
            Some(path) => ManifestLoader::auto(path)?.load_file(path).map(Some),
            None => Ok(None),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        ConfigValidator::graphql_name(&self.query_root, "query_root")?;

        if let Some(mutation_root) = &self.mutation_root {
            ConfigValidator::graphql_name(mutation_root, "mutation_root")?;
            if mutation_root == &self.query_root {
                return Err(ConfigError::ValidationError(
                    "query_root and mutation_root must differ".to_string(),
                ));
            }
        }

        if let Some(depth) = self.max_depth {
            ConfigValidator::in_range(depth, 1, 1000, "max_depth")?;
        }
        if let Some(complexity) = self.max_complexity {
            ConfigValidator::in_range(complexity, 1, 1_000_000, "max_complexity")?;
        }
        if let Some(multiplier) = self.complexity_multiplier {
            ConfigValidator::in_range(multiplier, 1, 1000, "complexity_multiplier")?;
        }

        if self.explicit_node_scan && !self.relay {
            graphmark_log::warn!(
                target: "graphmark::config",
                "explicit_node_scan has no effect without relay"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.query_root, "Query");
        assert!(settings.introspection);
        assert!(!settings.relay);
    }

    #[test]
    fn test_validation_failures() {
        let same_roots = Settings {
            mutation_root: Some("Query".to_string()),
            ..Settings::default()
        };
        assert!(same_roots.validate().is_err());

        let zero_depth = Settings {
            max_depth: Some(0),
            ..Settings::default()
        };
        assert!(zero_depth.validate().is_err());

        let bad_root = Settings {
            query_root: "1Query".to_string(),
            ..Settings::default()
        };
        assert!(bad_root.validate().is_err());

        let zero_multiplier = Settings {
            complexity_multiplier: Some(0),
            ..Settings::default()
        };
        assert!(zero_multiplier.validate().is_err());
    }

    #[test]
    fn test_from_loader() {
        unsafe {
            std::env::set_var("GRAPHMARK_SETTINGS_UNIT_QUERY_ROOT", "Root");
            std::env::set_var("GRAPHMARK_SETTINGS_UNIT_RELAY", "true");
            std::env::set_var("GRAPHMARK_SETTINGS_UNIT_MAX_DEPTH", "8");
            std::env::set_var("GRAPHMARK_SETTINGS_UNIT_COMPLEXITY_MULTIPLIER", "4");
        }

        let settings = Settings::from_loader(&EnvLoader::with_prefix("GRAPHMARK_SETTINGS_UNIT")).unwrap();
        assert_eq!(settings.query_root, "Root");
        assert!(settings.relay);
        assert_eq!(settings.max_depth, Some(8));
        assert_eq!(settings.complexity_multiplier, Some(4));
        assert_eq!(settings.mutation_root, None);

        unsafe {
            std::env::remove_var("GRAPHMARK_SETTINGS_UNIT_QUERY_ROOT");
            std::env::remove_var("GRAPHMARK_SETTINGS_UNIT_RELAY");
            std::env::remove_var("GRAPHMARK_SETTINGS_UNIT_MAX_DEPTH");
            std::env::remove_var("GRAPHMARK_SETTINGS_UNIT_COMPLEXITY_MULTIPLIER");
        }
    }

    #[test]
    fn test_deserialize_partial() {
        let settings: Settings = serde_json::from_str(r#"{"relay": true}"#).unwrap();
        assert!(settings.relay);
        assert_eq!(settings.query_root, "Query");
    }

    #[test]
    fn test_no_manifest() {
        assert_eq!(Settings::default().load_manifest().unwrap(), None);
    }
}
