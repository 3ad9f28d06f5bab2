use crate::complexity::DEFAULT_MULTIPLIER;
use graphmark_config::Settings;

/// Relay conventions applied while rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayConfig {
    /// Register `Node` and `PageInfo` and render paged lists as connections.
    /// The mutation root, if any, follows the Relay input/payload shape.
    pub enabled: bool,
    /// Only types that list `Node` among their interfaces implement it.
    pub explicit_node_scan: bool,
}

/// Schema rendering configuration
#[derive(Debug, Clone)]
pub struct SchemaConfig {
    /// Name of the query root object
    pub query_root: String,

    /// Name of the mutation root object, if any
    pub mutation_root: Option<String>,

    /// Enable introspection queries
    pub enable_introspection: bool,

    /// Maximum query depth (0 = unlimited)
    pub max_depth: usize,

    /// Maximum query complexity (0 = unlimited)
    pub max_complexity: usize,

    /// Complexity weight of members that declare none
    pub default_multiplier: u32,

    pub relay: RelayConfig,
}

impl SchemaConfig {
    /// Create a configuration with defaults
    ///
    /// # Example
    ///
    /// ```
    /// use graphmark_schema::SchemaConfig;
    ///
    /// let config = SchemaConfig::new("Query");
    /// assert_eq!(config.query_root, "Query");
    /// assert!(config.enable_introspection);
    /// assert!(!config.relay.enabled);
    /// ```
    pub fn new(query_root: impl Into<String>) -> Self {
        Self {
            query_root: query_root.into(),
            mutation_root: None,
            enable_introspection: true,
            max_depth: 0,
            max_complexity: 0,
            default_multiplier: DEFAULT_MULTIPLIER,
            relay: RelayConfig::default(),
        }
    }

    /// Create a production configuration (introspection off, bounded queries)
    ///
    /// # Example
    ///
    /// ```
    /// use graphmark_schema::SchemaConfig;
    ///
    /// let config = SchemaConfig::production("Query");
    /// assert!(!config.enable_introspection);
    /// assert_eq!(config.max_depth, 16);
    /// ```
    pub fn production(query_root: impl Into<String>) -> Self {
        let mut config = Self::new(query_root);
        config.enable_introspection = false;
        config.max_depth = 16;
        config.max_complexity = 1000;
        config
    }

    /// Create a development configuration (everything open)
    pub fn development(query_root: impl Into<String>) -> Self {
        let mut config = Self::new(query_root);
        config.enable_introspection = true;
        config.max_depth = 0;
        config.max_complexity = 0;
        config
    }

    /// Translate environment settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            query_root: settings.query_root.clone(),
            mutation_root: settings.mutation_root.clone(),
            enable_introspection: settings.introspection,
            max_depth: settings.max_depth.unwrap_or(0),
            max_complexity: settings.max_complexity.unwrap_or(0),
            default_multiplier: settings.complexity_multiplier.unwrap_or(DEFAULT_MULTIPLIER),
            relay: RelayConfig {
                enabled: settings.relay,
                explicit_node_scan: settings.explicit_node_scan,
            },
        }
    }

    pub fn with_mutation_root(mut self, name: impl Into<String>) -> Self {
        self.mutation_root = Some(name.into());
        self
    }

    pub fn with_introspection(mut self, enable: bool) -> Self {
        self.enable_introspection = enable;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_max_complexity(mut self, complexity: usize) -> Self {
        self.max_complexity = complexity;
        self
    }

    pub fn with_default_multiplier(mut self, multiplier: u32) -> Self {
        self.default_multiplier = multiplier;
        self
    }

    pub fn with_relay(mut self, enable: bool) -> Self {
        self.relay.enabled = enable;
        self
    }

    pub fn with_explicit_node_scan(mut self, enable: bool) -> Self {
        self.relay.explicit_node_scan = enable;
        self
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self::new("Query")
    }
}
