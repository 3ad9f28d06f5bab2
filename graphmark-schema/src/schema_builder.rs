// Registry to schema

use crate::complexity::ComplexityScorer;
use crate::config::SchemaConfig;
use crate::factory::TypeFactory;
use crate::relay::{self, MutationShapes};
use crate::resolver::RootValue;
use crate::types::{OutputKind, scalars};
use crate::{Result, SchemaError};
use async_graphql::dynamic::Schema;
use async_graphql::{Request, Response, ServerError};
use graphmark_config::{Manifest, Settings};
use graphmark_core::{
    ArgumentSpec, FragmentProviderRegistry, MetadataRegistry, QueryFragmentProvider, Reflect, SchemaPlan, SiteId,
    TypeDescriptor, TypeShape, ValueType,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Collects metadata and fragment providers, then renders a [`GraphSchema`].
///
/// # Example
///
/// ```
/// use graphmark_core::{TypeDescriptor, ValueType};
/// use graphmark_schema::{SchemaBuilder, SchemaConfig};
///
/// let schema = SchemaBuilder::new(SchemaConfig::default())
///     .register_type(TypeDescriptor::object("Query").field("hello", ValueType::String))
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert!(schema.sdl().contains("hello: String"));
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    config: SchemaConfig,
    registry: MetadataRegistry,
    providers: FragmentProviderRegistry,
}

impl SchemaBuilder {
    pub fn new(config: SchemaConfig) -> Self {
        Self {
            config,
            registry: MetadataRegistry::new(),
            providers: FragmentProviderRegistry::new(),
        }
    }

    /// Configure from settings and load the manifest they name, if any.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let builder = Self::new(SchemaConfig::from_settings(settings));
        match settings.load_manifest()? {
            Some(manifest) => builder.with_manifest(manifest),
            None => Ok(builder),
        }
    }

    pub fn register<T: Reflect>(mut self) -> Result<Self> {
        self.registry.register::<T>()?;
        Ok(self)
    }

    pub fn register_type(mut self, descriptor: TypeDescriptor) -> Result<Self> {
        self.registry.register_type(descriptor)?;
        Ok(self)
    }

    pub fn with_registry(mut self, registry: MetadataRegistry) -> Result<Self> {
        self.registry.extend(registry)?;
        Ok(self)
    }

    pub fn with_manifest(mut self, manifest: Manifest) -> Result<Self> {
        manifest.register_into(&mut self.registry)?;
        Ok(self)
    }

    pub fn with_provider(mut self, name: impl Into<String>, provider: impl QueryFragmentProvider + 'static) -> Self {
        self.providers.register(name, provider);
        self
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    pub fn registry(&self) -> &MetadataRegistry {
        &self.registry
    }

    /// Reflect the registry and render the schema.
    pub fn build(self) -> Result<GraphSchema> {
        let plan = SchemaPlan::reflect(&self.registry, &self.providers)?;
        let config = &self.config;

        if !is_object(&plan, &config.query_root) {
            return Err(SchemaError::MissingQueryRoot(config.query_root.clone()));
        }
        if let Some(mutation_root) = &config.mutation_root {
            if !is_object(&plan, mutation_root) {
                return Err(SchemaError::MissingMutationRoot(mutation_root.clone()));
            }
        }

        let mutations = MutationShapes::of(&plan, config)?;
        let mut builder = Schema::build(&config.query_root, config.mutation_root.as_deref(), None);
        let factory = TypeFactory::new(&plan, config, &mutations);

        for ty in plan.types() {
            builder = match &ty.shape {
                TypeShape::Object => builder.register(factory.object(ty)?),
                TypeShape::Interface => builder.register(factory.interface(ty)?),
                TypeShape::Input => builder.register(factory.input(ty)),
                TypeShape::Enum(values) => builder.register(factory.enumeration(ty, values)),
            };
        }

        for scalar in scalars(&plan) {
            builder = builder.register(scalar);
        }

        let mut relay_types = 0;
        if config.relay.enabled {
            for generated in [relay::NODE, relay::PAGE_INFO] {
                if plan.get(generated).is_some() {
                    return Err(SchemaError::TypeCollision(generated.to_string()));
                }
            }
            builder = builder.register(relay::node_interface()).register(relay::page_info());

            for node in connection_nodes(&plan) {
                for name in [relay::connection_name(&node), relay::edge_name(&node)] {
                    if plan.get(&name).is_some() {
                        return Err(SchemaError::TypeCollision(name));
                    }
                }
                for object in relay::connection_types(&node, OutputKind::of(&plan, &node)) {
                    builder = builder.register(object);
                }
                relay_types += 2;
            }
        }

        if config.max_depth > 0 {
            builder = builder.limit_depth(config.max_depth);
        }
        if !config.enable_introspection {
            builder = builder.disable_introspection();
        }

        let schema = builder.finish().map_err(|e| SchemaError::Build(e.to_string()))?;

        graphmark_log::info!(
            target: "graphmark::schema",
            "built schema: {} types, {} connection types, {} relay mutations, query root {}",
            plan.types().len(),
            relay_types,
            mutations.payloads.len(),
            config.query_root
        );

        Ok(GraphSchema {
            schema: Arc::new(schema),
            plan: Arc::new(plan),
            config: Arc::new(self.config),
        })
    }
}

fn is_object(plan: &SchemaPlan, name: &str) -> bool {
    plan.get(name).is_some_and(|ty| ty.shape == TypeShape::Object)
}

/// Distinct node types of every forward-paged list member.
fn connection_nodes(plan: &SchemaPlan) -> Vec<ValueType> {
    let mut nodes = BTreeMap::new();
    for member in plan.types().iter().flat_map(|t| &t.members) {
        if let (true, ValueType::List(node)) = (member.forward_paging, &member.value_type) {
            nodes.entry(node.type_name().to_string()).or_insert_with(|| (**node).clone());
        }
    }
    nodes.into_values().collect()
}

/// A rendered schema together with the plan it was built from.
#[derive(Clone)]
pub struct GraphSchema {
    schema: Arc<Schema>,
    plan: Arc<SchemaPlan>,
    config: Arc<SchemaConfig>,
}

impl fmt::Debug for GraphSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<&str> = self.plan.types().iter().map(|t| t.name.as_str()).collect();
        f.debug_struct("GraphSchema").field("types", &types).finish_non_exhaustive()
    }
}

impl GraphSchema {
    pub fn schema(&self) -> Arc<Schema> {
        self.schema.clone()
    }

    pub fn plan(&self) -> &SchemaPlan {
        &self.plan
    }

    /// Schema definition language of the rendered schema.
    pub fn sdl(&self) -> String {
        self.schema.sdl()
    }

    /// The argument-binding entry for a site.
    pub fn arguments(&self, id: &SiteId) -> Option<&[ArgumentSpec]> {
        self.plan.arguments(id)
    }

    /// Every binding, keyed by site.
    pub fn bindings(&self) -> BTreeMap<SiteId, &[ArgumentSpec]> {
        self.plan
            .types()
            .iter()
            .flat_map(|t| &t.members)
            .filter(|m| !m.arguments.is_empty())
            .map(|m| (m.id.clone(), m.arguments.as_slice()))
            .collect()
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Complexity score of `request`; `None` when it cannot be scored.
    pub fn complexity(&self, request: &Request) -> Option<u64> {
        ComplexityScorer::new(&self.plan, &self.config).score(
            &request.query,
            request.operation_name.as_deref(),
            &request.variables,
        )
    }

    /// An error response when `request` scores over `max_complexity`.
    fn reject_complex(&self, request: &Request) -> Option<Response> {
        let limit = self.config.max_complexity as u64;
        if limit == 0 {
            return None;
        }
        let score = self.complexity(request)?;
        if score <= limit {
            return None;
        }

        graphmark_log::warn!(
            target: "graphmark::schema",
            "rejected query with complexity {} over the limit of {}",
            score,
            limit
        );
        Some(Response::from_errors(vec![ServerError::new(
            format!("Query is too complex: score {} exceeds the limit of {}", score, limit),
            None,
        )]))
    }

    /// Execute a request with no root data.
    pub async fn execute(&self, request: impl Into<Request>) -> Response {
        let request: Request = request.into();
        if let Some(rejected) = self.reject_complex(&request) {
            return rejected;
        }
        self.schema.execute(request).await
    }

    /// Execute a request whose root fields project from `root`.
    pub async fn execute_with_root(&self, request: impl Into<Request>, root: serde_json::Value) -> Response {
        let request: Request = request.into();
        if let Some(rejected) = self.reject_complex(&request) {
            return rejected;
        }
        match RootValue::from_json(root) {
            Ok(root) => self.schema.execute(request.data(root)).await,
            Err(e) => Response::from_errors(vec![e.into_server_error(Default::default())]),
        }
    }
}
