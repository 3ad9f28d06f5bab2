// Query complexity scoring
//
// A selected member with a selection set adds its multiplier, times `first`
// when the selection passes one. Leaves and Relay connection plumbing add
// nothing. Top-level mutation members add nothing unless they declare a
// complexity.

use crate::config::SchemaConfig;
use async_graphql::parser::parse_query;
use async_graphql::parser::types::{
    ExecutableDocument, Field, OperationDefinition, OperationType, Selection, SelectionSet,
};
use async_graphql::{Name, Value, Variables};
use graphmark_core::{PAGING_FIRST, PlannedMember, SchemaPlan};

/// Weight of a member that declares no complexity.
pub const DEFAULT_MULTIPLIER: u32 = 10;

/// What a selection set is selected on.
#[derive(Debug, Clone, Copy)]
enum Scope<'a> {
    Type(&'a str),
    /// Generated connection over the named node type
    Connection(&'a str),
    /// Generated edge over the named node type
    Edge(&'a str),
    /// Nothing below scores
    Opaque,
}

/// Scores operations against one plan.
///
/// # Example
///
/// ```
/// use graphmark_core::{DeclarationSite, FragmentProviderRegistry, MetadataRegistry, SchemaPlan, TypeDescriptor, ValueType};
/// use graphmark_schema::complexity::ComplexityScorer;
/// use graphmark_schema::{SchemaConfig, Variables};
///
/// let mut registry = MetadataRegistry::new();
/// registry
///     .register_type(TypeDescriptor::object("Query").field("clips", ValueType::list_of(ValueType::named("Clip"))))
///     .unwrap();
/// registry.register_type(TypeDescriptor::object("Clip").field("id", ValueType::Id)).unwrap();
/// let plan = SchemaPlan::reflect(&registry, &FragmentProviderRegistry::new()).unwrap();
/// let config = SchemaConfig::default();
///
/// let scorer = ComplexityScorer::new(&plan, &config);
/// assert_eq!(scorer.score("{ clips { id } }", None, &Variables::default()), Some(10));
/// ```
pub struct ComplexityScorer<'a> {
    plan: &'a SchemaPlan,
    config: &'a SchemaConfig,
}

impl<'a> ComplexityScorer<'a> {
    pub fn new(plan: &'a SchemaPlan, config: &'a SchemaConfig) -> Self {
        Self { plan, config }
    }

    /// Score of the operation `operation_name` picks out of `query`.
    ///
    /// `None` when the query does not parse, names no known operation or is
    /// a subscription. Execution reports the first two.
    pub fn score(&self, query: &str, operation_name: Option<&str>, variables: &Variables) -> Option<u64> {
        let document = parse_query(query).ok()?;
        let operation = document
            .operations
            .iter()
            .find(|(name, _)| operation_name.is_none_or(|wanted| name.is_some_and(|n| n.as_str() == wanted)))
            .map(|(_, operation)| &operation.node)?;

        let root = match operation.ty {
            OperationType::Query => self.config.query_root.as_str(),
            OperationType::Mutation => self.config.mutation_root.as_deref()?,
            OperationType::Subscription => return None,
        };

        let mut walk = Walk {
            plan: self.plan,
            config: self.config,
            document: &document,
            operation,
            variables,
            expanding: Vec::new(),
        };
        let top_level_mutation = operation.ty == OperationType::Mutation;
        Some(walk.selection_set(&operation.selection_set.node, Scope::Type(root), top_level_mutation))
    }
}

struct Walk<'a> {
    plan: &'a SchemaPlan,
    config: &'a SchemaConfig,
    document: &'a ExecutableDocument,
    operation: &'a OperationDefinition,
    variables: &'a Variables,
    /// Fragments currently being expanded, to stop on cycles.
    expanding: Vec<&'a Name>,
}

impl<'a> Walk<'a> {
    fn selection_set(&mut self, set: &'a SelectionSet, scope: Scope<'a>, top_level_mutation: bool) -> u64 {
        let mut total = 0u64;
        for item in &set.items {
            let score = match &item.node {
                Selection::Field(field) => self.field(&field.node, scope, top_level_mutation),
                Selection::InlineFragment(fragment) => {
                    let condition = fragment.node.type_condition.as_ref().map(|c| c.node.on.node.as_str());
                    self.selection_set(&fragment.node.selection_set.node, narrow(scope, condition), top_level_mutation)
                }
                Selection::FragmentSpread(spread) => {
                    self.spread(&spread.node.fragment_name.node, scope, top_level_mutation)
                }
            };
            total = total.saturating_add(score);
        }
        total
    }

    fn spread(&mut self, name: &'a Name, scope: Scope<'a>, top_level_mutation: bool) -> u64 {
        if self.expanding.contains(&name) {
            return 0;
        }
        let Some(fragment) = self.document.fragments.get(name) else {
            return 0;
        };

        self.expanding.push(name);
        let condition = Some(fragment.node.type_condition.node.on.node.as_str());
        let score = self.selection_set(&fragment.node.selection_set.node, narrow(scope, condition), top_level_mutation);
        self.expanding.pop();
        score
    }

    fn field(&mut self, field: &'a Field, scope: Scope<'a>, top_level_mutation: bool) -> u64 {
        let children = &field.selection_set.node;
        if children.items.is_empty() {
            return 0;
        }

        let name = field.name.node.as_str();
        let (weight, inner) = match scope {
            Scope::Type(type_name) => match self.plan.get(type_name).and_then(|t| t.member(name)) {
                Some(member) => (self.weight(member, field, top_level_mutation), self.inner_scope(member)),
                None => (0, Scope::Opaque),
            },
            Scope::Connection(node) if name == "edges" => (0, Scope::Edge(node)),
            Scope::Edge(node) if name == "node" => (0, Scope::Type(node)),
            _ => (0, Scope::Opaque),
        };

        weight.saturating_add(self.selection_set(children, inner, false))
    }

    fn inner_scope(&self, member: &'a PlannedMember) -> Scope<'a> {
        let node = member.value_type.type_name();
        if member.forward_paging && self.config.relay.enabled {
            Scope::Connection(node)
        } else {
            Scope::Type(node)
        }
    }

    fn weight(&self, member: &PlannedMember, field: &Field, top_level_mutation: bool) -> u64 {
        let multiplier = match member.complexity {
            Some(multiplier) => multiplier,
            None if top_level_mutation => 0,
            None => self.config.default_multiplier,
        };
        u64::from(multiplier).saturating_mul(self.first(field))
    }

    /// The `first` argument, or 1 when it is absent or not positive.
    fn first(&self, field: &Field) -> u64 {
        let Some(value) = field.get_argument(PAGING_FIRST) else {
            return 1;
        };
        let resolved = value
            .node
            .clone()
            .into_const_with(|name| Ok::<_, ()>(self.variable(&name)));
        match resolved {
            Ok(Value::Number(n)) => n.as_u64().filter(|n| *n > 0).unwrap_or(1),
            _ => 1,
        }
    }

    fn variable(&self, name: &Name) -> Value {
        self.variables
            .get(name)
            .cloned()
            .or_else(|| {
                self.operation
                    .variable_definitions
                    .iter()
                    .find(|definition| definition.node.name.node == *name)
                    .and_then(|definition| definition.node.default_value().cloned())
            })
            .unwrap_or(Value::Null)
    }
}

/// Type conditions only narrow registered types.
fn narrow<'a>(scope: Scope<'a>, condition: Option<&'a str>) -> Scope<'a> {
    match (scope, condition) {
        (Scope::Type(_), Some(type_name)) => Scope::Type(type_name),
        _ => scope,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphmark_core::{
        ArgumentDescriptor, DeclarationSite, FragmentProviderRegistry, MetadataRegistry, TypeDescriptor, ValueType,
    };

    fn playlists() -> SchemaPlan {
        let list = |name: &str| ValueType::list_of(ValueType::named(name));
        let mut registry = MetadataRegistry::new();
        for ty in [
            TypeDescriptor::object("Query")
                .field("playLists", list("PlayList"))
                .site(DeclarationSite::field("Query", "charts", list("PlayList")).with_complexity(3))
                .site(DeclarationSite::field("Query", "archive", list("PlayList")).with_complexity(0)),
            TypeDescriptor::object("PlayList")
                .field("id", ValueType::Id)
                .site(DeclarationSite::field("PlayList", "tracks", list("Track")).forward_paging()),
            TypeDescriptor::object("Track")
                .field("trackId", ValueType::Id)
                .field("trackInfo", ValueType::named("TrackInfo")),
            TypeDescriptor::object("TrackInfo")
                .field("runtime", ValueType::Int)
                .site(DeclarationSite::field("TrackInfo", "authors", list("Author")).forward_paging()),
            TypeDescriptor::object("Author").field("authorName", ValueType::String),
            TypeDescriptor::input("RenameInput").field("name", ValueType::String),
            TypeDescriptor::object("Mutation")
                .site(
                    DeclarationSite::field("Mutation", "rename", ValueType::named("PlayList"))
                        .argument(ArgumentDescriptor::new("input", ValueType::named("RenameInput"))),
                )
                .site(
                    DeclarationSite::field("Mutation", "purge", ValueType::named("PlayList"))
                        .argument(ArgumentDescriptor::new("input", ValueType::named("RenameInput")))
                        .with_complexity(50),
                ),
        ] {
            registry.register_type(ty).unwrap();
        }
        SchemaPlan::reflect(&registry, &FragmentProviderRegistry::new()).unwrap()
    }

    fn score_with(config: &SchemaConfig, query: &str, variables: Variables) -> Option<u64> {
        let plan = playlists();
        ComplexityScorer::new(&plan, config).score(query, None, &variables)
    }

    fn score(query: &str) -> Option<u64> {
        score_with(&SchemaConfig::default(), query, Variables::default())
    }

    #[test]
    fn test_composite_members_score() {
        assert_eq!(score("{ playLists { id } }"), Some(10));
        assert_eq!(score("{ playLists { id tracks(first: 4) { trackId } } }"), Some(50));
        assert_eq!(
            score("{ playLists { id tracks(first: 4) { trackId trackInfo { runtime } } } }"),
            Some(60)
        );
        assert_eq!(
            score(
                "{ playLists { id tracks(first: 4) { trackId trackInfo { runtime authors(first: 2) { authorName } } } } }"
            ),
            Some(70)
        );
    }

    #[test]
    fn test_leaves_and_missing_first() {
        assert_eq!(score("{ __typename }"), Some(0));
        assert_eq!(score("{ playLists { tracks { trackId } } }"), Some(20));
        assert_eq!(score("{ playLists { tracks(first: 0) { trackId } } }"), Some(20));
    }

    #[test]
    fn test_declared_complexity() {
        assert_eq!(score("{ charts { id } }"), Some(3));
        assert_eq!(score("{ archive { tracks(first: 2) { trackId } } }"), Some(20));
    }

    #[test]
    fn test_default_multiplier() {
        let config = SchemaConfig::default().with_default_multiplier(1);
        assert_eq!(
            score_with(&config, "{ playLists { tracks(first: 4) { trackId } } }", Variables::default()),
            Some(5)
        );
    }

    #[test]
    fn test_variables_and_defaults() {
        let query = "query($n: Int = 3) { playLists { tracks(first: $n) { trackId } } }";
        assert_eq!(score(query), Some(40));

        let variables = Variables::from_json(serde_json::json!({"n": 5}));
        assert_eq!(score_with(&SchemaConfig::default(), query, variables), Some(60));
    }

    #[test]
    fn test_fragments() {
        let spread = "
            { playLists { ...Tracks } }
            fragment Tracks on PlayList { tracks(first: 2) { trackId } }
        ";
        assert_eq!(score(spread), Some(30));

        let inline = "{ playLists { ... on PlayList { tracks(first: 2) { trackId } } } }";
        assert_eq!(score(inline), Some(30));

        let cycle = "
            { playLists { ...A } }
            fragment A on PlayList { tracks(first: 1) { trackId } ...B }
            fragment B on PlayList { ...A }
        ";
        assert_eq!(score(cycle), Some(20));
    }

    #[test]
    fn test_connection_plumbing_is_free() {
        let config = SchemaConfig::default().with_relay(true);
        let query = "
            { playLists { tracks(first: 4) {
                edges { cursor node { trackInfo { runtime } } }
                pageInfo { hasNextPage }
            } } }
        ";
        assert_eq!(score_with(&config, query, Variables::default()), Some(60));
    }

    #[test]
    fn test_mutation_roots() {
        let config = SchemaConfig::default().with_mutation_root("Mutation");
        let rename = r#"mutation { rename(input: {name: "a"}) { tracks(first: 2) { trackId } } }"#;
        assert_eq!(score_with(&config, rename, Variables::default()), Some(20));

        let purge = r#"mutation { purge(input: {name: "a"}) { id } }"#;
        assert_eq!(score_with(&config, purge, Variables::default()), Some(50));

        assert_eq!(score(rename), None);
    }

    #[test]
    fn test_unscorable_queries() {
        assert_eq!(score("{ playLists { id "), None);

        let plan = playlists();
        let config = SchemaConfig::default();
        let named = "query A { playLists { id } } query B { charts { id } }";
        let scorer = ComplexityScorer::new(&plan, &config);
        assert_eq!(scorer.score(named, Some("B"), &Variables::default()), Some(3));
        assert_eq!(scorer.score(named, Some("C"), &Variables::default()), None);
    }
}
