//! Integration tests for graphmark-schema

use graphmark_core::*;
use graphmark_schema::*;
use serde_json::json;

fn catalog() -> MetadataRegistry {
    let mut registry = MetadataRegistry::new();
    registry
        .register_type(
            TypeDescriptor::object("Query")
                .site(
                    DeclarationSite::field("Query", "videos", ValueType::list_of(ValueType::named("Video")))
                        .forward_paging()
                        .argument(
                            ArgumentDescriptor::new("limit", ValueType::Int)
                                .with_kind(ArgumentKind::Query)
                                .with_default_value("10"),
                        ),
                )
                .field("featured", ValueType::named("Media"))
                .field("count", ValueType::Long),
        )
        .unwrap();
    registry
        .register_type(
            TypeDescriptor::object("Video")
                .implements("Media")
                .site(DeclarationSite::field("Video", "id", ValueType::Id).non_null())
                .field("name", ValueType::String)
                .site(
                    DeclarationSite::field("Video", "title", ValueType::String)
                        .non_null()
                        .argument(ArgumentDescriptor::synthesized(ValueType::String).with_kind(ArgumentKind::QueryContains)),
                )
                .field("direction", ValueType::named("Direction"))
                .site(
                    DeclarationSite::field("Video", "clips", ValueType::list_of(ValueType::named("Clip")))
                        .forward_paging(),
                )
                .site(DeclarationSite::field("Video", "secret", ValueType::String).ignore()),
        )
        .unwrap();
    registry
        .register_type(
            TypeDescriptor::object("Clip")
                .field("id", ValueType::Id)
                .field("start", ValueType::Int),
        )
        .unwrap();
    registry
        .register_type(TypeDescriptor::interface("Media").field("name", ValueType::String))
        .unwrap();
    registry
        .register_type(TypeDescriptor::enumeration("Direction", ["ASC", "DESC"]))
        .unwrap();
    registry
}

fn root() -> serde_json::Value {
    json!({
        "count": 3,
        "featured": { "__typename": "Video", "id": "2", "name": "second" },
        "videos": [
            { "id": "1", "name": "first", "title": "One", "direction": "ASC", "clips": [{ "id": "c1", "start": 0 }] },
            { "id": "2", "name": "second", "title": "Two", "direction": "DESC", "clips": [] },
            { "id": "3", "name": "third", "title": "Three", "direction": "ASC", "clips": [] }
        ]
    })
}

fn relay_config() -> SchemaConfig {
    SchemaConfig::default().with_relay(true)
}

/// A field's rendered signature on one line, argument descriptions and
/// commas dropped.
fn signature(sdl: &str, field: &str) -> Option<String> {
    let start = sdl.find(&format!("\t{}(", field))?;
    let rest = &sdl[start..];
    let close = rest.find("): ")?;
    let end = close + rest[close..].find('\n').unwrap_or(rest.len() - close);

    let mut in_description = false;
    let mut parts = Vec::new();
    for line in rest[..end].lines().map(str::trim) {
        if line == "\"\"\"" {
            in_description = !in_description;
        } else if !in_description && !line.starts_with('"') {
            parts.push(line.replace(',', " "));
        }
    }
    let joined = parts.join(" ").split_whitespace().collect::<Vec<_>>().join(" ");
    Some(joined.replace("( ", "(").replace(" )", ")"))
}

#[test]
fn test_sdl_renders_arguments_and_markers() {
    let schema = SchemaBuilder::new(SchemaConfig::default())
        .with_registry(catalog())
        .unwrap()
        .build()
        .unwrap();
    let sdl = schema.sdl();

    assert!(sdl.contains("title(titleCONTAINS: String): String!"));
    assert_eq!(
        signature(&sdl, "videos").as_deref(),
        Some("videos(first: Int after: String limit: Int = 10): [Video]")
    );
    assert_eq!(
        signature(&sdl, "title").as_deref(),
        Some("title(titleCONTAINS: String): String!")
    );
    assert!(sdl.contains("scalar Long"));
    assert!(sdl.contains("enum Direction"));
    assert!(sdl.contains("interface Media"));
    assert!(!sdl.contains("secret"));
    // Node and PageInfo only exist under relay
    assert!(!sdl.contains("PageInfo"));
}

#[test]
fn test_bindings_are_exposed() {
    let schema = SchemaBuilder::new(SchemaConfig::default())
        .with_registry(catalog())
        .unwrap()
        .build()
        .unwrap();

    let bindings = schema.bindings();
    assert!(bindings.contains_key(&SiteId::new("Video", "title")));
    assert!(!bindings.contains_key(&SiteId::new("Video", "name")));

    let videos = schema.arguments(&SiteId::new("Query", "videos")).unwrap();
    let names: Vec<_> = videos.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, [PAGING_FIRST, PAGING_AFTER, "limit"]);
}

#[test]
fn test_relay_sdl() {
    let schema = SchemaBuilder::new(relay_config())
        .with_registry(catalog())
        .unwrap()
        .build()
        .unwrap();
    let sdl = schema.sdl();

    assert!(sdl.contains("interface Node"));
    assert!(sdl.contains("type PageInfo"));
    assert!(sdl.contains("type VideoConnection"));
    assert!(sdl.contains("type ClipEdge"));
    assert_eq!(
        signature(&sdl, "videos").as_deref(),
        Some("videos(first: Int after: String limit: Int = 10): VideoConnection")
    );
    // Clip has a nullable id, so it is not a node
    assert!(sdl.contains("type Clip {"));
}

#[test]
fn test_schema_debug_lists_types() {
    let schema = SchemaBuilder::new(SchemaConfig::default())
        .with_registry(catalog())
        .unwrap()
        .build()
        .unwrap();

    let debug = format!("{:?}", schema);
    assert!(debug.starts_with("GraphSchema"));
    assert!(debug.contains("\"Video\""));
    assert!(debug.contains("\"Direction\""));
}

#[test]
fn test_missing_query_root() {
    let err = SchemaBuilder::new(SchemaConfig::new("Root"))
        .with_registry(catalog())
        .unwrap()
        .build()
        .unwrap_err();
    assert!(matches!(err, SchemaError::MissingQueryRoot(name) if name == "Root"));
}

#[test]
fn test_missing_mutation_root() {
    let err = SchemaBuilder::new(SchemaConfig::default().with_mutation_root("Mutation"))
        .with_registry(catalog())
        .unwrap()
        .build()
        .unwrap_err();
    assert!(matches!(err, SchemaError::MissingMutationRoot(_)));
}

#[test]
fn test_generated_type_collision() {
    let err = SchemaBuilder::new(relay_config())
        .with_registry(catalog())
        .unwrap()
        .register_type(TypeDescriptor::object("PageInfo").field("page", ValueType::Int))
        .unwrap()
        .build()
        .unwrap_err();
    assert!(matches!(err, SchemaError::TypeCollision(name) if name == "PageInfo"));
}

#[test]
fn test_duplicate_arguments_fail_build() {
    let err = SchemaBuilder::default()
        .register_type(
            TypeDescriptor::object("Query").site(
                DeclarationSite::field("Query", "video", ValueType::String)
                    .argument(ArgumentDescriptor::new("id", ValueType::Id))
                    .argument(ArgumentDescriptor::new("id", ValueType::Id)),
            ),
        )
        .unwrap()
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        SchemaError::Metadata(MetadataError::DuplicateArgumentName { .. })
    ));
}

#[test]
fn test_invalid_enum_default_is_dropped() {
    let schema = SchemaBuilder::default()
        .register_type(TypeDescriptor::enumeration("Direction", ["ASC", "DESC"]))
        .unwrap()
        .register_type(
            TypeDescriptor::object("Query").site(
                DeclarationSite::field("Query", "videos", ValueType::list_of(ValueType::String)).argument(
                    ArgumentDescriptor::new("direction", ValueType::named("Direction")).with_default_value("SIDEWAYS"),
                ),
            ),
        )
        .unwrap()
        .build()
        .unwrap();

    assert!(schema.sdl().contains("videos(direction: Direction): [String]"));
}

#[tokio::test]
async fn test_execute_projection_and_slicing() {
    let schema = SchemaBuilder::new(SchemaConfig::default())
        .with_registry(catalog())
        .unwrap()
        .build()
        .unwrap();

    let response = schema
        .execute_with_root(
            r#"{ count videos(first: 2, after: "0") { id title direction clips { start } } }"#,
            root(),
        )
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    assert_eq!(data["count"], json!(3));
    assert_eq!(
        data["videos"],
        json!([
            { "id": "2", "title": "Two", "direction": "DESC", "clips": [] },
            { "id": "3", "title": "Three", "direction": "ASC", "clips": [] }
        ])
    );
}

#[tokio::test]
async fn test_execute_interface() {
    let schema = SchemaBuilder::new(SchemaConfig::default())
        .with_registry(catalog())
        .unwrap()
        .build()
        .unwrap();

    let response = schema
        .execute_with_root("{ featured { name ... on Video { id } } }", root())
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    assert_eq!(data["featured"], json!({ "name": "second", "id": "2" }));
}

#[tokio::test]
async fn test_execute_connection() {
    let schema = SchemaBuilder::new(relay_config())
        .with_registry(catalog())
        .unwrap()
        .build()
        .unwrap();

    let response = schema
        .execute_with_root(
            "{ videos(first: 1) { edges { cursor node { id } } pageInfo { hasNextPage hasPreviousPage endCursor total } } }",
            root(),
        )
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    assert_eq!(data["videos"]["edges"], json!([{ "cursor": "0", "node": { "id": "1" } }]));
    assert_eq!(
        data["videos"]["pageInfo"],
        json!({ "hasNextPage": true, "hasPreviousPage": false, "endCursor": "0", "total": 3 })
    );
}

#[tokio::test]
async fn test_invalid_cursor_is_a_field_error() {
    let schema = SchemaBuilder::new(SchemaConfig::default())
        .with_registry(catalog())
        .unwrap()
        .build()
        .unwrap();

    let response = schema
        .execute_with_root(r#"{ videos(after: "nope") { id } }"#, root())
        .await;
    assert_eq!(response.errors.len(), 1);
}

#[tokio::test]
async fn test_overflowing_cursor_is_a_field_error() {
    let schema = SchemaBuilder::new(relay_config())
        .with_registry(catalog())
        .unwrap()
        .build()
        .unwrap();

    let query = format!(r#"{{ videos(after: "{}") {{ edges {{ cursor }} }} }}"#, usize::MAX);
    let response = schema.execute_with_root(query, root()).await;
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("invalid cursor"));
}

#[tokio::test]
async fn test_explicit_null_paging_arguments() {
    let schema = SchemaBuilder::new(SchemaConfig::default())
        .with_registry(catalog())
        .unwrap()
        .build()
        .unwrap();

    let response = schema
        .execute_with_root("{ videos(first: null, after: null) { id } }", root())
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    assert_eq!(data["videos"], json!([{ "id": "1" }, { "id": "2" }, { "id": "3" }]));

    let response = schema
        .execute_with_root(
            Request::new("query($n: Int) { videos(first: $n) { id } }").variables(Variables::from_json(json!({}))),
            root(),
        )
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(response.data.into_json().unwrap()["videos"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_complexity_limit() {
    let schema = SchemaBuilder::new(SchemaConfig::default().with_max_complexity(25))
        .with_registry(catalog())
        .unwrap()
        .build()
        .unwrap();

    let query = "{ videos(first: 2) { clips { start } } }";
    assert_eq!(schema.complexity(&Request::new(query)), Some(30));
    assert_eq!(schema.complexity(&Request::new("{ count }")), Some(0));

    let rejected = schema.execute_with_root(query, root()).await;
    assert_eq!(rejected.errors.len(), 1);
    assert!(rejected.errors[0].message.contains("exceeds the limit of 25"));

    let accepted = schema.execute_with_root("{ videos(first: 2) { id } }", root()).await;
    assert!(accepted.errors.is_empty(), "{:?}", accepted.errors);
}

#[test]
fn test_invalid_relay_mutation_fails_build() {
    let err = SchemaBuilder::new(relay_config().with_mutation_root("Mutation"))
        .with_registry(catalog())
        .unwrap()
        .register_type(TypeDescriptor::object("Mutation").field("touch", ValueType::named("Video")))
        .unwrap()
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        SchemaError::InvalidRelayMutation { ref site, .. } if *site == SiteId::new("Mutation", "touch")
    ));
}

#[tokio::test]
async fn test_relay_mutation_echoes_client_mutation_id() {
    let schema = SchemaBuilder::new(relay_config().with_mutation_root("Mutation"))
        .with_registry(catalog())
        .unwrap()
        .register_type(TypeDescriptor::input("TouchInput").field("id", ValueType::Id))
        .unwrap()
        .register_type(TypeDescriptor::object("TouchPayload").field("video", ValueType::named("Video")))
        .unwrap()
        .register_type(
            TypeDescriptor::object("Mutation").site(
                DeclarationSite::field("Mutation", "touch", ValueType::named("TouchPayload"))
                    .argument(ArgumentDescriptor::new("input", ValueType::named("TouchInput")).with_nullable(false)),
            ),
        )
        .unwrap()
        .build()
        .unwrap();

    let root = json!({ "touch": { "video": { "id": "1", "name": "first" } } });
    let response = schema
        .execute_with_root(
            r#"mutation { touch(input: { id: "1", clientMutationId: "abc" }) { clientMutationId video { name } } }"#,
            root.clone(),
        )
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(
        response.data.into_json().unwrap(),
        json!({ "touch": { "clientMutationId": "abc", "video": { "name": "first" } } })
    );

    let anonymous = schema
        .execute_with_root(r#"mutation { touch(input: { id: "1" }) { clientMutationId } }"#, root)
        .await;
    assert!(anonymous.errors.is_empty(), "{:?}", anonymous.errors);
    assert_eq!(
        anonymous.data.into_json().unwrap(),
        json!({ "touch": { "clientMutationId": null } })
    );
}

#[tokio::test]
async fn test_missing_root_data_resolves_to_null() {
    let schema = SchemaBuilder::new(SchemaConfig::default())
        .with_registry(catalog())
        .unwrap()
        .build()
        .unwrap();

    let response = schema.execute("{ count }").await;
    assert!(response.errors.is_empty());
    assert_eq!(response.data.into_json().unwrap(), json!({ "count": null }));
}

#[tokio::test]
async fn test_depth_limit() {
    let schema = SchemaBuilder::new(SchemaConfig::default().with_max_depth(1))
        .with_registry(catalog())
        .unwrap()
        .build()
        .unwrap();

    let shallow = schema.execute_with_root("{ count }", root()).await;
    assert!(shallow.errors.is_empty());

    let deep = schema.execute_with_root("{ videos { clips { start } } }", root()).await;
    assert!(!deep.errors.is_empty());
}
