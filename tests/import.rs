//! Tests for OpenAPI / Swagger import.
mod common;
use michi::prelude::*;

const OPENAPI_YAML: &str = r#"
openapi: 3.0.3
info:
  title: Blog
  version: "1.0"
servers:
  - url: http://localhost:3000/
paths:
  /health:
    get:
      responses:
        200:
          description: ok
  /auth/login:
    post:
      requestBody:
        $ref: '#/components/requestBodies/Login'
  /posts/{postId}:
    get:
      responses:
        200:
          description: ok
    delete:
      responses:
        204:
          description: gone
    parameters:
      - name: postId
        in: path
components:
  requestBodies:
    Login:
      content:
        application/json:
          schema:
            $ref: '#/components/schemas/Credentials'
  schemas:
    Credentials:
      type: object
      properties:
        email:
          type: string
        password:
          type: string
"#;

const SWAGGER_JSON: &str = r##"{
  "swagger": "2.0",
  "host": "petstore.swagger.io",
  "basePath": "/v2",
  "schemes": ["https"],
  "paths": {
    "/pet": {
      "post": {
        "parameters": [{"in": "body", "name": "body", "schema": {"$ref": "#/definitions/Pet"}}]
      },
      "put": {
        "parameters": [{"in": "formData", "name": "status"}]
      }
    },
    "/pet/{petId}": {
      "get": {},
      "head": {}
    }
  },
  "definitions": {
    "Pet": {"type": "object", "properties": {"name": {"type": "string"}, "tag": {"type": "string"}}}
  }
}"##;

#[test]
fn test_openapi_yaml_import_builds_resolvable_paths() {
    let (graph, stats) = import_document(OPENAPI_YAML).expect("document should import");

    assert_eq!(stats.paths, 3);
    assert_eq!(stats.operations, 4);
    // base + health + auth + login + posts + {postId} + 4 methods
    assert_eq!(stats.nodes, 10);
    assert_eq!(stats.edges, 9);
    assert_eq!(graph.nodes().len(), stats.nodes);

    let mut vars = VariableTable::new();
    vars.set("postId", "42");
    let url = |target: &str| {
        let path = resolve_path(&graph, target);
        compose(&segments_for_path(&graph, &path, &vars))
    };
    assert_eq!(url("get:/health").as_deref(), Some("http://localhost:3000/health"));
    assert_eq!(url("post:/auth/login").as_deref(), Some("http://localhost:3000/auth/login"));
    assert_eq!(url("delete:/posts/{postId}").as_deref(), Some("http://localhost:3000/posts/42"));
}

#[test]
fn test_openapi_request_body_seeds_body_fields() {
    let (graph, _) = import_document(OPENAPI_YAML).unwrap();
    let login = graph.node("post:/auth/login").and_then(Node::as_method).unwrap();
    assert_eq!(login.method, HttpMethod::Post);
    assert_eq!(
        login.body_fields,
        vec![Field::new("email", ""), Field::new("password", "")]
    );
    assert_eq!(login.headers, michi::graph::default_headers());
}

#[test]
fn test_shared_prefixes_share_resource_nodes() {
    let (graph, _) = import_document(OPENAPI_YAML).unwrap();
    let post_id = graph.node("res:/posts/{postId}").unwrap();
    assert_eq!(post_id.value(), Some("{postId}"));
    assert_eq!(graph.incoming("res:/posts/{postId}").count(), 1);
    // GET and DELETE both hang off the same parameter node.
    assert_eq!(
        graph
            .edges()
            .iter()
            .filter(|e| e.source.as_str() == "res:/posts/{postId}")
            .count(),
        2
    );
}

#[test]
fn test_swagger_json_import() {
    let (graph, stats) = import_document(SWAGGER_JSON).unwrap();
    // HEAD is not a supported operation.
    assert_eq!(stats.operations, 3);

    let base = graph.node("base").unwrap();
    assert_eq!(base.value(), Some("https://petstore.swagger.io/v2"));

    let create = graph.node("post:/pet").and_then(Node::as_method).unwrap();
    assert_eq!(
        create.body_fields,
        vec![Field::new("name", ""), Field::new("tag", "")]
    );
    let update = graph.node("put:/pet").and_then(Node::as_method).unwrap();
    assert_eq!(update.body_fields, vec![Field::new("status", "")]);

    let path = resolve_path(&graph, "get:/pet/{petId}");
    assert_eq!(
        compose(&segments_for_path(&graph, &path, &VariableTable::new())).as_deref(),
        Some("https://petstore.swagger.io/v2/pet/{petId}")
    );
}

#[test]
fn test_failed_import_leaves_the_session_untouched() {
    let mut session = common::session_with(common::create_health_graph(), "get");
    let before = session.snapshot();

    match import_document("openapi: [unclosed") {
        Ok((graph, _)) => session.apply(Command::ReplaceGraph(graph)).unwrap(),
        Err(e) => assert!(matches!(e, ImportError::ParseError(_))),
    }
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.computed_url(), Some("http://localhost:3000/health"));
}

#[test]
fn test_imported_graph_can_be_sent_from_a_session() {
    let (graph, _) = import_document(OPENAPI_YAML).unwrap();
    let session = common::session_with(graph, "get:/health");
    assert_eq!(session.computed_url(), Some("http://localhost:3000/health"));
    assert!(session.active_path().contains("res:/health"));
}
