//! End-to-end resolution tests: path search, substitution and URL composition.
mod common;
use common::*;
use michi::prelude::*;
use michi::resolver::Segment;

fn url_for(graph: &Graph, target: &str, variables: &VariableTable) -> Option<String> {
    let path = resolve_path(graph, target);
    compose(&segments_for_path(graph, &path, variables))
}

#[test]
fn test_health_check_url() {
    let graph = create_health_graph();
    assert_eq!(
        url_for(&graph, "get", &VariableTable::new()).as_deref(),
        Some("http://localhost:3000/health")
    );
}

#[test]
fn test_login_url_and_request() {
    let graph = create_login_graph();
    let url = url_for(&graph, "post", &VariableTable::new()).unwrap();
    assert_eq!(url, "http://localhost:3000/auth/login");

    let config = graph.node("post").and_then(Node::as_method).unwrap();
    let request = assemble(&url, config, &VariableTable::new());
    assert_eq!(request.method, HttpMethod::Post);

    let body = request.body.expect("POST with keyed fields carries a body");
    assert_eq!(body.len(), 2);
    assert_eq!(body.get("email").map(String::as_str), Some(""));
    assert_eq!(body.get("password").map(String::as_str), Some(""));
}

#[test]
fn test_parameter_segment_substitution() {
    let graph = graph(
        vec![
            Node::base_url("base", "http://localhost:3000"),
            Node::resource("posts", "posts"),
            Node::resource("post", "{postId}"),
            Node::method("get", HttpMethod::Get),
        ],
        &[("base", "posts"), ("posts", "post"), ("post", "get")],
    );

    let bound: VariableTable = [("postId", "42")].into_iter().collect();
    assert_eq!(substitute("{postId}", &bound), "42");
    assert_eq!(
        url_for(&graph, "get", &bound).as_deref(),
        Some("http://localhost:3000/posts/42")
    );

    assert_eq!(substitute("{postId}", &VariableTable::new()), "{postId}");
    assert_eq!(
        url_for(&graph, "get", &VariableTable::new()).as_deref(),
        Some("http://localhost:3000/posts/{postId}")
    );
}

#[test]
fn test_slash_collapse_keeps_scheme() {
    let graph = create_github_graph();
    assert_eq!(
        url_for(&graph, "get", &VariableTable::new()).as_deref(),
        Some("https://api.github.com/users/octocat")
    );
}

#[test]
fn test_cyclic_branch_is_ignored() {
    // `get` has two incoming edges: the first comes from `loop`, which only leads back
    // to `get`; the second leads to the base URL.
    let graph = graph(
        vec![
            Node::base_url("base", "http://localhost:3000"),
            Node::resource("items", "items"),
            Node::resource("loop", "loop"),
            Node::method("get", HttpMethod::Get),
        ],
        &[
            ("loop", "get"),
            ("get", "loop"),
            ("base", "items"),
            ("items", "get"),
        ],
    );
    let path = resolve_path(&graph, "get");
    assert_eq!(ids(&path), vec!["base", "items", "get"]);
    assert_eq!(
        url_for(&graph, "get", &VariableTable::new()).as_deref(),
        Some("http://localhost:3000/items")
    );
}

#[test]
fn test_pure_cycle_terminates_with_nothing() {
    let graph = graph(
        vec![
            Node::resource("a", "a"),
            Node::resource("b", "b"),
            Node::resource("c", "c"),
            Node::method("m", HttpMethod::Get),
        ],
        &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "m"), ("m", "m")],
    );
    assert_eq!(PathResolver::new(&graph).resolve("m"), Resolution::NotFound);
    assert_eq!(url_for(&graph, "m", &VariableTable::new()), None);
}

#[test]
fn test_unreachable_base_yields_no_url() {
    let graph = graph(
        vec![
            Node::base_url("base", "http://localhost:3000"),
            Node::resource("orphan", "orphan"),
            Node::method("get", HttpMethod::Get),
        ],
        &[("orphan", "get")],
    );
    assert!(resolve_path(&graph, "get").is_empty());
    assert_eq!(url_for(&graph, "get", &VariableTable::new()), None);
    assert!(resolve_path(&graph, "missing").is_empty());
}

#[test]
fn test_method_and_request_nodes_contribute_no_segment() {
    let graph = graph(
        vec![
            Node::base_url("base", "http://localhost:3000"),
            Node::new("legacy", NodeKind::Request(Default::default())),
            Node::resource("users", "users"),
            Node::method("get", HttpMethod::Get),
        ],
        &[("base", "legacy"), ("legacy", "users"), ("users", "get")],
    );
    let path = resolve_path(&graph, "get");
    assert_eq!(ids(&path), vec!["base", "legacy", "users", "get"]);
    assert_eq!(
        segments_for_path(&graph, &path, &VariableTable::new()),
        vec![
            Segment::Base("http://localhost:3000".to_string()),
            Segment::Resource("users".to_string()),
        ]
    );
}

#[test]
fn test_projection_matches_resolution_for_every_target() {
    let graph = graph(
        vec![
            Node::base_url("base", "http://localhost:3000"),
            Node::base_url("alt", "http://alt:8080"),
            Node::resource("users", "users"),
            Node::resource("id", "{id}"),
            Node::resource("dead", "dead"),
            Node::method("get", HttpMethod::Get),
            Node::method("del", HttpMethod::Delete),
        ],
        &[
            ("dead", "get"),
            ("base", "users"),
            ("alt", "users"),
            ("users", "id"),
            ("id", "get"),
            ("id", "del"),
            ("get", "dead"),
        ],
    );
    let vars = VariableTable::new();
    for node in graph.nodes() {
        let path = resolve_path(&graph, node.id.as_str());
        let projection = ActivePath::project(&graph, Some(&node.id), &vars);
        assert_eq!(projection.path(), path.as_slice(), "target {}", node.id);
        for other in graph.nodes() {
            assert_eq!(
                projection.contains(other.id.as_str()),
                path.contains(&other.id),
                "target {} / member {}",
                node.id,
                other.id
            );
        }
    }
}
