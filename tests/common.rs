//! Common test utilities for building request graphs and sessions.
use michi::prelude::*;

/// Builds a graph from `(id, kind)` nodes and `(source, target)` edges.
#[allow(dead_code)]
pub fn graph(nodes: Vec<Node>, edges: &[(&str, &str)]) -> Graph {
    let edges = edges
        .iter()
        .map(|(source, target)| Edge::between(*source, *target))
        .collect();
    Graph::from_parts(nodes, edges).expect("test graph should be valid")
}

/// `http://localhost:3000 → health → GET`
#[allow(dead_code)]
pub fn create_health_graph() -> Graph {
    graph(
        vec![
            Node::base_url("base", "http://localhost:3000"),
            Node::resource("health", "health"),
            Node::method("get", HttpMethod::Get),
        ],
        &[("base", "health"), ("health", "get")],
    )
}

/// `http://localhost:3000 → auth → login → POST {email, password}`
#[allow(dead_code)]
pub fn create_login_graph() -> Graph {
    let mut login = Node::method("post", HttpMethod::Post);
    if let Some(config) = login.as_method_mut() {
        config.body_fields = vec![Field::new("email", ""), Field::new("password", "")];
    }
    graph(
        vec![
            Node::base_url("base", "http://localhost:3000"),
            Node::resource("auth", "auth"),
            Node::resource("login", "login"),
            login,
        ],
        &[("base", "auth"), ("auth", "login"), ("login", "post")],
    )
}

/// `https://api.github.com → /users/ → octocat → GET`
#[allow(dead_code)]
pub fn create_github_graph() -> Graph {
    graph(
        vec![
            Node::base_url("base", "https://api.github.com"),
            Node::resource("users", "/users/"),
            Node::resource("octocat", "octocat"),
            Node::method("get", HttpMethod::Get),
        ],
        &[("base", "users"), ("users", "octocat"), ("octocat", "get")],
    )
}

/// A session holding `graph` with `active` selected.
#[allow(dead_code)]
pub fn session_with(graph: Graph, active: &str) -> Session {
    let mut session = Session::builder().build();
    session
        .apply(Command::ReplaceGraph(graph))
        .expect("replacing the graph cannot fail");
    session
        .apply(Command::SetActivePath(Some(NodeId::from(active))))
        .expect("selecting a node cannot fail");
    session
}

#[allow(dead_code)]
pub fn ids(path: &[NodeId]) -> Vec<&str> {
    path.iter().map(NodeId::as_str).collect()
}
