use super::definition::Graph;

/// A trait for foreign data models that can be turned into a request `Graph`.
///
/// Both the editor canvas format and the OpenAPI importer go through this trait, so the
/// resolver never has to know where a graph came from.
///
/// # Example
///
/// ```rust
/// use michi::graph::{Edge, Graph, HttpMethod, IntoGraph, Node};
/// use michi::error::GraphError;
///
/// struct Endpoint { origin: String, path: String }
///
/// impl IntoGraph for Endpoint {
///     type Error = GraphError;
///
///     fn into_graph(self) -> Result<Graph, GraphError> {
///         Graph::from_parts(
///             vec![
///                 Node::base_url("base", self.origin),
///                 Node::resource("res", self.path),
///                 Node::method("get", HttpMethod::Get),
///             ],
///             vec![Edge::between("base", "res"), Edge::between("res", "get")],
///         )
///     }
/// }
///
/// let graph = Endpoint { origin: "http://localhost:3000".into(), path: "health".into() }
///     .into_graph()
///     .unwrap();
/// assert_eq!(graph.nodes().len(), 3);
/// ```
pub trait IntoGraph {
    type Error;

    /// Consumes the object and converts it into a request graph.
    fn into_graph(self) -> Result<Graph, Self::Error>;
}
