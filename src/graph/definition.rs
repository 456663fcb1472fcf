use super::node::{Node, NodeId};
use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of an edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EdgeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A directed connection `source -> target`. Parallel edges carry no order or weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(id: impl Into<EdgeId>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    /// Creates an edge whose id is derived from its endpoints.
    pub fn between(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: EdgeId::new(format!("{}->{}", source, target)),
            source,
            target,
        }
    }
}

/// The node/edge set a user arranged on the canvas.
///
/// Nodes and edges keep their insertion order. Edge order matters: the resolver explores
/// incoming edges in this order and commits to the first chain that reaches a base URL.
/// The graph is not required to be acyclic.
///
/// Deserialization goes through [`Graph::from_parts`], so decoded graphs obey the same
/// invariants as graphs built in code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GraphParts")]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

/// Unchecked wire form of a `Graph`.
#[derive(Deserialize)]
struct GraphParts {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl TryFrom<GraphParts> for Graph {
    type Error = GraphError;

    fn try_from(parts: GraphParts) -> Result<Self, GraphError> {
        Graph::from_parts(parts.nodes, parts.edges)
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from raw parts, rejecting duplicate ids and dangling edges.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let mut graph = Graph::new();
        for node in nodes {
            graph.add_node(node)?;
        }
        for edge in edges {
            graph.connect(edge)?;
        }
        Ok(graph)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id.as_str() == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id.as_str() == id)
    }

    /// Edges pointing at `id`, in insertion order.
    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.target.as_str() == id)
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.contains_node(node.id.as_str()) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Replaces the node with the same id, returning the previous version.
    pub fn update_node(&mut self, node: Node) -> Result<Node, GraphError> {
        let slot = self
            .node_mut(node.id.as_str())
            .ok_or_else(|| GraphError::NodeNotFound(node.id.clone()))?;
        Ok(std::mem::replace(slot, node))
    }

    /// Removes a node together with every edge that touches it.
    pub fn remove_node(&mut self, id: &str) -> Result<Node, GraphError> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id.as_str() == id)
            .ok_or_else(|| GraphError::NodeNotFound(NodeId::from(id)))?;
        self.edges
            .retain(|e| e.source.as_str() != id && e.target.as_str() != id);
        Ok(self.nodes.remove(index))
    }

    pub fn connect(&mut self, edge: Edge) -> Result<(), GraphError> {
        if self.edge(edge.id.as_str()).is_some() {
            return Err(GraphError::DuplicateEdge(edge.id));
        }
        for endpoint in [&edge.source, &edge.target] {
            if !self.contains_node(endpoint.as_str()) {
                return Err(GraphError::DanglingEdge {
                    edge_id: edge.id.clone(),
                    missing_node_id: endpoint.clone(),
                });
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    pub fn disconnect(&mut self, id: &str) -> Result<Edge, GraphError> {
        let index = self
            .edges
            .iter()
            .position(|e| e.id.as_str() == id)
            .ok_or_else(|| GraphError::EdgeNotFound(EdgeId::from(id)))?;
        Ok(self.edges.remove(index))
    }
}
