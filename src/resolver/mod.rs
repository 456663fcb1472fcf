//! Backward path resolution over a request graph.
//!
//! Given a target node, the resolver walks incoming edges depth-first until it reaches a
//! base-URL node. Incoming edges are explored in the graph's insertion order and the
//! first chain that reaches a base URL wins; ambiguity is not an error. A node is
//! visited at most once per resolution, so cycles cannot stall the walk.

use crate::graph::{Graph, Node, NodeId};
use ahash::{AHashMap, AHashSet};
use log::debug;

pub mod compose;
pub mod params;
pub mod variables;

pub use compose::{Segment, compose, segments_for_path};
pub use params::{is_parameter, parameter_name, parameter_names, substitute};
pub use variables::VariableTable;

/// The outcome of a backward search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Node ids ordered from the base URL to the target, both inclusive.
    Found(Vec<NodeId>),
    NotFound,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    /// The resolved path, or an empty vector.
    pub fn into_path(self) -> Vec<NodeId> {
        match self {
            Resolution::Found(path) => path,
            Resolution::NotFound => Vec::new(),
        }
    }
}

struct Frame<'a> {
    node: &'a NodeId,
    next_parent: usize,
}

/// Resolves paths against a borrowed graph.
///
/// Construction indexes nodes by id and incoming edges by target once, so repeated
/// resolutions over the same graph are linear in the size of the explored subgraph.
pub struct PathResolver<'a> {
    nodes: AHashMap<&'a str, &'a Node>,
    parents: AHashMap<&'a str, Vec<&'a NodeId>>,
}

impl<'a> PathResolver<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|node| (node.id.as_str(), node))
            .collect();

        let mut parents: AHashMap<&'a str, Vec<&'a NodeId>> = AHashMap::new();
        for edge in graph.edges() {
            parents
                .entry(edge.target.as_str())
                .or_default()
                .push(&edge.source);
        }

        Self { nodes, parents }
    }

    /// Finds the first base-URL-to-target chain ending at `target`.
    pub fn resolve(&self, target: &str) -> Resolution {
        let Some(&target_node) = self.nodes.get(target) else {
            debug!("Resolution target '{}' is not in the graph", target);
            return Resolution::NotFound;
        };

        let mut visited: AHashSet<&str> = AHashSet::new();
        visited.insert(target);
        let mut stack = vec![Frame {
            node: &target_node.id,
            next_parent: 0,
        }];

        if target_node.is_base_url() {
            return Self::finish(&stack);
        }

        while let Some(frame) = stack.last_mut() {
            let parents = self
                .parents
                .get(frame.node.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();

            let Some(&parent) = parents.get(frame.next_parent) else {
                // Every parent failed; undo this step.
                stack.pop();
                continue;
            };
            frame.next_parent += 1;

            if !visited.insert(parent.as_str()) {
                continue;
            }
            let Some(&parent_node) = self.nodes.get(parent.as_str()) else {
                continue;
            };

            stack.push(Frame {
                node: &parent_node.id,
                next_parent: 0,
            });
            if parent_node.is_base_url() {
                return Self::finish(&stack);
            }
        }

        debug!("No base URL reachable from '{}'", target);
        Resolution::NotFound
    }

    fn finish(stack: &[Frame<'_>]) -> Resolution {
        let path: Vec<NodeId> = stack.iter().rev().map(|f| f.node.clone()).collect();
        debug!("Resolved path of {} node(s) ending at '{}'", path.len(), stack[0].node);
        Resolution::Found(path)
    }
}

/// Resolves `target` against `graph`, returning an empty vector when no chain exists.
pub fn resolve_path(graph: &Graph, target: &str) -> Vec<NodeId> {
    PathResolver::new(graph).resolve(target).into_path()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, HttpMethod};

    fn ids(path: &[NodeId]) -> Vec<&str> {
        path.iter().map(NodeId::as_str).collect()
    }

    #[test]
    fn unknown_target_is_not_found() {
        let graph = Graph::new();
        assert_eq!(PathResolver::new(&graph).resolve("nope"), Resolution::NotFound);
    }

    #[test]
    fn base_url_target_resolves_to_itself() {
        let graph = Graph::from_parts(vec![Node::base_url("b", "http://x")], vec![]).unwrap();
        assert_eq!(resolve_path(&graph, "b"), vec![NodeId::from("b")]);
    }

    #[test]
    fn orphan_method_is_not_found() {
        let graph = Graph::from_parts(vec![Node::method("m", HttpMethod::Get)], vec![]).unwrap();
        assert!(resolve_path(&graph, "m").is_empty());
    }

    #[test]
    fn failed_branch_is_undone_before_trying_the_next_parent() {
        // m has two parents: `dead` (a resource with no base above it) and `r` (which
        // leads to the base). The dead branch must not leak into the result.
        let graph = Graph::from_parts(
            vec![
                Node::base_url("b", "http://x"),
                Node::resource("dead", "dead"),
                Node::resource("r", "r"),
                Node::method("m", HttpMethod::Get),
            ],
            vec![
                Edge::between("dead", "m"),
                Edge::between("b", "r"),
                Edge::between("r", "m"),
            ],
        )
        .unwrap();
        assert_eq!(ids(&resolve_path(&graph, "m")), vec!["b", "r", "m"]);
    }

    #[test]
    fn first_successful_parent_wins() {
        let graph = Graph::from_parts(
            vec![
                Node::base_url("b1", "http://one"),
                Node::base_url("b2", "http://two"),
                Node::method("m", HttpMethod::Get),
            ],
            vec![Edge::between("b2", "m"), Edge::between("b1", "m")],
        )
        .unwrap();
        assert_eq!(ids(&resolve_path(&graph, "m")), vec!["b2", "m"]);
    }

    #[test]
    fn self_loop_and_cycle_terminate() {
        // `shared` is a dead end reached through `a`; it is never retried through `c`,
        // and the `m -> a` back edge is ignored because `m` is already on the path.
        let graph = Graph::from_parts(
            vec![
                Node::resource("shared", "shared"),
                Node::resource("a", "a"),
                Node::resource("c", "c"),
                Node::method("m", HttpMethod::Get),
            ],
            vec![
                Edge::between("shared", "a"),
                Edge::between("shared", "c"),
                Edge::between("a", "m"),
                Edge::between("c", "m"),
                Edge::between("m", "a"),
                Edge::between("m", "m"),
            ],
        )
        .unwrap();
        assert_eq!(PathResolver::new(&graph).resolve("m"), Resolution::NotFound);
    }
}
