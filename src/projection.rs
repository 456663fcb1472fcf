use crate::graph::{Graph, NodeId};
use crate::resolver::{PathResolver, VariableTable, compose, segments_for_path};
use ahash::AHashSet;
use log::debug;

/// Derived view of the active path: the resolved node chain, a membership set for
/// O(1) highlighting checks, and the composed URL.
///
/// It is only ever produced by [`ActivePath::project`], so it always equals a fresh
/// resolution of the same inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivePath {
    active: Option<NodeId>,
    path: Vec<NodeId>,
    members: AHashSet<NodeId>,
    url: Option<String>,
}

impl ActivePath {
    pub fn project(graph: &Graph, active: Option<&NodeId>, variables: &VariableTable) -> Self {
        let Some(active) = active else {
            return Self::default();
        };

        let path = PathResolver::new(graph).resolve(active.as_str()).into_path();
        let url = compose(&segments_for_path(graph, &path, variables));
        let members = path.iter().cloned().collect();
        debug!(
            "Projected active path for '{}': {} node(s), url = {:?}",
            active,
            path.len(),
            url
        );

        Self {
            active: Some(active.clone()),
            path,
            members,
            url,
        }
    }

    pub fn active(&self) -> Option<&NodeId> {
        self.active.as_ref()
    }

    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_resolved(&self) -> bool {
        !self.path.is_empty()
    }
}
