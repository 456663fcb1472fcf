use crate::graph::{Graph, NodeId, NodeKind};
use crate::resolver::{VariableTable, is_parameter, substitute};
use itertools::Itertools;

const ARROW: &str = " → ";

/// Formats resolved paths into human-readable strings
pub struct PathFormatter;

impl PathFormatter {
    /// Render a path as `origin → segment → ... → METHOD`.
    pub fn format(graph: &Graph, path: &[NodeId]) -> String {
        path.iter()
            .map(|id| Self::label(graph, id, None))
            .join(ARROW)
    }

    /// Like [`PathFormatter::format`], but parameter segments also show what they resolve to.
    pub fn format_with_variables(graph: &Graph, path: &[NodeId], variables: &VariableTable) -> String {
        path.iter()
            .map(|id| Self::label(graph, id, Some(variables)))
            .join(ARROW)
    }

    fn label(graph: &Graph, id: &NodeId, variables: Option<&VariableTable>) -> String {
        let Some(node) = graph.node(id.as_str()) else {
            return format!("<missing {}>", id);
        };
        match &node.kind {
            NodeKind::BaseUrl { value } => value.clone(),
            NodeKind::Resource { value } => match variables {
                Some(vars) if is_parameter(value) => {
                    let resolved = substitute(value, vars);
                    if resolved == value.as_str() {
                        value.clone()
                    } else {
                        format!("{}={}", value, resolved)
                    }
                }
                _ => value.clone(),
            },
            NodeKind::Method(config) => config.method.to_string(),
            NodeKind::Request(_) => "[request]".to_string(),
        }
    }
}
