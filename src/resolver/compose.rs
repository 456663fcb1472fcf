use super::params::substitute;
use super::variables::VariableTable;
use crate::graph::{Graph, NodeId, NodeKind};
use itertools::Itertools;
use regex::Regex;
use std::sync::LazyLock;

// A run of slashes that does not directly follow a scheme colon.
static REPEATED_SLASHES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^:])/{2,}").expect("slash pattern is a valid regex")
});

/// One contributing piece of a URL, in resolved-path order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Base(String),
    Resource(String),
}

impl Segment {
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Base(value) | Segment::Resource(value) => value,
        }
    }
}

/// Turns a resolved node path into URL segments, substituting parameters on the way.
/// Method and request nodes contribute nothing.
pub fn segments_for_path(graph: &Graph, path: &[NodeId], variables: &VariableTable) -> Vec<Segment> {
    path.iter()
        .filter_map(|id| graph.node(id.as_str()))
        .filter_map(|node| match &node.kind {
            NodeKind::BaseUrl { value } => Some(Segment::Base(value.clone())),
            NodeKind::Resource { value } => {
                Some(Segment::Resource(substitute(value, variables).into_owned()))
            }
            NodeKind::Method(_) | NodeKind::Request(_) => None,
        })
        .collect()
}

/// Joins segments with `/` and collapses doubled slashes outside the scheme separator.
///
/// Returns `None` if there is no base segment to anchor the URL.
pub fn compose(segments: &[Segment]) -> Option<String> {
    if !segments.iter().any(|s| matches!(s, Segment::Base(_))) {
        return None;
    }
    let joined = segments.iter().map(Segment::as_str).join("/");
    Some(REPEATED_SLASHES.replace_all(&joined, "${1}/").into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(v: &str) -> Segment {
        Segment::Base(v.to_string())
    }

    fn res(v: &str) -> Segment {
        Segment::Resource(v.to_string())
    }

    #[test]
    fn joins_base_and_resources() {
        let url = compose(&[base("http://localhost:3000"), res("health")]);
        assert_eq!(url.as_deref(), Some("http://localhost:3000/health"));
    }

    #[test]
    fn collapses_slashes_but_keeps_scheme_separator() {
        let url = compose(&[base("https://api.github.com/"), res("/users/"), res("octocat")]);
        assert_eq!(url.as_deref(), Some("https://api.github.com/users/octocat"));
    }

    #[test]
    fn base_only_yields_the_origin() {
        assert_eq!(
            compose(&[base("http://localhost:3000")]).as_deref(),
            Some("http://localhost:3000")
        );
    }

    #[test]
    fn missing_base_yields_nothing() {
        assert_eq!(compose(&[res("users")]), None);
        assert_eq!(compose(&[]), None);
    }
}
