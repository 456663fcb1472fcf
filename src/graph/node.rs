use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Opaque, stable identifier of a node on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The HTTP verbs a method node can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether a request with this method may carry a body.
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(format!("unsupported HTTP method '{}'", other)),
        }
    }
}

/// An ordered `key,value` pair used for header and body fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    pub value: String,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Request configuration carried by a method node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodConfig {
    pub method: HttpMethod,
    pub body_fields: Vec<Field>,
    pub headers: Vec<Field>,
    pub bearer_token: Option<String>,
}

impl MethodConfig {
    /// Creates a configuration seeded with the default `Content-Type: application/json` header.
    pub fn new(method: HttpMethod) -> Self {
        Self::with_headers(method, default_headers())
    }

    pub fn with_headers(method: HttpMethod, headers: Vec<Field>) -> Self {
        Self {
            method,
            body_fields: Vec::new(),
            headers,
            bearer_token: None,
        }
    }
}

/// The header seed used for newly created method nodes.
pub fn default_headers() -> Vec<Field> {
    vec![Field::new("Content-Type", "application/json")]
}

/// Legacy request node payload. It holds header and body configuration but never
/// contributes a segment to a resolved URL.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestConfig {
    pub headers: Vec<Field>,
    pub body_fields: Vec<Field>,
}

/// The typed payload of a node, one variant per node kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// A full origin, e.g. `http://localhost:3000`.
    BaseUrl { value: String },
    /// A path segment, either a literal (`users`) or a parameter (`{id}`).
    Resource { value: String },
    Method(MethodConfig),
    Request(RequestConfig),
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::BaseUrl { .. } => "baseUrl",
            NodeKind::Resource { .. } => "resource",
            NodeKind::Method(_) => "method",
            NodeKind::Request(_) => "request",
        }
    }
}

/// A vertex of the request graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn base_url(id: impl Into<NodeId>, value: impl Into<String>) -> Self {
        Self::new(
            id,
            NodeKind::BaseUrl {
                value: value.into(),
            },
        )
    }

    pub fn resource(id: impl Into<NodeId>, value: impl Into<String>) -> Self {
        Self::new(
            id,
            NodeKind::Resource {
                value: value.into(),
            },
        )
    }

    pub fn method(id: impl Into<NodeId>, method: HttpMethod) -> Self {
        Self::new(id, NodeKind::Method(MethodConfig::new(method)))
    }

    pub fn is_base_url(&self) -> bool {
        matches!(self.kind, NodeKind::BaseUrl { .. })
    }

    /// The string payload of base-url and resource nodes.
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::BaseUrl { value } | NodeKind::Resource { value } => Some(value),
            NodeKind::Method(_) | NodeKind::Request(_) => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodConfig> {
        match &self.kind {
            NodeKind::Method(config) => Some(config),
            _ => None,
        }
    }

    pub fn as_method_mut(&mut self) -> Option<&mut MethodConfig> {
        match &mut self.kind {
            NodeKind::Method(config) => Some(config),
            _ => None,
        }
    }
}
