use crate::error::CanvasConversionError;
use crate::graph::{
    Edge, Field, Graph, HttpMethod, IntoGraph, MethodConfig, Node, NodeKind, RequestConfig,
};
use serde::{Deserialize, Serialize};

/// Key/value pair as the editor stores it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasField {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// Per-node payload; which fields are meaningful depends on the node type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasNodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, alias = "body_fields", skip_serializing_if = "Option::is_none")]
    pub body_fields: Option<Vec<CanvasField>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<CanvasField>>,
    #[serde(default, alias = "bearer_token", skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
}

/// Canvas node with id, type tag and data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasNode {
    pub id: String,
    #[serde(rename = "type", alias = "nodeType")]
    pub node_type: String,
    #[serde(default)]
    pub data: CanvasNodeData,
}

/// Canvas edge connecting nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
}

/// Complete canvas document as the editor saves it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasDocument {
    pub nodes: Vec<CanvasNode>,
    pub edges: Vec<CanvasEdge>,
}

impl CanvasDocument {
    pub fn from_json(json: &str) -> Result<Self, CanvasConversionError> {
        serde_json::from_str(json).map_err(|e| CanvasConversionError::ValidationError(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, CanvasConversionError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CanvasConversionError::ValidationError(e.to_string()))
    }

    /// The editor representation of a graph.
    pub fn from_graph(graph: &Graph) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|node| CanvasNode {
                id: node.id.to_string(),
                node_type: node.kind.name().to_string(),
                data: node_data(&node.kind),
            })
            .collect();
        let edges = graph
            .edges()
            .iter()
            .map(|edge| CanvasEdge {
                id: Some(edge.id.to_string()),
                source: edge.source.to_string(),
                target: edge.target.to_string(),
            })
            .collect();
        Self { nodes, edges }
    }
}

fn to_fields(fields: Option<Vec<CanvasField>>) -> Vec<Field> {
    fields
        .unwrap_or_default()
        .into_iter()
        .map(|f| Field::new(f.key, f.value))
        .collect()
}

fn from_fields(fields: &[Field]) -> Option<Vec<CanvasField>> {
    Some(
        fields
            .iter()
            .map(|f| CanvasField {
                key: f.key.clone(),
                value: f.value.clone(),
            })
            .collect(),
    )
}

fn node_data(kind: &NodeKind) -> CanvasNodeData {
    match kind {
        NodeKind::BaseUrl { value } | NodeKind::Resource { value } => CanvasNodeData {
            value: Some(value.clone()),
            ..Default::default()
        },
        NodeKind::Method(config) => CanvasNodeData {
            method: Some(config.method.to_string()),
            body_fields: from_fields(&config.body_fields),
            headers: from_fields(&config.headers),
            bearer_token: config.bearer_token.clone(),
            ..Default::default()
        },
        NodeKind::Request(config) => CanvasNodeData {
            body_fields: from_fields(&config.body_fields),
            headers: from_fields(&config.headers),
            ..Default::default()
        },
    }
}

fn convert_node(node: CanvasNode) -> Result<Node, CanvasConversionError> {
    let CanvasNode {
        id,
        node_type,
        data,
    } = node;

    let kind = match node_type.as_str() {
        "baseUrl" | "base" => NodeKind::BaseUrl {
            value: data.value.unwrap_or_default(),
        },
        "resource" => NodeKind::Resource {
            value: data.value.unwrap_or_default(),
        },
        "method" => {
            let method_name = data.method.unwrap_or_else(|| "GET".to_string());
            let method: HttpMethod =
                method_name
                    .parse()
                    .map_err(|_| CanvasConversionError::UnknownMethod {
                        node_id: id.clone(),
                        method: method_name.clone(),
                    })?;
            let mut config = match data.headers {
                Some(headers) => MethodConfig::with_headers(method, to_fields(Some(headers))),
                None => MethodConfig::new(method),
            };
            config.body_fields = to_fields(data.body_fields);
            config.bearer_token = data.bearer_token.filter(|t| !t.is_empty());
            NodeKind::Method(config)
        }
        "request" => NodeKind::Request(RequestConfig {
            headers: to_fields(data.headers),
            body_fields: to_fields(data.body_fields),
        }),
        other => {
            return Err(CanvasConversionError::UnknownNodeType {
                node_id: id,
                type_name: other.to_string(),
            });
        }
    };
    Ok(Node::new(id, kind))
}

impl IntoGraph for CanvasDocument {
    type Error = CanvasConversionError;

    fn into_graph(self) -> Result<Graph, CanvasConversionError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(convert_node)
            .collect::<Result<Vec<_>, _>>()?;

        let edges = self
            .edges
            .into_iter()
            .map(|edge| match edge.id {
                Some(id) => Edge::new(id, edge.source, edge.target),
                None => Edge::between(edge.source, edge.target),
            })
            .collect();

        Ok(Graph::from_parts(nodes, edges)?)
    }
}
