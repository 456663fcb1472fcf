use crate::graph::{EdgeId, NodeId};
use thiserror::Error;

/// Errors raised when a graph mutation would break the graph invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("A node with id '{0}' already exists")]
    DuplicateNode(NodeId),

    #[error("Node '{0}' not found in the graph")]
    NodeNotFound(NodeId),

    #[error("An edge with id '{0}' already exists")]
    DuplicateEdge(EdgeId),

    #[error("Edge '{0}' not found in the graph")]
    EdgeNotFound(EdgeId),

    #[error("Edge '{edge_id}' references node '{missing_node_id}', which is not in the graph")]
    DanglingEdge {
        edge_id: EdgeId,
        missing_node_id: NodeId,
    },
}

/// Errors that can occur while turning an OpenAPI / Swagger document into a graph.
#[derive(Error, Debug, Clone)]
pub enum ImportError {
    #[error("Failed to parse API document: {0}")]
    ParseError(String),

    #[error("Document is missing the 'openapi' or 'swagger' version marker")]
    MissingVersionMarker,

    #[error("Unsupported specification version '{0}'")]
    UnsupportedVersion(String),

    #[error("Document has no valid 'paths' object")]
    MissingPaths,

    #[error("Invalid API document: {0}")]
    InvalidDocument(String),
}

/// Errors raised by a `Transport` implementation. These never escape `request::dispatch`.
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Errors that can occur while saving or loading a session snapshot.
#[derive(Error, Debug, Clone)]
pub enum PersistError {
    #[error("Storage I/O failed for '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Snapshot serialization failed: {0}")]
    Encode(String),

    #[error("Snapshot deserialization failed: {0}")]
    Decode(String),
}

/// Errors that can occur when converting an editor canvas document into a `Graph`.
#[derive(Error, Debug, Clone)]
pub enum CanvasConversionError {
    #[error("Node '{node_id}' has an unknown node type: '{type_name}'")]
    UnknownNodeType { node_id: String, type_name: String },

    #[error("Node '{node_id}' has an unknown HTTP method: '{method}'")]
    UnknownMethod { node_id: String, method: String },

    #[error("Invalid canvas data: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
