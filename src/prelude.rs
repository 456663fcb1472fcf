//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the michi crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use michi::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let canvas_json = std::fs::read_to_string("path/to/canvas.json")?;
//! let graph = CanvasDocument::from_json(&canvas_json)?.into_graph()?;
//!
//! let mut session = Session::builder().build();
//! session.apply(Command::ReplaceGraph(graph))?;
//! session.apply(Command::SetActivePath(Some(NodeId::from("get-users"))))?;
//!
//! match session.computed_url() {
//!     Some(url) => println!("Would send to {}", url),
//!     None => println!("Nothing to send"),
//! }
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::graph::{
    Edge, EdgeId, Field, Graph, HttpMethod, IntoGraph, MethodConfig, Node, NodeId, NodeKind,
};

// Resolution
pub use crate::projection::ActivePath;
pub use crate::resolver::{
    PathResolver, Resolution, VariableTable, compose, resolve_path, segments_for_path,
    substitute,
};

// Requests and sessions
pub use crate::request::{RequestDescriptor, ResponseState, Transport, assemble, dispatch};
pub use crate::session::{Command, Session, SessionConfig};

// Collaborators
pub use crate::canvas::CanvasDocument;
pub use crate::import::{ImportStats, import_document};
pub use crate::persistence::{FileStore, Persister, SessionSnapshot, Store};

// Trace formatting
pub use crate::trace::PathFormatter;

// Error types
pub use crate::error::{
    CanvasConversionError, GraphError, ImportError, PersistError, TransportError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
