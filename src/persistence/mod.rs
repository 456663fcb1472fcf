//! Durable storage for session snapshots.
//!
//! The core treats storage as an opaque slot: writes are debounced and fire-and-forget,
//! reads are best-effort. Nothing here ever blocks or fails an editing command.

use crate::graph::{Graph, NodeId};
use crate::resolver::VariableTable;
use crate::session::{BodyRecord, BoundedHistory, HistoryEntry};
use serde::{Deserialize, Serialize};

mod debounce;
mod file;

pub use debounce::Persister;
pub use file::FileStore;

use crate::error::PersistError;

/// Bumped whenever the snapshot layout changes incompatibly.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything a session needs to pick up where it left off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: u32,
    pub graph: Graph,
    pub variables: VariableTable,
    pub active_path_id: Option<NodeId>,
    pub history: BoundedHistory<HistoryEntry>,
    pub body_history: Vec<(NodeId, BoundedHistory<BodyRecord>)>,
}

/// A durable key-value slot holding one snapshot.
pub trait Store {
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), PersistError>;

    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<SessionSnapshot>, PersistError>;
}
