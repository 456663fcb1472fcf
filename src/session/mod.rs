//! The application-state controller.
//!
//! A `Session` owns the graph, the variable table and the active selection, and is the
//! only way to change them: every change goes through [`Session::apply`], which
//! recomputes the active-path projection before returning. Outbound requests are tagged
//! with a generation number so that a slow, older response can never replace the one
//! produced by a newer send.

use crate::error::GraphError;
use crate::graph::{Edge, EdgeId, Graph, HttpMethod, MethodConfig, Node, NodeId, NodeKind};
use crate::persistence::{SNAPSHOT_VERSION, SessionSnapshot};
use crate::projection::ActivePath;
use crate::request::{RequestDescriptor, ResponseState, Transport, assemble, dispatch};
use crate::resolver::VariableTable;
use ahash::AHashMap;
use log::{debug, info};

mod config;
mod history;

pub use config::SessionConfig;
pub use history::{BodyRecord, BoundedHistory, HistoryEntry};

/// A single state change.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddNode(Node),
    /// Replaces the node with the same id.
    UpdateNode(Node),
    /// Removes a node and every edge touching it.
    RemoveNode(NodeId),
    Connect(Edge),
    Disconnect(EdgeId),
    /// Selects the terminal whose path drives the computed URL. `None` clears it.
    SetActivePath(Option<NodeId>),
    SetVariable { name: String, value: String },
    RemoveVariable(String),
    /// Swaps in a whole new graph, e.g. after an import.
    ReplaceGraph(Graph),
}

/// A request that has been assembled and numbered but not yet completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub generation: u64,
    pub node_id: NodeId,
    pub request: RequestDescriptor,
}

pub struct Session {
    config: SessionConfig,
    graph: Graph,
    variables: VariableTable,
    active_path_id: Option<NodeId>,
    projection: ActivePath,
    history: BoundedHistory<HistoryEntry>,
    body_history: AHashMap<NodeId, BoundedHistory<BodyRecord>>,
    next_generation: u64,
    last_response: Option<(u64, ResponseState)>,
    revision: u64,
}

pub struct SessionBuilder {
    config: SessionConfig,
    snapshot: Option<SessionSnapshot>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            snapshot: None,
        }
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    pub fn with_body_history_limit(mut self, limit: usize) -> Self {
        self.config.body_history_limit = limit;
        self
    }

    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.request_timeout_ms = timeout_ms;
        self
    }

    /// Restores graph, variables, selection and histories from a saved snapshot.
    pub fn with_snapshot(mut self, snapshot: SessionSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    pub fn build(self) -> Session {
        let mut session = Session {
            history: BoundedHistory::new(self.config.history_limit),
            config: self.config,
            graph: Graph::new(),
            variables: VariableTable::new(),
            active_path_id: None,
            projection: ActivePath::default(),
            body_history: AHashMap::new(),
            next_generation: 1,
            last_response: None,
            revision: 0,
        };

        if let Some(snapshot) = self.snapshot {
            info!(
                "Restoring session: {} node(s), {} edge(s), {} history entries",
                snapshot.graph.nodes().len(),
                snapshot.graph.edges().len(),
                snapshot.history.len()
            );
            session.graph = snapshot.graph;
            session.variables = snapshot.variables;
            session.active_path_id = snapshot.active_path_id;
            session.history = snapshot.history;
            session.history.set_capacity(session.config.history_limit);
            session.next_generation = session
                .history
                .iter()
                .map(|entry| entry.generation + 1)
                .max()
                .unwrap_or(1);
            for (node_id, mut bodies) in snapshot.body_history {
                bodies.set_capacity(session.config.body_history_limit);
                session.body_history.insert(node_id, bodies);
            }
            session.recompute();
        }
        session
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Session {
    fn default() -> Self {
        SessionBuilder::new().build()
    }
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    pub fn active_path_id(&self) -> Option<&NodeId> {
        self.active_path_id.as_ref()
    }

    pub fn active_path(&self) -> &ActivePath {
        &self.projection
    }

    /// The URL for the active path, or `None` if nothing can be sent.
    pub fn computed_url(&self) -> Option<&str> {
        self.projection.url()
    }

    pub fn history(&self) -> &BoundedHistory<HistoryEntry> {
        &self.history
    }

    pub fn body_history(&self, node_id: &str) -> Option<&BoundedHistory<BodyRecord>> {
        self.body_history.get(node_id)
    }

    /// The most recently issued request's response among those that have completed.
    pub fn last_response(&self) -> Option<&ResponseState> {
        self.last_response.as_ref().map(|(_, response)| response)
    }

    /// Increases on every successful command and every recorded response.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Creates a method node seeded with the configured default headers.
    pub fn new_method_node(&self, id: impl Into<NodeId>, method: HttpMethod) -> Node {
        Node::new(
            id,
            NodeKind::Method(MethodConfig::with_headers(
                method,
                self.config.default_headers.clone(),
            )),
        )
    }

    /// Applies a command. On error nothing changes.
    pub fn apply(&mut self, command: Command) -> Result<(), GraphError> {
        match command {
            Command::AddNode(node) => self.graph.add_node(node)?,
            Command::UpdateNode(node) => {
                self.graph.update_node(node)?;
            }
            Command::RemoveNode(id) => {
                self.graph.remove_node(id.as_str())?;
                self.body_history.remove(id.as_str());
                if self.active_path_id.as_ref() == Some(&id) {
                    self.active_path_id = None;
                }
            }
            Command::Connect(edge) => self.graph.connect(edge)?,
            Command::Disconnect(id) => {
                self.graph.disconnect(id.as_str())?;
            }
            Command::SetActivePath(id) => self.active_path_id = id,
            Command::SetVariable { name, value } => {
                self.variables.set(name, value);
            }
            Command::RemoveVariable(name) => {
                self.variables.remove(&name);
            }
            Command::ReplaceGraph(graph) => {
                self.graph = graph;
                self.body_history
                    .retain(|id, _| self.graph.contains_node(id.as_str()));
                if let Some(active) = &self.active_path_id
                    && !self.graph.contains_node(active.as_str())
                {
                    self.active_path_id = None;
                }
            }
        }
        self.revision += 1;
        self.recompute();
        Ok(())
    }

    fn recompute(&mut self) {
        self.projection =
            ActivePath::project(&self.graph, self.active_path_id.as_ref(), &self.variables);
    }

    /// Assembles the request for the active method node and assigns it a generation.
    ///
    /// Returns `None` when there is nothing to send: no resolvable URL, or the active
    /// node is not a method node.
    pub fn prepare_send(&mut self) -> Option<PendingRequest> {
        let url = self.projection.url()?;
        let node_id = self.active_path_id.as_ref()?;
        let config = self.graph.node(node_id.as_str())?.as_method()?;

        let request = assemble(url, config, &self.variables);
        let generation = self.next_generation;
        self.next_generation += 1;
        debug!(
            "Prepared request #{}: {} {}",
            generation, request.method, request.url
        );
        Some(PendingRequest {
            generation,
            node_id: node_id.clone(),
            request,
        })
    }

    /// Records a completed request. History always grows; the displayed response only
    /// changes if this request is newer than the one currently displayed.
    pub fn complete_send(&mut self, pending: PendingRequest, response: ResponseState) {
        let PendingRequest {
            generation,
            node_id,
            request,
        } = pending;

        if let Some(body) = request.body.clone()
            && request.method.carries_body()
        {
            let limit = self.config.body_history_limit;
            self.body_history
                .entry(node_id.clone())
                .or_insert_with(|| BoundedHistory::new(limit))
                .push(body);
        }

        self.history.push(HistoryEntry {
            generation,
            node_id,
            method: request.method,
            url: request.url,
            response: response.clone(),
        });

        let is_newer = self
            .last_response
            .as_ref()
            .is_none_or(|(shown, _)| generation > *shown);
        if is_newer {
            self.last_response = Some((generation, response));
        } else {
            debug!("Discarding stale response for request #{}", generation);
        }
        self.revision += 1;
    }

    /// Assembles, sends and records a request for the active path in one step.
    pub fn send(&mut self, transport: &dyn Transport) -> Option<ResponseState> {
        let pending = self.prepare_send()?;
        let response = dispatch(transport, &pending.request);
        self.complete_send(pending, response.clone());
        Some(response)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut body_history: Vec<_> = self
            .body_history
            .iter()
            .map(|(id, bodies)| (id.clone(), bodies.clone()))
            .collect();
        body_history.sort_by(|a, b| a.0.cmp(&b.0));

        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            graph: self.graph.clone(),
            variables: self.variables.clone(),
            active_path_id: self.active_path_id.clone(),
            history: self.history.clone(),
            body_history,
        }
    }
}
