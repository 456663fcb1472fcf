//! One-shot import of OpenAPI 3.x and Swagger 2.0 documents into a request graph.
//!
//! Every path becomes a chain of resource nodes hanging off a single base-URL node;
//! paths that share a prefix share the resource nodes for it. Every supported operation
//! becomes a method node under its last resource. Import is all-or-nothing: a graph is
//! returned only if the whole document converted cleanly.

use crate::error::{GraphError, ImportError};
use crate::graph::{Edge, Field, Graph, HttpMethod, IntoGraph, MethodConfig, Node, NodeKind};
use log::{debug, info};
use serde_json::Value;

mod yaml;

const FALLBACK_BASE_URL: &str = "http://localhost";
const BASE_NODE_ID: &str = "base";
const MAX_REF_HOPS: usize = 8;
const OPERATION_KEYS: [&str; 5] = ["get", "post", "put", "patch", "delete"];

/// Counts describing what an import produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub paths: usize,
    pub operations: usize,
    pub nodes: usize,
    pub edges: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecVersion {
    Swagger2,
    OpenApi3,
}

/// A parsed, version-checked API description.
#[derive(Debug, Clone)]
pub struct OpenApiDocument {
    version: SpecVersion,
    root: Value,
}

impl OpenApiDocument {
    /// Parses JSON (when the text starts with `{`) or YAML and validates the version marker.
    pub fn parse(text: &str) -> Result<Self, ImportError> {
        let root: Value = if text.trim_start().starts_with('{') {
            serde_json::from_str(text).map_err(|e| ImportError::ParseError(e.to_string()))?
        } else {
            yaml::parse(text)?
        };

        if !root.is_object() {
            return Err(ImportError::InvalidDocument(
                "top level must be a mapping".to_string(),
            ));
        }
        let version = detect_version(&root)?;
        if !root.get("paths").is_some_and(Value::is_object) {
            return Err(ImportError::MissingPaths);
        }
        Ok(Self { version, root })
    }

    pub fn version(&self) -> SpecVersion {
        self.version
    }

    /// The origin every imported path hangs off.
    pub fn base_url(&self) -> String {
        let url = match self.version {
            SpecVersion::OpenApi3 => self.server_url(),
            SpecVersion::Swagger2 => self.swagger_host_url(),
        };
        match url {
            Some(url) if url.starts_with('/') => format!("{}{}", FALLBACK_BASE_URL, url),
            Some(url) if !url.is_empty() => url,
            _ => FALLBACK_BASE_URL.to_string(),
        }
    }

    fn server_url(&self) -> Option<String> {
        let server = self.root.get("servers")?.get(0)?;
        let mut url = server.get("url")?.as_str()?.to_string();
        if let Some(variables) = server.get("variables").and_then(Value::as_object) {
            for (name, variable) in variables {
                if let Some(default) = variable.get("default").and_then(Value::as_str) {
                    url = url.replace(&format!("{{{}}}", name), default);
                }
            }
        }
        Some(url.trim_end_matches('/').to_string())
    }

    fn swagger_host_url(&self) -> Option<String> {
        let host = self.root.get("host")?.as_str()?;
        let scheme = self
            .root
            .get("schemes")
            .and_then(|s| s.get(0))
            .and_then(Value::as_str)
            .unwrap_or("http");
        let base_path = self
            .root
            .get("basePath")
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim_end_matches('/');
        Some(format!("{}://{}{}", scheme, host, base_path))
    }

    /// Follows local `$ref` pointers until a concrete value is reached.
    fn resolve<'a>(&'a self, mut value: &'a Value) -> &'a Value {
        for _ in 0..MAX_REF_HOPS {
            let Some(target) = value
                .get("$ref")
                .and_then(Value::as_str)
                .and_then(|r| r.strip_prefix('#'))
                .and_then(|pointer| self.root.pointer(pointer))
            else {
                break;
            };
            value = target;
        }
        value
    }

    fn body_fields(&self, operation: &Value) -> Vec<Field> {
        let schema = match self.version {
            SpecVersion::OpenApi3 => operation
                .get("requestBody")
                .map(|body| self.resolve(body))
                .and_then(|body| body.get("content"))
                .and_then(|content| content.get("application/json"))
                .and_then(|media| media.get("schema")),
            SpecVersion::Swagger2 => operation
                .get("parameters")
                .and_then(Value::as_array)
                .and_then(|params| {
                    params
                        .iter()
                        .map(|p| self.resolve(p))
                        .find(|p| p.get("in").and_then(Value::as_str) == Some("body"))
                })
                .and_then(|param| param.get("schema")),
        };

        let mut fields: Vec<Field> = schema
            .map(|schema| self.resolve(schema))
            .and_then(|schema| schema.get("properties"))
            .and_then(Value::as_object)
            .map(|props| props.keys().map(|key| Field::new(key.clone(), "")).collect())
            .unwrap_or_default();

        if self.version == SpecVersion::Swagger2 {
            let form_fields = operation
                .get("parameters")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
                .map(|p| self.resolve(p))
                .filter(|p| p.get("in").and_then(Value::as_str) == Some("formData"))
                .filter_map(|p| p.get("name").and_then(Value::as_str))
                .map(|name| Field::new(name, ""));
            fields.extend(form_fields);
        }
        fields
    }

    /// Builds the graph and import statistics.
    pub fn build(&self) -> Result<(Graph, ImportStats), ImportError> {
        let mut graph = Graph::new();
        graph
            .add_node(Node::base_url(BASE_NODE_ID, self.base_url()))
            .map_err(invalid)?;

        let mut stats = ImportStats::default();
        let paths = self
            .root
            .get("paths")
            .and_then(Value::as_object)
            .into_iter()
            .flatten();
        for (path, item) in paths {
            stats.paths += 1;
            let item = self.resolve(item);
            let parent = add_resource_chain(&mut graph, path)?;

            for key in OPERATION_KEYS {
                let Some(operation) = item.get(key) else {
                    continue;
                };
                let method: HttpMethod = key.parse().map_err(ImportError::InvalidDocument)?;
                let mut config = MethodConfig::new(method);
                config.body_fields = self.body_fields(operation);

                let id = format!("{}:{}", key, path);
                graph
                    .add_node(Node::new(id.as_str(), NodeKind::Method(config)))
                    .map_err(invalid)?;
                graph
                    .connect(Edge::between(parent.as_str(), id.as_str()))
                    .map_err(invalid)?;
                stats.operations += 1;
            }
            debug!("Imported path '{}'", path);
        }

        stats.nodes = graph.nodes().len();
        stats.edges = graph.edges().len();
        info!(
            "Imported {} operation(s) across {} path(s) into {} node(s)",
            stats.operations, stats.paths, stats.nodes
        );
        Ok((graph, stats))
    }
}

impl IntoGraph for OpenApiDocument {
    type Error = ImportError;

    fn into_graph(self) -> Result<Graph, ImportError> {
        self.build().map(|(graph, _)| graph)
    }
}

/// Parses and converts an API document in one step.
pub fn import_document(text: &str) -> Result<(Graph, ImportStats), ImportError> {
    OpenApiDocument::parse(text)?.build()
}

fn detect_version(root: &Value) -> Result<SpecVersion, ImportError> {
    if let Some(marker) = root.get("openapi") {
        let version = version_string(marker);
        return if version.starts_with("3.") {
            Ok(SpecVersion::OpenApi3)
        } else {
            Err(ImportError::UnsupportedVersion(version))
        };
    }
    if let Some(marker) = root.get("swagger") {
        let version = version_string(marker);
        return if version == "2.0" || version == "2" {
            Ok(SpecVersion::Swagger2)
        } else {
            Err(ImportError::UnsupportedVersion(version))
        };
    }
    Err(ImportError::MissingVersionMarker)
}

fn version_string(marker: &Value) -> String {
    match marker {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Ensures one resource node per cumulative prefix of `path` and returns the id of the
/// node operations should attach to.
fn add_resource_chain(graph: &mut Graph, path: &str) -> Result<String, ImportError> {
    let mut parent = BASE_NODE_ID.to_string();
    let mut prefix = String::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        prefix.push('/');
        prefix.push_str(segment);
        let id = format!("res:{}", prefix);
        if !graph.contains_node(&id) {
            graph
                .add_node(Node::resource(id.as_str(), segment))
                .map_err(invalid)?;
            graph
                .connect(Edge::between(parent.as_str(), id.as_str()))
                .map_err(invalid)?;
        }
        parent = id;
    }
    Ok(parent)
}

fn invalid(e: GraphError) -> ImportError {
    ImportError::InvalidDocument(e.to_string())
}
