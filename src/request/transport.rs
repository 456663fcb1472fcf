use super::RequestDescriptor;
use crate::error::TransportError;
use ahash::AHashMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// What a transport hands back for a completed round-trip, whatever the status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: AHashMap<String, String>,
    pub body: String,
}

/// The HTTP client boundary. Implementations must return non-2xx responses as
/// `Ok`; `Err` is reserved for failures where no response was received.
pub trait Transport {
    fn send(&self, request: &RequestDescriptor) -> Result<TransportResponse, TransportError>;
}

/// The captured outcome of a send, successful or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseState {
    /// The server's status code, or `0` when no response arrived.
    pub status: u16,
    pub status_text: String,
    /// The raw response body.
    pub data: String,
    pub headers: AHashMap<String, String>,
    pub elapsed_ms: u64,
    pub error: Option<String>,
}

impl ResponseState {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_network_error(&self) -> bool {
        self.status == 0
    }

    /// The body parsed as JSON, if it is JSON.
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.data).ok()
    }

    fn network_error(error: TransportError, elapsed_ms: u64) -> Self {
        Self {
            status: 0,
            status_text: "Network Error".to_string(),
            data: String::new(),
            headers: AHashMap::new(),
            elapsed_ms,
            error: Some(error.to_string()),
        }
    }
}

/// Sends `request` and captures the outcome as data. Never fails.
pub fn dispatch(transport: &dyn Transport, request: &RequestDescriptor) -> ResponseState {
    let started = Instant::now();
    let result = transport.send(request);
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match result {
        Ok(response) => {
            debug!(
                "{} {} -> {} in {}ms",
                request.method, request.url, response.status, elapsed_ms
            );
            let error = (!(200..300).contains(&response.status))
                .then(|| format!("HTTP {} {}", response.status, response.status_text));
            ResponseState {
                status: response.status,
                status_text: response.status_text,
                data: response.body,
                headers: response.headers,
                elapsed_ms,
                error,
            }
        }
        Err(e) => {
            warn!("{} {} failed: {}", request.method, request.url, e);
            ResponseState::network_error(e, elapsed_ms)
        }
    }
}
