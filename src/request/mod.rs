//! Turns a composed URL and a method node into a transport-ready request.

use crate::graph::{HttpMethod, MethodConfig};
use crate::resolver::{VariableTable, substitute};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

pub mod transport;
#[cfg(feature = "transport")]
pub mod ureq_transport;

pub use transport::{ResponseState, Transport, TransportResponse, dispatch};
#[cfg(feature = "transport")]
pub use ureq_transport::UreqTransport;

const AUTHORIZATION: &str = "Authorization";

/// A fully assembled request, ready to hand to a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub url: String,
    pub headers: AHashMap<String, String>,
    pub body: Option<AHashMap<String, String>>,
}

impl RequestDescriptor {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The body serialized as a flat JSON object.
    pub fn body_json(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|body| serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string()))
    }
}

/// Builds the request for `url` from a method node's configuration.
///
/// Header pairs with an empty key or value are dropped. A configured bearer token always
/// wins over a hand-written `Authorization` header. A body is attached only for methods
/// that carry one and only when at least one body field has a key; empty values are
/// kept as empty strings. `{name}` tokens in header values, body values and the token
/// are filled from `variables` like path segments are.
pub fn assemble(url: &str, config: &MethodConfig, variables: &VariableTable) -> RequestDescriptor {
    let mut headers: AHashMap<String, String> = config
        .headers
        .iter()
        .filter(|field| !field.key.is_empty() && !field.value.is_empty())
        .map(|field| {
            (
                field.key.clone(),
                substitute(&field.value, variables).into_owned(),
            )
        })
        .collect();

    if let Some(token) = config
        .bearer_token
        .as_deref()
        .map(str::trim)
        .filter(|token| !token.is_empty())
    {
        headers.retain(|key, _| !key.eq_ignore_ascii_case(AUTHORIZATION));
        headers.insert(
            AUTHORIZATION.to_string(),
            format!("Bearer {}", substitute(token, variables)),
        );
    }

    let body = config
        .method
        .carries_body()
        .then(|| {
            config
                .body_fields
                .iter()
                .filter(|field| !field.key.is_empty())
                .map(|field| {
                    (
                        field.key.clone(),
                        substitute(&field.value, variables).into_owned(),
                    )
                })
                .collect::<AHashMap<_, _>>()
        })
        .filter(|body| !body.is_empty());

    RequestDescriptor {
        method: config.method,
        url: url.to_string(),
        headers,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Field;

    fn config(method: HttpMethod) -> MethodConfig {
        MethodConfig::new(method)
    }

    #[test]
    fn headers_drop_incomplete_pairs() {
        let mut cfg = config(HttpMethod::Get);
        cfg.headers.push(Field::new("", "orphan"));
        cfg.headers.push(Field::new("X-Empty", ""));
        cfg.headers.push(Field::new("X-Trace", "abc"));
        let req = assemble("http://x", &cfg, &VariableTable::new());
        assert_eq!(req.headers.len(), 2);
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("X-Trace"), Some("abc"));
    }

    #[test]
    fn bearer_token_overrides_manual_authorization() {
        let mut cfg = config(HttpMethod::Get);
        cfg.headers.push(Field::new("authorization", "Basic Zm9v"));
        cfg.bearer_token = Some("secret".to_string());
        let req = assemble("http://x", &cfg, &VariableTable::new());
        assert_eq!(req.header("Authorization"), Some("Bearer secret"));
        assert_eq!(
            req.headers
                .keys()
                .filter(|k| k.eq_ignore_ascii_case("authorization"))
                .count(),
            1
        );
    }

    #[test]
    fn blank_bearer_token_is_ignored() {
        let mut cfg = config(HttpMethod::Get);
        cfg.bearer_token = Some("   ".to_string());
        let req = assemble("http://x", &cfg, &VariableTable::new());
        assert_eq!(req.header("Authorization"), None);
    }

    #[test]
    fn get_requests_never_carry_a_body() {
        let mut cfg = config(HttpMethod::Get);
        cfg.body_fields.push(Field::new("q", "1"));
        assert!(assemble("http://x", &cfg, &VariableTable::new()).body.is_none());
    }

    #[test]
    fn body_requires_at_least_one_keyed_field() {
        let mut cfg = config(HttpMethod::Patch);
        cfg.body_fields.push(Field::new("", "value"));
        assert!(assemble("http://x", &cfg, &VariableTable::new()).body.is_none());

        cfg.body_fields.push(Field::new("name", ""));
        let body = assemble("http://x", &cfg, &VariableTable::new()).body.unwrap();
        assert_eq!(body.len(), 1);
        assert_eq!(body.get("name").map(String::as_str), Some(""));
    }

    #[test]
    fn variables_fill_header_and_body_values() {
        let mut cfg = config(HttpMethod::Post);
        cfg.headers.push(Field::new("X-Tenant", "{tenant}"));
        cfg.body_fields.push(Field::new("owner", "{user}"));
        cfg.bearer_token = Some("{token}".to_string());
        let vars: VariableTable = [("tenant", "acme"), ("token", "t0k")].into_iter().collect();
        let req = assemble("http://x", &cfg, &vars);
        assert_eq!(req.header("X-Tenant"), Some("acme"));
        assert_eq!(req.header("Authorization"), Some("Bearer t0k"));
        assert_eq!(
            req.body.unwrap().get("owner").map(String::as_str),
            Some("{user}")
        );
    }
}
