//! HTTP exchange model
//!
//! Represents a single completed request/response pair as observed by an
//! intercepting proxy. The capture layer borrows exchanges for the duration
//! of a hook call and never mutates or retains them.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A single header line.
///
/// Headers are kept as an ordered list rather than a map: the capture log
/// reproduces the exact wire order the host observed, and a map would
/// destroy it (and silently merge repeated names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The request half of an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedRequest {
    /// HTTP method token, exactly as seen on the wire (e.g. "GET")
    pub method: String,
    /// Request target (path plus query string, or absolute-form for proxies)
    pub target: String,
    /// HTTP version (e.g. "HTTP/1.1")
    pub http_version: String,
    /// Headers in observed order
    pub headers: Vec<Header>,
    /// Request body, empty for bodyless requests
    pub body: Vec<u8>,
}

/// The response half of an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedResponse {
    /// HTTP version (e.g. "HTTP/1.1")
    pub http_version: String,
    /// Status code (100..=999)
    pub status_code: u16,
    /// Reason phrase (may be empty)
    pub reason: String,
    /// Headers in observed order
    pub headers: Vec<Header>,
    /// Response body, possibly binary
    pub body: Vec<u8>,
}

/// A completed request/response pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// Unique identifier for this exchange
    pub id: String,
    /// When the response completed, milliseconds since epoch
    pub completed_at: i64,
    pub request: CapturedRequest,
    pub response: CapturedResponse,
}

impl Exchange {
    /// Create an exchange for a response that just completed.
    pub fn new(request: CapturedRequest, response: CapturedResponse) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            completed_at: Utc::now().timestamp_millis(),
            request,
            response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_exchange() -> Exchange {
        Exchange::new(
            CapturedRequest {
                method: "GET".to_string(),
                target: "/index.html".to_string(),
                http_version: "HTTP/1.1".to_string(),
                headers: vec![Header::new("Host", "example.com")],
                body: Vec::new(),
            },
            CapturedResponse {
                http_version: "HTTP/1.1".to_string(),
                status_code: 200,
                reason: "OK".to_string(),
                headers: vec![Header::new("Content-Length", "2")],
                body: b"ok".to_vec(),
            },
        )
    }

    #[test]
    fn new_exchange_gets_id_and_timestamp() {
        let a = sample_exchange();
        let b = sample_exchange();
        assert_ne!(a.id, b.id);
        assert!(a.completed_at > 0);
    }

    #[test]
    fn exchange_serializes_with_ordered_headers() {
        let mut ex = sample_exchange();
        ex.request.headers = vec![
            Header::new("Host", "example.com"),
            Header::new("Accept", "*/*"),
        ];
        let json = serde_json::to_string(&ex).expect("serialize");
        let host = json.find("\"Host\"").expect("Host present");
        let accept = json.find("\"Accept\"").expect("Accept present");
        assert!(host < accept, "header order survives serialization");
    }
}
