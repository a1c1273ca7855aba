//! Transport layer for the JSON-RPC client
//!
//! The client only needs one operation from a transport: deliver serialized
//! request bytes and hand back the raw response bytes. Authentication and
//! custom headers travel with each request as [`RequestOptions`]; the client
//! never interprets them.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::TransportError;

pub mod http;

pub use http::HttpTransport;

/// Basic authentication credentials
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: Option<String>,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: Option<String>) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Per-request settings supplied by the client wrapper
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub basic_auth: Option<BasicAuth>,
    /// Header names are stored lowercased
    pub headers: BTreeMap<String, String>,
}

impl RequestOptions {
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn remove_header(&mut self, name: &str) -> Option<String> {
        self.headers.remove(&name.to_ascii_lowercase())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// A serialized request ready for delivery
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Serialized JSON-RPC request document
    pub body: Vec<u8>,
    pub options: RequestOptions,
}

/// Transport trait defining the interface for all transport implementations
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver a request and wait for the raw response bytes
    async fn send(&self, request: TransportRequest) -> Result<Vec<u8>, TransportError>;

    /// Where requests go, for diagnostics
    fn endpoint(&self) -> String {
        "<custom>".to_string()
    }
}

/// Type alias for a shared transport
pub type SharedTransport = Arc<dyn Transport>;
