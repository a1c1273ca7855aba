//! Error types for JSON-RPC client operations

use serde_json::{Number, Value};
use thiserror::Error;
use turul_json_rpc::{JsonRpcErrorCode, JsonRpcErrorObject};

use crate::response::ValueKind;

/// Result type for JSON-RPC client operations
pub type RpcClientResult<T> = Result<T, RpcClientError>;

/// Everything a call or a result accessor can fail with.
///
/// Callers usually care about three groups: transport/parse failures (nothing to
/// coerce), protocol errors (the server sent a structured `error`), and
/// coercion failures (the wrong accessor was used for the result's shape).
#[derive(Error, Debug)]
pub enum RpcClientError {
    /// Empty method name, rejected before anything is serialized or sent
    #[error("Invalid method: method name must not be empty")]
    InvalidMethod,

    /// Arguments could not be encoded as JSON
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Transport-level errors, propagated unchanged
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Response bytes are not a valid JSON-RPC 2.0 response
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Server returned a JSON-RPC `error` object
    #[error("RPC error (code {code}): {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<Value>,
    },

    /// Result has a different JSON shape than the accessor expects
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: ValueKind,
        actual: ValueKind,
    },

    /// Numeric result has a non-zero fractional part
    #[error("Result {0} is not an integer")]
    NotAnInteger(Number),

    /// Integral result does not fit in an `i64`
    #[error("Result {0} does not fit in a 64-bit signed integer")]
    IntegerOverflow(Number),

    /// Result could not be decoded into the requested type
    #[error("Decode error at `{path}`: {message}")]
    Decode { path: String, message: String },

    /// Client configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Transport-specific errors
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Transport failure: {0}")]
    Other(String),
}

impl TransportError {
    /// Whether the underlying HTTP client gave up waiting
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}

impl RpcClientError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a malformed-response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Build the protocol error for a server-supplied `error` object
    pub fn from_error_object(error: &JsonRpcErrorObject) -> Self {
        Self::Rpc {
            code: error.code,
            message: error.message.clone(),
            data: error.data.clone(),
        }
    }

    /// Nothing reached or came back from the server
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// The server answered with a structured `error`
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Self::Rpc { .. })
    }

    /// An accessor was used on a result of a different shape
    pub fn is_coercion_error(&self) -> bool {
        matches!(
            self,
            Self::TypeMismatch { .. }
                | Self::NotAnInteger(_)
                | Self::IntegerOverflow(_)
                | Self::Decode { .. }
        )
    }

    /// Get the error code if this is a protocol error
    pub fn error_code(&self) -> Option<i64> {
        match self {
            Self::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Classify the code of a protocol error (standard, server-defined or application)
    pub fn rpc_kind(&self) -> Option<JsonRpcErrorCode> {
        self.error_code().map(JsonRpcErrorCode::from_code)
    }

    /// The HTTP client gave up waiting for the server
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
