//! # JSON-RPC 2.0 Wire Types
//!
//! Transport-agnostic types for the JSON-RPC 2.0 request/response protocol as
//! seen from a client: the request document, the response document and its
//! error object.
//!
//! ## Features
//! - Canonical request serialization (`jsonrpc`, `method`, `params`, `id`)
//! - Responses validated to carry exactly one of `result` or `error`
//! - Standard error code classification

pub mod error;
pub mod prelude;
pub mod request;
pub mod response;
pub mod types;

// Re-export main types
pub use error::{JsonRpcErrorCode, JsonRpcErrorObject};
pub use request::{JsonRpcRequest, RequestParams};
pub use response::{JsonRpcResponse, ResponsePayload};
pub use types::{JsonRpcVersion, RequestId};

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;

    // Server error range: -32099 to -32000
    pub const SERVER_ERROR_START: i64 = -32099;
    pub const SERVER_ERROR_END: i64 = -32000;
}
