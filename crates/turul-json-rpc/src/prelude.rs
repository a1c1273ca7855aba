//! # JSON-RPC Prelude
//!
//! Convenient re-exports of the most commonly used wire types.
//!
//! ```rust
//! use turul_json_rpc::prelude::*;
//! ```

pub use crate::error::{JsonRpcErrorCode, JsonRpcErrorObject};
pub use crate::request::{JsonRpcRequest, RequestParams};
pub use crate::response::{JsonRpcResponse, ResponsePayload};
pub use crate::types::{JsonRpcVersion, RequestId};

// Standard error codes
pub use crate::error_codes::*;
