//! # JSON-RPC Client Prelude
//!
//! Convenient re-exports of the most commonly used types and traits.
//!
//! ```rust
//! use turul_json_rpc_client::prelude::*;
//! ```

// Core client types
pub use crate::client::{RpcClient, RpcClientBuilder};
pub use crate::config::ClientConfig;
pub use crate::error::{RpcClientError, RpcClientResult, TransportError};
pub use crate::params::{ArrayParams, ToRpcParams};
pub use crate::response::{RpcResponse, ValueKind};
pub use crate::rpc_params;

// Transport types
pub use crate::transport::{HttpTransport, RequestOptions, Transport, TransportRequest};

// Wire types
pub use turul_json_rpc::prelude::*;
