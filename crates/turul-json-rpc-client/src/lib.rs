//! # JSON-RPC 2.0 Client Library
//!
//! A client for the JSON-RPC 2.0 request/response protocol. It builds
//! protocol-conformant requests from a method name and arguments, delivers them
//! through a pluggable transport (HTTP by default), and turns the response into
//! typed values or well-defined errors.
//!
//! ## Features
//!
//! - **Typed arguments**: any `Serialize` values, passed as tuples, vectors or
//!   [`rpc_params!`]
//! - **Typed results**: `get_int`, `get_float`, `get_string`, `get_bool` and
//!   `get_object::<T>()` for any `DeserializeOwned` type
//! - **Id control**: auto-incrementing ids with manual override, safe under
//!   concurrent calls
//! - **Pluggable transport**: reqwest-based [`HttpTransport`] or any
//!   [`Transport`] implementation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use turul_json_rpc_client::RpcClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RpcClient::with_url("http://localhost:8080/rpc")?;
//!     client.set_basic_auth("alice", Some("secret".to_string()));
//!
//!     let response = client.call("addNumbers", (1, 2)).await?;
//!     println!("sum = {}", response.get_int()?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust,no_run
//! # use turul_json_rpc_client::{RpcClient, RpcClientError};
//! # async fn example(client: RpcClient) {
//! match client.call("getBalance", ("acct-1",)).await.and_then(|r| r.get_float()) {
//!     Ok(balance) => println!("balance: {balance}"),
//!     Err(RpcClientError::Rpc { code, message, .. }) => eprintln!("server said {code}: {message}"),
//!     Err(e) if e.is_transport_error() => eprintln!("could not reach server: {e}"),
//!     Err(e) => eprintln!("unexpected result: {e}"),
//! }
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod params;
pub mod prelude;
pub mod request;
pub mod response;
pub mod sequencer;
pub mod transport;

// Re-export main types
pub use client::{RpcClient, RpcClientBuilder};
pub use config::{ClientConfig, ConnectionConfig, IdConfig, LoggingConfig, TimeoutConfig};
pub use error::{RpcClientError, RpcClientResult, TransportError};
pub use params::{ArrayParams, ToRpcParams};
pub use response::{RpcResponse, ValueKind};
pub use sequencer::IdSequencer;

// Re-export transport types
pub use transport::{
    BasicAuth, HttpTransport, RequestOptions, SharedTransport, Transport, TransportRequest,
};

// Re-export wire types for convenience
pub use turul_json_rpc::{JsonRpcErrorObject, JsonRpcRequest, RequestId, RequestParams};
