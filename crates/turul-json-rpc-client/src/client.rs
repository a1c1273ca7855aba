//! Main JSON-RPC client implementation

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, warn};
use turul_json_rpc::{JsonRpcRequest, RequestId};

use crate::config::ClientConfig;
use crate::error::{RpcClientError, RpcClientResult};
use crate::params::ToRpcParams;
use crate::request::{build_named_request, build_request};
use crate::response::RpcResponse;
use crate::sequencer::IdSequencer;
use crate::transport::{
    BasicAuth, HttpTransport, RequestOptions, SharedTransport, Transport, TransportRequest,
};

/// JSON-RPC 2.0 client.
///
/// Safe to share between tasks (`Arc<RpcClient>`). Every call takes its id from
/// the client's sequencer; all setters take `&self` and apply to calls issued
/// after they return.
pub struct RpcClient {
    /// Transport layer, swappable at runtime
    transport: RwLock<SharedTransport>,
    /// Request id sequencer
    ids: IdSequencer,
    /// Pass-through auth and headers
    options: RwLock<RequestOptions>,
    /// Configuration
    config: ClientConfig,
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("endpoint", &self.transport.read().endpoint())
            .field("ids", &self.ids)
            .field("options", &*self.options.read())
            .finish()
    }
}

impl RpcClient {
    /// Create a new client with the given transport
    pub fn new(transport: SharedTransport, config: ClientConfig) -> Self {
        let mut options = RequestOptions::default();
        for (name, value) in &config.connection.headers {
            options.set_header(name, value.clone());
        }

        Self {
            transport: RwLock::new(transport),
            ids: IdSequencer::new(config.ids.initial_id, config.ids.auto_increment),
            options: RwLock::new(options),
            config,
        }
    }

    /// Create a client for an HTTP endpoint with default configuration
    pub fn with_url(url: &str) -> RpcClientResult<Self> {
        RpcClientBuilder::new().with_url(url).build()
    }

    pub fn builder() -> RpcClientBuilder {
        RpcClientBuilder::new()
    }

    /// Call `method` with positional arguments.
    ///
    /// Consumes one id even when the transport subsequently fails. The returned
    /// response may still carry a protocol error; its accessors report it.
    pub async fn call<P: ToRpcParams>(&self, method: &str, params: P) -> RpcClientResult<RpcResponse> {
        let request = build_request(method, params, &self.ids)?;
        self.send(&request).await
    }

    /// Call `method` with named arguments; `params` must serialize to an object
    pub async fn call_named<P: Serialize>(
        &self,
        method: &str,
        params: P,
    ) -> RpcClientResult<RpcResponse> {
        let request = build_named_request(method, params, &self.ids)?;
        self.send(&request).await
    }

    /// Call `method` and decode the result into `T`
    pub async fn call_for<T, P>(&self, method: &str, params: P) -> RpcClientResult<T>
    where
        T: DeserializeOwned,
        P: ToRpcParams,
    {
        self.call(method, params).await?.get_object()
    }

    /// Send a prebuilt request as-is; no id is taken from the sequencer
    pub async fn call_raw(&self, request: &JsonRpcRequest) -> RpcClientResult<RpcResponse> {
        if request.method.is_empty() {
            return Err(RpcClientError::InvalidMethod);
        }
        self.send(request).await
    }

    async fn send(&self, request: &JsonRpcRequest) -> RpcClientResult<RpcResponse> {
        let body = request
            .to_vec()
            .map_err(|e| RpcClientError::InvalidParams(e.to_string()))?;

        if self.config.logging.log_requests {
            debug!(
                method = %request.method,
                id = %request.id,
                body = %String::from_utf8_lossy(&body),
                "Sending JSON-RPC request"
            );
        } else {
            debug!(method = %request.method, id = %request.id, "Sending JSON-RPC request");
        }

        // Snapshot shared state so no lock is held across the await
        let transport = self.transport.read().clone();
        let options = self.options.read().clone();

        let raw = transport
            .send(TransportRequest { body, options })
            .await
            .map_err(|e| {
                warn!(method = %request.method, id = %request.id, error = %e, "Transport failed");
                RpcClientError::Transport(e)
            })?;

        if self.config.logging.log_responses {
            debug!(
                id = %request.id,
                body = %String::from_utf8_lossy(&raw),
                "Received JSON-RPC response"
            );
        }

        let response = RpcResponse::parse(&raw).inspect_err(|e| {
            warn!(method = %request.method, id = %request.id, error = %e, "Malformed response");
        })?;

        if let Some(error) = response.error() {
            debug!(
                method = %request.method,
                id = %request.id,
                code = error.code,
                message = %error.message,
                "Server returned JSON-RPC error"
            );
        }

        if let Some(id) = response.id()
            && id != &request.id
        {
            warn!(expected = %request.id, received = %id, "Response id does not match request id");
        }

        Ok(response)
    }

    /// Overwrite the id the next call will use; auto-increment is unchanged
    pub fn set_next_id(&self, id: i64) {
        self.ids.set_next(id);
    }

    /// Turn id advancement on or off; the counter is unchanged
    pub fn set_auto_increment_id(&self, enabled: bool) {
        self.ids.set_auto_increment(enabled);
    }

    /// The id the next call will use
    pub fn next_id(&self) -> RequestId {
        RequestId::Number(self.ids.peek())
    }

    pub fn set_basic_auth(&self, username: impl Into<String>, password: Option<String>) {
        self.options.write().basic_auth = Some(BasicAuth::new(username, password));
    }

    pub fn clear_basic_auth(&self) {
        self.options.write().basic_auth = None;
    }

    /// Send `name: value` with every subsequent request
    pub fn set_custom_header(&self, name: &str, value: impl Into<String>) {
        self.options.write().set_header(name, value);
    }

    pub fn unset_custom_header(&self, name: &str) {
        self.options.write().remove_header(name);
    }

    /// Replace the transport used by subsequent calls
    pub fn set_transport(&self, transport: SharedTransport) {
        info!(endpoint = %transport.endpoint(), "Switching JSON-RPC transport");
        *self.transport.write() = transport;
    }

    /// Current auth and header settings
    pub fn request_options(&self) -> RequestOptions {
        self.options.read().clone()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Builder for [`RpcClient`]
#[derive(Default)]
pub struct RpcClientBuilder {
    transport: Option<SharedTransport>,
    url: Option<String>,
    config: Option<ClientConfig>,
}

impl RpcClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom transport
    pub fn with_transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use a transport shared with other clients
    pub fn with_shared_transport(mut self, transport: SharedTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Talk to an HTTP endpoint; ignored when a transport is also supplied
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> RpcClientResult<RpcClient> {
        let config = self.config.unwrap_or_default();

        let transport: SharedTransport = match (self.transport, self.url) {
            (Some(transport), _) => transport,
            (None, Some(url)) => Arc::new(HttpTransport::with_config(&url, &config)?),
            (None, None) => {
                return Err(RpcClientError::config(
                    "either a transport or an endpoint URL is required",
                ));
            }
        };

        Ok(RpcClient::new(transport, config))
    }
}
