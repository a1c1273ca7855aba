//! HTTP transport implementation for the JSON-RPC client

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, warn};
use turul_json_rpc::JsonRpcResponse;
use url::Url;

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::transport::{RequestOptions, Transport, TransportRequest};

const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP transport: each call is one `POST` to the endpoint.
///
/// Non-2xx responses whose body is a JSON-RPC response are returned as-is,
/// since many servers report JSON-RPC errors with status 500. Any other
/// non-2xx body, JSON or not, fails with [`TransportError::HttpStatus`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client
    client: Client,
    /// Server endpoint URL
    endpoint: Url,
}

impl HttpTransport {
    /// Create a new HTTP transport with default settings
    pub fn new(endpoint: &str) -> Result<Self, TransportError> {
        Self::with_config(endpoint, &ClientConfig::default())
    }

    /// Create a new HTTP transport using the timeout and pool settings of `config`
    pub fn with_config(endpoint: &str, config: &ClientConfig) -> Result<Self, TransportError> {
        let url = parse_endpoint(endpoint)?;

        let mut builder = Client::builder()
            .timeout(config.timeouts.request)
            .connect_timeout(config.timeouts.connect)
            .pool_max_idle_per_host(config.connection.pool_max_idle_per_host)
            .pool_idle_timeout(config.connection.pool_idle_timeout);
        if let Some(user_agent) = &config.connection.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint: url,
        })
    }

    /// Create HTTP transport with custom client
    pub fn with_client(endpoint: &str, client: Client) -> Result<Self, TransportError> {
        Ok(Self {
            client,
            endpoint: parse_endpoint(endpoint)?,
        })
    }

    pub fn url(&self) -> &Url {
        &self.endpoint
    }

    fn headers_for(options: &RequestOptions) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));

        // Custom headers replace the defaults above
        for (name, value) in &options.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::InvalidHeader(format!("{}: {}", name, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| TransportError::InvalidHeader(format!("{}: {}", name, e)))?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, TransportError> {
    let url = Url::parse(endpoint)
        .map_err(|e| TransportError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(TransportError::InvalidEndpoint(format!(
            "Invalid scheme for HTTP transport: {}",
            url.scheme()
        )));
    }

    Ok(url)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<Vec<u8>, TransportError> {
        let headers = Self::headers_for(&request.options)?;
        let has_authorization = headers.contains_key(AUTHORIZATION);

        let mut builder = self
            .client
            .post(self.endpoint.clone())
            .headers(headers)
            .body(request.body);

        // An explicit Authorization header takes precedence over basic auth
        if let Some(auth) = &request.options.basic_auth
            && !has_authorization
        {
            builder = builder.basic_auth(&auth.username, auth.password.as_ref());
        }

        let response = builder.send().await.map_err(|e| {
            warn!(endpoint = %self.endpoint, error = %e, "HTTP request failed");
            TransportError::Http(e)
        })?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            if JsonRpcResponse::from_slice(&body).is_err() {
                warn!(endpoint = %self.endpoint, status = %status, "HTTP error without a JSON-RPC body");
                return Err(TransportError::HttpStatus {
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&body).into_owned(),
                });
            }
            debug!(
                endpoint = %self.endpoint,
                status = %status,
                "HTTP error carries a JSON-RPC response, passing it on"
            );
        }

        Ok(body.to_vec())
    }

    fn endpoint(&self) -> String {
        self.endpoint.to_string()
    }
}
