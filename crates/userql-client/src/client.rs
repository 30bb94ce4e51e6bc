//! The GraphQL client seam and its HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use uuid::Uuid;

use userql_core::GraphqlSettings;

use crate::operation::{GraphqlRequest, GraphqlResponse, OperationKind};

/// Header carrying a per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Errors raised while dispatching a request, before any GraphQL-level
/// classification happens.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} with body: {body}")]
    HttpStatus { status: StatusCode, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Failure from a non-HTTP client implementation.
    #[error("{0}")]
    Custom(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl TransportError {
    pub fn custom(err: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self::Custom(err.into())
    }
}

/// A GraphQL client the user API dispatches through.
///
/// Implementations own transport, auth, retries and caching. A returned
/// `Ok` only means a GraphQL response was received; it may still carry
/// errors or lack data.
#[async_trait]
pub trait GraphqlClient: Send + Sync {
    /// Execute a read operation.
    async fn query(&self, request: GraphqlRequest) -> Result<GraphqlResponse, TransportError>;

    /// Execute a write operation.
    async fn mutate(&self, request: GraphqlRequest) -> Result<GraphqlResponse, TransportError>;
}

/// Configuration for [`HttpGraphqlClient`].
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub endpoint: String,
    /// Default headers applied to every request.
    pub headers: HeaderMap,
    pub timeout: Duration,
}

impl HttpClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            endpoint: endpoint.into(),
            headers,
            timeout: Duration::from_secs(30),
        }
    }

    /// Build from loaded settings.
    pub fn from_settings(settings: &GraphqlSettings) -> Result<Self, TransportError> {
        let mut config = Self::new(settings.endpoint.clone()).with_timeout(settings.timeout());
        if let Some(token) = &settings.bearer_token {
            config = config.with_bearer_token(token)?;
        }
        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_bearer_token(mut self, token: impl AsRef<str>) -> Result<Self, TransportError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_ref()))
            .map_err(|e| TransportError::InvalidConfig(format!("bearer token: {e}")))?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(self)
    }
}

/// GraphQL-over-HTTP client: POSTs each request as JSON to one endpoint.
///
/// Clone is cheap (the inner reqwest client is reference counted).
#[derive(Debug, Clone)]
pub struct HttpGraphqlClient {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpGraphqlClient {
    pub fn new(config: HttpClientConfig) -> Result<Self, TransportError> {
        if config.endpoint.trim().is_empty() {
            return Err(TransportError::InvalidConfig(
                "endpoint must not be empty".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .default_headers(config.headers)
            .timeout(config.timeout)
            .build()?;

        tracing::debug!(endpoint = %config.endpoint, "Created GraphQL HTTP client");
        Ok(Self {
            endpoint: config.endpoint,
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(
        &self,
        kind: OperationKind,
        request: GraphqlRequest,
    ) -> Result<GraphqlResponse, TransportError> {
        let request_id = Uuid::new_v4().to_string();
        tracing::debug!(
            kind = kind.as_str(),
            operation = request.operation_name.as_deref().unwrap_or(""),
            request_id = %request_id,
            "Sending GraphQL request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header(REQUEST_ID_HEADER, request_id.as_str())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(TransportError::HttpStatus {
                status,
                body: truncate_body(&bytes),
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl GraphqlClient for HttpGraphqlClient {
    async fn query(&self, request: GraphqlRequest) -> Result<GraphqlResponse, TransportError> {
        self.send(OperationKind::Query, request).await
    }

    async fn mutate(&self, request: GraphqlRequest) -> Result<GraphqlResponse, TransportError> {
        self.send(OperationKind::Mutation, request).await
    }
}

fn truncate_body(bytes: &[u8]) -> String {
    const MAX_LEN: usize = 4096;
    let mut body = String::from_utf8_lossy(bytes).to_string();
    if body.len() > MAX_LEN {
        let mut cut = MAX_LEN;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push('…');
    }
    body
}
