//! The user API façade: dispatch and response classification.
//!
//! Every operation follows the same path. The request is sent through the
//! injected [`GraphqlClient`], and the outcome is classified in fixed order:
//! transport failure, then server-reported errors, then a missing or
//! undecodable root field, then success. Nothing escapes except as `Err`.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::Instrument;

use userql_core::GraphqlSettings;

use crate::client::{GraphqlClient, HttpClientConfig, HttpGraphqlClient, TransportError};
use crate::documents::Operation;
use crate::mutations::UserMutations;
use crate::operation::{GraphqlError, GraphqlRequest, GraphqlResponse, OperationKind};
use crate::queries::UserQueries;

/// Errors returned by every façade operation.
#[derive(Debug, thiserror::Error)]
pub enum FacadeError {
    /// The server returned a non-empty `errors` collection.
    #[error("GraphQL errors: {}", join_messages(.0))]
    Server(Vec<GraphqlError>),

    /// `data` or the expected root field was missing, null, or the wrong shape.
    #[error("invalid response structure for {operation}: {reason}")]
    MalformedResponse {
        operation: &'static str,
        reason: String,
    },

    /// The client failed before a GraphQL response was available.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl FacadeError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Server(_) => "server",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::Transport(_) => "transport",
        }
    }

    /// Server-reported errors, if that is what this is.
    pub fn server_errors(&self) -> Option<&[GraphqlError]> {
        match self {
            Self::Server(errors) => Some(errors),
            _ => None,
        }
    }
}

fn join_messages(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, FacadeError>;

/// Typed access to the User API over an injected GraphQL client.
///
/// Holds no state besides the client handle. Clone is cheap (inner Arc) and
/// clones may be used concurrently.
#[derive(Clone)]
pub struct UserFacade {
    client: Arc<dyn GraphqlClient>,
}

impl UserFacade {
    pub fn new(client: Arc<dyn GraphqlClient>) -> Self {
        Self { client }
    }

    pub fn from_client<C: GraphqlClient + 'static>(client: C) -> Self {
        Self::new(Arc::new(client))
    }

    /// Build a façade over an HTTP client configured from settings.
    pub fn connect(settings: &GraphqlSettings) -> std::result::Result<Self, TransportError> {
        let client = HttpGraphqlClient::new(HttpClientConfig::from_settings(settings)?)?;
        tracing::info!(endpoint = %client.endpoint(), "User API client ready");
        Ok(Self::from_client(client))
    }

    /// Read operations: `user`, `users`.
    pub fn query(&self) -> UserQueries<'_> {
        UserQueries::new(self)
    }

    /// Write operations: `create_user`, `delete_user`, `update_user`.
    pub fn mutation(&self) -> UserMutations<'_> {
        UserMutations::new(self)
    }

    /// Send `op` with `variables` and decode the root field named after it.
    pub(crate) async fn dispatch<V, T>(&self, op: &Operation, variables: &V) -> Result<T>
    where
        V: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let span = tracing::debug_span!("graphql", operation = op.name, kind = op.kind.as_str());
        async {
            let result = match self.send(op, variables).await {
                Ok(response) => classify(op.name, response),
                Err(err) => Err(FacadeError::Transport(err)),
            };
            match &result {
                Ok(_) => tracing::debug!("GraphQL operation succeeded"),
                Err(err) => tracing::warn!(error = %err, kind = err.kind(), "GraphQL operation failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn send<V>(
        &self,
        op: &Operation,
        variables: &V,
    ) -> std::result::Result<GraphqlResponse, TransportError>
    where
        V: Serialize + ?Sized,
    {
        let variables = serde_json::to_value(variables)?;
        let request = GraphqlRequest::new(op.document, variables).with_operation_name(op.name);
        match op.kind {
            OperationKind::Query => self.client.query(request).await,
            OperationKind::Mutation => self.client.mutate(request).await,
        }
    }
}

impl std::fmt::Debug for UserFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserFacade").finish_non_exhaustive()
    }
}

/// Classify a received response for the root field `field`.
pub fn classify<T: DeserializeOwned>(field: &'static str, response: GraphqlResponse) -> Result<T> {
    if !response.errors.is_empty() {
        return Err(FacadeError::Server(response.errors));
    }

    let data = match response.data {
        Some(serde_json::Value::Object(map)) => map,
        Some(serde_json::Value::Null) | None => {
            return Err(malformed(field, "response has no data"));
        }
        Some(_) => return Err(malformed(field, "data is not an object")),
    };

    let value = match data.get(field) {
        Some(serde_json::Value::Null) | None => {
            return Err(malformed(field, format!("data has no `{field}` field")));
        }
        Some(value) => value,
    };

    T::deserialize(value).map_err(|e| malformed(field, format!("`{field}` has the wrong shape: {e}")))
}

fn malformed(operation: &'static str, reason: impl Into<String>) -> FacadeError {
    FacadeError::MalformedResponse {
        operation,
        reason: reason.into(),
    }
}
