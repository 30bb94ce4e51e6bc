//! Façade behavior against an in-process GraphQL client.
//!
//! The mock client records every request and answers through a closure, so
//! each test controls exactly what the façade sees.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use userql_client::documents;
use userql_client::{
    FacadeError, GraphqlClient, GraphqlError, GraphqlRequest, GraphqlResponse, NewUser,
    OperationKind, TransportError, User, UserFacade, UserId, UserPatch,
};

type Responder =
    dyn Fn(OperationKind, &GraphqlRequest) -> Result<GraphqlResponse, TransportError> + Send + Sync;

struct MockClient {
    calls: Mutex<Vec<(OperationKind, GraphqlRequest)>>,
    respond: Box<Responder>,
}

impl MockClient {
    fn new<F>(respond: F) -> Arc<Self>
    where
        F: Fn(OperationKind, &GraphqlRequest) -> Result<GraphqlResponse, TransportError>
            + Send
            + Sync
            + 'static,
    {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        })
    }

    fn calls(&self) -> Vec<(OperationKind, GraphqlRequest)> {
        self.calls.lock().unwrap().clone()
    }

    fn handle(
        &self,
        kind: OperationKind,
        request: GraphqlRequest,
    ) -> Result<GraphqlResponse, TransportError> {
        let result = (self.respond)(kind, &request);
        self.calls.lock().unwrap().push((kind, request));
        result
    }
}

#[async_trait]
impl GraphqlClient for MockClient {
    async fn query(&self, request: GraphqlRequest) -> Result<GraphqlResponse, TransportError> {
        self.handle(OperationKind::Query, request)
    }

    async fn mutate(&self, request: GraphqlRequest) -> Result<GraphqlResponse, TransportError> {
        self.handle(OperationKind::Mutation, request)
    }
}

fn facade(client: &Arc<MockClient>) -> UserFacade {
    UserFacade::new(client.clone())
}

fn user_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "X",
        "email": "x@x",
        "password": "p",
        "createdAt": "t1",
        "updatedAt": "t1"
    })
}

fn operation_name(request: &GraphqlRequest) -> &str {
    request.operation_name.as_deref().unwrap_or_default()
}

/// Run all five operations and collect their results as `Result<(), _>`.
async fn run_all(api: &UserFacade) -> Vec<(&'static str, Result<(), FacadeError>)> {
    vec![
        (
            "createUser",
            api.mutation()
                .create_user(&NewUser::new("a", "b", "c"))
                .await
                .map(|_| ()),
        ),
        (
            "deleteUser",
            api.mutation().delete_user("42").await.map(|_| ()),
        ),
        (
            "updateUser",
            api.mutation()
                .update_user("42", &UserPatch::all("a", "b", "c"))
                .await
                .map(|_| ()),
        ),
        ("user", api.query().user("42").await.map(|_| ())),
        ("users", api.query().users().await.map(|_| ())),
    ]
}

// ── Classification ───────────────────────────────────────────────

#[tokio::test]
async fn test_transport_failure_is_returned_as_error() {
    let client = MockClient::new(|_, _| Err(TransportError::custom("connection refused")));
    let api = facade(&client);

    for (name, result) in run_all(&api).await {
        match result {
            Err(FacadeError::Transport(TransportError::Custom(cause))) => {
                assert_eq!(cause.to_string(), "connection refused", "{name}");
            }
            other => panic!("{name}: expected transport error, got {other:?}"),
        }
    }
    assert_eq!(client.calls().len(), 5);
}

#[tokio::test]
async fn test_server_errors_win_even_with_data() {
    let client = MockClient::new(|_, request| {
        let field = request.operation_name.clone().unwrap_or_default();
        Ok(GraphqlResponse {
            data: Some(json!({ field: user_json("1") })),
            errors: vec![GraphqlError::new("User not found")],
            extensions: None,
        })
    });
    let api = facade(&client);

    for (name, result) in run_all(&api).await {
        match result {
            Err(FacadeError::Server(errors)) => {
                assert_eq!(errors.len(), 1, "{name}");
                assert_eq!(errors[0].message, "User not found", "{name}");
            }
            other => panic!("{name}: expected server errors, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_missing_field_is_malformed() {
    let client = MockClient::new(|_, _| Ok(GraphqlResponse::from_data(json!({ "other": 1 }))));
    let api = facade(&client);

    for (name, result) in run_all(&api).await {
        match result {
            Err(FacadeError::MalformedResponse { operation, .. }) => assert_eq!(operation, name),
            other => panic!("{name}: expected malformed response, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_missing_data_is_malformed() {
    let client = MockClient::new(|_, _| Ok(GraphqlResponse::default()));
    let api = facade(&client);

    for (name, result) in run_all(&api).await {
        let err = result.expect_err(name);
        assert!(
            err.to_string().contains("invalid response structure"),
            "{name}: {err}"
        );
    }
}

#[tokio::test]
async fn test_null_user_is_malformed() {
    let client = MockClient::new(|_, _| Ok(GraphqlResponse::from_data(json!({ "user": null }))));
    let api = facade(&client);

    let err = api.query().user("missing").await.unwrap_err();
    assert_eq!(err.kind(), "malformed_response");
}

// ── Success paths ────────────────────────────────────────────────

#[tokio::test]
async fn test_create_user_echo_round_trip() {
    let client = MockClient::new(|_, request| {
        let vars = &request.variables;
        Ok(GraphqlResponse::from_data(json!({
            "createUser": {
                "id": "new-id",
                "name": vars["name"],
                "email": vars["email"],
                "password": vars["password"],
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-01T00:00:00Z"
            }
        })))
    });
    let api = facade(&client);

    let user = api
        .mutation()
        .create_user(&NewUser::new("a", "b", "c"))
        .await
        .unwrap();

    assert_eq!(user.name, "a");
    assert_eq!(user.email, "b");
    assert_eq!(user.password, "c");
    assert_eq!(user.id, UserId::new("new-id"));
    assert!(user.created_at_utc().is_some());
}

#[tokio::test]
async fn test_users_empty_list_is_ok() {
    let client = MockClient::new(|_, _| Ok(GraphqlResponse::from_data(json!({ "users": [] }))));
    let api = facade(&client);

    let users = api.query().users().await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_users_returns_every_entry() {
    let client = MockClient::new(|_, _| {
        Ok(GraphqlResponse::from_data(json!({
            "users": [user_json("1"), user_json("2")]
        })))
    });
    let api = facade(&client);

    let ids: Vec<String> = api
        .query()
        .users()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.id.0)
        .collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[tokio::test]
async fn test_delete_user_returns_snapshot() {
    let client = MockClient::new(|kind, _| {
        assert_eq!(kind, OperationKind::Mutation);
        Ok(GraphqlResponse::from_data(json!({ "deleteUser": user_json("42") })))
    });
    let api = facade(&client);

    let user = api.mutation().delete_user("42").await.unwrap();
    let expected: User = serde_json::from_value(user_json("42")).unwrap();
    assert_eq!(user, expected);
    assert_eq!(serde_json::to_value(&user).unwrap(), user_json("42"));
}

// ── Request shape ────────────────────────────────────────────────

#[tokio::test]
async fn test_reads_query_and_writes_mutate() {
    let client = MockClient::new(|_, _| Err(TransportError::custom("offline")));
    let api = facade(&client);
    let _ = run_all(&api).await;

    let calls = client.calls();
    let kinds: Vec<(&str, OperationKind)> = calls
        .iter()
        .map(|(kind, req)| (operation_name(req), *kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("createUser", OperationKind::Mutation),
            ("deleteUser", OperationKind::Mutation),
            ("updateUser", OperationKind::Mutation),
            ("user", OperationKind::Query),
            ("users", OperationKind::Query),
        ]
    );

    for (_, request) in &calls {
        let op = documents::ALL
            .iter()
            .find(|op| op.name == operation_name(request))
            .unwrap();
        assert_eq!(request.query, op.document);
    }
}

#[tokio::test]
async fn test_variables_per_operation() {
    let client = MockClient::new(|_, _| Err(TransportError::custom("offline")));
    let api = facade(&client);

    let _ = api
        .mutation()
        .create_user(&NewUser::new("a", "b", "c"))
        .await;
    let _ = api.mutation().delete_user("42").await;
    let _ = api.query().user(UserId::new("7")).await;
    let _ = api.query().users().await;

    let vars: Vec<Value> = client
        .calls()
        .into_iter()
        .map(|(_, req)| req.variables)
        .collect();
    assert_eq!(vars[0], json!({ "name": "a", "email": "b", "password": "c" }));
    assert_eq!(vars[1], json!({ "id": "42" }));
    assert_eq!(vars[2], json!({ "id": "7" }));
    assert_eq!(vars[3], json!({}));
}

#[tokio::test]
async fn test_update_sends_only_set_fields() {
    let client = MockClient::new(|_, request| {
        Ok(GraphqlResponse::from_data(json!({
            "updateUser": {
                "id": request.variables["id"],
                "name": "X",
                "email": request.variables["email"],
                "password": "p",
                "createdAt": "t1",
                "updatedAt": "t2"
            }
        })))
    });
    let api = facade(&client);

    let patch = UserPatch::default().email("new@x");
    let user = api.mutation().update_user("42", &patch).await.unwrap();
    assert_eq!(user.email, "new@x");
    assert_eq!(user.updated_at, "t2");

    let (_, request) = client.calls().pop().unwrap();
    assert_eq!(request.variables, json!({ "id": "42", "email": "new@x" }));
}

// ── Concurrency ──────────────────────────────────────────────────

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let client = MockClient::new(|_, request| {
        let id = request.variables["id"].clone();
        Ok(GraphqlResponse::from_data(json!({
            "user": {
                "id": id,
                "name": "X",
                "email": "x@x",
                "password": "p",
                "createdAt": "t1",
                "updatedAt": "t1"
            }
        })))
    });
    let api = facade(&client);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let api = api.clone();
            tokio::spawn(async move { api.query().user(i.to_string()).await })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let user = handle.await.unwrap().unwrap();
        assert_eq!(user.id.0, i.to_string());
    }
    assert_eq!(client.calls().len(), 8);
}
