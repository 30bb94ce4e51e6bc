//! userql-client: typed access to the User GraphQL API.
//!
//! Each operation sends a fixed document through an injected
//! [`GraphqlClient`] and returns `Result<T, FacadeError>`. Reads live under
//! [`UserFacade::query`], writes under [`UserFacade::mutation`].

pub mod client;
pub mod documents;
pub mod facade;
pub mod mutations;
pub mod operation;
pub mod queries;

pub use client::{GraphqlClient, HttpClientConfig, HttpGraphqlClient, TransportError};
pub use facade::{FacadeError, UserFacade};
pub use mutations::UserMutations;
pub use operation::{
    GraphqlError, GraphqlErrorLocation, GraphqlPathSegment, GraphqlRequest, GraphqlResponse,
    OperationKind,
};
pub use queries::UserQueries;
pub use userql_core::{NewUser, User, UserId, UserPatch};
