//! Write operations for the User API.
//!
//! The server assigns ids and timestamps; each mutation returns the user as
//! the server sees it after the write. `delete_user` returns the last-known
//! snapshot of the removed user.

use serde::Serialize;

use userql_core::{NewUser, User, UserId, UserPatch};

use crate::documents;
use crate::facade::{Result, UserFacade};

#[derive(Serialize)]
struct IdVariables<'a> {
    id: &'a UserId,
}

#[derive(Serialize)]
struct UpdateVariables<'a> {
    id: &'a UserId,
    #[serde(flatten)]
    patch: &'a UserPatch,
}

/// The `mutation` namespace: `create_user`, `delete_user`, `update_user`.
#[derive(Debug, Clone, Copy)]
pub struct UserMutations<'a> {
    facade: &'a UserFacade,
}

impl<'a> UserMutations<'a> {
    pub(crate) fn new(facade: &'a UserFacade) -> Self {
        Self { facade }
    }

    /// Create a user.
    pub async fn create_user(&self, input: &NewUser) -> Result<User> {
        self.facade.dispatch(&documents::CREATE_USER, input).await
    }

    /// Delete a user, returning its last-known representation.
    pub async fn delete_user(&self, id: impl Into<UserId>) -> Result<User> {
        let id = id.into();
        self.facade
            .dispatch(&documents::DELETE_USER, &IdVariables { id: &id })
            .await
    }

    /// Update a user. Fields left `None` in `patch` are not sent.
    pub async fn update_user(&self, id: impl Into<UserId>, patch: &UserPatch) -> Result<User> {
        let id = id.into();
        if patch.is_empty() {
            tracing::debug!(id = %id, "updateUser called with an empty patch");
        }
        self.facade
            .dispatch(
                &documents::UPDATE_USER,
                &UpdateVariables { id: &id, patch },
            )
            .await
    }
}
