//! Read operations for the User API.

use serde::Serialize;

use userql_core::{User, UserId};

use crate::documents;
use crate::facade::{Result, UserFacade};

#[derive(Serialize)]
struct IdVariables<'a> {
    id: &'a UserId,
}

/// The `query` namespace: `user` and `users`.
#[derive(Debug, Clone, Copy)]
pub struct UserQueries<'a> {
    facade: &'a UserFacade,
}

impl<'a> UserQueries<'a> {
    pub(crate) fn new(facade: &'a UserFacade) -> Self {
        Self { facade }
    }

    /// Get a user by id.
    pub async fn user(&self, id: impl Into<UserId>) -> Result<User> {
        let id = id.into();
        self.facade
            .dispatch(&documents::USER, &IdVariables { id: &id })
            .await
    }

    /// List all users. An empty list is a success, not an error.
    pub async fn users(&self) -> Result<Vec<User>> {
        self.facade
            .dispatch(&documents::USERS, &serde_json::Map::new())
            .await
    }
}
