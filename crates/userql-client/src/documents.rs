//! Fixed GraphQL documents for the User API.
//!
//! Every operation selects the full `User` field set. Operation names match
//! the root field they select, which is also the key the façade reads back
//! out of `data`.

use crate::operation::OperationKind;

/// A fixed operation: its document, name, and kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub kind: OperationKind,
    pub document: &'static str,
}

/// Selection set shared by every operation.
pub const USER_FIELDS: &[&str] = &["id", "name", "email", "password", "createdAt", "updatedAt"];

pub const CREATE_USER: Operation = Operation {
    name: "createUser",
    kind: OperationKind::Mutation,
    document: "mutation createUser($name: String!, $email: String!, $password: String!) {
  createUser(name: $name, email: $email, password: $password) {
    id
    name
    email
    password
    createdAt
    updatedAt
  }
}",
};

pub const DELETE_USER: Operation = Operation {
    name: "deleteUser",
    kind: OperationKind::Mutation,
    document: "mutation deleteUser($id: ID!) {
  deleteUser(id: $id) {
    id
    name
    email
    password
    createdAt
    updatedAt
  }
}",
};

pub const UPDATE_USER: Operation = Operation {
    name: "updateUser",
    kind: OperationKind::Mutation,
    document: "mutation updateUser($id: ID!, $name: String, $email: String, $password: String) {
  updateUser(id: $id, name: $name, email: $email, password: $password) {
    id
    name
    email
    password
    createdAt
    updatedAt
  }
}",
};

pub const USER: Operation = Operation {
    name: "user",
    kind: OperationKind::Query,
    document: "query user($id: ID!) {
  user(id: $id) {
    id
    name
    email
    password
    createdAt
    updatedAt
  }
}",
};

pub const USERS: Operation = Operation {
    name: "users",
    kind: OperationKind::Query,
    document: "query users {
  users {
    id
    name
    email
    password
    createdAt
    updatedAt
  }
}",
};

/// All operations, queries first.
pub const ALL: &[Operation] = &[USER, USERS, CREATE_USER, DELETE_USER, UPDATE_USER];
