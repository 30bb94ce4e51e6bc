//! JSON rendering for CLI output.

use chrono::{DateTime, Utc};
use serde_json::Value;

use userql_core::User;

pub fn render_user(user: &User, show_password: bool) -> serde_json::Result<Value> {
    if show_password {
        serde_json::to_value(user)
    } else {
        serde_json::to_value(user.redacted())
    }
}

pub fn render_users(users: &[User], show_password: bool) -> serde_json::Result<Value> {
    users
        .iter()
        .map(|user| render_user(user, show_password))
        .collect::<serde_json::Result<Vec<_>>>()
        .map(Value::Array)
}

/// Keep users whose `updatedAt` parses and is not before `since`.
/// Users with unparseable timestamps are dropped.
pub fn filter_updated_since(users: Vec<User>, since: DateTime<Utc>) -> Vec<User> {
    users
        .into_iter()
        .filter(|user| user.updated_at_utc().is_some_and(|ts| ts >= since))
        .collect()
}
