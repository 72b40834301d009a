//! User domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Public view of a user. The password hash never leaves the storage layer
/// except inside [`UserCredentials`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub color: String,
    pub created_at: NaiveDateTime,
}

/// Input model for inserting a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub color: String,
    pub password_hash: String,
}

/// A user together with the stored password hash, used for login checks.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Name/password pair submitted to register or log in.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub name: String,
    pub password: String,
}

/// Avatar text: the first two characters of the name, uppercased.
pub fn avatar_for(name: &str) -> String {
    name.chars().take(2).collect::<String>().to_uppercase()
}
