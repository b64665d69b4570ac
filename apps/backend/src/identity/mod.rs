//! User and role lookups behind the session layer.
//!
//! The backing store is remote and fallible. Callers on the session path
//! treat every [`StoreError`] as "not authenticated".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod memory;
pub mod password;
pub mod rest;

pub use memory::InMemoryIdentityStore;
pub use rest::RestIdentityStore;

/// A row of the `users` table as exposed to the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    /// Human-readable role, when the row carries one directly
    #[serde(default)]
    pub role: Option<String>,
    /// Reference into the `roles` table
    #[serde(default)]
    pub role_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub role_id: i64,
    pub name: String,
}

/// A user together with their stored password hash.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub user: UserRecord,
    pub password_hash: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("identity store unreachable: {0}")]
    Transport(String),
    #[error("identity store returned {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("identity store response could not be decoded: {0}")]
    Decode(String),
}

#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Look up a user by id (the token `sub`).
    async fn find_user(&self, id: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Resolve a role reference to its display name.
    async fn find_role(&self, role_id: i64) -> Result<Option<RoleRecord>, StoreError>;

    /// Look up a user and password hash by normalized email.
    async fn find_credentials(&self, email: &str)
        -> Result<Option<CredentialRecord>, StoreError>;
}

/// Trim and lowercase an email for lookups.
pub fn normalize_email(email: &str) -> String {
    use unicode_normalization::UnicodeNormalization;

    email.trim().nfkc().collect::<String>().to_lowercase()
}
