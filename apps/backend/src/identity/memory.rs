use async_trait::async_trait;
use dashmap::DashMap;

use super::password::hash_password;
use super::{normalize_email, CredentialRecord, IdentityStore, RoleRecord, StoreError, UserRecord};

/// Process-local identity store for development and tests.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    users: DashMap<String, CredentialRecord>,
    roles: DashMap<i64, String>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user; the email is normalized and the password hashed.
    pub fn insert_user(&self, mut user: UserRecord, password: &str) {
        user.email = normalize_email(&user.email);
        let record = CredentialRecord {
            password_hash: hash_password(password),
            user,
        };
        self.users.insert(record.user.id.clone(), record);
    }

    pub fn insert_role(&self, role_id: i64, name: impl Into<String>) {
        self.roles.insert(role_id, name.into());
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn find_user(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.get(id).map(|entry| entry.user.clone()))
    }

    async fn find_role(&self, role_id: i64) -> Result<Option<RoleRecord>, StoreError> {
        Ok(self.roles.get(&role_id).map(|name| RoleRecord {
            role_id,
            name: name.clone(),
        }))
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<CredentialRecord>, StoreError> {
        let email = normalize_email(email);
        Ok(self
            .users
            .iter()
            .find(|entry| entry.user.email == email)
            .map(|entry| entry.value().clone()))
    }
}
