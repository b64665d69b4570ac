//! Identity store backed by a PostgREST-style HTTP API (`/rest/v1/<table>`).

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

use super::{normalize_email, CredentialRecord, IdentityStore, RoleRecord, StoreError, UserRecord};
use crate::config::StoreConfig;

const USER_COLUMNS: &str = "id,email,full_name,role,role_id";
const ROLE_COLUMNS: &str = "role_id,name";

#[derive(Debug, Clone)]
pub struct RestIdentityStore {
    client: Client,
    config: StoreConfig,
}

#[derive(Deserialize)]
struct CredentialRow {
    #[serde(flatten)]
    user: UserRecord,
    #[serde(default)]
    password_hash: Option<String>,
}

impl RestIdentityStore {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, table)
    }

    fn get(&self, table: &str) -> RequestBuilder {
        self.client
            .get(self.table_url(table))
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
            .header("Accept", "application/json")
    }

    /// Run a single-row select: `?select=..&<column>=eq.<value>&limit=1`.
    async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        columns: &str,
        column: &str,
        value: &str,
    ) -> Result<Option<T>, StoreError> {
        let filter = eq_filter(value);
        let response = self
            .get(table)
            .query(&[("select", columns), (column, filter.as_str()), ("limit", "1")])
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let mut rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }
}

/// PostgREST equality filter. Reserved characters are quoted so a value
/// cannot smuggle additional operators.
fn eq_filter(value: &str) -> String {
    if value
        .chars()
        .any(|c| matches!(c, ',' | '.' | ':' | '(' | ')' | '"' | '\\' | ' '))
    {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("eq.\"{escaped}\"")
    } else {
        format!("eq.{value}")
    }
}

#[async_trait]
impl IdentityStore for RestIdentityStore {
    async fn find_user(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        self.select_one("users", USER_COLUMNS, "id", id).await
    }

    async fn find_role(&self, role_id: i64) -> Result<Option<RoleRecord>, StoreError> {
        self.select_one("roles", ROLE_COLUMNS, "role_id", &role_id.to_string())
            .await
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<CredentialRecord>, StoreError> {
        let columns = format!("{USER_COLUMNS},password_hash");
        let row: Option<CredentialRow> = self
            .select_one("users", &columns, "email", &normalize_email(email))
            .await?;

        Ok(row.and_then(|row| match row.password_hash {
            Some(password_hash) => Some(CredentialRecord {
                user: row.user,
                password_hash,
            }),
            None => {
                warn!(user_id = %row.user.id, "user has no password hash");
                None
            }
        }))
    }
}
