use std::sync::Arc;
use std::time::SystemTime;

use actix_web::HttpRequest;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::cookie::{cookie_header, extract_token};
use crate::auth::{AuthError, Claims, TokenCodec};
use crate::identity::{IdentityStore, UserRecord};
use crate::state::security_config::SecurityConfig;

/// An authenticated principal as seen by route handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
}

impl From<UserRecord> for Identity {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            role_id: user.role_id,
        }
    }
}

/// Maps inbound requests to identities.
///
/// Token failures of any kind and identity store failures all come back as
/// `Ok(None)`. Only a missing signing secret is returned as an error.
#[derive(Clone)]
pub struct SessionResolver {
    codec: Option<TokenCodec>,
    store: Arc<dyn IdentityStore>,
}

impl SessionResolver {
    pub fn new(security: &SecurityConfig, store: Arc<dyn IdentityStore>) -> Self {
        Self {
            codec: security.codec().ok().cloned(),
            store,
        }
    }

    /// Resolve the identity behind a request's session cookie.
    pub async fn resolve_request(
        &self,
        req: &HttpRequest,
    ) -> Result<Option<Identity>, AuthError> {
        self.resolve_identity(cookie_header(req).as_deref()).await
    }

    pub async fn resolve_identity(
        &self,
        cookie_header: Option<&str>,
    ) -> Result<Option<Identity>, AuthError> {
        self.resolve_identity_at(cookie_header, SystemTime::now())
            .await
    }

    pub async fn resolve_identity_at(
        &self,
        cookie_header: Option<&str>,
        now: SystemTime,
    ) -> Result<Option<Identity>, AuthError> {
        let Some(token) = extract_token(cookie_header) else {
            return Ok(None);
        };

        let Some(claims) = self.verify(&token, now)? else {
            return Ok(None);
        };

        let user = match self.store.find_user(&claims.sub).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!(sub = %claims.sub, "session subject not found");
                return Ok(None);
            }
            Err(e) => {
                warn!(sub = %claims.sub, error = %e, "identity lookup failed");
                return Ok(None);
            }
        };

        Ok(Some(self.with_role_name(user).await))
    }

    /// Verify a token, collapsing rejections into `None`.
    fn verify(&self, token: &str, now: SystemTime) -> Result<Option<Claims>, AuthError> {
        let codec = self
            .codec
            .as_ref()
            .ok_or_else(|| AuthError::configuration("JWT_SECRET is not configured"))?;

        match codec.verify_at(token, now) {
            Ok(claims) => Ok(Some(claims)),
            Err(e) if e.is_token_rejection() => {
                debug!(reason = e.kind(), "session token rejected");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Fill in `role` from `role_id` when the record lacks a name.
    /// A failed or empty role lookup leaves `role` unset.
    async fn with_role_name(&self, user: UserRecord) -> Identity {
        let mut identity = Identity::from(user);
        if identity.role.is_some() {
            return identity;
        }
        let Some(role_id) = identity.role_id else {
            return identity;
        };

        match self.store.find_role(role_id).await {
            Ok(Some(role)) => identity.role = Some(role.name),
            Ok(None) => debug!(role_id, "role not found"),
            Err(e) => warn!(role_id, error = %e, "role lookup failed"),
        }
        identity
    }
}
