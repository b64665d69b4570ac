use std::fmt;
use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::config::RuntimeEnv;
use crate::identity::IdentityStore;
use crate::session::SessionResolver;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub env: RuntimeEnv,
    /// Session token settings
    pub security: SecurityConfig,
    /// Users and roles
    pub identity: Arc<dyn IdentityStore>,
    pub sessions: SessionResolver,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("env", &self.env)
            .field("security", &self.security)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        env: RuntimeEnv,
        security: SecurityConfig,
        identity: Arc<dyn IdentityStore>,
    ) -> Self {
        let sessions = SessionResolver::new(&security, identity.clone());
        Self {
            env,
            security,
            identity,
            sessions,
        }
    }
}
