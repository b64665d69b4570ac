use std::env;

use crate::auth::{AuthError, TokenCodec, Ttl};
use crate::config::RuntimeEnv;

/// Session token settings, loaded once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// `None` when no signing secret was provisioned
    codec: Option<TokenCodec>,
    /// Lifetime of issued tokens and of the session cookie
    pub session_ttl: Ttl,
    /// Whether session cookies carry the `Secure` attribute
    pub secure_cookies: bool,
}

impl SecurityConfig {
    /// Create a config with the given signing secret and a seven day ttl.
    ///
    /// An empty secret leaves signing unavailable, same as a missing one.
    pub fn new(jwt_secret: impl AsRef<[u8]>) -> Self {
        Self {
            codec: TokenCodec::new(jwt_secret).ok(),
            session_ttl: Ttl::default(),
            secure_cookies: false,
        }
    }

    /// A config with no secret; every sign/verify reports a configuration error.
    pub fn unconfigured() -> Self {
        Self {
            codec: None,
            session_ttl: Ttl::default(),
            secure_cookies: false,
        }
    }

    /// Read `JWT_SECRET` and `SESSION_TTL` (lenient, default `7d`).
    pub fn from_env(runtime: RuntimeEnv) -> Self {
        let base = match env::var("JWT_SECRET") {
            Ok(secret) => Self::new(secret.as_bytes()),
            Err(_) => Self::unconfigured(),
        };

        let ttl = env::var("SESSION_TTL")
            .map(|value| Ttl::parse_lenient(value.trim()))
            .unwrap_or_default();

        base.with_session_ttl(ttl)
            .with_secure_cookies(runtime.secure_cookies())
    }

    pub fn with_session_ttl(mut self, ttl: Ttl) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.codec.is_some()
    }

    /// The codec, or a configuration error when no secret is provisioned.
    pub fn codec(&self) -> Result<&TokenCodec, AuthError> {
        self.codec
            .as_ref()
            .ok_or_else(|| AuthError::configuration("JWT_SECRET is not configured"))
    }
}
