//! Runtime environment detection.

use std::env;

/// Which kind of deployment the process is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeEnv {
    Prod,
    #[default]
    Dev,
    Test,
}

impl RuntimeEnv {
    /// Read `APP_ENV` (`production`/`prod`, `test`, anything else is dev).
    pub fn from_env() -> Self {
        Self::parse(&env::var("APP_ENV").unwrap_or_default())
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => RuntimeEnv::Prod,
            "test" => RuntimeEnv::Test,
            _ => RuntimeEnv::Dev,
        }
    }

    /// Session cookies carry `Secure` only in production.
    pub fn secure_cookies(&self) -> bool {
        matches!(self, RuntimeEnv::Prod)
    }
}
