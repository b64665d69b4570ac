#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod identity;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::{AuthError, Claims, NewClaims, TokenCodec, Ttl};
pub use error::AppError;
pub use extractors::current_user::CurrentUser;
pub use identity::{IdentityStore, InMemoryIdentityStore, RestIdentityStore};
pub use middleware::request_trace::RequestTrace;
pub use session::{Identity, SessionResolver};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    afix_test_support::logging::init();
}
