#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use afix_backend::config::RuntimeEnv;
use afix_backend::identity::{InMemoryIdentityStore, UserRecord};
use afix_backend::session::SESSION_COOKIE_NAME;
use afix_backend::{AppState, SecurityConfig};
use afix_test_support::unique_helpers::{unique_email, unique_str};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    afix_test_support::logging::init();
}

pub const PASSWORD: &str = "correct-horse-battery";

/// Build the full app around `state`, the way `main.rs` does.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(afix_backend::RequestTrace)
                .app_data(actix_web::web::Data::new($state))
                .configure(afix_backend::routes::configure),
        )
        .await
    };
}
pub(crate) use test_app;

/// State with a configured secret and an in-memory store the test can seed.
pub fn seeded_state(secret: &str) -> (AppState, Arc<InMemoryIdentityStore>) {
    state_with(SecurityConfig::new(secret))
}

pub fn state_with(security: SecurityConfig) -> (AppState, Arc<InMemoryIdentityStore>) {
    let store = Arc::new(InMemoryIdentityStore::new());
    let state = AppState::new(RuntimeEnv::Test, security, store.clone());
    (state, store)
}

/// Insert a user with a unique id/email and [`PASSWORD`].
pub fn seed_user(
    store: &InMemoryIdentityStore,
    role: Option<&str>,
    role_id: Option<i64>,
) -> UserRecord {
    let user = UserRecord {
        id: unique_str("user"),
        email: unique_email("client"),
        full_name: Some("Maria Lima".to_string()),
        role: role.map(str::to_string),
        role_id,
    };
    store.insert_user(user.clone(), PASSWORD);
    user
}

/// The session cookie set on a response, if any.
pub fn session_cookie_of<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .filter_map(|value| value.to_str().ok())
        .filter_map(|raw| Cookie::parse(raw.to_string()).ok())
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
}
