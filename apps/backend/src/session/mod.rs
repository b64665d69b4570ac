//! Request-to-identity resolution over the session cookie.

pub mod cookie;
pub mod resolver;

pub use cookie::{
    clearing_cookie, extract_token, session_cookie, token_from_request, SESSION_COOKIE_NAME,
};
pub use resolver::{Identity, SessionResolver};
