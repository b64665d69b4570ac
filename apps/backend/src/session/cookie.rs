//! The `afix_session` cookie: reading the token and building Set-Cookie values.

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header;
use actix_web::HttpRequest;

use crate::auth::Ttl;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "afix_session";

/// Pull the session token out of a raw `Cookie` header value.
///
/// Entries are split on `;` and then on the first `=`; keys and values are
/// trimmed. Entries without `=` are skipped. When the name repeats the last
/// entry wins. An empty value counts as absent.
pub fn extract_token(cookie_header: Option<&str>) -> Option<String> {
    cookie_header?
        .split(';')
        .filter_map(|entry| entry.split_once('='))
        .filter(|(name, _)| name.trim() == SESSION_COOKIE_NAME)
        .map(|(_, value)| value.trim())
        .last()
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Join every `Cookie` header on the request (HTTP/2 may split them).
pub fn cookie_header(req: &HttpRequest) -> Option<String> {
    let values: Vec<&str> = req
        .headers()
        .get_all(header::COOKIE)
        .filter_map(|value| value.to_str().ok())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join("; "))
    }
}

/// Session token from a request, if any.
pub fn token_from_request(req: &HttpRequest) -> Option<String> {
    extract_token(cookie_header(req).as_deref())
}

/// `HttpOnly; SameSite=Lax; Path=/` cookie living as long as the token.
pub fn session_cookie(token: String, ttl: Ttl, secure: bool) -> Cookie<'static> {
    base_cookie(token, secure)
        .max_age(CookieDuration::seconds(ttl.as_secs()))
        .finish()
}

/// Same attributes as [`session_cookie`], empty value and `Max-Age=0`.
pub fn clearing_cookie(secure: bool) -> Cookie<'static> {
    base_cookie(String::new(), secure)
        .max_age(CookieDuration::ZERO)
        .finish()
}

fn base_cookie(value: String, secure: bool) -> actix_web::cookie::CookieBuilder<'static> {
    Cookie::build(SESSION_COOKIE_NAME, value)
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(secure)
}
