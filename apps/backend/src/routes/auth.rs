use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::NewClaims;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::identity::password::verify_password;
use crate::identity::UserRecord;
use crate::logging::security;
use crate::session::{clearing_cookie, session_cookie, Identity};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// The slice of the user echoed back on login.
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    ok: bool,
    user: SessionUser,
}

#[derive(Debug, Serialize)]
struct MeResponse {
    ok: bool,
    user: Identity,
}

#[derive(Debug, Serialize)]
struct OkResponse {
    ok: bool,
}

/// Check credentials, issue a session token and set it as the session cookie.
async fn login(
    req: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::bad_request(
            "INVALID_CREDENTIALS_PAYLOAD",
            "Email and password are required",
        ));
    }

    // Refuse before touching the store: nobody can log in without a secret.
    let codec = app_state.security.codec()?;

    let credentials = app_state
        .identity
        .find_credentials(&req.email)
        .await
        .map_err(|e| {
            warn!(error = %e, "credential lookup failed");
            AppError::from(e)
        })?;

    let Some(credentials) = credentials else {
        security::login_failed("unknown_email", Some(&req.email));
        return Err(AppError::invalid_credentials());
    };

    // bcrypt takes tens of milliseconds; keep it off the worker thread.
    let password = req.password.clone();
    let stored = credentials.password_hash.clone();
    let matched = web::block(move || verify_password(&password, &stored))
        .await
        .map_err(|e| AppError::internal(format!("password check aborted: {e}")))?;

    if !matched {
        security::login_failed("password_mismatch", Some(&req.email));
        return Err(AppError::invalid_credentials());
    }

    let user = credentials.user;
    let token = codec.sign_for(
        session_claims(&user),
        app_state.security.session_ttl,
        SystemTime::now(),
    )?;

    security::login_succeeded(&user.id);

    let cookie = session_cookie(
        token,
        app_state.security.session_ttl,
        app_state.security.secure_cookies,
    );

    Ok(HttpResponse::Ok().cookie(cookie).json(LoginResponse {
        ok: true,
        user: SessionUser {
            id: user.id,
            email: user.email,
            role: user.role,
        },
    }))
}

fn session_claims(user: &UserRecord) -> NewClaims {
    let claims = NewClaims::new(user.id.clone()).with("email", user.email.clone());
    match &user.role {
        Some(role) => claims.with("role", role.clone()),
        None => claims,
    }
}

/// Clear the session cookie. Always succeeds.
async fn logout(app_state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(clearing_cookie(app_state.security.secure_cookies))
        .json(OkResponse { ok: true })
}

async fn me(current_user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(MeResponse {
        ok: true,
        user: current_user.0,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login)))
        .service(web::resource("/logout").route(web::post().to(logout)))
        .service(web::resource("/me").route(web::get().to(me)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_claims_carry_email_and_role() {
        let user = UserRecord {
            id: "u1".to_string(),
            email: "a@b.com".to_string(),
            full_name: None,
            role: Some("admin".to_string()),
            role_id: None,
        };
        let claims = session_claims(&user);
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.extra["email"], "a@b.com");
        assert_eq!(claims.extra["role"], "admin");
    }

    #[test]
    fn test_session_claims_without_role() {
        let user = UserRecord {
            id: "u2".to_string(),
            email: "c@d.com".to_string(),
            full_name: None,
            role: None,
            role_id: Some(4),
        };
        let claims = session_claims(&user);
        assert!(!claims.extra.contains_key("role"));
    }
}
