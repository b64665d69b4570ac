use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    /// Whether a signing secret is provisioned
    sessions: &'static str,
}

async fn health(app_state: web::Data<AppState>) -> HttpResponse {
    let sessions = if app_state.security.is_configured() {
        "configured"
    } else {
        "unconfigured"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        sessions,
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health));
}
