use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use afix_backend::config::{RuntimeEnv, StoreConfig};
use afix_backend::identity::{IdentityStore, InMemoryIdentityStore, RestIdentityStore};
use afix_backend::middleware::RequestTrace;
use afix_backend::routes;
use afix_backend::state::{AppState, SecurityConfig};
use afix_backend::telemetry;
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let runtime = RuntimeEnv::from_env();
    telemetry::init_tracing(runtime);

    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(_) => {
            error!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let security = SecurityConfig::from_env(runtime);
    if !security.is_configured() {
        // Keep serving: session routes answer 500 CONFIG_ERROR until fixed.
        error!("JWT_SECRET is not set; sessions cannot be issued or verified");
    }

    let identity: Arc<dyn IdentityStore> = match StoreConfig::from_env() {
        Some(config) => match RestIdentityStore::new(config) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                error!(error = %e, "failed to build identity store client");
                std::process::exit(1);
            }
        },
        None => {
            warn!("IDENTITY_STORE_URL/IDENTITY_STORE_KEY not set; using an empty in-memory store");
            Arc::new(InMemoryIdentityStore::new())
        }
    };

    let data = web::Data::new(AppState::new(runtime, security, identity));

    info!(%host, port, env = ?runtime, "starting afix backend");

    HttpServer::new(move || {
        App::new()
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
