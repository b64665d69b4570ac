use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use crate::error::AppError;
use crate::session::Identity;
use crate::state::app_state::AppState;

/// The authenticated user behind the request's session cookie.
///
/// Rejects with 401 when there is no valid session and with 500 when the
/// signing secret is not configured.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            app_state
                .sessions
                .resolve_request(&req)
                .await?
                .map(CurrentUser)
                .ok_or_else(AppError::unauthorized)
        })
    }
}
