// src/web/admin_guard.rs

//! Request extractor gating admin routes on a valid session cookie.

use crate::errors::AppError;
use crate::flows::admin_session::{self, AdminIdentity};
use crate::state::AppState;
use crate::web::ADMIN_SESSION_COOKIE;
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

/// Extracted admin identity; resolving it validates the session cookie
/// against the store, so any handler taking this parameter is gated.
#[derive(Debug, Clone)]
pub struct AdminContext(pub AdminIdentity);

impl FromRequest for AdminContext {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let req = req.clone();
    Box::pin(async move {
      let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::Internal("AppState is not configured.".to_string()))?;

      let token = req
        .cookie(ADMIN_SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .unwrap_or_default();

      match admin_session::validate(state.store.as_ref(), &token).await? {
        Some(identity) => Ok(AdminContext(identity)),
        None => {
          warn!(path = %req.path(), "Rejected admin request: missing or expired session.");
          Err(AppError::Auth("Admin session is missing or expired.".to_string()))
        }
      }
    })
  }
}
