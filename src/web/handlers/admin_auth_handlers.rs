// src/web/handlers/admin_auth_handlers.rs

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::flows::admin_session;
use crate::state::AppState;
use crate::web::admin_guard::AdminContext;
use crate::web::ADMIN_SESSION_COOKIE;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct AdminLoginForm {
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub password: String,
  #[serde(default)]
  pub secret_key: String,
}

/// Redirect error code consumed by the login page. Every failure funnels
/// into one of three codes; credential failures are never distinguished
/// by factor.
fn login_error_code(err: &AppError) -> &'static str {
  match err {
    AppError::Validation(_) => "missing_fields",
    AppError::Auth(_) => "invalid_credentials",
    _ => "session_error",
  }
}

fn login_redirect(code: &str) -> HttpResponse {
  HttpResponse::SeeOther()
    .append_header((header::LOCATION, format!("/admin/login?error={}", code)))
    .finish()
}

#[instrument(name = "handler::admin_login", skip(app_state, form), fields(email = %form.email))]
pub async fn admin_login_handler(
  app_state: web::Data<AppState>,
  form: web::Form<AdminLoginForm>,
) -> Result<HttpResponse, AppError> {
  let outcome = match admin_session::login(
    app_state.store.as_ref(),
    &form.email,
    &form.password,
    &form.secret_key,
    app_state.config.session_ttl_days,
  )
  .await
  {
    Ok(outcome) => outcome,
    Err(err) => {
      warn!(error = %err, "Admin login failed.");
      return Ok(login_redirect(login_error_code(&err)));
    }
  };

  let cookie = Cookie::build(ADMIN_SESSION_COOKIE, outcome.token.clone())
    .path("/")
    .http_only(true)
    .secure(app_state.config.cookie_secure)
    .same_site(SameSite::Lax)
    .max_age(CookieDuration::days(app_state.config.session_ttl_days))
    .finish();

  info!(admin_id = %outcome.admin_id, "Admin logged in.");
  Ok(
    HttpResponse::SeeOther()
      .append_header((header::LOCATION, "/admin"))
      .cookie(cookie)
      .finish(),
  )
}

#[instrument(name = "handler::admin_logout", skip(app_state, req))]
pub async fn admin_logout_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
) -> Result<HttpResponse, AppError> {
  if let Some(cookie) = req.cookie(ADMIN_SESSION_COOKIE) {
    admin_session::logout(app_state.store.as_ref(), cookie.value()).await?;
  }

  // Expire the cookie regardless of whether a session row existed.
  let removal = Cookie::build(ADMIN_SESSION_COOKIE, "")
    .path("/")
    .http_only(true)
    .secure(app_state.config.cookie_secure)
    .same_site(SameSite::Lax)
    .max_age(CookieDuration::ZERO)
    .finish();

  Ok(
    HttpResponse::SeeOther()
      .append_header((header::LOCATION, "/admin/login"))
      .cookie(removal)
      .finish(),
  )
}

#[instrument(name = "handler::admin_session_info", skip(admin))]
pub async fn admin_session_info_handler(admin: AdminContext) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(json!({
      "valid": true,
      "adminId": admin.0.admin_id,
      "email": admin.0.email,
  })))
}
