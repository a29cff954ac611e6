// src/flows/admin_session.rs

//! Admin session gate: login (password + secret key), validation, logout.
//!
//! Every credential failure collapses into one `Auth` error so a caller
//! cannot learn which factor failed.

use crate::errors::{AppError, Result};
use crate::models::AdminSession;
use crate::services::auth_service;
use crate::store::Store;
use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

const INVALID_CREDENTIALS: &str = "Invalid email, password, or secret key.";

#[derive(Debug, Clone)]
pub struct LoginOutcome {
  pub token: String,
  pub expires_at: DateTime<Utc>,
  pub admin_id: Uuid,
}

/// Minimal identity handed to gated admin handlers.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
  pub admin_id: Uuid,
  pub email: String,
}

/// Verifies both factors and mints a new session with the given TTL.
#[instrument(name = "flow::admin_login", skip(store, password, secret_key), fields(email = %email))]
pub async fn login(
  store: &dyn Store,
  email: &str,
  password: &str,
  secret_key: &str,
  ttl_days: i64,
) -> Result<LoginOutcome> {
  // Validate input
  if email.trim().is_empty() || password.is_empty() || secret_key.is_empty() {
    return Err(AppError::Validation("Email, password, and secret key are required.".to_string()));
  }

  // Fetch the admin record. Missing or deactivated admins fail identically
  // to wrong credentials.
  let admin = match store.find_admin_by_email(email.trim()).await? {
    Some(admin) if admin.active => admin,
    Some(_) => {
      warn!("Login attempt against deactivated admin account.");
      return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
    }
    None => {
      warn!("Login attempt for unknown admin email.");
      return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
    }
  };

  // Verify both factors
  if !auth_service::verify_credential(&admin.password_hash, password)? {
    warn!(admin_id = %admin.id, "Admin password mismatch.");
    return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
  }
  if !auth_service::verify_credential(&admin.secret_key_hash, secret_key)? {
    warn!(admin_id = %admin.id, "Admin secret key mismatch.");
    return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
  }

  // Mint and persist the session
  let token = auth_service::mint_session_token();
  let now = Utc::now();
  let expires_at = now + Duration::days(ttl_days);
  store
    .insert_admin_session(AdminSession {
      token: token.clone(),
      admin_user_id: admin.id,
      expires_at,
      created_at: now,
    })
    .await?;

  info!(admin_id = %admin.id, "Admin session issued.");
  Ok(LoginOutcome { token, expires_at, admin_id: admin.id })
}

/// Resolves a session token to an admin identity, or `None` for absent,
/// expired, or orphaned sessions. Has no side effects.
#[instrument(name = "flow::admin_validate_session", skip(store, token))]
pub async fn validate(store: &dyn Store, token: &str) -> Result<Option<AdminIdentity>> {
  if token.is_empty() {
    return Ok(None);
  }

  let session = match store.find_admin_session(token).await? {
    Some(session) => session,
    None => return Ok(None),
  };

  // An expired session is indistinguishable from no session.
  if session.expires_at <= Utc::now() {
    return Ok(None);
  }

  match store.find_admin(session.admin_user_id).await? {
    Some(admin) if admin.active => Ok(Some(AdminIdentity { admin_id: admin.id, email: admin.email })),
    _ => Ok(None),
  }
}

/// Deletes the session row. Logging out an already-absent token succeeds.
#[instrument(name = "flow::admin_logout", skip(store, token))]
pub async fn logout(store: &dyn Store, token: &str) -> Result<()> {
  let removed = store.delete_admin_session(token).await?;
  info!(removed, "Admin session removed.");
  Ok(())
}
