// src/models/admin.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminUser {
  pub id: Uuid,
  pub email: String,
  #[serde(skip_serializing)] // Never send hashes to a client
  pub password_hash: String,
  #[serde(skip_serializing)]
  pub secret_key_hash: String,
  pub active: bool,
  pub created_at: DateTime<Utc>,
}

/// An admin browser session. Expired rows are treated identically to
/// absent rows by the session gate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminSession {
  pub token: String,
  pub admin_user_id: Uuid,
  pub expires_at: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
}
