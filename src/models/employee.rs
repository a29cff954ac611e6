// src/models/employee.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Employee {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  pub role: String,
  pub specialization: Option<String>,
  pub active: bool,
  pub created_at: DateTime<Utc>,
}
