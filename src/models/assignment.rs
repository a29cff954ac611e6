// src/models/assignment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type as SqlxType};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(type_name = "assignment_status_enum", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
  Assigned,
  InProgress,
  Completed,
}

/// Links one employee to one order item they are fulfilling.
/// At most one assignment may exist per order item at a time.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Assignment {
  pub id: Uuid,
  pub order_item_id: Uuid,
  pub employee_id: Uuid,
  pub status: AssignmentStatus,
  pub assigned_at: DateTime<Utc>,
  pub notes: Option<String>,
}
