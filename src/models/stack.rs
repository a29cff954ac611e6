// src/models/stack.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A purchasable bundle of business services/skills offered for rent.
/// Read-only reference data from the fulfillment workflow's perspective.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Stack {
  pub id: Uuid,
  pub name: String,
  pub stack_type: String,
  pub description: Option<String>,
  pub base_price_cents: i64,
  pub active: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
