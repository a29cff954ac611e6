// src/models/cart_stack.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One cart row: a stack, its chosen sub-stacks, and the precomputed total.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartStack {
  pub id: Uuid,
  pub user_id: Uuid,
  pub stack_id: Uuid,
  pub sub_stack_ids: Vec<Uuid>,
  pub total_price_cents: i64,
  pub added_at: DateTime<Utc>,
}
