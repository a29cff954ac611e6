// src/models/sub_stack.rs

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// An optional add-on module within a Stack.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SubStack {
  pub id: Uuid,
  pub stack_id: Uuid,
  pub name: String,
  pub price_cents: i64,
  pub active: bool,
}
