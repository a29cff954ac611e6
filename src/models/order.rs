// src/models/order.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
  pub id: Uuid,
  pub user_id: Uuid,
  pub subtotal_cents: i64,
  pub discount_cents: i64,
  // Displayed amount: subtotal minus discount, floored at zero.
  pub total_cents: i64,
  pub created_at: DateTime<Utc>,
}
