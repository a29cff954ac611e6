// src/models/order_item.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type as SqlxType};
use uuid::Uuid;

/// Fulfillment lifecycle of one rented stack within an order.
///
/// `Completed` and `Done` coexist because the backing store historically
/// recorded both spellings for the terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(type_name = "order_item_status_enum", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderItemStatus {
  Initiated,
  InProgress,
  UnderReview,
  Completed,
  Done,
}

impl OrderItemStatus {
  /// Ordinal position in the fulfillment lifecycle; both terminal
  /// spellings share the last step.
  pub fn step(&self) -> i32 {
    match self {
      OrderItemStatus::Initiated => 1,
      OrderItemStatus::InProgress => 2,
      OrderItemStatus::UnderReview => 3,
      OrderItemStatus::Completed | OrderItemStatus::Done => 4,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      OrderItemStatus::Initiated => "initiated",
      OrderItemStatus::InProgress => "in_progress",
      OrderItemStatus::UnderReview => "under_review",
      OrderItemStatus::Completed => "completed",
      OrderItemStatus::Done => "done",
    }
  }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderItem {
  pub id: Uuid,
  pub order_id: Uuid,
  pub user_id: Uuid,
  pub stack_id: Uuid,
  pub sub_stack_ids: Vec<Uuid>,
  pub status: OrderItemStatus,
  pub progress_percent: i32,
  pub step: i32,
  pub eta: Option<DateTime<Utc>>,
  pub assigned_to: Option<Uuid>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
