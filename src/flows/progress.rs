// src/flows/progress.rs

//! Progress aggregation for the customer dashboard: a user's order items
//! joined with stack metadata, display-ready.

use crate::errors::Result;
use crate::models::Stack;
use crate::store::Store;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{instrument, warn};
use uuid::Uuid;

const UNKNOWN_STACK_NAME: &str = "Unknown Stack";
const UNKNOWN_STACK_TYPE: &str = "General";
const UNKNOWN_STACK_DESCRIPTION: &str = "No description available";

/// One display-ready dashboard row.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemProgress {
  pub order_item_id: Uuid,
  pub order_id: Uuid,
  pub stack_id: Uuid,
  pub stack_name: String,
  pub stack_type: String,
  pub stack_description: String,
  pub status: String,
  pub status_display: String,
  pub progress_percent: i32,
  pub step: i32,
  pub eta: Option<DateTime<Utc>>,
  pub eta_display: Option<String>,
  pub assigned_to: Option<Uuid>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Maps a raw status value to its customer-facing label.
///
/// Total: unrecognized values pass through unchanged rather than failing
/// the row that carries them.
pub fn map_status_to_display(raw: &str) -> String {
  match raw {
    "initiated" => "Not Started".to_string(),
    "in_progress" => "In Progress".to_string(),
    "under_review" => "Under Review".to_string(),
    "completed" | "done" => "Done".to_string(),
    other => other.to_string(),
  }
}

pub fn format_eta(eta: Option<DateTime<Utc>>) -> Option<String> {
  eta.map(|t| t.format("%b %d, %Y").to_string())
}

/// Builds the dashboard view for one user.
///
/// All referenced stacks are fetched in ONE batched lookup regardless of how
/// many items the user has. Items referencing a stack the catalog no longer
/// knows degrade to placeholder strings instead of failing the batch. Order
/// is preserved as returned by the store (newest first).
#[instrument(name = "flow::aggregate_progress", skip(store))]
pub async fn aggregate(store: &dyn Store, user_id: Uuid) -> Result<Vec<OrderItemProgress>> {
  let items = store.order_items_for_user(user_id).await?;
  if items.is_empty() {
    return Ok(Vec::new());
  }

  let mut stack_ids: Vec<Uuid> = Vec::new();
  for item in &items {
    if !stack_ids.contains(&item.stack_id) {
      stack_ids.push(item.stack_id);
    }
  }

  let stacks = store.stacks_by_ids(&stack_ids).await?;
  let stacks_by_id: HashMap<Uuid, &Stack> = stacks.iter().map(|s| (s.id, s)).collect();

  let mut rows = Vec::with_capacity(items.len());
  for item in items {
    let (stack_name, stack_type, stack_description) = match stacks_by_id.get(&item.stack_id) {
      Some(stack) => (
        stack.name.clone(),
        stack.stack_type.clone(),
        stack
          .description
          .clone()
          .unwrap_or_else(|| UNKNOWN_STACK_DESCRIPTION.to_string()),
      ),
      None => {
        warn!(stack_id = %item.stack_id, order_item_id = %item.id, "Order item references an unknown stack.");
        (
          UNKNOWN_STACK_NAME.to_string(),
          UNKNOWN_STACK_TYPE.to_string(),
          UNKNOWN_STACK_DESCRIPTION.to_string(),
        )
      }
    };

    let raw_status = item.status.as_str().to_string();
    rows.push(OrderItemProgress {
      order_item_id: item.id,
      order_id: item.order_id,
      stack_id: item.stack_id,
      stack_name,
      stack_type,
      stack_description,
      status_display: map_status_to_display(&raw_status),
      status: raw_status,
      progress_percent: item.progress_percent,
      step: item.step,
      eta_display: format_eta(item.eta),
      eta: item.eta,
      assigned_to: item.assigned_to,
      created_at: item.created_at,
      updated_at: item.updated_at,
    });
  }

  Ok(rows)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_labels_are_total_and_stable() {
    assert_eq!(map_status_to_display("initiated"), "Not Started");
    assert_eq!(map_status_to_display("in_progress"), "In Progress");
    assert_eq!(map_status_to_display("under_review"), "Under Review");
    assert_eq!(map_status_to_display("completed"), "Done");
    assert_eq!(map_status_to_display("done"), "Done");
  }

  #[test]
  fn unknown_status_passes_through_unchanged() {
    assert_eq!(map_status_to_display("weird_status"), "weird_status");
  }

  #[test]
  fn eta_formatting() {
    use chrono::TimeZone;
    let eta = Utc.with_ymd_and_hms(2026, 8, 4, 12, 0, 0).unwrap();
    assert_eq!(format_eta(Some(eta)), Some("Aug 04, 2026".to_string()));
    assert_eq!(format_eta(None), None);
  }
}
