// tests/progress_aggregation_tests.rs
mod common;

use common::*;
use chrono::{Duration, Utc};
use stackrent::flows::{assignment, progress};
use stackrent::models::OrderItemStatus;
use stackrent::store::MemStore;
use uuid::Uuid;

#[tokio::test]
async fn aggregation_merges_stack_metadata_and_display_labels() {
  setup_tracing();
  let store = MemStore::new();
  let user_id = Uuid::new_v4();
  let stack = seed_stack(&store, "Marketing Stack", 250_000).await;
  let (_, items) = seed_order_with_items(&store, user_id, &[stack.id]).await;

  let eta = Utc::now() + Duration::days(7);
  assignment::advance(&store, items[0].id, OrderItemStatus::UnderReview, 80, Some(eta))
    .await
    .unwrap();

  let rows = progress::aggregate(&store, user_id).await.unwrap();
  assert_eq!(rows.len(), 1);
  let row = &rows[0];
  assert_eq!(row.stack_name, "Marketing Stack");
  assert_eq!(row.stack_type, "general");
  assert_eq!(row.stack_description, "Marketing Stack description");
  assert_eq!(row.status, "under_review");
  assert_eq!(row.status_display, "Under Review");
  assert_eq!(row.progress_percent, 80);
  assert_eq!(row.step, 3);
  assert_eq!(row.eta_display.as_deref(), Some(eta.format("%b %d, %Y").to_string().as_str()));
}

#[tokio::test]
async fn fifty_items_over_three_stacks_issue_one_batched_stack_query() {
  setup_tracing();
  let store = MemStore::new();
  let user_id = Uuid::new_v4();
  let stacks = [
    seed_stack(&store, "Marketing Stack", 250_000).await,
    seed_stack(&store, "Finance Stack", 180_000).await,
    seed_stack(&store, "Engineering Stack", 420_000).await,
  ];
  let stack_ids: Vec<Uuid> = (0..50).map(|i| stacks[i % 3].id).collect();
  seed_order_with_items(&store, user_id, &stack_ids).await;

  let before = store.stack_batch_query_count();
  let rows = progress::aggregate(&store, user_id).await.unwrap();
  let after = store.stack_batch_query_count();

  assert_eq!(rows.len(), 50);
  assert_eq!(after - before, 1, "stack lookups must be batched, not per-item");
}

#[tokio::test]
async fn unknown_stack_references_degrade_to_placeholders() {
  setup_tracing();
  let store = MemStore::new();
  let user_id = Uuid::new_v4();
  let known = seed_stack(&store, "Finance Stack", 180_000).await;
  // One item points at a stack the catalog has never heard of.
  let (_, _) = seed_order_with_items(&store, user_id, &[known.id, Uuid::new_v4()]).await;

  let rows = progress::aggregate(&store, user_id).await.unwrap();
  assert_eq!(rows.len(), 2, "a dangling reference must not sink the batch");

  let orphan = rows.iter().find(|r| r.stack_name == "Unknown Stack").unwrap();
  assert_eq!(orphan.stack_type, "General");
  assert_eq!(orphan.stack_description, "No description available");
  assert!(rows.iter().any(|r| r.stack_name == "Finance Stack"));
}

#[tokio::test]
async fn rows_come_back_newest_first() {
  setup_tracing();
  let store = MemStore::new();
  let user_id = Uuid::new_v4();
  let stack = seed_stack(&store, "Marketing Stack", 250_000).await;
  let (_, items) = seed_order_with_items(&store, user_id, &[stack.id, stack.id, stack.id]).await;

  let rows = progress::aggregate(&store, user_id).await.unwrap();
  // seed_order_with_items creates later indices newer, so the last seeded
  // item leads.
  assert_eq!(rows[0].order_item_id, items[2].id);
  assert_eq!(rows[2].order_item_id, items[0].id);
}

#[tokio::test]
async fn user_with_no_items_gets_an_empty_dashboard() {
  setup_tracing();
  let store = MemStore::new();
  let rows = progress::aggregate(&store, Uuid::new_v4()).await.unwrap();
  assert!(rows.is_empty());
  // No items means no stack lookup at all.
  assert_eq!(store.stack_batch_query_count(), 0);
}
