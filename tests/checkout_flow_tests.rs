// tests/checkout_flow_tests.rs
mod common;

use common::*;
use stackrent::errors::AppError;
use stackrent::flows::checkout;
use stackrent::models::OrderItemStatus;
use stackrent::store::{MemStore, Store};
use uuid::Uuid;

#[tokio::test]
async fn conversion_sums_rows_applies_discount_and_clears_the_cart() {
  setup_tracing();
  let store = MemStore::new();
  let user_id = Uuid::new_v4();
  let marketing = seed_stack(&store, "Marketing Stack", 300).await;
  let finance = seed_stack(&store, "Finance Stack", 200).await;
  seed_cart_row(&store, user_id, marketing.id, 300).await;
  seed_cart_row(&store, user_id, finance.id, 200).await;

  let order = checkout::convert_cart(&store, user_id, 20).await.unwrap();

  assert_eq!(order.subtotal_cents, 500);
  assert_eq!(order.discount_cents, 20);
  assert_eq!(order.total_cents, 480);

  // One order item per cart row, freshly initiated.
  let items = store.order_items_for_user(user_id).await.unwrap();
  assert_eq!(items.len(), 2);
  for item in &items {
    assert_eq!(item.order_id, order.id);
    assert_eq!(item.status, OrderItemStatus::Initiated);
    assert_eq!(item.progress_percent, 0);
    assert_eq!(item.step, 1);
    assert_eq!(item.assigned_to, None);
  }

  // The cart is gone.
  assert!(store.cart_for_user(user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn oversized_discount_clamps_the_total_to_zero() {
  setup_tracing();
  let store = MemStore::new();
  let user_id = Uuid::new_v4();
  let stack = seed_stack(&store, "Finance Stack", 100).await;
  seed_cart_row(&store, user_id, stack.id, 100).await;

  let order = checkout::convert_cart(&store, user_id, 250).await.unwrap();
  assert_eq!(order.subtotal_cents, 100);
  assert_eq!(order.total_cents, 0);
}

#[tokio::test]
async fn empty_cart_and_negative_discount_are_rejected() {
  setup_tracing();
  let store = MemStore::new();
  let user_id = Uuid::new_v4();

  let err = checkout::convert_cart(&store, user_id, 0).await.unwrap_err();
  assert!(matches!(err, AppError::Validation(_)));

  let err = checkout::convert_cart(&store, user_id, -5).await.unwrap_err();
  assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn missing_stack_reference_aborts_without_partial_writes() {
  setup_tracing();
  let store = MemStore::new();
  let user_id = Uuid::new_v4();
  let stack = seed_stack(&store, "Marketing Stack", 300).await;
  seed_cart_row(&store, user_id, stack.id, 300).await;
  // Second row references a stack the catalog never knew.
  seed_cart_row(&store, user_id, Uuid::new_v4(), 100).await;

  let err = checkout::convert_cart(&store, user_id, 0).await.unwrap_err();
  assert!(matches!(err, AppError::NotFound(_)));

  // No partial order, and the cart survives for a retry.
  assert!(store.order_items_for_user(user_id).await.unwrap().is_empty());
  assert_eq!(store.cart_for_user(user_id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn missing_sub_stack_reference_also_aborts() {
  setup_tracing();
  let store = MemStore::new();
  let user_id = Uuid::new_v4();
  let stack = seed_stack(&store, "Engineering Stack", 400).await;
  let mut row = seed_cart_row(&store, user_id, stack.id, 450).await;
  row.sub_stack_ids = vec![Uuid::new_v4()];
  // Re-add the row carrying the dangling sub-stack reference.
  store.remove_cart_stack(user_id, row.id).await.unwrap();
  store.add_cart_stack(row).await.unwrap();

  let err = checkout::convert_cart(&store, user_id, 0).await.unwrap_err();
  assert!(matches!(err, AppError::NotFound(_)));
  assert_eq!(store.cart_for_user(user_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn conversion_only_consumes_the_requesting_users_cart() {
  setup_tracing();
  let store = MemStore::new();
  let buyer = Uuid::new_v4();
  let bystander = Uuid::new_v4();
  let stack = seed_stack(&store, "Finance Stack", 200).await;
  seed_cart_row(&store, buyer, stack.id, 200).await;
  seed_cart_row(&store, bystander, stack.id, 200).await;

  checkout::convert_cart(&store, buyer, 0).await.unwrap();

  assert!(store.cart_for_user(buyer).await.unwrap().is_empty());
  assert_eq!(store.cart_for_user(bystander).await.unwrap().len(), 1);
}
