// src/flows/checkout.rs

//! Cart-to-order conversion: turns all of a user's cart rows into one order
//! plus one order item per row, under a flat discount.
//!
//! The conversion is all-or-nothing. Reference lookups are validated up
//! front and the store persists the order, its items, and the cart clear in
//! one transaction; a failure at any step leaves no partial order behind.

use crate::errors::{AppError, Result};
use crate::models::{Order, OrderItem, OrderItemStatus};
use crate::store::Store;
use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Displayed order total: subtotal minus discount, floored at zero.
fn order_total_cents(subtotal_cents: i64, discount_cents: i64) -> i64 {
  (subtotal_cents - discount_cents).max(0)
}

#[instrument(name = "flow::convert_cart", skip(store))]
pub async fn convert_cart(store: &dyn Store, user_id: Uuid, discount_cents: i64) -> Result<Order> {
  if discount_cents < 0 {
    return Err(AppError::Validation("Discount cannot be negative.".to_string()));
  }

  let cart = store.cart_for_user(user_id).await?;
  if cart.is_empty() {
    return Err(AppError::Validation("Cart is empty; nothing to convert.".to_string()));
  }

  // Batch-fetch every referenced stack and sub-stack; any missing reference
  // aborts the whole conversion.
  let mut stack_ids: Vec<Uuid> = Vec::new();
  let mut sub_stack_ids: Vec<Uuid> = Vec::new();
  for row in &cart {
    if !stack_ids.contains(&row.stack_id) {
      stack_ids.push(row.stack_id);
    }
    for sub_id in &row.sub_stack_ids {
      if !sub_stack_ids.contains(sub_id) {
        sub_stack_ids.push(*sub_id);
      }
    }
  }

  let stacks = store.stacks_by_ids(&stack_ids).await?;
  for id in &stack_ids {
    if !stacks.iter().any(|s| s.id == *id) {
      return Err(AppError::NotFound(format!("Stack {} referenced by the cart no longer exists.", id)));
    }
  }
  if !sub_stack_ids.is_empty() {
    let sub_stacks = store.sub_stacks_by_ids(&sub_stack_ids).await?;
    for id in &sub_stack_ids {
      if !sub_stacks.iter().any(|s| s.id == *id) {
        return Err(AppError::NotFound(format!(
          "Sub-stack {} referenced by the cart no longer exists.",
          id
        )));
      }
    }
  }

  let subtotal_cents: i64 = cart.iter().map(|row| row.total_price_cents).sum();
  let now = Utc::now();
  let order = Order {
    id: Uuid::new_v4(),
    user_id,
    subtotal_cents,
    discount_cents,
    total_cents: order_total_cents(subtotal_cents, discount_cents),
    created_at: now,
  };

  let items: Vec<OrderItem> = cart
    .iter()
    .map(|row| OrderItem {
      id: Uuid::new_v4(),
      order_id: order.id,
      user_id,
      stack_id: row.stack_id,
      sub_stack_ids: row.sub_stack_ids.clone(),
      status: OrderItemStatus::Initiated,
      progress_percent: 0,
      step: OrderItemStatus::Initiated.step(),
      eta: None,
      assigned_to: None,
      created_at: now,
      updated_at: now,
    })
    .collect();

  let item_count = items.len();
  let order = store.convert_cart_to_order(order, items).await?;
  info!(order_id = %order.id, user_id = %user_id, item_count, total_cents = order.total_cents, "Cart converted to order.");
  Ok(order)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn total_applies_flat_discount() {
    assert_eq!(order_total_cents(500, 20), 480);
  }

  #[test]
  fn total_is_clamped_at_zero() {
    assert_eq!(order_total_cents(100, 250), 0);
    assert_eq!(order_total_cents(0, 0), 0);
  }
}
