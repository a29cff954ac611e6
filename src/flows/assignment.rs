// src/flows/assignment.rs

//! Assignment workflow: attach/detach an employee to an order item and
//! advance item progress.
//!
//! The at-most-one-active-assignment invariant is NOT enforced by the
//! read-decide-write sequence here; the storage layer's atomic
//! `create_assignment` is the authority, so two racing assigns cannot both
//! succeed.

use crate::errors::{AppError, Result};
use crate::models::{Assignment, OrderItem, OrderItemStatus};
use crate::store::Store;
use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Assigns an active employee to an unassigned order item.
#[instrument(name = "flow::assign", skip(store, notes))]
pub async fn assign(
  store: &dyn Store,
  employee_id: Uuid,
  order_item_id: Uuid,
  notes: Option<String>,
) -> Result<Assignment> {
  // Preconditions: the employee must exist and be active.
  let employee = store
    .find_employee(employee_id)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Employee {} not found.", employee_id)))?;
  if !employee.active {
    warn!(employee_id = %employee_id, "Refusing to assign a deactivated employee.");
    return Err(AppError::Validation(format!("Employee {} is not active.", employee_id)));
  }

  // The item check here gives a friendly error; the store re-checks inside
  // its critical section and remains the authority under concurrency.
  let item = store
    .find_order_item(order_item_id)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Order item {} not found.", order_item_id)))?;
  if item.assigned_to.is_some() {
    return Err(AppError::Conflict(format!(
      "Order item {} already has an active assignment.",
      order_item_id
    )));
  }

  let assignment = store.create_assignment(employee_id, order_item_id, notes).await?;
  info!(assignment_id = %assignment.id, employee_id = %employee_id, order_item_id = %order_item_id, "Employee assigned.");
  Ok(assignment)
}

/// Removes an assignment and clears `assigned_to` on its order item.
/// Destructive: no assignment history is retained.
#[instrument(name = "flow::unassign", skip(store))]
pub async fn unassign(store: &dyn Store, assignment_id: Uuid) -> Result<()> {
  store.delete_assignment(assignment_id).await?;
  info!(assignment_id = %assignment_id, "Assignment removed.");
  Ok(())
}

/// Advances an order item's status/progress/eta.
///
/// The lifecycle order (initiated → in_progress → under_review →
/// completed/done) is a convention: skips are accepted, reverses are not
/// validated. The step ordinal tracks the new status.
#[instrument(name = "flow::advance_order_item", skip(store))]
pub async fn advance(
  store: &dyn Store,
  order_item_id: Uuid,
  status: OrderItemStatus,
  progress_percent: i32,
  eta: Option<DateTime<Utc>>,
) -> Result<OrderItem> {
  if !(0..=100).contains(&progress_percent) {
    return Err(AppError::Validation(format!(
      "progress_percent must be between 0 and 100, got {}.",
      progress_percent
    )));
  }

  let updated = store
    .update_order_item_progress(order_item_id, status, progress_percent, status.step(), eta)
    .await?;
  info!(order_item_id = %order_item_id, status = status.as_str(), progress_percent, "Order item advanced.");
  Ok(updated)
}
