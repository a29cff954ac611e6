// src/store/memory.rs

//! In-memory `Store` implementation for tests and local wiring. Not durable.
//!
//! A single mutex guards all state, so the operations documented as atomic
//! on the trait are atomic here by construction: the whole read-decide-write
//! sequence runs inside one critical section.

use crate::errors::{AppError, Result};
use crate::models::{
  AdminSession, AdminUser, Assignment, AssignmentStatus, CartStack, Employee, Order, OrderItem, OrderItemStatus,
  Stack, SubStack,
};
use crate::store::Store;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Default)]
struct MemState {
  stacks: HashMap<Uuid, Stack>,
  sub_stacks: HashMap<Uuid, SubStack>,
  employees: HashMap<Uuid, Employee>,
  cart: Vec<CartStack>,
  orders: HashMap<Uuid, Order>,
  order_items: HashMap<Uuid, OrderItem>,
  assignments: HashMap<Uuid, Assignment>,
  admins: HashMap<Uuid, AdminUser>,
  sessions: HashMap<String, AdminSession>,
}

#[derive(Default)]
pub struct MemStore {
  state: Mutex<MemState>,
  // Counts calls to `stacks_by_ids` so tests can assert batching (one query
  // per aggregation, not one per order item).
  stack_batch_queries: AtomicUsize,
}

impl MemStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of batched stack lookups issued so far.
  pub fn stack_batch_query_count(&self) -> usize {
    self.stack_batch_queries.load(Ordering::SeqCst)
  }

  fn lock(&self) -> Result<MutexGuard<'_, MemState>> {
    self
      .state
      .lock()
      .map_err(|e| AppError::Storage(format!("mutex poisoned: {:?}", e)))
  }
}

#[async_trait]
impl Store for MemStore {
  async fn list_active_stacks(&self) -> Result<Vec<Stack>> {
    let state = self.lock()?;
    let mut stacks: Vec<Stack> = state.stacks.values().filter(|s| s.active).cloned().collect();
    stacks.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(stacks)
  }

  async fn find_stack(&self, stack_id: Uuid) -> Result<Option<Stack>> {
    Ok(self.lock()?.stacks.get(&stack_id).cloned())
  }

  async fn stacks_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Stack>> {
    self.stack_batch_queries.fetch_add(1, Ordering::SeqCst);
    let state = self.lock()?;
    Ok(ids.iter().filter_map(|id| state.stacks.get(id).cloned()).collect())
  }

  async fn sub_stacks_by_ids(&self, ids: &[Uuid]) -> Result<Vec<SubStack>> {
    let state = self.lock()?;
    Ok(ids.iter().filter_map(|id| state.sub_stacks.get(id).cloned()).collect())
  }

  async fn sub_stacks_for_stack(&self, stack_id: Uuid) -> Result<Vec<SubStack>> {
    let state = self.lock()?;
    Ok(
      state
        .sub_stacks
        .values()
        .filter(|s| s.stack_id == stack_id && s.active)
        .cloned()
        .collect(),
    )
  }

  async fn find_employee(&self, employee_id: Uuid) -> Result<Option<Employee>> {
    Ok(self.lock()?.employees.get(&employee_id).cloned())
  }

  async fn list_active_employees(&self) -> Result<Vec<Employee>> {
    let state = self.lock()?;
    let mut employees: Vec<Employee> = state.employees.values().filter(|e| e.active).cloned().collect();
    employees.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(employees)
  }

  async fn add_cart_stack(&self, row: CartStack) -> Result<CartStack> {
    let mut state = self.lock()?;
    state.cart.push(row.clone());
    Ok(row)
  }

  async fn cart_for_user(&self, user_id: Uuid) -> Result<Vec<CartStack>> {
    let state = self.lock()?;
    Ok(state.cart.iter().filter(|c| c.user_id == user_id).cloned().collect())
  }

  async fn remove_cart_stack(&self, user_id: Uuid, cart_stack_id: Uuid) -> Result<u64> {
    let mut state = self.lock()?;
    let before = state.cart.len();
    state.cart.retain(|c| !(c.user_id == user_id && c.id == cart_stack_id));
    Ok((before - state.cart.len()) as u64)
  }

  async fn convert_cart_to_order(&self, order: Order, items: Vec<OrderItem>) -> Result<Order> {
    let mut state = self.lock()?;
    let user_id = order.user_id;
    state.orders.insert(order.id, order.clone());
    for item in items {
      state.order_items.insert(item.id, item);
    }
    state.cart.retain(|c| c.user_id != user_id);
    Ok(order)
  }

  async fn order_items_for_user(&self, user_id: Uuid) -> Result<Vec<OrderItem>> {
    let state = self.lock()?;
    let mut items: Vec<OrderItem> = state
      .order_items
      .values()
      .filter(|i| i.user_id == user_id)
      .cloned()
      .collect();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(items)
  }

  async fn find_order_item(&self, order_item_id: Uuid) -> Result<Option<OrderItem>> {
    Ok(self.lock()?.order_items.get(&order_item_id).cloned())
  }

  async fn update_order_item_progress(
    &self,
    order_item_id: Uuid,
    status: OrderItemStatus,
    progress_percent: i32,
    step: i32,
    eta: Option<DateTime<Utc>>,
  ) -> Result<OrderItem> {
    let mut state = self.lock()?;
    let item = state
      .order_items
      .get_mut(&order_item_id)
      .ok_or_else(|| AppError::NotFound(format!("Order item {} not found.", order_item_id)))?;
    item.status = status;
    item.progress_percent = progress_percent;
    item.step = step;
    item.eta = eta;
    item.updated_at = Utc::now();
    Ok(item.clone())
  }

  async fn create_assignment(
    &self,
    employee_id: Uuid,
    order_item_id: Uuid,
    notes: Option<String>,
  ) -> Result<Assignment> {
    let mut state = self.lock()?;
    let item = state
      .order_items
      .get(&order_item_id)
      .ok_or_else(|| AppError::NotFound(format!("Order item {} not found.", order_item_id)))?;
    if item.assigned_to.is_some() {
      return Err(AppError::Conflict(format!(
        "Order item {} already has an active assignment.",
        order_item_id
      )));
    }
    let assignment = Assignment {
      id: Uuid::new_v4(),
      order_item_id,
      employee_id,
      status: AssignmentStatus::Assigned,
      assigned_at: Utc::now(),
      notes,
    };
    state.assignments.insert(assignment.id, assignment.clone());
    if let Some(item) = state.order_items.get_mut(&order_item_id) {
      item.assigned_to = Some(employee_id);
      item.updated_at = Utc::now();
    }
    Ok(assignment)
  }

  async fn delete_assignment(&self, assignment_id: Uuid) -> Result<()> {
    let mut state = self.lock()?;
    let assignment = state
      .assignments
      .remove(&assignment_id)
      .ok_or_else(|| AppError::NotFound(format!("Assignment {} not found.", assignment_id)))?;
    if let Some(item) = state.order_items.get_mut(&assignment.order_item_id) {
      item.assigned_to = None;
      item.updated_at = Utc::now();
    }
    Ok(())
  }

  async fn find_assignment(&self, assignment_id: Uuid) -> Result<Option<Assignment>> {
    Ok(self.lock()?.assignments.get(&assignment_id).cloned())
  }

  async fn assignment_for_order_item(&self, order_item_id: Uuid) -> Result<Option<Assignment>> {
    let state = self.lock()?;
    Ok(
      state
        .assignments
        .values()
        .find(|a| a.order_item_id == order_item_id)
        .cloned(),
    )
  }

  async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>> {
    let state = self.lock()?;
    Ok(state.admins.values().find(|a| a.email == email).cloned())
  }

  async fn find_admin(&self, admin_id: Uuid) -> Result<Option<AdminUser>> {
    Ok(self.lock()?.admins.get(&admin_id).cloned())
  }

  async fn insert_admin_session(&self, session: AdminSession) -> Result<()> {
    let mut state = self.lock()?;
    state.sessions.insert(session.token.clone(), session);
    Ok(())
  }

  async fn find_admin_session(&self, token: &str) -> Result<Option<AdminSession>> {
    Ok(self.lock()?.sessions.get(token).cloned())
  }

  async fn delete_admin_session(&self, token: &str) -> Result<u64> {
    let mut state = self.lock()?;
    Ok(state.sessions.remove(token).map(|_| 1).unwrap_or(0))
  }

  async fn insert_stack(&self, stack: Stack) -> Result<()> {
    let mut state = self.lock()?;
    state.stacks.insert(stack.id, stack);
    Ok(())
  }

  async fn insert_sub_stack(&self, sub_stack: SubStack) -> Result<()> {
    let mut state = self.lock()?;
    state.sub_stacks.insert(sub_stack.id, sub_stack);
    Ok(())
  }

  async fn insert_employee(&self, employee: Employee) -> Result<()> {
    let mut state = self.lock()?;
    state.employees.insert(employee.id, employee);
    Ok(())
  }

  async fn insert_admin_user(&self, admin: AdminUser) -> Result<()> {
    let mut state = self.lock()?;
    state.admins.insert(admin.id, admin);
    Ok(())
  }
}
