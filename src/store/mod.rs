// src/store/mod.rs

//! The typed storage boundary. All durable state goes through the `Store`
//! trait; handlers receive a concrete implementation by injection instead of
//! reaching into ambient client state.

pub mod memory;
pub mod postgres;

use crate::errors::Result;
use crate::models::{
  AdminSession, AdminUser, Assignment, CartStack, Employee, Order, OrderItem, OrderItemStatus, Stack, SubStack,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use memory::MemStore;
pub use postgres::PgStore;

/// Contract every persistence backend must implement.
///
/// Rows cross this boundary as the typed records in `crate::models`; a row
/// that does not decode into the expected shape is an error, never a
/// silently-trusted dynamic value. Methods documented as atomic must not
/// leave partial writes behind on failure.
#[async_trait]
pub trait Store: Send + Sync {
  // --- Catalog (read-only reference data) ---

  async fn list_active_stacks(&self) -> Result<Vec<Stack>>;
  async fn find_stack(&self, stack_id: Uuid) -> Result<Option<Stack>>;
  /// Batched lookup by id set. Callers aggregating over many order items
  /// must use this once per batch rather than issuing per-item queries.
  async fn stacks_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Stack>>;
  async fn sub_stacks_by_ids(&self, ids: &[Uuid]) -> Result<Vec<SubStack>>;
  async fn sub_stacks_for_stack(&self, stack_id: Uuid) -> Result<Vec<SubStack>>;

  // --- Employees ---

  async fn find_employee(&self, employee_id: Uuid) -> Result<Option<Employee>>;
  async fn list_active_employees(&self) -> Result<Vec<Employee>>;

  // --- Cart ---

  async fn add_cart_stack(&self, row: CartStack) -> Result<CartStack>;
  async fn cart_for_user(&self, user_id: Uuid) -> Result<Vec<CartStack>>;
  /// Returns the number of rows removed (0 when the row was not found).
  async fn remove_cart_stack(&self, user_id: Uuid, cart_stack_id: Uuid) -> Result<u64>;

  // --- Orders and order items ---

  /// Atomic cart conversion: inserts the order, inserts its items, and
  /// clears the owning user's cart rows in one transaction.
  async fn convert_cart_to_order(&self, order: Order, items: Vec<OrderItem>) -> Result<Order>;
  /// A user's order items, newest first.
  async fn order_items_for_user(&self, user_id: Uuid) -> Result<Vec<OrderItem>>;
  async fn find_order_item(&self, order_item_id: Uuid) -> Result<Option<OrderItem>>;
  async fn update_order_item_progress(
    &self,
    order_item_id: Uuid,
    status: OrderItemStatus,
    progress_percent: i32,
    step: i32,
    eta: Option<DateTime<Utc>>,
  ) -> Result<OrderItem>;

  // --- Assignments ---

  /// Atomic assign: sets `assigned_to` on the item and inserts the
  /// assignment row. Fails with a conflict when the item already has an
  /// active assignment, even under concurrent callers.
  async fn create_assignment(&self, employee_id: Uuid, order_item_id: Uuid, notes: Option<String>)
    -> Result<Assignment>;
  /// Atomic unassign: deletes the assignment row and clears `assigned_to`
  /// on exactly the item it referenced.
  async fn delete_assignment(&self, assignment_id: Uuid) -> Result<()>;
  async fn find_assignment(&self, assignment_id: Uuid) -> Result<Option<Assignment>>;
  async fn assignment_for_order_item(&self, order_item_id: Uuid) -> Result<Option<Assignment>>;

  // --- Admin users and sessions ---

  async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>>;
  async fn find_admin(&self, admin_id: Uuid) -> Result<Option<AdminUser>>;
  async fn insert_admin_session(&self, session: AdminSession) -> Result<()>;
  async fn find_admin_session(&self, token: &str) -> Result<Option<AdminSession>>;
  /// Returns the number of rows removed; deleting an absent token is not an
  /// error (logout is idempotent).
  async fn delete_admin_session(&self, token: &str) -> Result<u64>;

  // --- Seeding ---

  async fn insert_stack(&self, stack: Stack) -> Result<()>;
  async fn insert_sub_stack(&self, sub_stack: SubStack) -> Result<()>;
  async fn insert_employee(&self, employee: Employee) -> Result<()>;
  async fn insert_admin_user(&self, admin: AdminUser) -> Result<()>;
}
