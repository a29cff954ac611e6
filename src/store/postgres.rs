// src/store/postgres.rs

//! PostgreSQL `Store` implementation over an `sqlx::PgPool`.
//!
//! Multi-row writes (cart conversion, assign, unassign) run inside a single
//! transaction. The at-most-one-assignment invariant is enforced twice: a
//! guarded `UPDATE ... WHERE assigned_to IS NULL` closes the check-then-act
//! race, and the unique index on `assignments(order_item_id)` (see
//! `schema.sql`) backs it at the storage layer.

use crate::errors::{AppError, Result};
use crate::models::{
  AdminSession, AdminUser, Assignment, AssignmentStatus, CartStack, Employee, Order, OrderItem, OrderItemStatus,
  Stack, SubStack,
};
use crate::store::Store;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const ORDER_ITEM_COLUMNS: &str =
  "id, order_id, user_id, stack_id, sub_stack_ids, status, progress_percent, step, eta, assigned_to, created_at, updated_at";
const ASSIGNMENT_COLUMNS: &str = "id, order_item_id, employee_id, status, assigned_at, notes";

pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl Store for PgStore {
  async fn list_active_stacks(&self) -> Result<Vec<Stack>> {
    let stacks = sqlx::query_as::<_, Stack>(
      "SELECT id, name, stack_type, description, base_price_cents, active, created_at, updated_at \
       FROM stacks WHERE active = TRUE ORDER BY name",
    )
    .fetch_all(&self.pool)
    .await?;
    Ok(stacks)
  }

  async fn find_stack(&self, stack_id: Uuid) -> Result<Option<Stack>> {
    let stack = sqlx::query_as::<_, Stack>(
      "SELECT id, name, stack_type, description, base_price_cents, active, created_at, updated_at \
       FROM stacks WHERE id = $1",
    )
    .bind(stack_id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(stack)
  }

  async fn stacks_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Stack>> {
    let stacks = sqlx::query_as::<_, Stack>(
      "SELECT id, name, stack_type, description, base_price_cents, active, created_at, updated_at \
       FROM stacks WHERE id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(&self.pool)
    .await?;
    Ok(stacks)
  }

  async fn sub_stacks_by_ids(&self, ids: &[Uuid]) -> Result<Vec<SubStack>> {
    let sub_stacks = sqlx::query_as::<_, SubStack>(
      "SELECT id, stack_id, name, price_cents, active FROM sub_stacks WHERE id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(&self.pool)
    .await?;
    Ok(sub_stacks)
  }

  async fn sub_stacks_for_stack(&self, stack_id: Uuid) -> Result<Vec<SubStack>> {
    let sub_stacks = sqlx::query_as::<_, SubStack>(
      "SELECT id, stack_id, name, price_cents, active \
       FROM sub_stacks WHERE stack_id = $1 AND active = TRUE ORDER BY name",
    )
    .bind(stack_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(sub_stacks)
  }

  async fn find_employee(&self, employee_id: Uuid) -> Result<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(
      "SELECT id, name, email, role, specialization, active, created_at FROM employees WHERE id = $1",
    )
    .bind(employee_id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(employee)
  }

  async fn list_active_employees(&self) -> Result<Vec<Employee>> {
    let employees = sqlx::query_as::<_, Employee>(
      "SELECT id, name, email, role, specialization, active, created_at \
       FROM employees WHERE active = TRUE ORDER BY name",
    )
    .fetch_all(&self.pool)
    .await?;
    Ok(employees)
  }

  async fn add_cart_stack(&self, row: CartStack) -> Result<CartStack> {
    let inserted = sqlx::query_as::<_, CartStack>(
      "INSERT INTO cart_stacks (id, user_id, stack_id, sub_stack_ids, total_price_cents, added_at) \
       VALUES ($1, $2, $3, $4, $5, $6) \
       RETURNING id, user_id, stack_id, sub_stack_ids, total_price_cents, added_at",
    )
    .bind(row.id)
    .bind(row.user_id)
    .bind(row.stack_id)
    .bind(&row.sub_stack_ids)
    .bind(row.total_price_cents)
    .bind(row.added_at)
    .fetch_one(&self.pool)
    .await?;
    Ok(inserted)
  }

  async fn cart_for_user(&self, user_id: Uuid) -> Result<Vec<CartStack>> {
    let rows = sqlx::query_as::<_, CartStack>(
      "SELECT id, user_id, stack_id, sub_stack_ids, total_price_cents, added_at \
       FROM cart_stacks WHERE user_id = $1 ORDER BY added_at",
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(rows)
  }

  async fn remove_cart_stack(&self, user_id: Uuid, cart_stack_id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM cart_stacks WHERE user_id = $1 AND id = $2")
      .bind(user_id)
      .bind(cart_stack_id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected())
  }

  async fn convert_cart_to_order(&self, order: Order, items: Vec<OrderItem>) -> Result<Order> {
    let mut tx = self.pool.begin().await?;

    let inserted = sqlx::query_as::<_, Order>(
      "INSERT INTO orders (id, user_id, subtotal_cents, discount_cents, total_cents, created_at) \
       VALUES ($1, $2, $3, $4, $5, $6) \
       RETURNING id, user_id, subtotal_cents, discount_cents, total_cents, created_at",
    )
    .bind(order.id)
    .bind(order.user_id)
    .bind(order.subtotal_cents)
    .bind(order.discount_cents)
    .bind(order.total_cents)
    .bind(order.created_at)
    .fetch_one(&mut *tx)
    .await?;

    for item in &items {
      sqlx::query(
        "INSERT INTO order_items \
         (id, order_id, user_id, stack_id, sub_stack_ids, status, progress_percent, step, eta, assigned_to, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
      )
      .bind(item.id)
      .bind(item.order_id)
      .bind(item.user_id)
      .bind(item.stack_id)
      .bind(&item.sub_stack_ids)
      .bind(item.status)
      .bind(item.progress_percent)
      .bind(item.step)
      .bind(item.eta)
      .bind(item.assigned_to)
      .bind(item.created_at)
      .bind(item.updated_at)
      .execute(&mut *tx)
      .await?;
    }

    sqlx::query("DELETE FROM cart_stacks WHERE user_id = $1")
      .bind(order.user_id)
      .execute(&mut *tx)
      .await?;

    tx.commit().await?;
    Ok(inserted)
  }

  async fn order_items_for_user(&self, user_id: Uuid) -> Result<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(&format!(
      "SELECT {} FROM order_items WHERE user_id = $1 ORDER BY created_at DESC",
      ORDER_ITEM_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(items)
  }

  async fn find_order_item(&self, order_item_id: Uuid) -> Result<Option<OrderItem>> {
    let item = sqlx::query_as::<_, OrderItem>(&format!(
      "SELECT {} FROM order_items WHERE id = $1",
      ORDER_ITEM_COLUMNS
    ))
    .bind(order_item_id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(item)
  }

  async fn update_order_item_progress(
    &self,
    order_item_id: Uuid,
    status: OrderItemStatus,
    progress_percent: i32,
    step: i32,
    eta: Option<DateTime<Utc>>,
  ) -> Result<OrderItem> {
    let updated = sqlx::query_as::<_, OrderItem>(&format!(
      "UPDATE order_items \
       SET status = $2, progress_percent = $3, step = $4, eta = $5, updated_at = NOW() \
       WHERE id = $1 RETURNING {}",
      ORDER_ITEM_COLUMNS
    ))
    .bind(order_item_id)
    .bind(status)
    .bind(progress_percent)
    .bind(step)
    .bind(eta)
    .fetch_optional(&self.pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Order item {} not found.", order_item_id)))?;
    Ok(updated)
  }

  async fn create_assignment(
    &self,
    employee_id: Uuid,
    order_item_id: Uuid,
    notes: Option<String>,
  ) -> Result<Assignment> {
    let mut tx = self.pool.begin().await?;

    // Guarded write: only claims the item when nobody holds it. Two racing
    // assigns serialize here; the loser sees zero rows affected.
    let claimed = sqlx::query(
      "UPDATE order_items SET assigned_to = $1, updated_at = NOW() WHERE id = $2 AND assigned_to IS NULL",
    )
    .bind(employee_id)
    .bind(order_item_id)
    .execute(&mut *tx)
    .await?;

    if claimed.rows_affected() == 0 {
      let exists = sqlx::query("SELECT 1 FROM order_items WHERE id = $1")
        .bind(order_item_id)
        .fetch_optional(&mut *tx)
        .await?;
      return match exists {
        Some(_) => Err(AppError::Conflict(format!(
          "Order item {} already has an active assignment.",
          order_item_id
        ))),
        None => Err(AppError::NotFound(format!("Order item {} not found.", order_item_id))),
      };
    }

    let assignment = sqlx::query_as::<_, Assignment>(&format!(
      "INSERT INTO assignments (id, order_item_id, employee_id, status, assigned_at, notes) \
       VALUES ($1, $2, $3, $4, NOW(), $5) RETURNING {}",
      ASSIGNMENT_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(order_item_id)
    .bind(employee_id)
    .bind(AssignmentStatus::Assigned)
    .bind(notes)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(assignment)
  }

  async fn delete_assignment(&self, assignment_id: Uuid) -> Result<()> {
    let mut tx = self.pool.begin().await?;

    let referenced: Option<(Uuid,)> =
      sqlx::query_as("DELETE FROM assignments WHERE id = $1 RETURNING order_item_id")
        .bind(assignment_id)
        .fetch_optional(&mut *tx)
        .await?;

    let order_item_id = match referenced {
      Some((id,)) => id,
      None => return Err(AppError::NotFound(format!("Assignment {} not found.", assignment_id))),
    };

    sqlx::query("UPDATE order_items SET assigned_to = NULL, updated_at = NOW() WHERE id = $1")
      .bind(order_item_id)
      .execute(&mut *tx)
      .await?;

    tx.commit().await?;
    Ok(())
  }

  async fn find_assignment(&self, assignment_id: Uuid) -> Result<Option<Assignment>> {
    let assignment = sqlx::query_as::<_, Assignment>(&format!(
      "SELECT {} FROM assignments WHERE id = $1",
      ASSIGNMENT_COLUMNS
    ))
    .bind(assignment_id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(assignment)
  }

  async fn assignment_for_order_item(&self, order_item_id: Uuid) -> Result<Option<Assignment>> {
    let assignment = sqlx::query_as::<_, Assignment>(&format!(
      "SELECT {} FROM assignments WHERE order_item_id = $1",
      ASSIGNMENT_COLUMNS
    ))
    .bind(order_item_id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(assignment)
  }

  async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>> {
    let admin = sqlx::query_as::<_, AdminUser>(
      "SELECT id, email, password_hash, secret_key_hash, active, created_at FROM admin_users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(&self.pool)
    .await?;
    Ok(admin)
  }

  async fn find_admin(&self, admin_id: Uuid) -> Result<Option<AdminUser>> {
    let admin = sqlx::query_as::<_, AdminUser>(
      "SELECT id, email, password_hash, secret_key_hash, active, created_at FROM admin_users WHERE id = $1",
    )
    .bind(admin_id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(admin)
  }

  async fn insert_admin_session(&self, session: AdminSession) -> Result<()> {
    sqlx::query(
      "INSERT INTO admin_sessions (token, admin_user_id, expires_at, created_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(&session.token)
    .bind(session.admin_user_id)
    .bind(session.expires_at)
    .bind(session.created_at)
    .execute(&self.pool)
    .await?;
    Ok(())
  }

  async fn find_admin_session(&self, token: &str) -> Result<Option<AdminSession>> {
    let session = sqlx::query_as::<_, AdminSession>(
      "SELECT token, admin_user_id, expires_at, created_at FROM admin_sessions WHERE token = $1",
    )
    .bind(token)
    .fetch_optional(&self.pool)
    .await?;
    Ok(session)
  }

  async fn delete_admin_session(&self, token: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM admin_sessions WHERE token = $1")
      .bind(token)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected())
  }

  async fn insert_stack(&self, stack: Stack) -> Result<()> {
    sqlx::query(
      "INSERT INTO stacks (id, name, stack_type, description, base_price_cents, active, created_at, updated_at) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8) ON CONFLICT (id) DO NOTHING",
    )
    .bind(stack.id)
    .bind(&stack.name)
    .bind(&stack.stack_type)
    .bind(&stack.description)
    .bind(stack.base_price_cents)
    .bind(stack.active)
    .bind(stack.created_at)
    .bind(stack.updated_at)
    .execute(&self.pool)
    .await?;
    Ok(())
  }

  async fn insert_sub_stack(&self, sub_stack: SubStack) -> Result<()> {
    sqlx::query(
      "INSERT INTO sub_stacks (id, stack_id, name, price_cents, active) \
       VALUES ($1, $2, $3, $4, $5) ON CONFLICT (id) DO NOTHING",
    )
    .bind(sub_stack.id)
    .bind(sub_stack.stack_id)
    .bind(&sub_stack.name)
    .bind(sub_stack.price_cents)
    .bind(sub_stack.active)
    .execute(&self.pool)
    .await?;
    Ok(())
  }

  async fn insert_employee(&self, employee: Employee) -> Result<()> {
    sqlx::query(
      "INSERT INTO employees (id, name, email, role, specialization, active, created_at) \
       VALUES ($1, $2, $3, $4, $5, $6, $7) ON CONFLICT (id) DO NOTHING",
    )
    .bind(employee.id)
    .bind(&employee.name)
    .bind(&employee.email)
    .bind(&employee.role)
    .bind(&employee.specialization)
    .bind(employee.active)
    .bind(employee.created_at)
    .execute(&self.pool)
    .await?;
    Ok(())
  }

  async fn insert_admin_user(&self, admin: AdminUser) -> Result<()> {
    sqlx::query(
      "INSERT INTO admin_users (id, email, password_hash, secret_key_hash, active, created_at) \
       VALUES ($1, $2, $3, $4, $5, $6) ON CONFLICT (email) DO NOTHING",
    )
    .bind(admin.id)
    .bind(&admin.email)
    .bind(&admin.password_hash)
    .bind(&admin.secret_key_hash)
    .bind(admin.active)
    .bind(admin.created_at)
    .execute(&self.pool)
    .await?;
    Ok(())
  }
}
