// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use chrono::{Duration, Utc};
use once_cell::sync::Lazy;
use stackrent::models::{AdminUser, CartStack, Employee, Order, OrderItem, OrderItemStatus, Stack, SubStack};
use stackrent::services::auth_service;
use stackrent::store::Store;
use uuid::Uuid;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Fixture builders over the injected store ---

pub async fn seed_stack(store: &dyn Store, name: &str, base_price_cents: i64) -> Stack {
  let now = Utc::now();
  let stack = Stack {
    id: Uuid::new_v4(),
    name: name.to_string(),
    stack_type: "general".to_string(),
    description: Some(format!("{} description", name)),
    base_price_cents,
    active: true,
    created_at: now,
    updated_at: now,
  };
  store.insert_stack(stack.clone()).await.unwrap();
  stack
}

pub async fn seed_sub_stack(store: &dyn Store, stack_id: Uuid, name: &str, price_cents: i64) -> SubStack {
  let sub = SubStack {
    id: Uuid::new_v4(),
    stack_id,
    name: name.to_string(),
    price_cents,
    active: true,
  };
  store.insert_sub_stack(sub.clone()).await.unwrap();
  sub
}

pub async fn seed_employee(store: &dyn Store, name: &str, active: bool) -> Employee {
  let employee = Employee {
    id: Uuid::new_v4(),
    name: name.to_string(),
    email: format!("{}@stackrent.example", name.to_lowercase().replace(' ', ".")),
    role: "operator".to_string(),
    specialization: None,
    active,
    created_at: Utc::now(),
  };
  store.insert_employee(employee.clone()).await.unwrap();
  employee
}

pub async fn seed_cart_row(store: &dyn Store, user_id: Uuid, stack_id: Uuid, total_price_cents: i64) -> CartStack {
  store
    .add_cart_stack(CartStack {
      id: Uuid::new_v4(),
      user_id,
      stack_id,
      sub_stack_ids: Vec::new(),
      total_price_cents,
      added_at: Utc::now(),
    })
    .await
    .unwrap()
}

/// Persists one order with one item per given stack id. Items get staggered
/// creation times (later index = newer) so ordering is observable.
pub async fn seed_order_with_items(store: &dyn Store, user_id: Uuid, stack_ids: &[Uuid]) -> (Order, Vec<OrderItem>) {
  let base = Utc::now() - Duration::minutes(stack_ids.len() as i64);
  let order = Order {
    id: Uuid::new_v4(),
    user_id,
    subtotal_cents: 0,
    discount_cents: 0,
    total_cents: 0,
    created_at: base,
  };
  let items: Vec<OrderItem> = stack_ids
    .iter()
    .enumerate()
    .map(|(idx, stack_id)| {
      let at = base + Duration::minutes(idx as i64);
      OrderItem {
        id: Uuid::new_v4(),
        order_id: order.id,
        user_id,
        stack_id: *stack_id,
        sub_stack_ids: Vec::new(),
        status: OrderItemStatus::Initiated,
        progress_percent: 0,
        step: OrderItemStatus::Initiated.step(),
        eta: None,
        assigned_to: None,
        created_at: at,
        updated_at: at,
      }
    })
    .collect();
  let order = store.convert_cart_to_order(order, items.clone()).await.unwrap();
  (order, items)
}

pub async fn seed_admin(store: &dyn Store, email: &str, password: &str, secret_key: &str, active: bool) -> AdminUser {
  let admin = AdminUser {
    id: Uuid::new_v4(),
    email: email.to_string(),
    password_hash: auth_service::hash_credential(password).unwrap(),
    secret_key_hash: auth_service::hash_credential(secret_key).unwrap(),
    active,
    created_at: Utc::now(),
  };
  store.insert_admin_user(admin.clone()).await.unwrap();
  admin
}
