// src/services/seed.rs

//! Startup seeding: a small demo catalog, a couple of employees, and a
//! bootstrap admin. Enabled by `SEED_DB=true`; every insert is
//! insert-if-absent so repeated startups are harmless.

use crate::errors::Result;
use crate::models::{AdminUser, Employee, Stack, SubStack};
use crate::services::auth_service;
use crate::store::Store;
use chrono::Utc;
use std::env;
use tracing::{info, instrument};
use uuid::Uuid;

#[instrument(name = "seed::run", skip(store), err(Display))]
pub async fn run(store: &dyn Store) -> Result<()> {
  let now = Utc::now();

  let catalog = [
    ("Marketing Stack", "marketing", "Content, campaigns, and analytics as a rented team.", 250_000i64),
    ("Finance Stack", "finance", "Bookkeeping, payroll, and reporting.", 180_000),
    ("Engineering Stack", "engineering", "A product squad on demand.", 420_000),
  ];
  for (name, stack_type, description, base_price_cents) in catalog {
    let stack = Stack {
      id: Uuid::new_v4(),
      name: name.to_string(),
      stack_type: stack_type.to_string(),
      description: Some(description.to_string()),
      base_price_cents,
      active: true,
      created_at: now,
      updated_at: now,
    };
    let stack_id = stack.id;
    store.insert_stack(stack).await?;
    store
      .insert_sub_stack(SubStack {
        id: Uuid::new_v4(),
        stack_id,
        name: format!("{} add-on", name),
        price_cents: 50_000,
        active: true,
      })
      .await?;
  }

  for (name, email, role, specialization) in [
    ("Asha Rao", "asha@stackrent.example", "operator", Some("marketing")),
    ("Jonas Meyer", "jonas@stackrent.example", "operator", Some("finance")),
  ] {
    store
      .insert_employee(Employee {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        specialization: specialization.map(str::to_string),
        active: true,
        created_at: now,
      })
      .await?;
  }

  let admin_email = env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| "admin@stackrent.example".to_string());
  let admin_password = env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "change-me".to_string());
  let admin_secret_key = env::var("SEED_ADMIN_SECRET_KEY").unwrap_or_else(|_| "change-me-too".to_string());

  store
    .insert_admin_user(AdminUser {
      id: Uuid::new_v4(),
      email: admin_email.clone(),
      password_hash: auth_service::hash_credential(&admin_password)?,
      secret_key_hash: auth_service::hash_credential(&admin_secret_key)?,
      active: true,
      created_at: now,
    })
    .await?;

  info!(admin_email = %admin_email, "Database seeding complete.");
  Ok(())
}
