// src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::CartStack;
use crate::state::AppState;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct AddToCartPayload {
  pub user_id: Uuid,
  pub stack_id: Uuid,
  #[serde(default)]
  pub sub_stack_ids: Vec<Uuid>,
}

#[derive(Deserialize, Debug)]
pub struct RemoveFromCartPayload {
  pub user_id: Uuid,
  pub cart_stack_id: Uuid,
}

#[instrument(
    name = "handler::add_to_cart",
    skip(app_state, req_payload),
    fields(user_id = %req_payload.user_id, stack_id = %req_payload.stack_id)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddToCartPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();

  let stack = app_state
    .store
    .find_stack(payload.stack_id)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Stack {} not found.", payload.stack_id)))?;
  if !stack.active {
    return Err(AppError::Validation(format!("Stack {} is not available for rent.", stack.id)));
  }

  // Each chosen sub-stack must be an active add-on of the chosen stack;
  // the cart row's total is precomputed from the prices seen here.
  let mut total_price_cents = stack.base_price_cents;
  if !payload.sub_stack_ids.is_empty() {
    let sub_stacks = app_state.store.sub_stacks_by_ids(&payload.sub_stack_ids).await?;
    for sub_id in &payload.sub_stack_ids {
      let sub = sub_stacks
        .iter()
        .find(|s| s.id == *sub_id)
        .ok_or_else(|| AppError::NotFound(format!("Sub-stack {} not found.", sub_id)))?;
      if sub.stack_id != stack.id || !sub.active {
        return Err(AppError::Validation(format!(
          "Sub-stack {} does not belong to stack {} or is inactive.",
          sub_id, stack.id
        )));
      }
      total_price_cents += sub.price_cents;
    }
  }

  let row = app_state
    .store
    .add_cart_stack(CartStack {
      id: Uuid::new_v4(),
      user_id: payload.user_id,
      stack_id: payload.stack_id,
      sub_stack_ids: payload.sub_stack_ids,
      total_price_cents,
      added_at: Utc::now(),
    })
    .await?;

  info!(cart_stack_id = %row.id, total_price_cents = row.total_price_cents, "Stack added to cart.");
  Ok(HttpResponse::Created().json(row))
}

#[instrument(name = "handler::list_cart", skip(app_state))]
pub async fn list_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();
  let rows = app_state.store.cart_for_user(user_id).await?;
  let subtotal_cents: i64 = rows.iter().map(|r| r.total_price_cents).sum();
  Ok(HttpResponse::Ok().json(json!({
      "items": rows,
      "subtotalCents": subtotal_cents,
  })))
}

#[instrument(
    name = "handler::remove_from_cart",
    skip(app_state, req_payload),
    fields(user_id = %req_payload.user_id)
)]
pub async fn remove_from_cart_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<RemoveFromCartPayload>,
) -> Result<HttpResponse, AppError> {
  let removed = app_state
    .store
    .remove_cart_stack(req_payload.user_id, req_payload.cart_stack_id)
    .await?;
  if removed == 0 {
    return Err(AppError::NotFound(format!(
      "Cart row {} not found for this user.",
      req_payload.cart_stack_id
    )));
  }
  Ok(HttpResponse::Ok().json(json!({ "removed": removed })))
}
