// src/web/handlers/assignment_handlers.rs

use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::flows::assignment;
use crate::models::OrderItemStatus;
use crate::state::AppState;
use crate::web::admin_guard::AdminContext;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct CreateAssignmentPayload {
  pub employee_id: Uuid,
  pub order_item_id: Uuid,
  pub notes: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct AdvanceOrderItemPayload {
  pub status: OrderItemStatus,
  pub progress_percent: i32,
  pub eta: Option<DateTime<Utc>>,
}

#[instrument(name = "handler::list_employees", skip(app_state, _admin))]
pub async fn list_employees_handler(
  app_state: web::Data<AppState>,
  _admin: AdminContext,
) -> Result<HttpResponse, AppError> {
  let employees = app_state.store.list_active_employees().await?;
  Ok(HttpResponse::Ok().json(employees))
}

#[instrument(name = "handler::get_order_item", skip(app_state, _admin))]
pub async fn get_order_item_handler(
  app_state: web::Data<AppState>,
  _admin: AdminContext,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let order_item_id = path.into_inner();
  let item = app_state
    .store
    .find_order_item(order_item_id)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Order item {} not found.", order_item_id)))?;
  let active_assignment = app_state.store.assignment_for_order_item(order_item_id).await?;

  Ok(HttpResponse::Ok().json(json!({
      "item": item,
      "assignment": active_assignment,
  })))
}

#[instrument(
    name = "handler::create_assignment",
    skip(app_state, admin, req_payload),
    fields(employee_id = %req_payload.employee_id, order_item_id = %req_payload.order_item_id)
)]
pub async fn create_assignment_handler(
  app_state: web::Data<AppState>,
  admin: AdminContext,
  req_payload: web::Json<CreateAssignmentPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  let created = assignment::assign(
    app_state.store.as_ref(),
    payload.employee_id,
    payload.order_item_id,
    payload.notes,
  )
  .await?;

  info!(admin = %admin.0.email, assignment_id = %created.id, "Assignment created.");
  Ok(HttpResponse::Created().json(created))
}

#[instrument(name = "handler::delete_assignment", skip(app_state, admin))]
pub async fn delete_assignment_handler(
  app_state: web::Data<AppState>,
  admin: AdminContext,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let assignment_id = path.into_inner();
  assignment::unassign(app_state.store.as_ref(), assignment_id).await?;

  info!(admin = %admin.0.email, assignment_id = %assignment_id, "Assignment deleted.");
  Ok(HttpResponse::Ok().json(json!({ "deleted": assignment_id })))
}

#[instrument(
    name = "handler::advance_order_item",
    skip(app_state, admin, req_payload),
    fields(progress_percent = req_payload.progress_percent)
)]
pub async fn advance_order_item_handler(
  app_state: web::Data<AppState>,
  admin: AdminContext,
  path: web::Path<Uuid>,
  req_payload: web::Json<AdvanceOrderItemPayload>,
) -> Result<HttpResponse, AppError> {
  let order_item_id = path.into_inner();
  let payload = req_payload.into_inner();
  let updated = assignment::advance(
    app_state.store.as_ref(),
    order_item_id,
    payload.status,
    payload.progress_percent,
    payload.eta,
  )
  .await?;

  info!(admin = %admin.0.email, order_item_id = %order_item_id, "Order item advanced.");
  Ok(HttpResponse::Ok().json(updated))
}
