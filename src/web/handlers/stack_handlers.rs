// src/web/handlers/stack_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::list_stacks", skip(app_state))]
pub async fn list_stacks_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let stacks = app_state.store.list_active_stacks().await?;
  Ok(HttpResponse::Ok().json(stacks))
}

#[instrument(name = "handler::get_stack", skip(app_state))]
pub async fn get_stack_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let stack_id = path.into_inner();
  let stack = app_state
    .store
    .find_stack(stack_id)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Stack {} not found.", stack_id)))?;
  let sub_stacks = app_state.store.sub_stacks_for_stack(stack_id).await?;

  Ok(HttpResponse::Ok().json(json!({
      "stack": stack,
      "subStacks": sub_stacks,
  })))
}
