// src/web/handlers/progress_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{error, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::flows::progress::{self, OrderItemProgress};
use crate::state::AppState;

#[instrument(name = "handler::progress_dashboard", skip(app_state))]
pub async fn progress_dashboard_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();

  // A failed aggregation is logged and served as an empty collection; the
  // dashboard never renders a partially-merged view.
  let rows: Vec<OrderItemProgress> = match progress::aggregate(app_state.store.as_ref(), user_id).await {
    Ok(rows) => rows,
    Err(err) => {
      error!(user_id = %user_id, error = %err, "Progress aggregation failed; serving an empty dashboard.");
      Vec::new()
    }
  };

  Ok(HttpResponse::Ok().json(rows))
}
