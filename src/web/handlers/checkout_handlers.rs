// src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::flows::checkout;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct CheckoutPayload {
  #[serde(default)]
  pub discount_cents: i64,
}

#[instrument(name = "handler::checkout", skip(app_state, req_payload))]
pub async fn start_checkout_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  req_payload: web::Json<CheckoutPayload>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();

  match checkout::convert_cart(app_state.store.as_ref(), user_id, req_payload.discount_cents).await {
    Ok(order) => Ok(HttpResponse::Created().json(order)),
    Err(err) => {
      // Conversion is all-or-nothing; a single error message covers the
      // whole attempt and the cart stays intact.
      warn!(user_id = %user_id, error = %err, "Checkout conversion failed.");
      Err(err)
    }
  }
}
