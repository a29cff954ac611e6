// src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{
  admin_auth_handlers, assignment_handlers, cart_handlers, checkout_handlers, progress_handlers, stack_handlers,
};

// Simple health check handler function.
// In a real deployment this might also check DB connectivity.
async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1") // Base path for API version 1
      // Health Check Route
      .route("/health", web::get().to(health_check_handler))
      // Catalog Routes
      .service(
        web::scope("/stacks")
          .route("", web::get().to(stack_handlers::list_stacks_handler))
          .route("/{stack_id}", web::get().to(stack_handlers::get_stack_handler)),
      )
      // Cart Routes
      .service(
        web::scope("/cart")
          .route("/add", web::post().to(cart_handlers::add_to_cart_handler))
          .route("/remove", web::post().to(cart_handlers::remove_from_cart_handler))
          .route("/{user_id}", web::get().to(cart_handlers::list_cart_handler)),
      )
      // Checkout Routes
      .service(
        web::scope("/checkout")
          .route("/{user_id}", web::post().to(checkout_handlers::start_checkout_handler)),
      )
      // Progress Dashboard Routes
      .service(
        web::scope("/progress")
          .route("/{user_id}", web::get().to(progress_handlers::progress_dashboard_handler)),
      ),
  );

  // Admin surface. Requests to the admin hostname are rewritten onto this
  // prefix by `AdminHostRewrite`; every route except login/logout resolves
  // an `AdminContext`, which gates it on a valid session cookie.
  cfg.service(
    web::scope("/admin")
      .route("/login", web::post().to(admin_auth_handlers::admin_login_handler))
      .route("/logout", web::post().to(admin_auth_handlers::admin_logout_handler))
      .route("/session", web::get().to(admin_auth_handlers::admin_session_info_handler))
      .route("/employees", web::get().to(assignment_handlers::list_employees_handler))
      .service(
        web::scope("/order-items")
          .route("/{order_item_id}", web::get().to(assignment_handlers::get_order_item_handler))
          .route(
            "/{order_item_id}/advance",
            web::post().to(assignment_handlers::advance_order_item_handler),
          ),
      )
      .service(
        web::scope("/assignments")
          .route("", web::post().to(assignment_handlers::create_assignment_handler))
          .route(
            "/{assignment_id}",
            web::delete().to(assignment_handlers::delete_assignment_handler),
          ),
      ),
  );
}
