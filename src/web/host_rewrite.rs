// src/web/host_rewrite.rs

//! Host-based routing: requests whose `Host` matches the configured admin
//! hostname are rewritten so every path is served under the `/admin`
//! prefix. Other hosts pass through untouched.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::uri::{PathAndQuery, Uri};
use actix_web::Error;
use std::future::{ready, Ready};
use tracing::debug;

pub struct AdminHostRewrite {
  admin_hostname: String,
}

impl AdminHostRewrite {
  pub fn new(admin_hostname: impl Into<String>) -> Self {
    Self { admin_hostname: admin_hostname.into() }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AdminHostRewrite
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
  S::Future: 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Transform = AdminHostRewriteMiddleware<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AdminHostRewriteMiddleware {
      service,
      admin_hostname: self.admin_hostname.clone(),
    }))
  }
}

pub struct AdminHostRewriteMiddleware<S> {
  service: S,
  admin_hostname: String,
}

impl<S, B> Service<ServiceRequest> for AdminHostRewriteMiddleware<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
  S::Future: 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Future = S::Future;

  forward_ready!(service);

  fn call(&self, mut req: ServiceRequest) -> Self::Future {
    let host = req.connection_info().host().to_string();
    // The Host header may carry a port; only the name participates.
    let hostname = host.split(':').next().unwrap_or("");

    if hostname.eq_ignore_ascii_case(&self.admin_hostname) && !req.path().starts_with("/admin") {
      let original = req.head().uri.clone();
      let rewritten = match original.query() {
        Some(q) => format!("/admin{}?{}", original.path(), q),
        None => format!("/admin{}", original.path()),
      };

      // A path that fails to re-parse is passed through unmodified.
      if let Ok(path_and_query) = rewritten.parse::<PathAndQuery>() {
        let mut parts = original.into_parts();
        parts.path_and_query = Some(path_and_query);
        if let Ok(uri) = Uri::from_parts(parts) {
          debug!(host = %host, uri = %uri, "Rewrote request onto the /admin prefix.");
          req.match_info_mut().get_mut().update(&uri);
          req.head_mut().uri = uri;
        }
      }
    }

    self.service.call(req)
  }
}
