// tests/admin_session_tests.rs
mod common;

use common::*;
use chrono::{Duration, Utc};
use stackrent::errors::AppError;
use stackrent::flows::admin_session;
use stackrent::models::AdminSession;
use stackrent::store::{MemStore, Store};

#[tokio::test]
async fn login_mints_a_session_that_validates() {
  setup_tracing();
  let store = MemStore::new();
  let admin = seed_admin(&store, "admin@stackrent.example", "correct-horse", "battery-staple", true).await;

  let outcome = admin_session::login(&store, "admin@stackrent.example", "correct-horse", "battery-staple", 7)
    .await
    .unwrap();

  assert_eq!(outcome.admin_id, admin.id);
  assert_eq!(outcome.token.len(), 64);
  assert!(outcome.token.chars().all(|c| c.is_ascii_hexdigit()));
  // 7-day expiry, give or take the test's own runtime.
  let ttl = outcome.expires_at - Utc::now();
  assert!(ttl > Duration::days(6) && ttl <= Duration::days(7));

  let identity = admin_session::validate(&store, &outcome.token).await.unwrap().unwrap();
  assert_eq!(identity.admin_id, admin.id);
  assert_eq!(identity.email, "admin@stackrent.example");
}

#[tokio::test]
async fn every_credential_failure_reads_the_same() {
  setup_tracing();
  let store = MemStore::new();
  seed_admin(&store, "admin@stackrent.example", "correct-horse", "battery-staple", true).await;
  seed_admin(&store, "retired@stackrent.example", "correct-horse", "battery-staple", false).await;

  // Wrong password, wrong secret key, unknown email, deactivated account:
  // one indistinguishable Auth error for all four.
  for (email, password, secret) in [
    ("admin@stackrent.example", "wrong", "battery-staple"),
    ("admin@stackrent.example", "correct-horse", "wrong"),
    ("nobody@stackrent.example", "correct-horse", "battery-staple"),
    ("retired@stackrent.example", "correct-horse", "battery-staple"),
  ] {
    let err = admin_session::login(&store, email, password, secret, 7).await.unwrap_err();
    assert!(matches!(err, AppError::Auth(_)), "expected Auth error for {}", email);
  }

  // Missing fields are a validation failure, not a credential one.
  let err = admin_session::login(&store, "", "correct-horse", "battery-staple", 7).await.unwrap_err();
  assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn expired_session_is_indistinguishable_from_no_session() {
  setup_tracing();
  let store = MemStore::new();
  let admin = seed_admin(&store, "admin@stackrent.example", "correct-horse", "battery-staple", true).await;

  store
    .insert_admin_session(AdminSession {
      token: "a".repeat(64),
      admin_user_id: admin.id,
      expires_at: Utc::now() - Duration::minutes(1),
      created_at: Utc::now() - Duration::days(8),
    })
    .await
    .unwrap();

  assert!(admin_session::validate(&store, &"a".repeat(64)).await.unwrap().is_none());
  assert!(admin_session::validate(&store, "missing-token").await.unwrap().is_none());
  assert!(admin_session::validate(&store, "").await.unwrap().is_none());
}

#[tokio::test]
async fn session_of_a_deactivated_admin_stops_validating() {
  setup_tracing();
  let store = MemStore::new();
  let admin = seed_admin(&store, "retired@stackrent.example", "correct-horse", "battery-staple", false).await;

  store
    .insert_admin_session(AdminSession {
      token: "b".repeat(64),
      admin_user_id: admin.id,
      expires_at: Utc::now() + Duration::days(7),
      created_at: Utc::now(),
    })
    .await
    .unwrap();

  assert!(admin_session::validate(&store, &"b".repeat(64)).await.unwrap().is_none());
}

#[tokio::test]
async fn logout_deletes_the_session_and_is_idempotent() {
  setup_tracing();
  let store = MemStore::new();
  seed_admin(&store, "admin@stackrent.example", "correct-horse", "battery-staple", true).await;

  let outcome = admin_session::login(&store, "admin@stackrent.example", "correct-horse", "battery-staple", 7)
    .await
    .unwrap();
  assert!(admin_session::validate(&store, &outcome.token).await.unwrap().is_some());

  admin_session::logout(&store, &outcome.token).await.unwrap();
  assert!(admin_session::validate(&store, &outcome.token).await.unwrap().is_none());

  // A second logout of the same token still succeeds.
  admin_session::logout(&store, &outcome.token).await.unwrap();
}
