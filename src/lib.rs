// src/lib.rs

//! Backend for a storefront that rents "stacks" of business services.
//!
//! Customers browse a catalog, fill a cart, and check out into orders whose
//! items move through a fulfillment lifecycle; administrators sign in through
//! a two-factor gate and assign employees to order items. All durable state
//! sits behind the [`store::Store`] trait, injected into handlers via
//! [`state::AppState`].

pub mod config;
pub mod errors;
pub mod flows;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod web;
