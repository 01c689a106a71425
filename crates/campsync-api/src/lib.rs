//! CampSync API - REST surface
//!
//! This crate provides the REST API for CampSync: sync triggers,
//! campaign read endpoints, and health checks.
#![recursion_limit = "256"]

pub mod handlers;
pub mod openapi;
pub mod routes;

pub use openapi::create_openapi_routes;
pub use routes::{create_router, AppState};
