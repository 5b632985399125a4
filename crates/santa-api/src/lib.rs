//! # santa-api
//!
//! HTTP API layer for Random Acts of Santa built on Axum.
//!
//! Provides all REST endpoints, middleware, extractors, DTOs, and the
//! shared application state.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
