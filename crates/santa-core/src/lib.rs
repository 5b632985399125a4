//! # santa-core
//!
//! Core crate for Random Acts of Santa. Contains configuration schemas
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Santa crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
