//! # santa-entity
//!
//! Domain entity models for Random Acts of Santa. Every struct in this
//! crate represents a database table row or a domain value object. All
//! entities derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and
//! database entities additionally derive `sqlx::FromRow`.

pub mod allocation;
pub mod department;
pub mod domain;
pub mod link;
pub mod session;
pub mod user;
