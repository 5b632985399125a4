//! # santa-service
//!
//! Business logic service layer for Random Acts of Santa. Each service
//! orchestrates repositories and authentication to implement
//! application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod allocation;
pub mod context;
pub mod department;
pub mod domain;
pub mod link;
pub mod user;

pub use allocation::{AllocationEngine, FairnessSelector, RandomTieBreaker, TieBreaker};
pub use context::RequestContext;
pub use department::DepartmentService;
pub use domain::AdminDomainService;
pub use link::LinkService;
pub use user::AdminUserService;
