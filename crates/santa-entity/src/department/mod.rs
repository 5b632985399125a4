pub mod model;

pub use model::{Department, DepartmentSummary};
