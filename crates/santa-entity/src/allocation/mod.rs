pub mod model;

pub use model::{AllocationSnapshot, LinkAllocation};
