pub mod model;

pub use model::{DomainWithUsers, EmailDomain};
