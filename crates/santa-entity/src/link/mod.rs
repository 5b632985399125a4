pub mod model;

pub use model::{LinkSummary, UpsertLink, WishlistLink};
