pub mod model;

pub use model::{AdminUserRow, CreateUser, UpdateUser, User};
