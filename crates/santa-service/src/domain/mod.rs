pub mod admin;

pub use admin::AdminDomainService;
