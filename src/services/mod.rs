pub use errors::{ServiceError, ServiceResult};

pub mod blog;
pub mod contact;
pub mod errors;
pub mod pages;
pub mod sitemap;
