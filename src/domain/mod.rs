//! Domain entities shared by the repository and service layers.

pub mod category;
pub mod contact;
pub mod page;
pub mod post;
pub mod route;
pub mod types;
