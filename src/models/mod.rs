pub mod category;
#[cfg(feature = "server")]
pub mod config;
pub mod contact;
pub mod page;
pub mod post;
