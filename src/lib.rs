pub mod draw;
pub mod link;
pub mod render;
pub mod router;
pub mod secret;
pub mod service;
pub mod types;

#[cfg(feature = "server")]
pub mod config;
