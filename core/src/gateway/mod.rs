//! Gateway module - transparent forwarding to the backend service

pub mod error;
pub mod forward;
pub mod server;
pub mod upstream;

pub use error::GatewayError;
pub use server::{AppState, GatewayServer};
pub use upstream::UpstreamClient;
