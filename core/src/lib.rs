//! SQL Runner Core Library
//! Query gateway, session management, and catalog/history orchestration
//! for a remote tabular data backend.

pub mod catalog;
pub mod client;
pub mod config;
pub mod gateway;
pub mod history;
pub mod models;
pub mod query;
pub mod session;
pub mod workbench;

pub use gateway::{GatewayServer, UpstreamClient};
pub use workbench::Workbench;
