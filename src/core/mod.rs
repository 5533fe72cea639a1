// src/core/mod.rs
//! Configuration, storage and HTTP plumbing shared by the server and the CLI

pub mod approvals;
pub mod config_manager;
pub mod database;
pub mod models;
pub mod notifier;
pub mod repos;
pub mod service_client;

pub use config_manager::ConfigManager;
pub use database::Database;
pub use notifier::{NotificationChange, NotificationHub};
pub use service_client::ServiceClient;
