//! Startup wiring for the `TuneIn` server
//!
//! Loads configuration and builds the service graph handed to the HTTP layer.

pub mod config;
pub mod services;

pub use config::load_config;
pub use services::{init_services, Services};
