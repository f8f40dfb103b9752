pub mod models;
pub mod kv;
pub mod livekit;
pub mod service;
pub mod config;
pub mod error;
pub mod logging;
pub mod bootstrap;
pub mod resilience;
pub mod links;

pub use config::Config;
pub use error::{Error, Result};
