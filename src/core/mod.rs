pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod db;
#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;

pub use config::{AppConfig, NotificationDefaults};
