pub mod ccu_client;
pub mod config;

pub use ccu_client::CcuClientError;
pub use config::ConfigError;
