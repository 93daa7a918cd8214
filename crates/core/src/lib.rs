pub mod amount;
pub mod config;

pub use amount::Amount;
pub use config::{ConfigError, OcrConfig, PayscanConfig, ShareConfig};
