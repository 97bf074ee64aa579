//! Data models.

pub mod config;
pub mod result;

pub use config::{ModelConfig, ReaderConfig, ScreenConfig};
pub use result::{ContactInfo, ScreeningResult};
