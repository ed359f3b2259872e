//! Core module - engine configuration and widget settings
//!
//! # Contents
//!
//! - [`EngineConfig`] - environment-driven engine configuration
//! - [`QuantityWidgetSettings`] - stored widget settings and their loader

pub mod config;
pub mod settings;

pub use config::EngineConfig;
pub use settings::{QuantityPriceSettings, QuantityWidgetSettings};
