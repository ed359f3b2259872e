//! Common infrastructure

pub mod logger;

pub use logger::{init_logger, init_test_logger};
