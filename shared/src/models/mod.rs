//! Data models
//!
//! Read-only pricing configuration and catalog facts consumed by the
//! pricing engine.

pub mod price;
pub mod purchasable;
pub mod quantity_field;
pub mod quantity_tier;

// Re-exports
pub use price::*;
pub use purchasable::*;
pub use quantity_field::*;
pub use quantity_tier::*;
