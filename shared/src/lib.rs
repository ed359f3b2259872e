//! Shared types for the quantity pricing engine
//!
//! Domain models, exact decimal helpers and error types used across the
//! workspace. Nothing in this crate performs I/O.

pub mod decimal;
pub mod error;
pub mod models;

// Re-exports
pub use error::{ArithmeticError, PricingError, PricingResult};
pub use models::{
    AdjustmentOperation, AdjustmentType, ConditionSet, Price, PurchasableItem,
    QuantityFieldSettings, QuantityTier,
};
pub use rust_decimal::Decimal;
