//! Quantity Pricing Module
//!
//! Resolves the unit price of a purchasable item for a requested quantity.
//! Tiers are filtered against a [`PricingSnapshot`], priced, handed to the
//! registered post-processors and then looked up per quantity.

mod calculator;
pub mod engine;
pub mod hooks;
pub mod matcher;
pub mod resolver;
pub mod snapshot;

pub use calculator::*;
pub use engine::*;
pub use hooks::*;
pub use matcher::*;
pub use resolver::*;
pub use snapshot::*;
