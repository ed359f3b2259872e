//! Quantity Pricing Engine
//!
//! # Overview
//!
//! Computes per-unit prices for a purchasable item from an ordered list of
//! quantity tiers. Each tier covers an inclusive quantity range, may be
//! restricted by time, date, weekday, catalog, store and role conditions,
//! and adjusts the regular or list price by a fixed amount or a percentage.
//!
//! # Module layout
//!
//! ```text
//! pricing-engine/src/
//! ├── common/        # Logging
//! ├── core/          # Engine config, widget settings loader
//! ├── pricing/       # Snapshot, matcher, calculator, resolver, hooks, engine
//! └── utils/         # Time and list parsing
//! ```

pub mod common;
pub mod core;
pub mod pricing;
pub mod utils;

pub use common::{init_logger, init_test_logger};
pub use core::{EngineConfig, QuantityWidgetSettings};
pub use pricing::{
    Clock, ContextProvider, FixedClock, FnPostProcessor, PricingSnapshot, QuantityPriceEngine,
    QuantityPriceOffer, ResolvedTier, SnapshotBuilder, StaticRoles, SystemClock, TierOrigin,
    TierPostProcessor, TierTableRow,
};
pub use shared::{PricingError, PricingResult};
