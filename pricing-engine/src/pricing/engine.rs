//! Quantity Price Engine
//!
//! Entry point for quantity pricing. An offer is built once per pricing
//! interaction (e.g. when the add-to-cart form is first rendered) and then
//! answers every quantity lookup of that interaction, so time-based
//! conditions stay stable while the customer edits the quantity.

use super::hooks::{TierPostProcessor, run_post_processors};
use super::resolver::{ResolvedTier, build_active_tier_sequence, price_for_quantity};
use super::snapshot::PricingSnapshot;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::decimal;
use shared::error::PricingResult;
use shared::models::{Price, QuantityFieldSettings, QuantityTier};

/// Decimal places used by the tier table
const DISPLAY_PLACES: u32 = 2;

/// Quantity Price Engine - resolves tiered prices for a purchasable item
#[derive(Default)]
pub struct QuantityPriceEngine {
    post_processors: Vec<Box<dyn TierPostProcessor>>,
}

impl std::fmt::Debug for QuantityPriceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.post_processors.iter().map(|p| p.name()).collect();
        f.debug_struct("QuantityPriceEngine")
            .field("post_processors", &names)
            .finish()
    }
}

impl QuantityPriceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a post-processor (runs after those already registered)
    pub fn with_post_processor(mut self, processor: impl TierPostProcessor + 'static) -> Self {
        self.register(Box::new(processor));
        self
    }

    pub fn register(&mut self, processor: Box<dyn TierPostProcessor>) {
        self.post_processors.push(processor);
    }

    /// Build the offer for one pricing interaction
    ///
    /// # Arguments
    /// * `settings` - Quantity field settings (step → comparison scale, base anchor)
    /// * `tiers` - Configured tiers, in configuration order
    /// * `snapshot` - Facts about the item and the current request
    pub fn build_offer(
        &self,
        settings: &QuantityFieldSettings,
        tiers: &[QuantityTier],
        snapshot: &PricingSnapshot,
    ) -> PricingResult<QuantityPriceOffer> {
        let active = build_active_tier_sequence(tiers, snapshot)?;
        let active = run_post_processors(&self.post_processors, active, snapshot);

        // Regular price sits first so any matching tier overrides it
        let mut entries = Vec::with_capacity(active.len() + 1);
        entries.push(ResolvedTier::base(snapshot.price().clone(), settings.base_anchor()));
        entries.extend(active);

        tracing::debug!(
            variation_id = snapshot.variation_id(),
            configured = tiers.len(),
            active = entries.len() - 1,
            "Quantity price offer built"
        );

        Ok(QuantityPriceOffer {
            entries,
            scale: settings.scale(),
            regular_price: snapshot.price().clone(),
        })
    }

    /// Price for `quantity`, or `None` when no tier applies (use the regular price)
    pub fn resolve_price(
        &self,
        settings: &QuantityFieldSettings,
        tiers: &[QuantityTier],
        snapshot: &PricingSnapshot,
        quantity: &str,
    ) -> PricingResult<Option<Price>> {
        self.build_offer(settings, tiers, snapshot)?.price_for(quantity)
    }
}

/// Priced tiers for one pricing interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuantityPriceOffer {
    /// Base entry followed by the active tiers
    entries: Vec<ResolvedTier>,
    scale: u32,
    regular_price: Price,
}

/// Row of the customer-facing tier table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierTableRow {
    pub quantity_start: Decimal,
    pub quantity_end: Option<Decimal>,
    /// Price rounded for display
    pub price: Price,
}

impl QuantityPriceOffer {
    /// Price for a quantity given as a decimal string
    pub fn price_for(&self, quantity: &str) -> PricingResult<Option<Price>> {
        let quantity = decimal::parse(quantity)?;
        Ok(self.price_for_decimal(quantity))
    }

    pub fn price_for_decimal(&self, quantity: Decimal) -> Option<Price> {
        let price = price_for_quantity(&self.entries, quantity, self.scale);
        tracing::trace!(%quantity, price = ?price, "Quantity price lookup");
        price
    }

    /// Price for `quantity`, falling back to the regular price
    pub fn price_or_regular(&self, quantity: &str) -> PricingResult<Price> {
        Ok(self
            .price_for(quantity)?
            .unwrap_or_else(|| self.regular_price.clone()))
    }

    /// Active configured tiers, in resolution order (base entry excluded)
    pub fn active_tiers(&self) -> &[ResolvedTier] {
        &self.entries[1..]
    }

    /// Every entry including the base entry
    pub fn entries(&self) -> &[ResolvedTier] {
        &self.entries
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn regular_price(&self) -> &Price {
        &self.regular_price
    }

    /// Presentation rows for the active tiers
    pub fn tier_table(&self) -> Vec<TierTableRow> {
        self.active_tiers()
            .iter()
            .map(|entry| TierTableRow {
                quantity_start: entry.quantity_start,
                quantity_end: entry.quantity_end,
                price: entry.price.rounded(DISPLAY_PLACES),
            })
            .collect()
    }
}
