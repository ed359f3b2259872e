//! Tier Resolver
//!
//! Two phases:
//! 1. [`build_active_tier_sequence`] filters the configured tiers down to the
//!    ones in effect for a snapshot and prices each of them. Done once per
//!    pricing interaction.
//! 2. [`price_for_quantity`] looks a quantity up in that sequence. Ranges are
//!    inclusive on both ends and the last matching entry wins.

use super::calculator::{adjust, select_base};
use super::matcher::applies;
use super::snapshot::PricingSnapshot;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::decimal::compare_decimal;
use shared::error::PricingResult;
use shared::models::{Price, QuantityTier};
use std::cmp::Ordering;

/// Where a resolved entry comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TierOrigin {
    /// Implicit regular-price entry
    Base,
    /// Configured tier at `index` in the configured list
    Configured { index: usize },
}

/// A tier in effect, with its computed price
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTier {
    pub origin: TierOrigin,
    pub quantity_start: Decimal,
    pub quantity_end: Option<Decimal>,
    /// Source tier (None for the base entry)
    pub tier: Option<QuantityTier>,
    pub price: Price,
}

impl ResolvedTier {
    /// Regular-price entry from `quantity_start` upwards
    pub fn base(price: Price, quantity_start: Decimal) -> Self {
        Self {
            origin: TierOrigin::Base,
            quantity_start,
            quantity_end: None,
            tier: None,
            price,
        }
    }

    pub fn configured(index: usize, tier: &QuantityTier, price: Price) -> Self {
        Self {
            origin: TierOrigin::Configured { index },
            quantity_start: tier.quantity_start,
            quantity_end: tier.quantity_end,
            tier: Some(tier.clone()),
            price,
        }
    }

    pub fn is_base(&self) -> bool {
        self.origin == TierOrigin::Base
    }

    /// `start <= quantity <= end` at `scale` digits
    pub fn matches(&self, quantity: Decimal, scale: u32) -> bool {
        if compare_decimal(self.quantity_start, quantity, scale) == Ordering::Greater {
            return false;
        }
        match self.quantity_end {
            Some(end) => compare_decimal(quantity, end, scale) != Ordering::Greater,
            None => true,
        }
    }
}

/// Tiers in effect for `snapshot`, in configured order, each with its price.
///
/// Tiers whose conditions fail are dropped. So are tiers whose base price is
/// missing (list price requested but absent). Malformed tiers are errors.
pub fn build_active_tier_sequence(
    tiers: &[QuantityTier],
    snapshot: &PricingSnapshot,
) -> PricingResult<Vec<ResolvedTier>> {
    let mut resolved = Vec::with_capacity(tiers.len());

    for (index, tier) in tiers.iter().enumerate() {
        tier.validate(index)?;

        if !applies(&tier.conditions, snapshot) {
            continue;
        }

        let Some(base) = select_base(tier, snapshot) else {
            tracing::debug!(index, "Tier wants a list price but the item has none, skipping");
            continue;
        };

        let price = adjust(base, tier)?;
        tracing::trace!(index, price = %price, "Tier active");
        resolved.push(ResolvedTier::configured(index, tier, price));
    }

    Ok(resolved)
}

/// Price of the last entry whose range contains `quantity`.
///
/// `None` means no entry matched; the caller falls back to the regular price.
pub fn price_for_quantity(resolved: &[ResolvedTier], quantity: Decimal, scale: u32) -> Option<Price> {
    resolved
        .iter()
        .rev()
        .find(|entry| entry.matches(quantity, scale))
        .map(|entry| entry.price.clone())
}
