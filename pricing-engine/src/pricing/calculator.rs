//! Price Calculator
//!
//! Applies a tier's adjustment to its base price.
//! Uses rust_decimal throughout; results are exact and never rounded here.

use super::snapshot::PricingSnapshot;
use rust_decimal::prelude::*;
use shared::error::{ArithmeticError, PricingResult};
use shared::models::{AdjustmentOperation, AdjustmentType, Price, QuantityTier};

/// Pick the price the tier adjusts from.
///
/// Returns `None` when the tier wants a list price and the item has none.
pub fn select_base<'a>(tier: &QuantityTier, snapshot: &'a PricingSnapshot) -> Option<&'a Price> {
    if tier.use_list_price {
        snapshot.list_price()
    } else {
        Some(snapshot.price())
    }
}

/// Unsigned adjustment amount in the base price's currency.
///
/// `None` when the tier has no numeric adjustment value.
pub fn adjustment_amount(base: &Price, tier: &QuantityTier) -> PricingResult<Option<Price>> {
    let Some(value) = tier.adjustment_value else {
        return Ok(None);
    };

    let amount = match tier.adjustment_type {
        // Direct currency amount
        AdjustmentType::FixedAmount => Price::new(value, base.currency_code()),
        // 10 = 10% of base
        AdjustmentType::Percentage => {
            let rate = value
                .checked_div(Decimal::ONE_HUNDRED)
                .ok_or(ArithmeticError::Overflow)?;
            base.multiply(rate)?
        }
    };
    Ok(Some(amount))
}

/// Apply the tier's adjustment to `base`. Never returns a negative price.
pub fn adjust(base: &Price, tier: &QuantityTier) -> PricingResult<Price> {
    let Some(amount) = adjustment_amount(base, tier)? else {
        return Ok(base.clone());
    };

    let adjusted = match tier.adjustment_operation {
        AdjustmentOperation::Add => base.add(&amount)?,
        AdjustmentOperation::Subtract => base.subtract(&amount)?,
    };

    if adjusted.is_negative() {
        return Ok(adjusted.zero_like());
    }
    Ok(adjusted)
}
