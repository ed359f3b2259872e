//! Quantity Tier Model

use crate::error::{PricingError, PricingResult};
use chrono::{NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Adjustment type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentType {
    /// Adjustment value is a money amount in the base price's currency
    FixedAmount,
    /// Adjustment value is a percentage of the base price (10 = 10%)
    Percentage,
}

/// Adjustment direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentOperation {
    /// Increase the base price
    Add,
    /// Decrease the base price
    Subtract,
}

/// Eligibility conditions of a tier. `None` fields are unconstrained.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConditionSet {
    /// Days of week the tier is active on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekdays: Option<Vec<Weekday>>,
    /// Earliest time of day (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_start: Option<NaiveTime>,
    /// Latest time of day (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_end: Option<NaiveTime>,
    /// First calendar day (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_start: Option<NaiveDate>,
    /// Last calendar day (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_end: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_ids: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_ids: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_types: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_types: Option<BTreeSet<String>>,
    /// Store types; the product must belong to at least one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stores: Option<BTreeSet<String>>,
    /// Roles; the actor must hold at least one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<BTreeSet<String>>,
    /// Tier only applies to items that have a list price
    #[serde(default)]
    pub requires_list_price: bool,
}

impl ConditionSet {
    /// No constraint is set
    pub fn is_unconstrained(&self) -> bool {
        self == &Self::default()
    }
}

/// Quantity tier (one configured pricing rule)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuantityTier {
    /// Lower bound of the quantity range (inclusive)
    pub quantity_start: Decimal,
    /// Upper bound of the quantity range (inclusive), None = unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_end: Option<Decimal>,
    /// Adjust from the list price instead of the regular price
    #[serde(default)]
    pub use_list_price: bool,
    pub adjustment_type: AdjustmentType,
    pub adjustment_operation: AdjustmentOperation,
    /// Adjustment magnitude (percentage: 10=10%, fixed: 2.50=$2.50).
    /// None when the configured value was blank or not numeric.
    #[serde(default)]
    pub adjustment_value: Option<Decimal>,
    #[serde(default)]
    pub conditions: ConditionSet,
}

impl QuantityTier {
    /// Tier over `[start, end]` with no adjustment and no conditions
    pub fn new(quantity_start: Decimal, quantity_end: Option<Decimal>) -> Self {
        Self {
            quantity_start,
            quantity_end,
            use_list_price: false,
            adjustment_type: AdjustmentType::Percentage,
            adjustment_operation: AdjustmentOperation::Subtract,
            adjustment_value: None,
            conditions: ConditionSet::default(),
        }
    }

    pub fn with_adjustment(
        mut self,
        adjustment_type: AdjustmentType,
        adjustment_operation: AdjustmentOperation,
        adjustment_value: Decimal,
    ) -> Self {
        self.adjustment_type = adjustment_type;
        self.adjustment_operation = adjustment_operation;
        self.adjustment_value = Some(adjustment_value);
        self
    }

    pub fn with_list_price(mut self) -> Self {
        self.use_list_price = true;
        self
    }

    pub fn with_conditions(mut self, conditions: ConditionSet) -> Self {
        self.conditions = conditions;
        self
    }

    /// Check range invariants. `index` is the tier's configured position.
    pub fn validate(&self, index: usize) -> PricingResult<()> {
        if self.quantity_start.is_sign_negative() && !self.quantity_start.is_zero() {
            return Err(PricingError::InvalidTier {
                index,
                reason: format!("quantity start {} is negative", self.quantity_start),
            });
        }
        if let Some(end) = self.quantity_end
            && end < self.quantity_start
        {
            return Err(PricingError::InvalidTier {
                index,
                reason: format!(
                    "quantity end {} is below quantity start {}",
                    end, self.quantity_start
                ),
            });
        }
        Ok(())
    }
}
