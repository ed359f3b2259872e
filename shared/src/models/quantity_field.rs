//! Quantity Field Settings

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Numeric settings of the quantity field the tiers are keyed on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuantityFieldSettings {
    /// Smallest allowed increment (1 = whole units, 0.25 = quarters)
    #[serde(default = "default_step")]
    pub step: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Decimal>,
    /// Number of configured tiers that are live (leading entries)
    #[serde(default)]
    pub enabled_tiers: usize,
}

fn default_step() -> Decimal {
    Decimal::ONE
}

impl Default for QuantityFieldSettings {
    fn default() -> Self {
        Self {
            step: Decimal::ONE,
            min: None,
            enabled_tiers: 0,
        }
    }
}

impl QuantityFieldSettings {
    /// Comparison scale: decimal digits of the step as configured
    pub fn scale(&self) -> u32 {
        self.step.scale()
    }

    /// Start of the implicit base-price entry: min if set and non-zero, else step
    pub fn base_anchor(&self) -> Decimal {
        match self.min {
            Some(min) if !min.is_zero() => min,
            _ => self.step,
        }
    }

    /// Whether quantities are counted in whole items. Follows how the step
    /// was written: "1" is integral, "1.0" is not.
    pub fn is_integral(&self) -> bool {
        self.step.scale() == 0
    }

    /// Number of items a quantity stands for.
    ///
    /// With an integral step each unit is an item (1 + 2 shirts = 3 items).
    /// With a fractional step the quantity is one item made of many units
    /// (1.5 kg of butter = 1 item).
    pub fn items_quantity(&self, quantity: Decimal) -> Decimal {
        if self.is_integral() || quantity <= Decimal::ZERO {
            quantity
        } else {
            Decimal::ONE
        }
    }
}
