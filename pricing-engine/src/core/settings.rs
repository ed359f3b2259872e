//! Quantity widget settings
//!
//! Stored configuration of the quantity widget as the configuration provider
//! hands it over: loosely typed (numbers may arrive as strings, flags as
//! 0/1, lists as newline-separated text). [`QuantityWidgetSettings::into_parts`]
//! turns it into typed field settings and tiers.

use crate::utils::time::{parse_date, parse_time, parse_token_list, parse_weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use shared::decimal;
use shared::error::{PricingError, PricingResult};
use shared::models::{
    AdjustmentOperation, AdjustmentType, ConditionSet, QuantityFieldSettings, QuantityTier,
};
use std::collections::BTreeSet;

/// Widget settings as stored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuantityWidgetSettings {
    #[serde(default, deserialize_with = "lenient_text")]
    pub step: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub min: Option<String>,
    /// Number of leading `qty_price` rows that are enabled
    #[serde(default, deserialize_with = "lenient_count")]
    pub qty_prices: usize,
    #[serde(default)]
    pub qty_price: Vec<QuantityPriceSettings>,
}

/// One stored tier row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuantityPriceSettings {
    #[serde(default, deserialize_with = "lenient_text")]
    pub qty_start: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub qty_end: Option<String>,
    /// Adjust from the list price
    #[serde(default, deserialize_with = "lenient_flag")]
    pub list: bool,
    /// "fixed_number" or "percentage"
    #[serde(default, deserialize_with = "lenient_text")]
    pub adjust_type: Option<String>,
    /// "add" or "subtract"
    #[serde(default, deserialize_with = "lenient_text")]
    pub adjust_op: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub adjust_value: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub week_days: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub time_start: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub time_end: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date_start: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date_end: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub variation_ids: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub product_ids: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub variation_types: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub product_types: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub stores: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub roles: Option<String>,
}

impl QuantityWidgetSettings {
    pub fn from_json(json: &str) -> PricingResult<Self> {
        serde_json::from_str(json).map_err(|e| PricingError::InvalidSettings(e.to_string()))
    }

    pub fn from_value(value: serde_json::Value) -> PricingResult<Self> {
        serde_json::from_value(value).map_err(|e| PricingError::InvalidSettings(e.to_string()))
    }

    /// Typed field settings and the enabled tiers, in configured order
    pub fn into_parts(&self) -> PricingResult<(QuantityFieldSettings, Vec<QuantityTier>)> {
        Ok((self.field_settings()?, self.tiers()?))
    }

    pub fn field_settings(&self) -> PricingResult<QuantityFieldSettings> {
        let defaults = QuantityFieldSettings::default();
        Ok(QuantityFieldSettings {
            step: optional_decimal("step", &self.step)?.unwrap_or(defaults.step),
            min: optional_decimal("min", &self.min)?,
            enabled_tiers: self.qty_prices,
        })
    }

    /// Enabled tiers. Rows past `qty_prices` and rows without a start are skipped.
    pub fn tiers(&self) -> PricingResult<Vec<QuantityTier>> {
        let mut tiers = Vec::new();
        for (index, row) in self.qty_price.iter().enumerate().take(self.qty_prices) {
            match row.to_tier(index)? {
                Some(tier) => tiers.push(tier),
                None => tracing::debug!(index, "Tier row has no quantity start, skipping"),
            }
        }
        Ok(tiers)
    }
}

impl QuantityPriceSettings {
    /// Typed tier, or `None` for a row whose start is blank or zero
    pub fn to_tier(&self, index: usize) -> PricingResult<Option<QuantityTier>> {
        let Some(quantity_start) = optional_decimal("qty_start", &self.qty_start)? else {
            return Ok(None);
        };
        if quantity_start.is_zero() {
            return Ok(None);
        }

        // A zero end is stored for "no upper bound"
        let quantity_end =
            optional_decimal("qty_end", &self.qty_end)?.filter(|end| !end.is_zero());

        let tier = QuantityTier {
            quantity_start,
            quantity_end,
            use_list_price: self.list,
            adjustment_type: parse_adjustment_type(&self.adjust_type),
            adjustment_operation: parse_adjustment_operation(&self.adjust_op)?,
            adjustment_value: self.adjustment_value(index),
            conditions: self.conditions()?,
        };
        tier.validate(index)?;
        Ok(Some(tier))
    }

    fn adjustment_value(&self, index: usize) -> Option<Decimal> {
        let raw = non_blank(&self.adjust_value)?;
        match decimal::parse(raw) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(index, value = raw, "Adjustment value is not numeric, tier will not adjust");
                None
            }
        }
    }

    fn conditions(&self) -> PricingResult<ConditionSet> {
        let weekdays = match non_blank(&self.week_days).and_then(parse_token_list) {
            Some(names) => Some(
                names
                    .iter()
                    .map(|name| parse_weekday(name))
                    .collect::<PricingResult<Vec<_>>>()?,
            ),
            None => None,
        };

        Ok(ConditionSet {
            weekdays,
            time_start: non_blank(&self.time_start).map(parse_time).transpose()?,
            time_end: non_blank(&self.time_end).map(parse_time).transpose()?,
            date_start: non_blank(&self.date_start).map(parse_date).transpose()?,
            date_end: non_blank(&self.date_end).map(parse_date).transpose()?,
            variation_ids: token_set(&self.variation_ids),
            product_ids: token_set(&self.product_ids),
            variation_types: token_set(&self.variation_types),
            product_types: token_set(&self.product_types),
            stores: token_set(&self.stores),
            roles: token_set(&self.roles),
            requires_list_price: self.list,
        })
    }
}

fn parse_adjustment_type(value: &Option<String>) -> AdjustmentType {
    match non_blank(value) {
        Some("fixed_number") => AdjustmentType::FixedAmount,
        _ => AdjustmentType::Percentage,
    }
}

fn parse_adjustment_operation(value: &Option<String>) -> PricingResult<AdjustmentOperation> {
    match non_blank(value) {
        None | Some("add") => Ok(AdjustmentOperation::Add),
        Some("subtract") => Ok(AdjustmentOperation::Subtract),
        Some(other) => Err(PricingError::InvalidSettings(format!(
            "unknown adjustment operation '{}'",
            other
        ))),
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn optional_decimal(field: &str, value: &Option<String>) -> PricingResult<Option<Decimal>> {
    non_blank(value)
        .map(|raw| {
            decimal::parse(raw).map_err(|_| {
                PricingError::InvalidSettings(format!("{} is not a number: '{}'", field, raw))
            })
        })
        .transpose()
}

fn token_set(value: &Option<String>) -> Option<BTreeSet<String>> {
    non_blank(value)
        .and_then(parse_token_list)
        .map(|tokens| tokens.into_iter().collect())
}

// ==================== Lenient deserializers ====================

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Flag(bool),
    Number(serde_json::Number),
    Text(String),
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Loose>::deserialize(deserializer)?.map(|loose| match loose {
        Loose::Flag(true) => "1".to_string(),
        Loose::Flag(false) => String::new(),
        Loose::Number(number) => number.to_string(),
        Loose::Text(text) => text,
    }))
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        None => false,
        Some(Loose::Flag(flag)) => flag,
        Some(Loose::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Loose::Text(text)) => !matches!(text.trim(), "" | "0" | "false"),
    })
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    use serde::de::Error;

    match Option::<Loose>::deserialize(deserializer)? {
        None | Some(Loose::Flag(false)) => Ok(0),
        Some(Loose::Flag(true)) => Ok(1),
        Some(Loose::Number(number)) => number
            .as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| D::Error::custom(format!("invalid tier count: {}", number))),
        Some(Loose::Text(text)) if text.trim().is_empty() => Ok(0),
        Some(Loose::Text(text)) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid tier count: '{}'", text))),
    }
}
