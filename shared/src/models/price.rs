//! Price Model

use crate::error::{ArithmeticError, PricingError, PricingResult};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exact monetary amount in a currency
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's major unit (10.99 = $10.99)
    number: Decimal,
    /// ISO 4217 currency code
    currency_code: String,
}

impl Price {
    pub fn new(number: Decimal, currency_code: impl Into<String>) -> Self {
        Self {
            number,
            currency_code: currency_code.into(),
        }
    }

    /// Parse the amount from a decimal string
    pub fn parse(number: &str, currency_code: impl Into<String>) -> PricingResult<Self> {
        Ok(Self::new(crate::decimal::parse(number)?, currency_code))
    }

    /// Zero in the given currency
    pub fn zero(currency_code: impl Into<String>) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    pub fn number(&self) -> Decimal {
        self.number
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    pub fn is_negative(&self) -> bool {
        self.number.is_sign_negative() && !self.number.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.number.is_zero()
    }

    /// Zero in this price's currency
    pub fn zero_like(&self) -> Self {
        Self::zero(self.currency_code.clone())
    }

    pub fn add(&self, other: &Price) -> PricingResult<Price> {
        self.ensure_same_currency(other)?;
        let number = self
            .number
            .checked_add(other.number)
            .ok_or(ArithmeticError::Overflow)?;
        Ok(Self::new(number, self.currency_code.clone()))
    }

    pub fn subtract(&self, other: &Price) -> PricingResult<Price> {
        self.ensure_same_currency(other)?;
        let number = self
            .number
            .checked_sub(other.number)
            .ok_or(ArithmeticError::Overflow)?;
        Ok(Self::new(number, self.currency_code.clone()))
    }

    pub fn multiply(&self, factor: Decimal) -> PricingResult<Price> {
        let number = self
            .number
            .checked_mul(factor)
            .ok_or(ArithmeticError::Overflow)?;
        Ok(Self::new(number, self.currency_code.clone()))
    }

    pub fn divide(&self, divisor: Decimal) -> PricingResult<Price> {
        if divisor.is_zero() {
            return Err(ArithmeticError::DivisionByZero.into());
        }
        let number = self
            .number
            .checked_div(divisor)
            .ok_or(ArithmeticError::Overflow)?;
        Ok(Self::new(number, self.currency_code.clone()))
    }

    /// Round half away from zero to `dp` places (display only)
    pub fn rounded(&self, dp: u32) -> Price {
        Self::new(
            self.number
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
            self.currency_code.clone(),
        )
    }

    fn ensure_same_currency(&self, other: &Price) -> PricingResult<()> {
        if self.currency_code != other.currency_code {
            return Err(PricingError::CurrencyMismatch {
                left: self.currency_code.clone(),
                right: other.currency_code.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.currency_code)
    }
}
