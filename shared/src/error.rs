//! Error types for the shared crate
//!
//! Standardized error types used by the models, the decimal utility and the
//! pricing engine.
//!
//! # Error Code Ranges
//!
//! - 0xxx: Arithmetic errors
//! - 1xxx: Configuration errors
//! - 2xxx: Price errors

use thiserror::Error;

/// Decimal arithmetic failures.
///
/// Fatal to the single pricing call that raised them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    /// Operand is blank or not a decimal number
    #[error("Invalid decimal: '{0}'")]
    InvalidDecimal(String),

    /// Divisor is zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Result does not fit into a 96-bit decimal
    #[error("Decimal overflow")]
    Overflow,
}

/// Pricing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    /// Two prices in different currencies were combined
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },

    /// A tier violates its range invariants
    #[error("Invalid tier #{index}: {reason}")]
    InvalidTier { index: usize, reason: String },

    /// Widget settings could not be read
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

impl PricingError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Arithmetic(ArithmeticError::InvalidDecimal(_)) => "E0001",
            Self::Arithmetic(ArithmeticError::DivisionByZero) => "E0002",
            Self::Arithmetic(ArithmeticError::Overflow) => "E0003",
            Self::InvalidTier { .. } => "E1001",
            Self::InvalidSettings(_) => "E1002",
            Self::InvalidTime(_) => "E1003",
            Self::InvalidDate(_) => "E1004",
            Self::InvalidWeekday(_) => "E1005",
            Self::InvalidTimezone(_) => "E1006",
            Self::CurrencyMismatch { .. } => "E2001",
        }
    }

    /// Whether the error comes from malformed configuration rather than arithmetic
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidTier { .. }
                | Self::InvalidSettings(_)
                | Self::InvalidTime(_)
                | Self::InvalidDate(_)
                | Self::InvalidWeekday(_)
                | Self::InvalidTimezone(_)
        )
    }
}

/// Result type for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;
