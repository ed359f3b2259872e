//! Engine configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | LOG_LEVEL | info | Log level / filter directive |
//! | LOG_JSON | false | JSON log output |
//! | BUSINESS_TIMEZONE | UTC | IANA timezone that time and date conditions are evaluated in |

use crate::common::logger::init_logger;
use crate::pricing::snapshot::{Clock, SnapshotBuilder, SystemClock};
use crate::utils::time::parse_timezone;
use chrono_tz::Tz;
use shared::error::PricingResult;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub log_level: String,
    pub log_json: bool,
    /// IANA name, e.g. "Europe/Madrid"
    pub business_timezone: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            log_json: false,
            business_timezone: "UTC".into(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, using defaults for unset ones
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: lookup("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_json),
            business_timezone: lookup("BUSINESS_TIMEZONE").unwrap_or(defaults.business_timezone),
        }
    }

    pub fn timezone(&self) -> PricingResult<Tz> {
        parse_timezone(&self.business_timezone)
    }

    /// Install the global logger with this configuration
    pub fn init_logging(&self) -> anyhow::Result<()> {
        init_logger(&self.log_level, self.log_json)
    }

    /// Snapshot builder on the wall clock in the business timezone
    pub fn snapshot_builder(&self) -> PricingResult<SnapshotBuilder<SystemClock>> {
        Ok(SnapshotBuilder::system(self.timezone()?))
    }

    /// Snapshot builder on a custom clock in the business timezone
    pub fn snapshot_builder_with<C: Clock>(&self, clock: C) -> PricingResult<SnapshotBuilder<C>> {
        Ok(SnapshotBuilder::new(clock, self.timezone()?))
    }
}
