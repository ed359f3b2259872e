//! Pricing Snapshot
//!
//! Immutable fact sheet about one pricing request. Everything the evaluator
//! needs (catalog identity, store membership, roles, current time) is
//! collected here once, so evaluation is a pure function of the snapshot.

use crate::utils::time::to_business_time;
use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use shared::models::{Price, PurchasableItem};
use std::collections::BTreeSet;

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Resolves facts about the current actor
pub trait ContextProvider: Send + Sync {
    /// Role names held by the current actor
    fn current_roles(&self) -> Vec<String>;
}

/// Fixed role list
#[derive(Debug, Clone, Default)]
pub struct StaticRoles(pub Vec<String>);

impl ContextProvider for StaticRoles {
    fn current_roles(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// Fact sheet for one pricing request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingSnapshot {
    variation_id: String,
    variation_type: String,
    product_id: String,
    product_type: String,
    price: Price,
    list_price: Option<Price>,
    stores: BTreeSet<String>,
    roles: BTreeSet<String>,
    now: NaiveDateTime,
}

impl PricingSnapshot {
    pub fn variation_id(&self) -> &str {
        &self.variation_id
    }

    pub fn variation_type(&self) -> &str {
        &self.variation_type
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn product_type(&self) -> &str {
        &self.product_type
    }

    /// Regular selling price
    pub fn price(&self) -> &Price {
        &self.price
    }

    pub fn list_price(&self) -> Option<&Price> {
        self.list_price.as_ref()
    }

    /// Store types the product belongs to
    pub fn stores(&self) -> &BTreeSet<String> {
        &self.stores
    }

    /// Roles held by the current actor
    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    /// Evaluation instant in business-local time
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }
}

/// Builds snapshots from catalog data, a clock and the business timezone
#[derive(Debug, Clone)]
pub struct SnapshotBuilder<C: Clock = SystemClock> {
    clock: C,
    tz: Tz,
}

impl SnapshotBuilder<SystemClock> {
    /// Builder on the wall clock
    pub fn system(tz: Tz) -> Self {
        Self::new(SystemClock, tz)
    }
}

impl<C: Clock> SnapshotBuilder<C> {
    pub fn new(clock: C, tz: Tz) -> Self {
        Self { clock, tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Snapshot for `item` priced for an actor holding `roles`
    pub fn build<S: AsRef<str>>(&self, item: &PurchasableItem, roles: &[S]) -> PricingSnapshot {
        let snapshot = PricingSnapshot {
            variation_id: item.variation_id.trim().to_string(),
            variation_type: item.variation_type.trim().to_string(),
            product_id: item.product_id.trim().to_string(),
            product_type: item.product_type.trim().to_string(),
            price: item.price.clone(),
            list_price: item.list_price.clone(),
            stores: collect_tokens(&item.stores),
            roles: collect_tokens(roles),
            now: to_business_time(self.clock.now_utc(), self.tz),
        };

        tracing::trace!(
            variation_id = %snapshot.variation_id,
            product_id = %snapshot.product_id,
            now = %snapshot.now,
            "Pricing snapshot built"
        );
        snapshot
    }

    /// Snapshot with roles taken from a context provider
    pub fn build_for(&self, item: &PurchasableItem, context: &dyn ContextProvider) -> PricingSnapshot {
        let roles = context.current_roles();
        self.build(item, roles.as_slice())
    }
}

fn collect_tokens<S: AsRef<str>>(values: &[S]) -> BTreeSet<String> {
    values
        .iter()
        .map(|v| v.as_ref().trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
