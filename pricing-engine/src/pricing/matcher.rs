//! Tier Condition Matcher
//!
//! Logic for checking whether a tier's conditions hold for the current
//! pricing snapshot: calendar and time windows, catalog identity, store
//! membership and actor roles.

use super::snapshot::PricingSnapshot;
use chrono::{Datelike, NaiveDateTime, NaiveTime};
use shared::models::ConditionSet;
use std::collections::BTreeSet;

/// Check whether every set condition holds. Unset conditions always pass.
pub fn applies(conditions: &ConditionSet, snapshot: &PricingSnapshot) -> bool {
    let now = snapshot.now();

    if conditions.requires_list_price && snapshot.list_price().is_none() {
        tracing::trace!("Tier requires a list price, item has none");
        return false;
    }
    if !matches_weekday(conditions, now) {
        tracing::trace!(weekday = %now.weekday(), "Tier not active on this weekday");
        return false;
    }
    if !matches_time_window(conditions, now) {
        tracing::trace!(time = %now.time(), "Tier outside its time window");
        return false;
    }
    if !matches_date_window(conditions, now) {
        tracing::trace!(date = %now.date(), "Tier outside its date window");
        return false;
    }
    if !matches_catalog(conditions, snapshot) {
        tracing::trace!(
            variation_id = snapshot.variation_id(),
            product_id = snapshot.product_id(),
            "Tier does not target this item"
        );
        return false;
    }
    if !matches_stores(conditions, snapshot) {
        tracing::trace!("Tier not offered in the item's stores");
        return false;
    }
    if !matches_roles(conditions, snapshot) {
        tracing::trace!("Tier not offered to the current roles");
        return false;
    }

    true
}

/// Check day of week
pub fn matches_weekday(conditions: &ConditionSet, now: NaiveDateTime) -> bool {
    conditions
        .weekdays
        .as_ref()
        .is_none_or(|days| days.contains(&now.weekday()))
}

/// Check time of day. Each bound gates on its own; no overnight wraparound.
pub fn matches_time_window(conditions: &ConditionSet, now: NaiveDateTime) -> bool {
    let time = now.time();
    if let Some(start) = conditions.time_start
        && time < start
    {
        return false;
    }
    if let Some(end) = conditions.time_end
        && time > end
    {
        return false;
    }
    true
}

/// Check the date window. Both bounds stand for midnight at the start of
/// their day, so a tier is live from `date_start` 00:00 until `date_end` 00:00.
pub fn matches_date_window(conditions: &ConditionSet, now: NaiveDateTime) -> bool {
    if let Some(start) = conditions.date_start
        && now < start.and_time(NaiveTime::MIN)
    {
        return false;
    }
    if let Some(end) = conditions.date_end
        && now > end.and_time(NaiveTime::MIN)
    {
        return false;
    }
    true
}

/// Check variation/product identifiers and types
pub fn matches_catalog(conditions: &ConditionSet, snapshot: &PricingSnapshot) -> bool {
    contains(&conditions.variation_ids, snapshot.variation_id())
        && contains(&conditions.product_ids, snapshot.product_id())
        && contains(&conditions.variation_types, snapshot.variation_type())
        && contains(&conditions.product_types, snapshot.product_type())
}

/// Product must be sold in at least one listed store type
pub fn matches_stores(conditions: &ConditionSet, snapshot: &PricingSnapshot) -> bool {
    intersects(&conditions.stores, snapshot.stores())
}

/// Actor must hold at least one listed role
pub fn matches_roles(conditions: &ConditionSet, snapshot: &PricingSnapshot) -> bool {
    intersects(&conditions.roles, snapshot.roles())
}

fn contains(allowed: &Option<BTreeSet<String>>, value: &str) -> bool {
    allowed
        .as_ref()
        .is_none_or(|allowed| allowed.contains(value.trim()))
}

fn intersects(allowed: &Option<BTreeSet<String>>, actual: &BTreeSet<String>) -> bool {
    allowed
        .as_ref()
        .is_none_or(|allowed| !allowed.is_disjoint(actual))
}
