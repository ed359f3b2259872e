//! Quantity pricing end-to-end
//!
//! Builds offers the way a storefront would: widget settings in, snapshot
//! built once per interaction, quantities looked up against the offer.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use pricing_engine::{
    EngineConfig, FixedClock, FnPostProcessor, PricingSnapshot, QuantityPriceEngine,
    QuantityWidgetSettings, ResolvedTier, SnapshotBuilder, StaticRoles, TierOrigin,
    init_test_logger,
};
use rust_decimal::Decimal;
use serde_json::json;
use shared::models::{
    AdjustmentOperation, AdjustmentType, ConditionSet, Price, PurchasableItem,
    QuantityFieldSettings, QuantityTier,
};
use std::collections::BTreeSet;
use std::str::FromStr;

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

fn usd(number: &str) -> Price {
    Price::parse(number, "USD").unwrap()
}

fn make_item(stores: &[&str]) -> PurchasableItem {
    PurchasableItem {
        variation_id: "42".to_string(),
        variation_type: "default".to_string(),
        product_id: "7".to_string(),
        product_type: "default".to_string(),
        price: usd("10.00"),
        list_price: None,
        stores: stores.iter().map(|s| s.to_string()).collect(),
    }
}

fn make_snapshot(item: &PurchasableItem) -> PricingSnapshot {
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap());
    SnapshotBuilder::new(clock, chrono_tz::UTC).build(item, &["authenticated"])
}

fn percent_off(start: &str, end: Option<&str>, value: &str) -> QuantityTier {
    QuantityTier::new(dec(start), end.map(dec)).with_adjustment(
        AdjustmentType::Percentage,
        AdjustmentOperation::Subtract,
        dec(value),
    )
}

#[test]
fn test_two_tier_scenario() {
    init_test_logger();
    let engine = QuantityPriceEngine::new();
    let settings = QuantityFieldSettings::default();
    let tiers = [percent_off("1", Some("4"), "10"), percent_off("5", None, "20")];
    let offer = engine
        .build_offer(&settings, &tiers, &make_snapshot(&make_item(&[])))
        .unwrap();

    assert_eq!(offer.price_for("3").unwrap(), Some(usd("9.00")));
    assert_eq!(offer.price_for("5").unwrap(), Some(usd("8.00")));
    assert_eq!(offer.price_for("500").unwrap(), Some(usd("8.00")));
    assert_eq!(offer.price_for("0.5").unwrap(), None);
    assert_eq!(offer.price_or_regular("0.5").unwrap(), usd("10.00"));
}

#[test]
fn test_quantities_below_lowest_tier_get_regular_price() {
    let engine = QuantityPriceEngine::new();
    let settings = QuantityFieldSettings::default();
    let tiers = [percent_off("10", Some("19"), "15"), percent_off("20", None, "30")];
    let offer = engine
        .build_offer(&settings, &tiers, &make_snapshot(&make_item(&[])))
        .unwrap();

    for quantity in ["1", "2", "9"] {
        assert_eq!(offer.price_for(quantity).unwrap(), Some(usd("10.00")));
    }
    assert_eq!(offer.price_for("10").unwrap(), Some(usd("8.50")));
    assert_eq!(offer.price_for("19").unwrap(), Some(usd("8.50")));
    assert_eq!(offer.price_for("20").unwrap(), Some(usd("7.00")));
}

#[test]
fn test_overlapping_tiers_last_one_wins() {
    let engine = QuantityPriceEngine::new();
    let settings = QuantityFieldSettings::default();
    let snapshot = make_snapshot(&make_item(&[]));

    let wide_then_narrow = [percent_off("1", Some("10"), "10"), percent_off("4", Some("6"), "40")];
    let offer = engine.build_offer(&settings, &wide_then_narrow, &snapshot).unwrap();
    assert_eq!(offer.price_for("5").unwrap(), Some(usd("6.00")));
    assert_eq!(offer.price_for("7").unwrap(), Some(usd("9.00")));

    let narrow_then_wide = [percent_off("4", Some("6"), "40"), percent_off("1", Some("10"), "10")];
    let offer = engine.build_offer(&settings, &narrow_then_wide, &snapshot).unwrap();
    assert_eq!(offer.price_for("5").unwrap(), Some(usd("9.00")));
}

#[test]
fn test_time_window_opens_exactly_at_start() {
    let engine = QuantityPriceEngine::new();
    let settings = QuantityFieldSettings::default();
    let happy_hour = ConditionSet {
        time_start: NaiveTime::from_hms_opt(9, 0, 0),
        ..Default::default()
    };
    let tiers = [percent_off("1", None, "50").with_conditions(happy_hour)];
    let item = make_item(&[]);

    // Madrid is UTC+1 in January
    let config = EngineConfig {
        business_timezone: "Europe/Madrid".into(),
        ..Default::default()
    };
    let price_at = |hour, minute, second| {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 15, hour, minute, second).unwrap());
        let snapshot = config
            .snapshot_builder_with(clock)
            .unwrap()
            .build(&item, &[] as &[&str]);
        engine
            .build_offer(&settings, &tiers, &snapshot)
            .unwrap()
            .price_or_regular("1")
            .unwrap()
    };

    assert_eq!(price_at(7, 59, 59), usd("10.00"));
    assert_eq!(price_at(8, 0, 0), usd("5.00"));
    assert_eq!(price_at(20, 0, 0), usd("5.00"));
}

#[test]
fn test_date_window_closes_when_end_date_begins() {
    let engine = QuantityPriceEngine::new();
    let settings = QuantityFieldSettings::default();
    let spring_sale = ConditionSet {
        date_start: NaiveDate::from_ymd_opt(2024, 3, 1),
        date_end: NaiveDate::from_ymd_opt(2024, 3, 4),
        ..Default::default()
    };
    let tiers = [percent_off("1", None, "50").with_conditions(spring_sale)];
    let item = make_item(&[]);

    let price_on = |day, hour| {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap());
        let snapshot = SnapshotBuilder::new(clock, chrono_tz::UTC).build(&item, &[] as &[&str]);
        engine
            .build_offer(&settings, &tiers, &snapshot)
            .unwrap()
            .price_or_regular("1")
            .unwrap()
    };

    assert_eq!(price_on(1, 0), usd("5.00"));
    assert_eq!(price_on(3, 23), usd("5.00"));
    assert_eq!(price_on(4, 0), usd("5.00"));
    assert_eq!(price_on(4, 12), usd("10.00"));
}

#[test]
fn test_store_condition_needs_an_overlap() {
    let engine = QuantityPriceEngine::new();
    let settings = QuantityFieldSettings::default();
    let retail_only = ConditionSet {
        stores: Some(BTreeSet::from(["retail".to_string()])),
        ..Default::default()
    };
    let tiers = [percent_off("2", None, "25").with_conditions(retail_only)];

    let wholesale = make_snapshot(&make_item(&["wholesale"]));
    let offer = engine.build_offer(&settings, &tiers, &wholesale).unwrap();
    assert!(offer.active_tiers().is_empty());
    assert_eq!(offer.price_for("2").unwrap(), Some(usd("10.00")));

    let both = make_snapshot(&make_item(&["retail", "wholesale"]));
    let offer = engine.build_offer(&settings, &tiers, &both).unwrap();
    assert_eq!(offer.price_for("2").unwrap(), Some(usd("7.50")));
}

#[test]
fn test_role_condition_through_context_provider() {
    let engine = QuantityPriceEngine::new();
    let settings = QuantityFieldSettings::default();
    let wholesale_buyers = ConditionSet {
        roles: Some(BTreeSet::from(["wholesale_buyer".to_string()])),
        ..Default::default()
    };
    let tiers = [percent_off("1", None, "30").with_conditions(wholesale_buyers)];
    let item = make_item(&[]);
    let builder = SnapshotBuilder::new(
        FixedClock(Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap()),
        chrono_tz::UTC,
    );

    let anonymous = builder.build_for(&item, &StaticRoles::default());
    let buyer = builder.build_for(
        &item,
        &StaticRoles(vec!["authenticated".into(), "wholesale_buyer".into()]),
    );

    let price = |snapshot: &PricingSnapshot| {
        engine
            .build_offer(&settings, &tiers, snapshot)
            .unwrap()
            .price_or_regular("1")
            .unwrap()
    };
    assert_eq!(price(&anonymous), usd("10.00"));
    assert_eq!(price(&buyer), usd("7.00"));
}

#[test]
fn test_offer_is_deterministic() {
    let engine = QuantityPriceEngine::new();
    let settings = QuantityFieldSettings::default();
    let tiers = [
        percent_off("1", Some("4"), "10"),
        percent_off("3", Some("8"), "15"),
        percent_off("9", None, "20"),
    ];
    let snapshot = make_snapshot(&make_item(&[]));

    let first = engine.build_offer(&settings, &tiers, &snapshot).unwrap();
    let second = engine.build_offer(&settings, &tiers, &snapshot).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[test]
fn test_widget_settings_end_to_end() {
    init_test_logger();
    let settings = QuantityWidgetSettings::from_value(json!({
        "step": "0.5",
        "min": "0.5",
        "qty_prices": 3,
        "qty_price": [
            {
                "qty_start": "1",
                "qty_end": "2.5",
                "adjust_type": "fixed_number",
                "adjust_op": "subtract",
                "adjust_value": "1.25"
            },
            {
                "qty_start": "3",
                "adjust_type": "percentage",
                "adjust_op": "subtract",
                "adjust_value": "20",
                "stores": "online\nretail"
            },
            {
                "qty_start": "",
                "adjust_value": "90"
            },
            {
                "qty_start": "10",
                "adjust_value": "99",
                "adjust_op": "subtract"
            }
        ]
    }))
    .unwrap();
    let (field, tiers) = settings.into_parts().unwrap();
    assert_eq!(tiers.len(), 2);

    let engine = QuantityPriceEngine::new();
    let offer = engine
        .build_offer(&field, &tiers, &make_snapshot(&make_item(&["online"])))
        .unwrap();

    assert_eq!(offer.scale(), 1);
    assert_eq!(offer.entries()[0].quantity_start, dec("0.5"));
    assert_eq!(offer.price_for("0.5").unwrap(), Some(usd("10.00")));
    assert_eq!(offer.price_for("1").unwrap(), Some(usd("8.75")));
    assert_eq!(offer.price_for("2.5").unwrap(), Some(usd("8.75")));
    assert_eq!(offer.price_for("3").unwrap(), Some(usd("8.00")));
    // The fourth row is past qty_prices and never loads
    assert_eq!(offer.price_for("10").unwrap(), Some(usd("8.00")));

    let table = offer.tier_table();
    assert_eq!(table.len(), 2);
    assert_eq!(table[0].quantity_end, Some(dec("2.5")));
    assert_eq!(table[1].quantity_end, None);
}

#[test]
fn test_post_processor_can_add_a_tier() {
    let loyalty = FnPostProcessor::new(
        "loyalty_bulk",
        |tiers: &[ResolvedTier], snapshot: &PricingSnapshot| {
            if !snapshot.roles().contains("loyal") {
                return None;
            }
            let mut tiers = tiers.to_vec();
            let bulk = percent_off("50", None, "50");
            let price = snapshot.price().multiply(dec("0.5")).ok()?;
            tiers.push(ResolvedTier::configured(tiers.len(), &bulk, price));
            Some(tiers)
        },
    );
    let engine = QuantityPriceEngine::new().with_post_processor(loyalty);
    let settings = QuantityFieldSettings::default();
    let tiers = [percent_off("5", None, "20")];
    let item = make_item(&[]);
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap());
    let builder = SnapshotBuilder::new(clock, chrono_tz::UTC);

    let regular = engine
        .build_offer(&settings, &tiers, &builder.build(&item, &["customer"]))
        .unwrap();
    assert_eq!(regular.price_for("60").unwrap(), Some(usd("8.00")));

    let loyal = engine
        .build_offer(&settings, &tiers, &builder.build(&item, &["customer", "loyal"]))
        .unwrap();
    assert_eq!(loyal.price_for("60").unwrap(), Some(usd("5.00")));
    assert_eq!(loyal.price_for("6").unwrap(), Some(usd("8.00")));
    assert_eq!(loyal.active_tiers()[1].origin, TierOrigin::Configured { index: 1 });
    assert!(loyal.entries()[0].is_base());
}

#[test]
fn test_offer_is_shared_across_threads() {
    let engine = QuantityPriceEngine::new();
    let settings = QuantityFieldSettings::default();
    let tiers = [percent_off("1", Some("4"), "10"), percent_off("5", None, "20")];
    let offer = engine
        .build_offer(&settings, &tiers, &make_snapshot(&make_item(&[])))
        .unwrap();

    let prices: Vec<Option<Price>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=8)
            .map(|quantity| {
                let offer = &offer;
                scope.spawn(move || offer.price_for(&quantity.to_string()).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let expected: Vec<Option<Price>> = (1..=8)
        .map(|quantity| Some(if quantity < 5 { usd("9.00") } else { usd("8.00") }))
        .collect();
    assert_eq!(prices, expected);
}
