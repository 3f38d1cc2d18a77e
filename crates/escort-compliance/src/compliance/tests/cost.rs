use std::collections::BTreeMap;

use super::common::*;
use crate::compliance::{
    CostEstimate, RateConfigError, RatePerMile, RateTier, RateTierTable, MAX_RATE_PER_MILE,
};

fn tiers(standard: (f64, f64)) -> BTreeMap<RateTier, RatePerMile> {
    let mut tiers = BTreeMap::new();
    tiers.insert(
        RateTier::Standard,
        RatePerMile {
            low_per_mile: standard.0,
            high_per_mile: standard.1,
        },
    );
    tiers.insert(
        RateTier::Priority,
        RatePerMile {
            low_per_mile: 3.0,
            high_per_mile: 4.0,
        },
    );
    tiers.insert(
        RateTier::Premium,
        RatePerMile {
            low_per_mile: 4.0,
            high_per_mile: 5.0,
        },
    );
    tiers
}

#[test]
fn estimate_is_linear_in_miles_and_escorts() {
    let rates = rates();

    let estimate = rates.estimate(120.0, 2, RateTier::Standard);
    assert!(approx(estimate.low, 561.6));
    assert!(approx(estimate.high, 748.8));
    assert_eq!(estimate.currency, "USD");

    let premium = rates.estimate(100.0, 4, RateTier::Premium);
    assert!(approx(premium.low, 1_368.0));
    assert!(approx(premium.high, 1_824.0));
}

#[test]
fn zero_escorts_cost_nothing() {
    let estimate = rates().estimate(500.0, 0, RateTier::Premium);
    assert_eq!(estimate, CostEstimate::zero("USD"));
}

#[test]
fn default_tiers_keep_high_above_low() {
    let rates = rates();
    let mut previous = 0.0;
    for tier in RateTier::ordered() {
        let rate = rates.rate(tier);
        assert!(rate.high_per_mile > rate.low_per_mile, "{tier} band inverted");
        assert!(rate.low_per_mile > previous, "{tier} should cost more than lower tiers");
        previous = rate.low_per_mile;
    }
}

#[test]
fn new_rejects_inverted_and_non_positive_bands() {
    match RateTierTable::new("USD", tiers((3.0, 3.0))) {
        Err(RateConfigError::InvertedRange { tier, .. }) => assert_eq!(tier, RateTier::Standard),
        other => panic!("expected inverted range, got {other:?}"),
    }

    assert!(matches!(
        RateTierTable::new("USD", tiers((-1.0, 2.0))),
        Err(RateConfigError::NonPositiveRate { .. })
    ));

    let mut missing = tiers((2.0, 3.0));
    missing.remove(&RateTier::Premium);
    assert!(matches!(
        RateTierTable::new("USD", missing),
        Err(RateConfigError::MissingTier(RateTier::Premium))
    ));

    assert!(matches!(
        RateTierTable::new("dollars", tiers((2.0, 3.0))),
        Err(RateConfigError::InvalidCurrency(_))
    ));
}

#[test]
fn new_rejects_rates_above_ceiling() {
    match RateTierTable::new("USD", tiers((2.0, f64::MAX))) {
        Err(RateConfigError::RateTooHigh { tier, max, .. }) => {
            assert_eq!(tier, RateTier::Standard);
            assert_eq!(max, MAX_RATE_PER_MILE);
        }
        other => panic!("expected rate ceiling error, got {other:?}"),
    }
}

#[test]
fn from_json_defaults_currency_and_validates() {
    let table = RateTierTable::from_json(
        r#"{ "tiers": {
            "standard": { "lowPerMile": 2.0, "highPerMile": 3.0 },
            "priority": { "lowPerMile": 2.5, "highPerMile": 3.5 },
            "premium": { "lowPerMile": 3.0, "highPerMile": 4.0 }
        } }"#,
    )
    .expect("table parses");
    assert_eq!(table.currency(), "USD");
    assert_eq!(table.rate(RateTier::Priority).low_per_mile, 2.5);

    assert!(matches!(
        RateTierTable::from_json("{ not json"),
        Err(RateConfigError::Parse(_))
    ));
}

#[test]
fn total_sums_every_row() {
    let rates = rates();
    let rows = vec![
        rates.estimate(100.0, 2, RateTier::Standard),
        CostEstimate::zero("USD"),
        rates.estimate(100.0, 4, RateTier::Standard),
    ];

    let total = rates.total(&rows);
    assert!(approx(total.low, 1_404.0));
    assert!(approx(total.high, 1_872.0));
    assert!(total.low <= total.high);
}

#[test]
fn tier_parses_case_insensitively() {
    assert_eq!(RateTier::parse(" Priority "), Some(RateTier::Priority));
    assert_eq!(RateTier::parse("gold"), None);
    assert_eq!(RateTier::default(), RateTier::Standard);
}
