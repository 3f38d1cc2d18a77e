use std::collections::BTreeMap;
use std::sync::Arc;

use escort_compliance::compliance::{
    ComplianceEngine, ComplianceError, EscortConfigStrategy, JurisdictionRule,
    JurisdictionRuleTable, LoadDimensions, NightMovementStatus, NotesPolicy, PoliceRiskLevel,
    RatePerMile, RateTier, RateTierTable, RouteComplianceRequest,
};

fn corridor_request(width_ft: f64, codes: &[&str], total_miles: f64) -> RouteComplianceRequest {
    RouteComplianceRequest {
        dimensions: LoadDimensions {
            width_ft,
            height_ft: 14.0,
            length_ft: 95.0,
            weight_lbs: 110_000.0,
        },
        total_miles,
        jurisdiction_codes: codes.iter().map(|code| code.to_string()).collect(),
        rate_tier: RateTier::Standard,
    }
}

fn flat_rates(low: f64, high: f64) -> RateTierTable {
    let tiers: BTreeMap<RateTier, RatePerMile> = RateTier::ordered()
        .into_iter()
        .map(|tier| {
            (
                tier,
                RatePerMile {
                    low_per_mile: low,
                    high_per_mile: high,
                },
            )
        })
        .collect();
    RateTierTable::new("USD", tiers).expect("rates valid")
}

#[test]
fn request_parses_from_wire_format() {
    let request: RouteComplianceRequest = serde_json::from_str(
        r#"{
            "widthFt": 14,
            "heightFt": 14,
            "lengthFt": 80,
            "weightLbs": 120000,
            "totalMiles": 600,
            "jurisdictionCodes": ["TX", "LA", "MS", "AL", "FL"],
            "rateTier": "standard"
        }"#,
    )
    .expect("request parses");

    assert_eq!(request.dimensions.width_ft, 14.0);
    assert_eq!(request.jurisdiction_codes.len(), 5);
    assert_eq!(request.rate_tier, RateTier::Standard);

    let report = ComplianceEngine::default()
        .evaluate(&request)
        .expect("report builds");
    assert_eq!(report.max_escort_role_count, 2);
    assert_eq!(report.night_ban_jurisdictions, vec!["LA".to_string()]);
}

#[test]
fn engine_accepts_custom_rule_and_rate_tables() {
    let rules = JurisdictionRuleTable::from_rules(vec![JurisdictionRule {
        jurisdiction_code: "ON",
        display_name: "Ontario",
        escort_width_threshold_ft: 12.0,
        police_width_threshold_ft: 15.0,
        night_width_threshold_ft: Some(13.0),
        escort_config: EscortConfigStrategy::WidthTiered2x2 { band_ft: 14.0 },
        notes_policy: NotesPolicy::Static {
            text: "MTO oversize permit required.",
        },
    }])
    .expect("rules valid");
    let engine = ComplianceEngine::new(Arc::new(rules), flat_rates(1.0, 2.0));

    let report = engine
        .evaluate(&corridor_request(14.0, &["ON", "TX"], 200.0))
        .expect("report builds");

    assert_eq!(report.evaluated_count(), 1);
    assert_eq!(report.skipped_jurisdiction_codes, vec!["TX".to_string()]);

    let ontario = &report.per_jurisdiction[0];
    assert_eq!(ontario.escort_roles.len(), 4);
    assert_eq!(
        ontario.night_movement_status,
        NightMovementStatus::Prohibited
    );
    assert_eq!(ontario.assigned_miles, 100.0);
    assert_eq!(ontario.cost.low, 400.0);
    assert_eq!(ontario.cost.high, 800.0);
    assert_eq!(report.total_cost.low, 400.0);
    assert_eq!(report.overall_police_risk.level, PoliceRiskLevel::Medium);
}

#[test]
fn mixed_route_keeps_detail_order_and_sums_costs() {
    let engine = ComplianceEngine::with_rates(flat_rates(1.0, 1.5));
    let report = engine
        .evaluate(&corridor_request(16.0, &["GA", "FL", "ZZ", "MN"], 400.0))
        .expect("report builds");

    let codes: Vec<&str> = report
        .per_jurisdiction
        .iter()
        .map(|row| row.jurisdiction_code.as_str())
        .collect();
    assert_eq!(codes, vec!["GA", "FL", "MN"]);

    // 100 miles each: GA 2 escorts, FL 4, MN 4.
    assert_eq!(report.total_cost.low, 1_000.0);
    assert_eq!(report.total_cost.high, 1_500.0);
    assert_eq!(
        report.police_jurisdictions,
        vec!["FL".to_string(), "MN".to_string()]
    );
    assert_eq!(report.night_ban_jurisdictions, vec!["FL".to_string()]);
    assert_eq!(report.skipped_jurisdiction_codes, vec!["ZZ".to_string()]);
    assert_eq!(report.overall_police_risk.level, PoliceRiskLevel::High);
}

#[test]
fn invalid_requests_fail_whole() {
    let engine = ComplianceEngine::default();

    let mut request = corridor_request(14.0, &["TX"], 100.0);
    request.dimensions.weight_lbs = -1.0;

    match engine.evaluate(&request) {
        Err(ComplianceError::InvalidInput { field, .. }) => assert_eq!(field, "weightLbs"),
        other => panic!("expected invalid weight, got {other:?}"),
    }
}
