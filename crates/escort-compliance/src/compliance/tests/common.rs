use std::sync::Arc;

use crate::compliance::{
    ComplianceEngine, EscortConfigStrategy, JurisdictionRule, JurisdictionRuleTable,
    LoadDimensions, NotesPolicy, RateTier, RateTierTable, RouteComplianceRequest,
};

pub(crate) const TOLERANCE: f64 = 1e-6;

pub(crate) fn dims(width_ft: f64, height_ft: f64) -> LoadDimensions {
    LoadDimensions {
        width_ft,
        height_ft,
        length_ft: 80.0,
        weight_lbs: 120_000.0,
    }
}

pub(crate) fn request(
    dimensions: LoadDimensions,
    codes: &[&str],
    total_miles: f64,
) -> RouteComplianceRequest {
    RouteComplianceRequest {
        dimensions,
        total_miles,
        jurisdiction_codes: codes.iter().map(|code| code.to_string()).collect(),
        rate_tier: RateTier::Standard,
    }
}

pub(crate) fn engine() -> ComplianceEngine {
    ComplianceEngine::default()
}

pub(crate) fn standard_table() -> Arc<JurisdictionRuleTable> {
    JurisdictionRuleTable::standard()
}

pub(crate) fn rates() -> RateTierTable {
    RateTierTable::default()
}

/// Minimal two-jurisdiction table for exercising table construction.
pub(crate) fn sample_rule(code: &'static str) -> JurisdictionRule {
    JurisdictionRule {
        jurisdiction_code: code,
        display_name: "Sample",
        escort_width_threshold_ft: 12.0,
        police_width_threshold_ft: 16.0,
        night_width_threshold_ft: None,
        escort_config: EscortConfigStrategy::FrontRear,
        notes_policy: NotesPolicy::Static {
            text: "Sample permit office.",
        },
    }
}

pub(crate) fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < TOLERANCE
}
