//! Oversize-load escort compliance and cost estimation.
//!
//! A request flows through route decomposition, per-jurisdiction rule evaluation, cost
//! estimation and risk aggregation before being assembled into a [`ComplianceReport`]. Every
//! stage is a pure function of its inputs; the rule and rate tables are read-only once built.

pub mod cost;
pub mod domain;
mod error;
pub mod evaluator;
pub mod report;
pub mod risk;
pub mod route;
pub mod router;
pub mod rules;

#[cfg(test)]
mod tests;

pub use cost::{RateConfigError, RatePerMile, RateTier, RateTierTable, MAX_RATE_PER_MILE};
pub use domain::{
    CostEstimate, EscortRequirement, EscortRole, LoadDimensions, NightMovementStatus,
    RouteComplianceRequest, MAX_HEIGHT_FT, MAX_LENGTH_FT, MAX_ROUTE_MILES, MAX_WEIGHT_LBS,
    MAX_WIDTH_FT, REQUEST_FIELDS, SECONDARY_HEIGHT_TRIGGER_FT,
};
pub use error::{ComplianceError, ComplianceErrorView};
pub use evaluator::{evaluate_segment, JurisdictionOutcome};
pub use report::{ComplianceReport, JurisdictionReport};
pub use risk::{PoliceRisk, PoliceRiskLevel};
pub use route::{decompose, RouteSegment};
pub use router::compliance_router;
pub use rules::{
    EscortConfigStrategy, JurisdictionRule, JurisdictionRuleTable, NotesPolicy, RuleTableError,
};

use std::sync::Arc;

use tracing::info;

/// Stateless engine applying the rule and rate tables to route requests.
#[derive(Debug, Clone)]
pub struct ComplianceEngine {
    rules: Arc<JurisdictionRuleTable>,
    rates: Arc<RateTierTable>,
}

impl ComplianceEngine {
    pub fn new(rules: Arc<JurisdictionRuleTable>, rates: RateTierTable) -> Self {
        Self {
            rules,
            rates: Arc::new(rates),
        }
    }

    /// Engine over the modeled jurisdictions and the given rate configuration.
    pub fn with_rates(rates: RateTierTable) -> Self {
        Self::new(JurisdictionRuleTable::standard(), rates)
    }

    pub fn rules(&self) -> &JurisdictionRuleTable {
        &self.rules
    }

    pub fn rates(&self) -> &RateTierTable {
        &self.rates
    }

    /// Validate the request and produce the route report. Invalid input rejects the whole
    /// request; unmodeled jurisdictions are reported as skipped.
    pub fn evaluate(
        &self,
        request: &RouteComplianceRequest,
    ) -> Result<ComplianceReport, ComplianceError> {
        request.dimensions.validate()?;
        let codes = normalize_codes(&request.jurisdiction_codes)?;

        domain::check_bounded("totalMiles", request.total_miles, MAX_ROUTE_MILES)?;

        let segments = route::decompose(&codes, request.total_miles)?;
        let outcomes: Vec<JurisdictionOutcome> = segments
            .iter()
            .map(|segment| evaluator::evaluate_segment(&self.rules, &request.dimensions, segment))
            .collect();

        let report = report::assemble(
            outcomes,
            &request.dimensions,
            request.total_miles,
            request.rate_tier,
            &self.rates,
        );

        info!(
            jurisdictions = codes.len(),
            evaluated = report.evaluated_count(),
            skipped = report.skipped_jurisdiction_codes.len(),
            risk = report.overall_police_risk.level.label(),
            "route compliance report assembled"
        );

        Ok(report)
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::with_rates(RateTierTable::default())
    }
}

fn normalize_codes(raw: &[String]) -> Result<Vec<String>, ComplianceError> {
    if raw.is_empty() {
        return Err(ComplianceError::InvalidInput {
            field: "jurisdictionCodes",
            reason: "at least one jurisdiction is required".to_string(),
        });
    }

    raw.iter()
        .map(|code| {
            let normalized = code.trim().to_ascii_uppercase();
            if normalized.is_empty() {
                Err(ComplianceError::InvalidInput {
                    field: "jurisdictionCodes",
                    reason: "jurisdiction codes must not be blank".to_string(),
                })
            } else {
                Ok(normalized)
            }
        })
        .collect()
}
