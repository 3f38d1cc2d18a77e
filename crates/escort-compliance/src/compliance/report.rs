use serde::Serialize;

use super::cost::{RateTier, RateTierTable};
use super::domain::{
    describe_roles, CostEstimate, EscortRequirement, EscortRole, LoadDimensions,
    NightMovementStatus,
};
use super::evaluator::JurisdictionOutcome;
use super::risk::{self, PoliceRisk};

/// Detail row for one evaluated jurisdiction, in route order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionReport {
    pub jurisdiction_code: String,
    pub jurisdiction_name: &'static str,
    pub assigned_miles: f64,
    pub escort_roles: Vec<EscortRole>,
    pub escort_summary: String,
    pub police_required: bool,
    pub height_pole_required: bool,
    pub night_movement_status: NightMovementStatus,
    pub notes: &'static str,
    pub cost: CostEstimate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub rate_tier: RateTier,
    pub total_miles: f64,
    pub per_jurisdiction: Vec<JurisdictionReport>,
    pub total_cost: CostEstimate,
    pub max_escort_role_count: usize,
    pub police_jurisdictions: Vec<String>,
    pub night_ban_jurisdictions: Vec<String>,
    pub overall_police_risk: PoliceRisk,
    pub superload_likely: bool,
    pub skipped_jurisdiction_codes: Vec<String>,
}

impl ComplianceReport {
    pub fn evaluated_count(&self) -> usize {
        self.per_jurisdiction.len()
    }
}

/// Compose the report. Detail rows keep the order of `outcomes`; skipped codes are collected
/// here and nowhere else.
pub fn assemble(
    outcomes: Vec<JurisdictionOutcome>,
    dimensions: &LoadDimensions,
    total_miles: f64,
    tier: RateTier,
    rates: &RateTierTable,
) -> ComplianceReport {
    let mut requirements: Vec<EscortRequirement> = Vec::with_capacity(outcomes.len());
    let mut per_jurisdiction = Vec::with_capacity(outcomes.len());
    let mut skipped_jurisdiction_codes: Vec<String> = Vec::new();

    for outcome in outcomes {
        match outcome {
            JurisdictionOutcome::Evaluated {
                requirement,
                assigned_miles,
            } => {
                let cost =
                    rates.estimate(assigned_miles, requirement.escort_role_count(), tier);
                per_jurisdiction.push(JurisdictionReport {
                    jurisdiction_code: requirement.jurisdiction_code.clone(),
                    jurisdiction_name: requirement.jurisdiction_name,
                    assigned_miles,
                    escort_summary: describe_roles(&requirement.escort_roles),
                    escort_roles: requirement.escort_roles.clone(),
                    police_required: requirement.police_required,
                    height_pole_required: requirement.height_pole_required,
                    night_movement_status: requirement.night_movement_status,
                    notes: requirement.notes,
                    cost,
                });
                requirements.push(requirement);
            }
            JurisdictionOutcome::Skipped { jurisdiction_code } => {
                if !skipped_jurisdiction_codes.contains(&jurisdiction_code) {
                    skipped_jurisdiction_codes.push(jurisdiction_code);
                }
            }
        }
    }

    let total_cost = rates.total(per_jurisdiction.iter().map(|row| &row.cost));
    let summary = risk::aggregate(&requirements, dimensions);

    ComplianceReport {
        rate_tier: tier,
        total_miles,
        per_jurisdiction,
        total_cost,
        max_escort_role_count: summary.max_escort_role_count,
        police_jurisdictions: summary.police_jurisdictions,
        night_ban_jurisdictions: summary.night_ban_jurisdictions,
        overall_police_risk: summary.overall_police_risk,
        superload_likely: risk::superload_likely(dimensions),
        skipped_jurisdiction_codes,
    }
}
