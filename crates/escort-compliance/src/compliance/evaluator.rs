use tracing::{debug, warn};

use super::domain::{EscortRequirement, LoadDimensions, NightMovementStatus};
use super::route::RouteSegment;
use super::rules::{JurisdictionRule, JurisdictionRuleTable};

/// Result of evaluating one route segment.
#[derive(Debug, Clone, PartialEq)]
pub enum JurisdictionOutcome {
    Evaluated {
        requirement: EscortRequirement,
        assigned_miles: f64,
    },
    /// The code has no entry in the rule table. Carried through to the report rather than
    /// dropped, so "no escort needed" stays distinguishable from "not modeled".
    Skipped { jurisdiction_code: String },
}

impl JurisdictionOutcome {
    pub fn jurisdiction_code(&self) -> &str {
        match self {
            Self::Evaluated { requirement, .. } => &requirement.jurisdiction_code,
            Self::Skipped { jurisdiction_code } => jurisdiction_code,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Apply the segment's jurisdiction rule to the load.
pub fn evaluate_segment(
    table: &JurisdictionRuleTable,
    dimensions: &LoadDimensions,
    segment: &RouteSegment,
) -> JurisdictionOutcome {
    match table.lookup(&segment.jurisdiction_code) {
        Some(rule) => {
            let requirement = evaluate_rule(rule, dimensions);
            debug!(
                jurisdiction = %requirement.jurisdiction_code,
                escorts = requirement.escort_role_count(),
                police = requirement.police_required,
                night = ?requirement.night_movement_status,
                "jurisdiction evaluated"
            );
            JurisdictionOutcome::Evaluated {
                requirement,
                assigned_miles: segment.assigned_miles,
            }
        }
        None => {
            warn!(
                jurisdiction = %segment.jurisdiction_code,
                "jurisdiction not modeled; skipping"
            );
            JurisdictionOutcome::Skipped {
                jurisdiction_code: segment.jurisdiction_code.clone(),
            }
        }
    }
}

pub(crate) fn evaluate_rule(
    rule: &JurisdictionRule,
    dimensions: &LoadDimensions,
) -> EscortRequirement {
    let width = dimensions.width_ft;

    let needs_escort =
        width >= rule.escort_width_threshold_ft || dimensions.exceeds_secondary_height();
    let police_required = width >= rule.police_width_threshold_ft;

    let night_movement_status = match rule.night_width_threshold_ft {
        Some(night_threshold) if width >= night_threshold => NightMovementStatus::Prohibited,
        _ if needs_escort => NightMovementStatus::Restricted,
        _ => NightMovementStatus::Allowed,
    };

    let escort_roles = if needs_escort {
        rule.escort_config.roles_for_width(width)
    } else {
        Vec::new()
    };

    EscortRequirement {
        jurisdiction_code: rule.jurisdiction_code.to_string(),
        jurisdiction_name: rule.display_name,
        escort_roles,
        police_required,
        police_width_threshold_ft: rule.police_width_threshold_ft,
        height_pole_required: dimensions.exceeds_secondary_height(),
        night_movement_status,
        notes: rule.notes_policy.notes_for(dimensions),
    }
}
