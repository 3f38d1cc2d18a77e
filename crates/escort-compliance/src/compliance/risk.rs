use serde::Serialize;

use super::domain::{EscortRequirement, LoadDimensions, NightMovementStatus};

/// Width margin below a police threshold that is still treated as elevated risk.
pub const POLICE_PROXIMITY_FT: f64 = 2.0;

const SUPERLOAD_HEIGHT_FT: f64 = 16.0;
const SUPERLOAD_WEIGHT_LBS: f64 = 150_000.0;
const EXTREME_LENGTH_FT: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoliceRiskLevel {
    Unknown,
    Low,
    Medium,
    High,
}

impl PoliceRiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    const fn severity(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl PartialOrd for PoliceRiskLevel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PoliceRiskLevel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.severity().cmp(&other.severity())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoliceRisk {
    pub level: PoliceRiskLevel,
    pub reasons: Vec<String>,
}

/// Route-level indicators derived from every evaluated jurisdiction.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskSummary {
    pub max_escort_role_count: usize,
    /// Police jurisdictions, furthest over threshold first. Ties keep route order.
    pub police_jurisdictions: Vec<String>,
    pub night_ban_jurisdictions: Vec<String>,
    pub overall_police_risk: PoliceRisk,
}

struct Trigger {
    level: PoliceRiskLevel,
    reason: String,
}

pub fn aggregate(requirements: &[EscortRequirement], dimensions: &LoadDimensions) -> RiskSummary {
    let max_escort_role_count = requirements
        .iter()
        .map(EscortRequirement::escort_role_count)
        .max()
        .unwrap_or(0);

    let mut police: Vec<&EscortRequirement> = Vec::new();
    for requirement in requirements.iter().filter(|r| r.police_required) {
        if !police
            .iter()
            .any(|seen| seen.jurisdiction_code == requirement.jurisdiction_code)
        {
            police.push(requirement);
        }
    }
    police.sort_by(|a, b| {
        let overage_a = dimensions.width_ft - a.police_width_threshold_ft;
        let overage_b = dimensions.width_ft - b.police_width_threshold_ft;
        overage_b.total_cmp(&overage_a)
    });
    let police_jurisdictions = police
        .into_iter()
        .map(|requirement| requirement.jurisdiction_code.clone())
        .collect();

    let mut night_ban_jurisdictions: Vec<String> = Vec::new();
    for requirement in requirements
        .iter()
        .filter(|r| r.night_movement_status == NightMovementStatus::Prohibited)
    {
        if !night_ban_jurisdictions.contains(&requirement.jurisdiction_code) {
            night_ban_jurisdictions.push(requirement.jurisdiction_code.clone());
        }
    }

    RiskSummary {
        max_escort_role_count,
        police_jurisdictions,
        night_ban_jurisdictions,
        overall_police_risk: overall_police_risk(requirements, dimensions),
    }
}

fn overall_police_risk(
    requirements: &[EscortRequirement],
    dimensions: &LoadDimensions,
) -> PoliceRisk {
    if requirements.is_empty() {
        return PoliceRisk {
            level: PoliceRiskLevel::Unknown,
            reasons: vec!["no modeled jurisdictions on route".to_string()],
        };
    }

    let mut triggers: Vec<Trigger> = requirements
        .iter()
        .map(|requirement| jurisdiction_trigger(requirement, dimensions.width_ft))
        .collect();
    triggers.extend(load_triggers(dimensions));

    let level = triggers
        .iter()
        .map(|trigger| trigger.level)
        .max()
        .unwrap_or(PoliceRiskLevel::Low);

    if level == PoliceRiskLevel::Low {
        return PoliceRisk {
            level,
            reasons: vec![format!(
                "width {}ft is clear of every police threshold on the route",
                format_ft(dimensions.width_ft)
            )],
        };
    }

    let mut reasons: Vec<String> = Vec::new();
    for trigger in triggers.into_iter().filter(|t| t.level == level) {
        if !reasons.contains(&trigger.reason) {
            reasons.push(trigger.reason);
        }
    }

    PoliceRisk { level, reasons }
}

fn jurisdiction_trigger(requirement: &EscortRequirement, width_ft: f64) -> Trigger {
    let code = &requirement.jurisdiction_code;
    let threshold = requirement.police_width_threshold_ft;

    if requirement.police_required {
        Trigger {
            level: PoliceRiskLevel::High,
            reason: format!(
                "width ≥ {}ft in {code} triggers mandatory police escort",
                format_ft(threshold)
            ),
        }
    } else if width_ft >= threshold - POLICE_PROXIMITY_FT {
        Trigger {
            level: PoliceRiskLevel::Medium,
            reason: format!(
                "width {}ft is within {}ft of the {code} police threshold ({}ft)",
                format_ft(width_ft),
                format_ft(POLICE_PROXIMITY_FT),
                format_ft(threshold)
            ),
        }
    } else {
        Trigger {
            level: PoliceRiskLevel::Low,
            reason: String::new(),
        }
    }
}

fn load_triggers(dimensions: &LoadDimensions) -> Vec<Trigger> {
    let mut triggers = Vec::new();

    if dimensions.height_ft >= SUPERLOAD_HEIGHT_FT {
        triggers.push(Trigger {
            level: PoliceRiskLevel::High,
            reason: format!(
                "height ≥ {}ft exceeds standard bridge clearances; utility bucket trucks may be needed",
                format_ft(SUPERLOAD_HEIGHT_FT)
            ),
        });
    }
    if dimensions.weight_lbs >= SUPERLOAD_WEIGHT_LBS {
        triggers.push(Trigger {
            level: PoliceRiskLevel::High,
            reason: format!(
                "weight ≥ {} lbs requires bridge engineering review, often with state police",
                SUPERLOAD_WEIGHT_LBS as u64
            ),
        });
    }
    if dimensions.length_ft >= EXTREME_LENGTH_FT {
        triggers.push(Trigger {
            level: PoliceRiskLevel::Medium,
            reason: format!(
                "length ≥ {}ft affects turn radius and raises the risk profile",
                format_ft(EXTREME_LENGTH_FT)
            ),
        });
    }

    triggers
}

/// Superload classification is likely above these envelopes.
pub fn superload_likely(dimensions: &LoadDimensions) -> bool {
    dimensions.width_ft > 16.0 || dimensions.height_ft > 16.0 || dimensions.weight_lbs > 180_000.0
}

fn format_ft(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
