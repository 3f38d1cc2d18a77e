use serde::{Deserialize, Serialize};

use super::cost::RateTier;
use super::error::ComplianceError;

/// Height at or above which any jurisdiction requires a civilian escort, regardless of width.
pub const SECONDARY_HEIGHT_TRIGGER_FT: f64 = 14.5;

// Ceilings keep every cost product finite; no road load comes near them.
pub const MAX_WIDTH_FT: f64 = 100.0;
pub const MAX_HEIGHT_FT: f64 = 100.0;
pub const MAX_LENGTH_FT: f64 = 1_000.0;
pub const MAX_WEIGHT_LBS: f64 = 10_000_000.0;
pub const MAX_ROUTE_MILES: f64 = 25_000.0;

pub(crate) fn check_bounded(
    field: &'static str,
    value: f64,
    max: f64,
) -> Result<(), ComplianceError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ComplianceError::InvalidInput {
            field,
            reason: format!("must be a positive number, got {value}"),
        });
    }
    if value > max {
        return Err(ComplianceError::InvalidInput {
            field,
            reason: format!("must not exceed {max}, got {value}"),
        });
    }
    Ok(())
}

/// Physical envelope of the load being moved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadDimensions {
    pub width_ft: f64,
    pub height_ft: f64,
    pub length_ft: f64,
    pub weight_lbs: f64,
}

impl LoadDimensions {
    /// Reject non-finite, non-positive or implausibly large measurements, naming the first
    /// offending field.
    pub fn validate(&self) -> Result<(), ComplianceError> {
        let fields = [
            ("widthFt", self.width_ft, MAX_WIDTH_FT),
            ("heightFt", self.height_ft, MAX_HEIGHT_FT),
            ("lengthFt", self.length_ft, MAX_LENGTH_FT),
            ("weightLbs", self.weight_lbs, MAX_WEIGHT_LBS),
        ];

        for (field, value, max) in fields {
            check_bounded(field, value, max)?;
        }

        Ok(())
    }

    pub fn exceeds_secondary_height(&self) -> bool {
        self.height_ft >= SECONDARY_HEIGHT_TRIGGER_FT
    }
}

/// Wire names of every [`RouteComplianceRequest`] field.
pub const REQUEST_FIELDS: [&str; 7] = [
    "widthFt",
    "heightFt",
    "lengthFt",
    "weightLbs",
    "totalMiles",
    "jurisdictionCodes",
    "rateTier",
];

/// Inbound request for a route-level compliance report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteComplianceRequest {
    #[serde(flatten)]
    pub dimensions: LoadDimensions,
    pub total_miles: f64,
    pub jurisdiction_codes: Vec<String>,
    #[serde(default)]
    pub rate_tier: RateTier,
}

/// Escort vehicle or service position called for by a jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EscortRole {
    Front,
    Rear,
    RouteSurvey,
}

impl EscortRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Rear => "Rear",
            Self::RouteSurvey => "Route Survey",
        }
    }
}

/// Render a role list the way permit desks write it, e.g. "2 Front + 2 Rear".
pub fn describe_roles(roles: &[EscortRole]) -> String {
    if roles.is_empty() {
        return "None".to_string();
    }

    let mut groups: Vec<(EscortRole, usize)> = Vec::new();
    for role in roles {
        match groups.iter_mut().find(|(existing, _)| existing == role) {
            Some((_, count)) => *count += 1,
            None => groups.push((*role, 1)),
        }
    }

    groups
        .into_iter()
        .map(|(role, count)| match role {
            EscortRole::RouteSurvey if count == 1 => role.label().to_string(),
            _ => format!("{count} {}", role.label()),
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NightMovementStatus {
    Allowed,
    Restricted,
    Prohibited,
}

impl NightMovementStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Allowed => "Night OK",
            Self::Restricted => "Night Restricted",
            Self::Prohibited => "Night Banned",
        }
    }
}

/// Requirement produced for one jurisdiction on one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EscortRequirement {
    pub jurisdiction_code: String,
    pub jurisdiction_name: &'static str,
    pub escort_roles: Vec<EscortRole>,
    pub police_required: bool,
    pub police_width_threshold_ft: f64,
    /// Over-height loads run a height pole ahead of the front escort. Not counted as a role.
    pub height_pole_required: bool,
    pub night_movement_status: NightMovementStatus,
    pub notes: &'static str,
}

impl EscortRequirement {
    pub fn needs_escort(&self) -> bool {
        !self.escort_roles.is_empty()
    }

    pub fn escort_role_count(&self) -> usize {
        self.escort_roles.len()
    }
}

/// Estimated escort spend for a jurisdiction or a whole route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub low: f64,
    pub high: f64,
    pub currency: String,
}

impl CostEstimate {
    pub fn zero(currency: &str) -> Self {
        Self {
            low: 0.0,
            high: 0.0,
            currency: currency.to_string(),
        }
    }
}
