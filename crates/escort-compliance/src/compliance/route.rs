use serde::Serialize;

use super::error::ComplianceError;

/// Mileage attributed to one jurisdiction on a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    pub jurisdiction_code: String,
    pub assigned_miles: f64,
}

/// Split `total_miles` evenly across the supplied jurisdictions, preserving their order.
///
/// The even split does not model real in-state highway distance. It stays that way until a
/// routing source supplies per-jurisdiction mileage.
pub fn decompose<S: AsRef<str>>(
    jurisdiction_codes: &[S],
    total_miles: f64,
) -> Result<Vec<RouteSegment>, ComplianceError> {
    if jurisdiction_codes.is_empty() {
        return Err(ComplianceError::InvalidRoute {
            field: "jurisdictionCodes",
            reason: "at least one jurisdiction is required".to_string(),
        });
    }

    if !total_miles.is_finite() || total_miles <= 0.0 {
        return Err(ComplianceError::InvalidRoute {
            field: "totalMiles",
            reason: format!("must be a positive number, got {total_miles}"),
        });
    }

    let assigned_miles = total_miles / jurisdiction_codes.len() as f64;

    Ok(jurisdiction_codes
        .iter()
        .map(|code| RouteSegment {
            jurisdiction_code: code.as_ref().to_string(),
            assigned_miles,
        })
        .collect())
}
