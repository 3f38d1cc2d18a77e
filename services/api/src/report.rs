use crate::infra::JurisdictionList;
use clap::Args;
use escort_compliance::compliance::{
    ComplianceEngine, ComplianceReport, LoadDimensions, RateTier, RouteComplianceRequest,
};
use escort_compliance::config::AppConfig;
use escort_compliance::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct RouteReportArgs {
    /// Load width in feet
    #[arg(long)]
    pub(crate) width: f64,
    /// Load height in feet
    #[arg(long)]
    pub(crate) height: f64,
    /// Load length in feet
    #[arg(long)]
    pub(crate) length: f64,
    /// Gross weight in pounds
    #[arg(long)]
    pub(crate) weight: f64,
    /// Total route mileage, split evenly across jurisdictions
    #[arg(long)]
    pub(crate) miles: f64,
    /// Jurisdictions in route order (e.g. TX,LA,MS,AL,FL)
    #[arg(long, value_parser = crate::infra::parse_jurisdictions)]
    pub(crate) jurisdictions: JurisdictionList,
    /// Escort pricing tier: standard, priority or premium
    #[arg(long, default_value = "standard", value_parser = crate::infra::parse_tier)]
    pub(crate) tier: RateTier,
    /// Print the report as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

impl RouteReportArgs {
    fn into_request(self) -> RouteComplianceRequest {
        let JurisdictionList(jurisdiction_codes) = self.jurisdictions;
        RouteComplianceRequest {
            dimensions: LoadDimensions {
                width_ft: self.width,
                height_ft: self.height,
                length_ft: self.length,
                weight_lbs: self.weight,
            },
            total_miles: self.miles,
            jurisdiction_codes,
            rate_tier: self.tier,
        }
    }
}

pub(crate) fn run_route_report(args: RouteReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let json = args.json;
    let request = args.into_request();

    let engine = ComplianceEngine::with_rates(config.rates);
    let report = engine.evaluate(&request)?;

    if json {
        let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        render_route_report(&request, &report);
    }

    Ok(())
}

fn render_route_report(request: &RouteComplianceRequest, report: &ComplianceReport) {
    let dims = &request.dimensions;
    println!(
        "Route compliance report ({} tier, {:.0} miles)",
        report.rate_tier, report.total_miles
    );
    println!(
        "Load: {}ft W x {}ft H x {}ft L, {} lbs",
        dims.width_ft, dims.height_ft, dims.length_ft, dims.weight_lbs
    );

    println!("\nPer jurisdiction:");
    for row in &report.per_jurisdiction {
        let police = if row.police_required {
            " + police"
        } else {
            ""
        };
        let height_pole = if row.height_pole_required {
            " + height pole"
        } else {
            ""
        };
        println!(
            "- {} ({}): {:.1} mi | {}{}{} | {} | {:.2}-{:.2} {}",
            row.jurisdiction_code,
            row.jurisdiction_name,
            row.assigned_miles,
            row.escort_summary,
            police,
            height_pole,
            row.night_movement_status.label(),
            row.cost.low,
            row.cost.high,
            row.cost.currency
        );
        println!("    {}", row.notes);
    }

    if !report.skipped_jurisdiction_codes.is_empty() {
        println!(
            "Skipped (no rules modeled): {}",
            report.skipped_jurisdiction_codes.join(", ")
        );
    }

    println!(
        "\nEstimated escort cost: {:.2}-{:.2} {}",
        report.total_cost.low, report.total_cost.high, report.total_cost.currency
    );
    println!("Max escort vehicles in any state: {}", report.max_escort_role_count);
    println!(
        "Police escort jurisdictions: {}",
        list_or_none(&report.police_jurisdictions)
    );
    println!(
        "Night-ban jurisdictions: {}",
        list_or_none(&report.night_ban_jurisdictions)
    );
    println!(
        "Police risk: {}",
        report.overall_police_risk.level.label()
    );
    for reason in &report.overall_police_risk.reasons {
        println!("  - {reason}");
    }
    if report.superload_likely {
        println!("Superload permitting is likely required.");
    }
}

fn list_or_none(codes: &[String]) -> String {
    if codes.is_empty() {
        "none".to_string()
    } else {
        codes.join(", ")
    }
}
