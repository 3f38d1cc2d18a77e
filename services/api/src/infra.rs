use escort_compliance::compliance::RateTier;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Jurisdiction codes supplied on the command line, in route order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct JurisdictionList(pub(crate) Vec<String>);

pub(crate) fn parse_jurisdictions(raw: &str) -> Result<JurisdictionList, String> {
    let codes: Vec<String> = raw
        .split([',', ' '])
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_ascii_uppercase)
        .collect();

    if codes.is_empty() {
        Err("expected a comma-separated list such as TX,LA,MS".to_string())
    } else {
        Ok(JurisdictionList(codes))
    }
}

pub(crate) fn parse_tier(raw: &str) -> Result<RateTier, String> {
    RateTier::parse(raw)
        .ok_or_else(|| format!("unknown rate tier '{raw}' (expected standard, priority or premium)"))
}
