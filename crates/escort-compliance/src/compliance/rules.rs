use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use serde::Serialize;

use super::domain::{EscortRole, LoadDimensions};

/// Named escort configuration strategies. Each maps a load width to a fixed role list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "strategy")]
pub enum EscortConfigStrategy {
    /// One front and one rear escort at any width.
    #[serde(rename = "flat-1-1")]
    FrontRear,
    /// One front and one rear below the band, two of each at or above it.
    #[serde(rename = "width-tiered-2x2", rename_all = "camelCase")]
    WidthTiered2x2 { band_ft: f64 },
    /// A single front escort below the band; front, rear and a route survey at or above it.
    #[serde(rename = "front-with-survey", rename_all = "camelCase")]
    FrontWithSurvey { band_ft: f64 },
}

impl EscortConfigStrategy {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FrontRear => "flat-1-1",
            Self::WidthTiered2x2 { .. } => "width-tiered-2x2",
            Self::FrontWithSurvey { .. } => "front-with-survey",
        }
    }

    pub fn roles_for_width(&self, width_ft: f64) -> Vec<EscortRole> {
        match *self {
            Self::FrontRear => vec![EscortRole::Front, EscortRole::Rear],
            Self::WidthTiered2x2 { band_ft } if width_ft >= band_ft => vec![
                EscortRole::Front,
                EscortRole::Front,
                EscortRole::Rear,
                EscortRole::Rear,
            ],
            Self::WidthTiered2x2 { .. } => vec![EscortRole::Front, EscortRole::Rear],
            Self::FrontWithSurvey { band_ft } if width_ft >= band_ft => vec![
                EscortRole::Front,
                EscortRole::Rear,
                EscortRole::RouteSurvey,
            ],
            Self::FrontWithSurvey { .. } => vec![EscortRole::Front],
        }
    }

    fn band_ft(&self) -> Option<f64> {
        match *self {
            Self::FrontRear => None,
            Self::WidthTiered2x2 { band_ft } | Self::FrontWithSurvey { band_ft } => Some(band_ft),
        }
    }
}

/// Advisory text selection for a jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum NotesPolicy {
    Static { text: &'static str },
    #[serde(rename_all = "camelCase")]
    WidthBanded {
        band_ft: f64,
        wide: &'static str,
        standard: &'static str,
    },
}

impl NotesPolicy {
    pub fn notes_for(&self, dimensions: &LoadDimensions) -> &'static str {
        match *self {
            Self::Static { text } => text,
            Self::WidthBanded {
                band_ft,
                wide,
                standard,
            } => {
                if dimensions.width_ft >= band_ft {
                    wide
                } else {
                    standard
                }
            }
        }
    }
}

/// Thresholds and policies a single jurisdiction applies to oversize loads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionRule {
    pub jurisdiction_code: &'static str,
    pub display_name: &'static str,
    pub escort_width_threshold_ft: f64,
    pub police_width_threshold_ft: f64,
    /// Width at or above which night movement is prohibited. `None` means night movement is
    /// only ever restricted.
    pub night_width_threshold_ft: Option<f64>,
    pub escort_config: EscortConfigStrategy,
    pub notes_policy: NotesPolicy,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleTableError {
    #[error("jurisdiction {0} is defined more than once")]
    DuplicateCode(String),
    #[error("jurisdiction code `{0}` must be non-empty uppercase ASCII")]
    MalformedCode(String),
    #[error("jurisdiction {code} has a non-positive or non-finite threshold `{field}`")]
    InvalidThreshold { code: String, field: &'static str },
    #[error("jurisdiction {code} police threshold {police}ft is below escort threshold {escort}ft")]
    PoliceBelowEscort { code: String, police: f64, escort: f64 },
}

/// Read-only lookup of jurisdiction rules keyed by code.
#[derive(Debug, Clone, PartialEq)]
pub struct JurisdictionRuleTable {
    rules: BTreeMap<&'static str, JurisdictionRule>,
}

static STANDARD_TABLE: OnceLock<Arc<JurisdictionRuleTable>> = OnceLock::new();

impl JurisdictionRuleTable {
    /// Build a table from explicit rules, validating every record.
    pub fn from_rules(rules: Vec<JurisdictionRule>) -> Result<Self, RuleTableError> {
        let mut indexed = BTreeMap::new();

        for rule in rules {
            validate_rule(&rule)?;
            let code = rule.jurisdiction_code;
            if indexed.insert(code, rule).is_some() {
                return Err(RuleTableError::DuplicateCode(code.to_string()));
            }
        }

        Ok(Self { rules: indexed })
    }

    /// The modeled rule set, built once per process.
    pub fn standard() -> Arc<Self> {
        STANDARD_TABLE
            .get_or_init(|| {
                Arc::new(Self {
                    rules: standard_rules()
                        .into_iter()
                        .map(|rule| (rule.jurisdiction_code, rule))
                        .collect(),
                })
            })
            .clone()
    }

    pub fn lookup(&self, code: &str) -> Option<&JurisdictionRule> {
        self.rules.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rules.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules ordered by jurisdiction code.
    pub fn rules(&self) -> impl Iterator<Item = &JurisdictionRule> {
        self.rules.values()
    }
}

fn validate_rule(rule: &JurisdictionRule) -> Result<(), RuleTableError> {
    let code = rule.jurisdiction_code;
    if code.is_empty() || !code.bytes().all(|byte| byte.is_ascii_uppercase()) {
        return Err(RuleTableError::MalformedCode(code.to_string()));
    }

    let thresholds = [
        ("escortWidthThresholdFt", Some(rule.escort_width_threshold_ft)),
        ("policeWidthThresholdFt", Some(rule.police_width_threshold_ft)),
        ("nightWidthThresholdFt", rule.night_width_threshold_ft),
        ("escortConfig.bandFt", rule.escort_config.band_ft()),
    ];
    for (field, value) in thresholds {
        if let Some(value) = value {
            if !value.is_finite() || value <= 0.0 {
                return Err(RuleTableError::InvalidThreshold {
                    code: code.to_string(),
                    field,
                });
            }
        }
    }

    if rule.police_width_threshold_ft < rule.escort_width_threshold_ft {
        return Err(RuleTableError::PoliceBelowEscort {
            code: code.to_string(),
            police: rule.police_width_threshold_ft,
            escort: rule.escort_width_threshold_ft,
        });
    }

    Ok(())
}

fn rule(
    jurisdiction_code: &'static str,
    display_name: &'static str,
    police_width_threshold_ft: f64,
    night_width_threshold_ft: Option<f64>,
    escort_config: EscortConfigStrategy,
    notes_policy: NotesPolicy,
) -> JurisdictionRule {
    JurisdictionRule {
        jurisdiction_code,
        display_name,
        escort_width_threshold_ft: 14.0,
        police_width_threshold_ft,
        night_width_threshold_ft,
        escort_config,
        notes_policy,
    }
}

fn text(text: &'static str) -> NotesPolicy {
    NotesPolicy::Static { text }
}

fn banded(band_ft: f64, wide: &'static str, standard: &'static str) -> NotesPolicy {
    NotesPolicy::WidthBanded {
        band_ft,
        wide,
        standard,
    }
}

// Every modeled jurisdiction triggers civilian escorts at 14ft wide.
pub(crate) fn standard_rules() -> Vec<JurisdictionRule> {
    use EscortConfigStrategy::{FrontRear, FrontWithSurvey, WidthTiered2x2};

    vec![
        rule(
            "TX",
            "Texas",
            18.0,
            None,
            WidthTiered2x2 { band_ft: 18.0 },
            banded(
                18.0,
                "Superload: route survey + structural clearance required.",
                "TxDOT ePermit required. 48hr processing standard.",
            ),
        ),
        rule(
            "FL",
            "Florida",
            16.0,
            Some(16.0),
            WidthTiered2x2 { band_ft: 16.0 },
            banded(
                14.0,
                "Rush hour restrictions in Miami-Dade and Broward. FDOT ePPermit required.",
                "Standard permit. No escort required under 14ft wide.",
            ),
        ),
        rule(
            "LA",
            "Louisiana",
            16.0,
            Some(14.0),
            FrontRear,
            banded(
                14.0,
                "Night movement PROHIBITED for loads wider than 14ft.",
                "DOTD permit portal required.",
            ),
        ),
        rule(
            "GA",
            "Georgia",
            18.0,
            None,
            FrontRear,
            banded(
                16.0,
                "Pre-move route notification required for loads >16ft wide.",
                "GDOT ePPermitting.",
            ),
        ),
        rule(
            "OH",
            "Ohio",
            18.0,
            None,
            FrontRear,
            banded(
                18.0,
                "State police escort required. Schedule with local district.",
                "ODOT permit required.",
            ),
        ),
        rule(
            "MS",
            "Mississippi",
            18.0,
            None,
            FrontRear,
            text("Weekend restrictions on Pearl River bridges."),
        ),
        rule(
            "AL",
            "Alabama",
            18.0,
            None,
            FrontRear,
            text("ALDOT online permit. Holiday blackouts apply Oct-Jan."),
        ),
        rule(
            "TN",
            "Tennessee",
            18.0,
            None,
            FrontRear,
            text("TDOT permit. Spring weight restrictions Feb-Mar statewide."),
        ),
        rule(
            "KY",
            "Kentucky",
            18.0,
            None,
            FrontRear,
            text("Annual permits available for repeat routes."),
        ),
        rule(
            "OK",
            "Oklahoma",
            18.0,
            None,
            FrontRear,
            text("ODOT permit. Turnpike-specific rules. Event period blackouts Sep."),
        ),
        rule(
            "KS",
            "Kansas",
            18.0,
            None,
            FrontRear,
            text("Annual permits available. Night movement allowed in rural areas."),
        ),
        rule(
            "MO",
            "Missouri",
            18.0,
            None,
            FrontRear,
            text("MoDOT portal. KC metro has additional peak hour restrictions."),
        ),
        rule(
            "IA",
            "Iowa",
            18.0,
            None,
            FrontRear,
            text("Iowa DOT permit. Spring load restrictions April-May."),
        ),
        rule(
            "MN",
            "Minnesota",
            16.0,
            None,
            WidthTiered2x2 { band_ft: 16.0 },
            text("MNDOT 5-day processing for wide loads. Twin Cities metro restricted."),
        ),
        rule(
            "CA",
            "California",
            20.0,
            None,
            FrontWithSurvey { band_ft: 16.0 },
            banded(
                16.0,
                "Route survey required for loads >16ft wide. Caltrans permit.",
                "Caltrans permit required.",
            ),
        ),
        rule(
            "AZ",
            "Arizona",
            18.0,
            None,
            FrontRear,
            text("ADOT online portal. 24-48hr permit processing."),
        ),
        rule(
            "NM",
            "New Mexico",
            18.0,
            None,
            FrontRear,
            text("Annual permits available for repeat routes."),
        ),
        rule(
            "SC",
            "South Carolina",
            18.0,
            None,
            FrontRear,
            text("Port of Charleston specific routing requirements for port deliveries."),
        ),
        rule(
            "MI",
            "Michigan",
            18.0,
            None,
            FrontRear,
            text("MDOT online permit. Annual superload permits for industrial shippers."),
        ),
        rule(
            "NC",
            "North Carolina",
            18.0,
            None,
            FrontRear,
            text("NCDOT permit. Mountain routes require additional review."),
        ),
        rule(
            "VA",
            "Virginia",
            18.0,
            None,
            FrontRear,
            text("Virginia DOT permit portal."),
        ),
    ]
}
