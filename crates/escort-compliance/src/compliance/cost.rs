use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::CostEstimate;

pub const DEFAULT_CURRENCY: &str = "USD";

/// Highest per-mile, per-escort rate a tier may be configured with.
pub const MAX_RATE_PER_MILE: f64 = 1_000.0;

/// Named operator pricing preset.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RateTier {
    #[default]
    Standard,
    Priority,
    Premium,
}

impl RateTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Standard, Self::Priority, Self::Premium]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Priority => "Priority",
            Self::Premium => "Premium",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(Self::Standard),
            "priority" => Some(Self::Priority),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }
}

impl fmt::Display for RateTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-mile, per-escort price band for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatePerMile {
    pub low_per_mile: f64,
    pub high_per_mile: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum RateConfigError {
    #[error("rate tier {tier} must use positive finite rates (low {low}, high {high})")]
    NonPositiveRate { tier: RateTier, low: f64, high: f64 },
    #[error("rate tier {tier} rate {rate} exceeds the {max} per-mile ceiling")]
    RateTooHigh { tier: RateTier, rate: f64, max: f64 },
    #[error("rate tier {tier} high rate {high} must exceed low rate {low}")]
    InvertedRange { tier: RateTier, low: f64, high: f64 },
    #[error("rate tier {0} is not configured")]
    MissingTier(RateTier),
    #[error("currency code must be three ASCII letters, got `{0}`")]
    InvalidCurrency(String),
    #[error("rate tier table could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct RateTierTableFile {
    #[serde(default)]
    currency: Option<String>,
    tiers: BTreeMap<RateTier, RatePerMile>,
}

/// Validated pricing configuration keyed by tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateTierTable {
    currency: String,
    tiers: BTreeMap<RateTier, RatePerMile>,
}

impl RateTierTable {
    pub fn new(
        currency: impl Into<String>,
        tiers: BTreeMap<RateTier, RatePerMile>,
    ) -> Result<Self, RateConfigError> {
        let currency = currency.into();
        if currency.len() != 3 || !currency.bytes().all(|byte| byte.is_ascii_alphabetic()) {
            return Err(RateConfigError::InvalidCurrency(currency));
        }

        for tier in RateTier::ordered() {
            let rate = tiers.get(&tier).ok_or(RateConfigError::MissingTier(tier))?;
            let RatePerMile {
                low_per_mile: low,
                high_per_mile: high,
            } = *rate;

            if !low.is_finite() || !high.is_finite() || low <= 0.0 || high <= 0.0 {
                return Err(RateConfigError::NonPositiveRate { tier, low, high });
            }
            if high <= low {
                return Err(RateConfigError::InvertedRange { tier, low, high });
            }
            if high > MAX_RATE_PER_MILE {
                return Err(RateConfigError::RateTooHigh {
                    tier,
                    rate: high,
                    max: MAX_RATE_PER_MILE,
                });
            }
        }

        Ok(Self {
            currency: currency.to_ascii_uppercase(),
            tiers,
        })
    }

    /// Load a table from JSON shaped as `{ "currency": "USD", "tiers": { "standard": {...} } }`.
    pub fn from_json(raw: &str) -> Result<Self, RateConfigError> {
        let file: RateTierTableFile = serde_json::from_str(raw)?;
        let currency = file
            .currency
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        Self::new(currency, file.tiers)
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn rate(&self, tier: RateTier) -> RatePerMile {
        // Construction guarantees every tier is present.
        self.tiers
            .get(&tier)
            .copied()
            .unwrap_or(STANDARD_RATES[tier as usize].1)
    }

    /// `mileage × escort_count × rate`, rounded to cents. Zero escorts cost nothing.
    pub fn estimate(&self, mileage: f64, escort_count: usize, tier: RateTier) -> CostEstimate {
        if escort_count == 0 {
            return CostEstimate::zero(&self.currency);
        }

        let rate = self.rate(tier);
        let escort_miles = mileage * escort_count as f64;

        CostEstimate {
            low: round_cents(escort_miles * rate.low_per_mile),
            high: round_cents(escort_miles * rate.high_per_mile),
            currency: self.currency.clone(),
        }
    }

    /// Sum estimates field by field. Zero-cost and skipped jurisdictions contribute nothing.
    pub fn total<'a, I>(&self, estimates: I) -> CostEstimate
    where
        I: IntoIterator<Item = &'a CostEstimate>,
    {
        let (low, high) = estimates
            .into_iter()
            .fold((0.0, 0.0), |(low, high), estimate| {
                (low + estimate.low, high + estimate.high)
            });

        CostEstimate {
            low: round_cents(low),
            high: round_cents(high),
            currency: self.currency.clone(),
        }
    }
}

// Source pricing: a flat per-mile base of 2.60 / 3.20 / 3.80 with a 0.90..1.20 band.
const STANDARD_RATES: [(RateTier, RatePerMile); 3] = [
    (
        RateTier::Standard,
        RatePerMile {
            low_per_mile: 2.34,
            high_per_mile: 3.12,
        },
    ),
    (
        RateTier::Priority,
        RatePerMile {
            low_per_mile: 2.88,
            high_per_mile: 3.84,
        },
    ),
    (
        RateTier::Premium,
        RatePerMile {
            low_per_mile: 3.42,
            high_per_mile: 4.56,
        },
    ),
];

impl Default for RateTierTable {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            tiers: STANDARD_RATES.into_iter().collect(),
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
