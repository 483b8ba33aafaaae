use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{eta::EtaRange, money::Money};

/// Fare breakdown for one route at one point in time.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct FareQuote {
    pub tier: String,
    pub base_fare: Money,
    pub surcharge_total: Money,
    pub total_fare: Money,
    /// Rounded to 2 decimals, display only
    pub distance_km: f64,
    pub eta: Option<EtaRange>,
}

pub(crate) fn round_display_km(distance_km: f64) -> f64 {
    (distance_km * 100.0).round() / 100.0
}
