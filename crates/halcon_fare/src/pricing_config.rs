use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    eta::EtaModel,
    money::Money,
    pricing_tiers::PricingTiers,
    surcharge::SurchargeConfig,
};

#[derive(Debug, Error, PartialEq)]
pub enum PricingConfigError {
    #[error("Minimum billable distance must be a non-negative finite number, got {0}")]
    InvalidMinimumDistance(f64),

    #[error("Tier {tier} has bound {bound} km, which must be finite and above {previous} km")]
    UnorderedTierBound {
        tier: String,
        bound: f64,
        previous: f64,
    },

    #[error("Invalid velocity band: {0}")]
    InvalidVelocityBand(String),
}

/// Every amount, boundary and estimation setting the fare engine uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "PricingConfigRepr", into = "PricingConfigRepr")]
pub struct PricingConfig {
    pub tiers: PricingTiers,
    pub surcharges: SurchargeConfig,
    pub eta: EtaModel,
}

#[derive(Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "PricingConfig")]
struct PricingConfigRepr {
    #[serde(default)]
    tiers: PricingTiers,
    #[serde(default)]
    surcharges: SurchargeConfig,
    #[serde(default)]
    eta: EtaModel,
}

impl TryFrom<PricingConfigRepr> for PricingConfig {
    type Error = PricingConfigError;

    fn try_from(value: PricingConfigRepr) -> Result<Self, Self::Error> {
        PricingConfig::new(value.tiers, value.surcharges, value.eta)
    }
}

impl From<PricingConfig> for PricingConfigRepr {
    fn from(value: PricingConfig) -> Self {
        PricingConfigRepr {
            tiers: value.tiers,
            surcharges: value.surcharges,
            eta: value.eta,
        }
    }
}

/// The seven flat amounts of the standard four-tier table.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct StandardFares {
    pub minimal_fare: Money,
    pub intermediate_fare: Money,
    pub long_fare: Money,
    pub extra_long_fare: Money,
    pub after_nine_surcharge: Money,
    pub rain_surcharge: Money,
    pub complex_neighborhood_surcharge: Money,
}

impl Default for StandardFares {
    fn default() -> Self {
        StandardFares {
            minimal_fare: Money::new(5000),
            intermediate_fare: Money::new(6000),
            long_fare: Money::new(7000),
            extra_long_fare: Money::new(8000),
            after_nine_surcharge: Money::new(1000),
            rain_surcharge: Money::new(2000),
            complex_neighborhood_surcharge: Money::new(3000),
        }
    }
}

impl PricingConfig {
    pub fn new(
        tiers: PricingTiers,
        surcharges: SurchargeConfig,
        eta: EtaModel,
    ) -> Result<Self, PricingConfigError> {
        if let EtaModel::VelocityBand(band) = &eta {
            band.validate()?;
        }

        Ok(PricingConfig {
            tiers,
            surcharges,
            eta,
        })
    }

    pub fn from_fares(fares: StandardFares) -> Self {
        PricingConfig {
            tiers: PricingTiers::standard(
                fares.minimal_fare,
                fares.intermediate_fare,
                fares.long_fare,
                fares.extra_long_fare,
            ),
            surcharges: SurchargeConfig {
                after_nine: fares.after_nine_surcharge,
                rain: fares.rain_surcharge,
                complex_neighborhood: fares.complex_neighborhood_surcharge,
            },
            eta: EtaModel::Provider,
        }
    }

    pub fn with_eta(mut self, eta: EtaModel) -> Result<Self, PricingConfigError> {
        if let EtaModel::VelocityBand(band) = &eta {
            band.validate()?;
        }
        self.eta = eta;
        Ok(self)
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let file = std::fs::File::open(path.as_ref())?;
        let config = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(config)
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig::from_fares(StandardFares::default())
    }
}
