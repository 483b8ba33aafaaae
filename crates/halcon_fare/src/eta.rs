use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{kmh::Kmh, meters::Meters, pricing_config::PricingConfigError};

/// Whole-minute travel estimate, `min_minutes <= max_minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct EtaRange {
    min_minutes: u32,
    max_minutes: u32,
}

impl EtaRange {
    pub fn new(a: u32, b: u32) -> Self {
        EtaRange {
            min_minutes: a.min(b),
            max_minutes: a.max(b),
        }
    }

    pub fn point(minutes: u32) -> Self {
        EtaRange {
            min_minutes: minutes,
            max_minutes: minutes,
        }
    }

    pub fn min_minutes(&self) -> u32 {
        self.min_minutes
    }

    pub fn max_minutes(&self) -> u32 {
        self.max_minutes
    }

    pub fn is_point(&self) -> bool {
        self.min_minutes == self.max_minutes
    }
}

impl Display for EtaRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_point() {
            write!(f, "{} min", self.min_minutes)
        } else {
            write!(f, "{}-{} min", self.min_minutes, self.max_minutes)
        }
    }
}

/// Urban speed band used to bracket the travel time of a fixed distance.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct VelocityBand {
    /// Speed under traffic, gives the longest estimate
    pub min_speed: Kmh,
    /// Free-flow speed, gives the shortest estimate
    pub max_speed: Kmh,
    pub traffic_factor: f64,
}

impl VelocityBand {
    pub fn urban() -> Self {
        VelocityBand {
            min_speed: Kmh::new(30.0),
            max_speed: Kmh::new(50.0),
            traffic_factor: 1.3,
        }
    }

    pub fn validate(&self) -> Result<(), PricingConfigError> {
        let min = self.min_speed.value();
        let max = self.max_speed.value();

        if !min.is_finite() || !max.is_finite() || min <= 0.0 {
            return Err(PricingConfigError::InvalidVelocityBand(format!(
                "speeds must be finite and positive, got {min} and {max} km/h"
            )));
        }
        if min > max {
            return Err(PricingConfigError::InvalidVelocityBand(format!(
                "min speed {min} km/h is above max speed {max} km/h"
            )));
        }
        if !self.traffic_factor.is_finite() || self.traffic_factor <= 0.0 {
            return Err(PricingConfigError::InvalidVelocityBand(format!(
                "traffic factor must be finite and positive, got {}",
                self.traffic_factor
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum EtaModel {
    /// Point estimate from the routing provider's duration
    #[default]
    Provider,
    VelocityBand(VelocityBand),
}

fn whole_minutes(seconds: f64) -> u32 {
    // `as` saturates for out of range floats
    (seconds / 60.0).round() as u32
}

/// Point estimate: `round(duration_seconds / 60)` for both bounds.
pub fn compute_eta_range(duration_seconds: f64) -> EtaRange {
    EtaRange::point(whole_minutes(duration_seconds))
}

/// Travel time of `distance` at both ends of the band, inflated by the
/// traffic factor.
///
/// Saturates at `u32::MAX` minutes for distances or speeds far outside any
/// real trip.
pub fn compute_eta_band(distance: Meters, band: &VelocityBand) -> EtaRange {
    let fastest = distance.travel_seconds(band.max_speed);
    let slowest = distance.travel_seconds(band.min_speed);

    EtaRange::new(
        whole_minutes(fastest * band.traffic_factor),
        whole_minutes(slowest * band.traffic_factor),
    )
}
