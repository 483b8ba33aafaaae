use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{coordinate::Coordinate, meters::Meters};

#[derive(Debug, Error, PartialEq)]
pub enum RouteMetricsError {
    #[error("Route distance must be a non-negative finite number of meters, got {0}")]
    InvalidDistance(f64),

    #[error("Route duration must be a non-negative finite number of seconds, got {0}")]
    InvalidDuration(f64),
}

/// Distance, duration and geometry of one routing response for one
/// (origin, destination) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "RouteMetricsRepr")]
pub struct RouteMetrics {
    distance: Meters,
    duration: SignedDuration,
    polyline: Vec<Coordinate>,
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename = "RouteMetrics")]
struct RouteMetricsRepr {
    distance: Meters,
    duration: SignedDuration,
    polyline: Vec<Coordinate>,
}

impl TryFrom<RouteMetricsRepr> for RouteMetrics {
    type Error = RouteMetricsError;

    fn try_from(value: RouteMetricsRepr) -> Result<Self, Self::Error> {
        RouteMetrics::checked(value.distance, value.duration, value.polyline)
    }
}

impl RouteMetrics {
    pub fn new(
        distance_meters: f64,
        duration_seconds: f64,
        polyline: Vec<Coordinate>,
    ) -> Result<Self, RouteMetricsError> {
        if !duration_seconds.is_finite() || duration_seconds < 0.0 {
            return Err(RouteMetricsError::InvalidDuration(duration_seconds));
        }

        let duration = SignedDuration::try_from_secs_f64(duration_seconds)
            .map_err(|_| RouteMetricsError::InvalidDuration(duration_seconds))?;

        RouteMetrics::checked(Meters::new(distance_meters), duration, polyline)
    }

    fn checked(
        distance: Meters,
        duration: SignedDuration,
        polyline: Vec<Coordinate>,
    ) -> Result<Self, RouteMetricsError> {
        if !distance.value().is_finite() || distance.value() < 0.0 {
            return Err(RouteMetricsError::InvalidDistance(distance.value()));
        }
        if duration.is_negative() {
            return Err(RouteMetricsError::InvalidDuration(duration.as_secs_f64()));
        }

        Ok(RouteMetrics {
            distance,
            duration,
            polyline,
        })
    }

    pub fn distance(&self) -> Meters {
        self.distance
    }

    pub fn duration(&self) -> SignedDuration {
        self.duration
    }

    pub fn polyline(&self) -> &[Coordinate] {
        &self.polyline
    }
}
