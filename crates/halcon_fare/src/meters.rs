use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::kmh::Kmh;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Meters(f64);

impl Meters {
    pub const ZERO: Meters = Meters(0.0);

    pub fn new(value: f64) -> Self {
        Meters(value)
    }

    pub fn from_km(km: f64) -> Self {
        Meters(km * 1000.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Raw kilometres, never rounded.
    pub fn km(&self) -> f64 {
        self.0 / 1000.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Seconds needed to cover this distance at `speed`. Not bounded, a
    /// tiny speed can give a huge or infinite result.
    pub fn travel_seconds(&self, speed: Kmh) -> f64 {
        self.0 * 3.6 / speed.value()
    }
}

impl Eq for Meters {}

impl PartialOrd for Meters {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Meters {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}
