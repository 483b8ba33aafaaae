use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{money::Money, pricing_config::PricingConfigError};

/// A tier covering distances strictly below `upper_bound_km` and at or above
/// the previous tier's bound.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PricingTier {
    pub name: String,
    pub upper_bound_km: f64,
    pub price: Money,
}

/// Last tier, unbounded above.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct OpenEndedTier {
    pub name: String,
    pub price: Money,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedTier<'a> {
    pub name: &'a str,
    pub price: Money,
}

/// Lower-closed, upper-open partition of `[minimum_billable_km, ∞)`.
///
/// Distances below `minimum_billable_km` are billed as if they were exactly
/// `minimum_billable_km`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "PricingTiersRepr", into = "PricingTiersRepr")]
pub struct PricingTiers {
    minimum_billable_km: f64,
    bounded: Vec<PricingTier>,
    open_ended: OpenEndedTier,
}

#[derive(Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "PricingTiers")]
struct PricingTiersRepr {
    #[serde(default = "default_minimum_billable_km")]
    minimum_billable_km: f64,
    bounded: Vec<PricingTier>,
    open_ended: OpenEndedTier,
}

fn default_minimum_billable_km() -> f64 {
    1.0
}

impl TryFrom<PricingTiersRepr> for PricingTiers {
    type Error = PricingConfigError;

    fn try_from(value: PricingTiersRepr) -> Result<Self, Self::Error> {
        PricingTiers::new(value.minimum_billable_km, value.bounded, value.open_ended)
    }
}

impl From<PricingTiers> for PricingTiersRepr {
    fn from(value: PricingTiers) -> Self {
        PricingTiersRepr {
            minimum_billable_km: value.minimum_billable_km,
            bounded: value.bounded,
            open_ended: value.open_ended,
        }
    }
}

impl PricingTiers {
    pub fn new(
        minimum_billable_km: f64,
        bounded: Vec<PricingTier>,
        open_ended: OpenEndedTier,
    ) -> Result<Self, PricingConfigError> {
        if !minimum_billable_km.is_finite() || minimum_billable_km < 0.0 {
            return Err(PricingConfigError::InvalidMinimumDistance(
                minimum_billable_km,
            ));
        }

        let mut previous_bound = minimum_billable_km;
        for tier in &bounded {
            if !tier.upper_bound_km.is_finite() || tier.upper_bound_km <= previous_bound {
                return Err(PricingConfigError::UnorderedTierBound {
                    tier: tier.name.clone(),
                    bound: tier.upper_bound_km,
                    previous: previous_bound,
                });
            }
            previous_bound = tier.upper_bound_km;
        }

        Ok(PricingTiers {
            minimum_billable_km,
            bounded,
            open_ended,
        })
    }

    /// Standard four-tier table: `[1,5) [5,6) [6,8.5) [8.5,∞)`.
    pub fn standard(minimal: Money, intermediate: Money, long: Money, extra_long: Money) -> Self {
        PricingTiers {
            minimum_billable_km: 1.0,
            bounded: vec![
                PricingTier {
                    name: String::from("minimal"),
                    upper_bound_km: 5.0,
                    price: minimal,
                },
                PricingTier {
                    name: String::from("intermediate"),
                    upper_bound_km: 6.0,
                    price: intermediate,
                },
                PricingTier {
                    name: String::from("long"),
                    upper_bound_km: 8.5,
                    price: long,
                },
            ],
            open_ended: OpenEndedTier {
                name: String::from("extra-long"),
                price: extra_long,
            },
        }
    }

    pub fn minimum_billable_km(&self) -> f64 {
        self.minimum_billable_km
    }

    pub fn bounded(&self) -> &[PricingTier] {
        &self.bounded
    }

    pub fn open_ended(&self) -> &OpenEndedTier {
        &self.open_ended
    }

    /// Clamps to the minimum billable distance. No rounding happens here.
    pub fn billable_km(&self, distance_km: f64) -> f64 {
        distance_km.max(self.minimum_billable_km)
    }

    pub fn select(&self, distance_km: f64) -> SelectedTier<'_> {
        let billable_km = self.billable_km(distance_km);

        self.bounded
            .iter()
            .find(|tier| billable_km < tier.upper_bound_km)
            .map(|tier| SelectedTier {
                name: &tier.name,
                price: tier.price,
            })
            .unwrap_or(SelectedTier {
                name: &self.open_ended.name,
                price: self.open_ended.price,
            })
    }
}

impl Default for PricingTiers {
    fn default() -> Self {
        PricingTiers::standard(
            Money::new(5000),
            Money::new(6000),
            Money::new(7000),
            Money::new(8000),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(name: &str, upper_bound_km: f64, price: u64) -> PricingTier {
        PricingTier {
            name: name.to_string(),
            upper_bound_km,
            price: Money::new(price),
        }
    }

    fn open(price: u64) -> OpenEndedTier {
        OpenEndedTier {
            name: String::from("open"),
            price: Money::new(price),
        }
    }

    #[test]
    fn test_standard_boundaries() {
        let tiers = PricingTiers::default();

        assert_eq!(tiers.select(1.0).name, "minimal");
        assert_eq!(tiers.select(4.9).name, "minimal");
        assert_eq!(tiers.select(4.95).name, "minimal");
        assert_eq!(tiers.select(4.999_999).name, "minimal");
        assert_eq!(tiers.select(5.0).name, "intermediate");
        assert_eq!(tiers.select(5.9).name, "intermediate");
        assert_eq!(tiers.select(5.95).name, "intermediate");
        assert_eq!(tiers.select(6.0).name, "long");
        assert_eq!(tiers.select(8.49).name, "long");
        assert_eq!(tiers.select(8.5).name, "extra-long");
        assert_eq!(tiers.select(1_000.0).name, "extra-long");
    }

    #[test]
    fn test_select_clamps_below_minimum() {
        let tiers = PricingTiers::default();
        assert_eq!(tiers.billable_km(0.4), 1.0);
        assert_eq!(tiers.billable_km(0.0), 1.0);
        assert_eq!(tiers.billable_km(3.2), 3.2);
        assert_eq!(tiers.select(0.0).price, Money::new(5000));
    }

    #[test]
    fn test_only_open_tier() {
        let tiers = PricingTiers::new(1.0, vec![], open(4200)).unwrap();
        assert_eq!(tiers.select(0.2).price, Money::new(4200));
        assert_eq!(tiers.select(50.0).price, Money::new(4200));
    }

    #[test]
    fn test_rejects_unordered_bounds() {
        let result = PricingTiers::new(
            1.0,
            vec![tier("a", 5.0, 1), tier("b", 5.0, 2)],
            open(3),
        );
        assert_eq!(
            result,
            Err(PricingConfigError::UnorderedTierBound {
                tier: String::from("b"),
                bound: 5.0,
                previous: 5.0,
            })
        );

        assert!(PricingTiers::new(2.0, vec![tier("a", 1.5, 1)], open(3)).is_err());
        assert!(PricingTiers::new(1.0, vec![tier("a", f64::INFINITY, 1)], open(3)).is_err());
        assert!(PricingTiers::new(-1.0, vec![], open(3)).is_err());
    }

    #[test]
    fn test_json_roundtrip_validates() {
        let json = r#"{
            "bounded": [
                { "name": "short", "upper_bound_km": 3.0, "price": 4000 },
                { "name": "medium", "upper_bound_km": 10.0, "price": 9000 }
            ],
            "open_ended": { "name": "far", "price": 15000 }
        }"#;

        let tiers: PricingTiers = serde_json::from_str(json).unwrap();
        assert_eq!(tiers.minimum_billable_km(), 1.0);
        assert_eq!(tiers.select(2.0).price, Money::new(4000));
        assert_eq!(tiers.select(3.0).price, Money::new(9000));
        assert_eq!(tiers.select(12.0).price, Money::new(15000));

        let invalid = r#"{
            "bounded": [
                { "name": "short", "upper_bound_km": 10.0, "price": 4000 },
                { "name": "medium", "upper_bound_km": 3.0, "price": 9000 }
            ],
            "open_ended": { "name": "far", "price": 15000 }
        }"#;
        assert!(serde_json::from_str::<PricingTiers>(invalid).is_err());
    }
}
