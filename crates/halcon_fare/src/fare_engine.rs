use crate::{
    eta::{EtaModel, EtaRange, compute_eta_band, compute_eta_range},
    fare_quote::{FareQuote, round_display_km},
    money::Money,
    pricing_config::PricingConfig,
    pricing_tiers::PricingTiers,
    route_metrics::RouteMetrics,
    surcharge::{SurchargeConfig, SurchargeFlags},
};

/// Price of the tier selected by `max(distance_km, minimum_billable_km)`.
///
/// `distance_km` must be finite and non-negative, which the routing boundary
/// ([`RouteMetrics::new`]) guarantees.
pub fn compute_base_fare(distance_km: f64, tiers: &PricingTiers) -> Money {
    debug_assert!(distance_km.is_finite() && distance_km >= 0.0);
    tiers.select(distance_km).price
}

pub fn compute_surcharge_total(flags: &SurchargeFlags, config: &SurchargeConfig) -> Money {
    flags.iter_set().map(|surcharge| config.amount(surcharge)).sum()
}

/// Fare breakdown without a time estimate.
pub fn compute_quote(distance_km: f64, flags: &SurchargeFlags, config: &PricingConfig) -> FareQuote {
    debug_assert!(distance_km.is_finite() && distance_km >= 0.0);
    let tier = config.tiers.select(distance_km);
    let base_fare = tier.price;
    let surcharge_total = compute_surcharge_total(flags, &config.surcharges);

    FareQuote {
        tier: tier.name.to_string(),
        base_fare,
        surcharge_total,
        total_fare: base_fare + surcharge_total,
        distance_km: round_display_km(distance_km),
        eta: None,
    }
}

pub fn compute_route_eta(route: &RouteMetrics, model: &EtaModel) -> EtaRange {
    match model {
        EtaModel::Provider => compute_eta_range(route.duration().as_secs_f64()),
        EtaModel::VelocityBand(band) => compute_eta_band(route.distance(), band),
    }
}

/// Full quote where distance and duration come from the same routing response.
pub fn quote_route(route: &RouteMetrics, flags: &SurchargeFlags, config: &PricingConfig) -> FareQuote {
    FareQuote {
        eta: Some(compute_route_eta(route, &config.eta)),
        ..compute_quote(route.distance().km(), flags, config)
    }
}

/// Holds the injected pricing configuration for callers that quote many times.
#[derive(Debug, Clone, Default)]
pub struct FareEngine {
    config: PricingConfig,
}

impl FareEngine {
    pub fn new(config: PricingConfig) -> Self {
        FareEngine { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn base_fare(&self, distance_km: f64) -> Money {
        compute_base_fare(distance_km, &self.config.tiers)
    }

    pub fn surcharge_total(&self, flags: &SurchargeFlags) -> Money {
        compute_surcharge_total(flags, &self.config.surcharges)
    }

    pub fn quote(&self, distance_km: f64, flags: &SurchargeFlags) -> FareQuote {
        compute_quote(distance_km, flags, &self.config)
    }

    pub fn quote_route(&self, route: &RouteMetrics, flags: &SurchargeFlags) -> FareQuote {
        quote_route(route, flags, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        eta::VelocityBand,
        pricing_tiers::{OpenEndedTier, PricingTier},
        surcharge::Surcharge,
    };

    use super::*;

    fn default_config() -> PricingConfig {
        PricingConfig::default()
    }

    #[test]
    fn test_scenario_short_no_surcharges() {
        let quote = compute_quote(3.2, &SurchargeFlags::none(), &default_config());
        assert_eq!(quote.base_fare, Money::new(5000));
        assert_eq!(quote.surcharge_total, Money::ZERO);
        assert_eq!(quote.total_fare, Money::new(5000));
        assert_eq!(quote.tier, "minimal");
    }

    #[test]
    fn test_scenario_intermediate_night_rain() {
        let flags = SurchargeFlags::none()
            .with(Surcharge::AfterNine)
            .with(Surcharge::Rain);
        let quote = compute_quote(5.5, &flags, &default_config());
        assert_eq!(quote.base_fare, Money::new(6000));
        assert_eq!(quote.total_fare, Money::new(9000));
    }

    #[test]
    fn test_scenario_below_minimum_distance() {
        let quote = compute_quote(0.4, &SurchargeFlags::none(), &default_config());
        assert_eq!(quote.base_fare, Money::new(5000));
        assert_eq!(quote.total_fare, Money::new(5000));
        assert_eq!(quote.distance_km, 0.4);
    }

    #[test]
    fn test_scenario_extra_long_all_surcharges() {
        let quote = compute_quote(10.0, &SurchargeFlags::all(), &default_config());
        assert_eq!(quote.base_fare, Money::new(8000));
        assert_eq!(quote.total_fare, Money::new(14000));
    }

    #[test]
    fn test_floor_for_any_distance_up_to_one_km() {
        let tiers = PricingTiers::default();
        for distance_km in [0.0, 0.001, 0.25, 0.5, 0.999, 1.0] {
            assert_eq!(compute_base_fare(distance_km, &tiers), Money::new(5000));
        }
    }

    #[test]
    fn test_same_point_trip_bills_minimal_tier() {
        let route = RouteMetrics::new(0.0, 0.0, vec![]).unwrap();
        let quote = quote_route(&route, &SurchargeFlags::none(), &default_config());
        assert_eq!(quote.tier, "minimal");
        assert_eq!(quote.total_fare, Money::new(5000));
        assert_eq!(quote.eta, Some(EtaRange::point(0)));
    }

    #[test]
    fn test_unbounded_upper_tier() {
        let tiers = PricingTiers::default();
        for distance_km in [8.500_001, 9.0, 25.0, 400.0, 1e9] {
            assert_eq!(compute_base_fare(distance_km, &tiers), Money::new(8000));
        }
    }

    #[test]
    fn test_boundary_at_five_km() {
        let tiers = PricingTiers::default();
        assert_eq!(compute_base_fare(4.99, &tiers), Money::new(5000));
        assert_eq!(compute_base_fare(5.0, &tiers), Money::new(6000));
        assert_eq!(compute_base_fare(5.01, &tiers), Money::new(6000));
    }

    #[test]
    fn test_tier_uses_unrounded_distance() {
        // 4.996 km would display as 5.0 but still bills the minimal tier
        let quote = compute_quote(4.996, &SurchargeFlags::none(), &default_config());
        assert_eq!(quote.distance_km, 5.0);
        assert_eq!(quote.base_fare, Money::new(5000));
    }

    #[test]
    fn test_quote_is_idempotent() {
        let config = default_config();
        let flags = SurchargeFlags::none().with(Surcharge::ComplexNeighborhood);
        assert_eq!(
            compute_quote(7.3, &flags, &config),
            compute_quote(7.3, &flags, &config)
        );
    }

    #[test]
    fn test_toggling_changes_total_by_surcharge_amount() {
        let config = default_config();
        for distance_km in [0.3, 4.2, 5.5, 6.0, 12.0] {
            for surcharge in Surcharge::ALL {
                let mut flags = SurchargeFlags::none().with(Surcharge::Rain);
                let before = compute_quote(distance_km, &flags, &config);
                let enabled = flags.toggle(surcharge);
                let after = compute_quote(distance_km, &flags, &config);

                let amount = config.surcharges.amount(surcharge).value() as i64;
                let delta = after.total_fare.value() as i64 - before.total_fare.value() as i64;

                assert_eq!(after.base_fare, before.base_fare);
                assert_eq!(delta, if enabled { amount } else { -amount });
            }
        }
    }

    #[test]
    fn test_all_surcharges_sum() {
        let config = default_config();
        let quote = compute_quote(6.2, &SurchargeFlags::all(), &config);
        assert_eq!(
            quote.total_fare,
            quote.base_fare
                + config.surcharges.after_nine
                + config.surcharges.rain
                + config.surcharges.complex_neighborhood
        );
        assert_eq!(quote.total_fare, quote.base_fare + quote.surcharge_total);
    }

    #[test]
    fn test_surcharge_total_none() {
        assert_eq!(
            compute_surcharge_total(&SurchargeFlags::none(), &SurchargeConfig::default()),
            Money::ZERO
        );
    }

    #[test]
    fn test_custom_table() {
        let tiers = PricingTiers::new(
            2.0,
            vec![PricingTier {
                name: String::from("city"),
                upper_bound_km: 10.0,
                price: Money::new(12_000),
            }],
            OpenEndedTier {
                name: String::from("intercity"),
                price: Money::new(30_000),
            },
        )
        .unwrap();
        let config = PricingConfig::new(
            tiers,
            SurchargeConfig {
                after_nine: Money::new(500),
                rain: Money::new(700),
                complex_neighborhood: Money::new(900),
            },
            EtaModel::Provider,
        )
        .unwrap();

        let engine = FareEngine::new(config);
        assert_eq!(engine.base_fare(0.5), Money::new(12_000));
        assert_eq!(engine.base_fare(10.0), Money::new(30_000));
        assert_eq!(
            engine.quote(3.0, &SurchargeFlags::all()).total_fare,
            Money::new(14_100)
        );
    }

    #[test]
    fn test_quote_route_provider_eta() {
        let route = RouteMetrics::new(3210.0, 545.0, vec![]).unwrap();
        let quote = FareEngine::default().quote_route(&route, &SurchargeFlags::none());

        assert_eq!(quote.distance_km, 3.21);
        assert_eq!(quote.base_fare, Money::new(5000));
        assert_eq!(quote.eta, Some(EtaRange::point(9)));
    }

    #[test]
    fn test_quote_route_velocity_band_eta() {
        let config = default_config()
            .with_eta(EtaModel::VelocityBand(VelocityBand::urban()))
            .unwrap();
        let route = RouteMetrics::new(10_000.0, 900.0, vec![]).unwrap();
        let quote = quote_route(&route, &SurchargeFlags::all(), &config);

        assert_eq!(quote.total_fare, Money::new(14_000));
        assert_eq!(quote.eta, Some(EtaRange::new(16, 26)));
    }

    #[test]
    fn test_quote_route_huge_distance() {
        let config = default_config()
            .with_eta(EtaModel::VelocityBand(VelocityBand::urban()))
            .unwrap();
        let route = RouteMetrics::new(1e20, 10.0, vec![]).unwrap();
        let quote = FareEngine::new(config).quote_route(&route, &SurchargeFlags::none());

        assert_eq!(quote.tier, "extra-long");
        assert_eq!(quote.eta, Some(EtaRange::point(u32::MAX)));
    }
}
