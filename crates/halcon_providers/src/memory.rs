//! Deterministic providers backed by in-memory tables, used by tests and
//! offline runs.

use std::sync::atomic::{AtomicUsize, Ordering};

use geo::{Distance, Haversine};
use halcon_fare::{
    coordinate::Coordinate, kmh::Kmh, meters::Meters, route_metrics::RouteMetrics,
};
use tracing::debug;

use crate::{
    error::ProviderError,
    geocoding_provider::{GeocodeCandidate, GeocodingProvider, ReverseGeocode},
    routing_provider::RoutingProvider,
};

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

fn haversine(from: &Coordinate, to: &Coordinate) -> Meters {
    let haversine = Haversine;
    Meters::new(haversine.distance(geo::Point::from(from), geo::Point::from(to)))
}

struct KnownPlace {
    key: String,
    candidate: GeocodeCandidate,
}

pub struct InMemoryGeocoder {
    places: Vec<KnownPlace>,
    reverse_radius: Meters,
    fallback_label: String,
}

impl Default for InMemoryGeocoder {
    fn default() -> Self {
        Self {
            places: vec![],
            reverse_radius: Meters::new(250.0),
            fallback_label: String::from("Map location"),
        }
    }
}

impl InMemoryGeocoder {
    /// Registers `coordinate` as a candidate for `address`, matched case
    /// insensitively. Registering an address twice adds a second candidate.
    pub fn with_place(mut self, address: &str, label: &str, coordinate: Coordinate) -> Self {
        self.places.push(KnownPlace {
            key: normalize(address),
            candidate: GeocodeCandidate {
                coordinate,
                label: label.to_string(),
            },
        });
        self
    }

    pub fn with_reverse_radius(mut self, radius: Meters) -> Self {
        self.reverse_radius = radius;
        self
    }

    pub fn with_fallback_label(mut self, label: &str) -> Self {
        self.fallback_label = label.to_string();
        self
    }
}

impl GeocodingProvider for InMemoryGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeCandidate>, ProviderError> {
        let key = normalize(query);
        Ok(self
            .places
            .iter()
            .filter(|place| place.key == key)
            .map(|place| place.candidate.clone())
            .collect())
    }

    async fn reverse(&self, coordinate: Coordinate) -> Result<ReverseGeocode, ProviderError> {
        let nearest = self
            .places
            .iter()
            .map(|place| (haversine(&coordinate, &place.candidate.coordinate), place))
            .filter(|(distance, _)| *distance <= self.reverse_radius)
            .min_by_key(|(distance, _)| *distance);

        Ok(match nearest {
            Some((_, place)) => ReverseGeocode {
                label: place.candidate.label.clone(),
                matched: true,
            },
            None => ReverseGeocode {
                label: self.fallback_label.clone(),
                matched: false,
            },
        })
    }
}

/// Straight-line estimate for pairs without a registered route.
#[derive(Debug, Clone, Copy)]
pub struct CrowFliesEstimate {
    pub detour_factor: f64,
    pub speed: Kmh,
}

struct KnownRoute {
    origin: Coordinate,
    destination: Coordinate,
    metrics: RouteMetrics,
}

#[derive(Default)]
pub struct InMemoryRouter {
    routes: Vec<KnownRoute>,
    estimate: Option<CrowFliesEstimate>,
    calls: AtomicUsize,
}

impl InMemoryRouter {
    pub fn with_route(
        mut self,
        origin: Coordinate,
        destination: Coordinate,
        metrics: RouteMetrics,
    ) -> Self {
        self.routes.push(KnownRoute {
            origin,
            destination,
            metrics,
        });
        self
    }

    pub fn with_estimate(mut self, estimate: CrowFliesEstimate) -> Self {
        self.estimate = Some(estimate);
        self
    }

    /// Number of `route` calls so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn estimate_route(
        &self,
        estimate: &CrowFliesEstimate,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteMetrics, ProviderError> {
        let distance = Meters::new(haversine(&origin, &destination).value() * estimate.detour_factor);
        Ok(RouteMetrics::new(
            distance.value(),
            distance.travel_seconds(estimate.speed),
            vec![origin, destination],
        )?)
    }
}

impl RoutingProvider for InMemoryRouter {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteMetrics, ProviderError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        if let Some(known) = self
            .routes
            .iter()
            .find(|route| route.origin == origin && route.destination == destination)
        {
            return Ok(known.metrics.clone());
        }

        match &self.estimate {
            Some(estimate) => {
                debug!("InMemoryRouter: estimating {} -> {}", origin, destination);
                self.estimate_route(estimate, origin, destination)
            }
            None => Err(ProviderError::NoRoute {
                origin,
                destination,
            }),
        }
    }
}
