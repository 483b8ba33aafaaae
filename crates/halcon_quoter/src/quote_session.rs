use halcon_fare::{
    coordinate::Coordinate,
    fare_engine::FareEngine,
    fare_quote::FareQuote,
    route_metrics::RouteMetrics,
    surcharge::{Surcharge, SurchargeFlags},
};
use halcon_providers::{geocoding_provider::GeocodingProvider, routing_provider::RoutingProvider};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    error::{EndpointRole, QuoteError},
    summary::QuoteSummary,
};

pub const DEFAULT_PICK_LABEL: &str = "Map location";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Endpoint {
    pub label: String,
    pub coordinate: Coordinate,
}

/// Interactive quoting state: two endpoints, the surcharge flags, and the
/// route and quote derived from them.
///
/// A stored quote is always the one computed from the stored route and the
/// current flags. Changing an endpoint drops both before routing, so a
/// failed route never leaves a stale fare behind.
pub struct QuoteSession<G, R> {
    geocoder: G,
    router: R,
    engine: FareEngine,
    pick_label: String,
    origin: Option<Endpoint>,
    destination: Option<Endpoint>,
    flags: SurchargeFlags,
    route: Option<RouteMetrics>,
    quote: Option<FareQuote>,
}

impl<G, R> QuoteSession<G, R>
where
    G: GeocodingProvider,
    R: RoutingProvider,
{
    pub fn new(geocoder: G, router: R, engine: FareEngine) -> Self {
        QuoteSession {
            geocoder,
            router,
            engine,
            pick_label: DEFAULT_PICK_LABEL.to_string(),
            origin: None,
            destination: None,
            flags: SurchargeFlags::none(),
            route: None,
            quote: None,
        }
    }

    /// Label used for picked points the geocoder cannot name.
    pub fn with_pick_label(mut self, label: &str) -> Self {
        self.pick_label = label.to_string();
        self
    }

    pub fn with_flags(mut self, flags: SurchargeFlags) -> Self {
        self.flags = flags;
        self.recompute();
        self
    }

    pub fn engine(&self) -> &FareEngine {
        &self.engine
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn origin(&self) -> Option<&Endpoint> {
        self.origin.as_ref()
    }

    pub fn destination(&self) -> Option<&Endpoint> {
        self.destination.as_ref()
    }

    pub fn flags(&self) -> SurchargeFlags {
        self.flags
    }

    pub fn route(&self) -> Option<&RouteMetrics> {
        self.route.as_ref()
    }

    pub fn quote(&self) -> Option<&FareQuote> {
        self.quote.as_ref()
    }

    pub fn summary(&self) -> Option<QuoteSummary> {
        match (&self.origin, &self.destination, &self.quote) {
            (Some(origin), Some(destination), Some(quote)) => Some(QuoteSummary::new(
                &origin.label,
                &destination.label,
                quote.clone(),
            )),
            _ => None,
        }
    }

    /// Geocodes both addresses, first candidate wins, then routes once.
    /// The session is left untouched when either address fails to resolve.
    pub async fn resolve_addresses(
        &mut self,
        origin_text: &str,
        destination_text: &str,
    ) -> Result<&FareQuote, QuoteError> {
        let origin_text = non_empty(origin_text, EndpointRole::Origin)?;
        let destination_text = non_empty(destination_text, EndpointRole::Destination)?;

        let origin = self.geocode(origin_text, EndpointRole::Origin).await?;
        let destination = self.geocode(destination_text, EndpointRole::Destination).await?;

        self.origin = Some(origin);
        self.destination = Some(destination);

        self.reroute()
            .await?
            .ok_or(QuoteError::MissingAddress(EndpointRole::Destination))
    }

    pub async fn set_origin_address(
        &mut self,
        text: &str,
    ) -> Result<Option<&FareQuote>, QuoteError> {
        let text = non_empty(text, EndpointRole::Origin)?;
        let endpoint = self.geocode(text, EndpointRole::Origin).await?;
        self.origin = Some(endpoint);
        self.reroute().await
    }

    pub async fn set_destination_address(
        &mut self,
        text: &str,
    ) -> Result<Option<&FareQuote>, QuoteError> {
        let text = non_empty(text, EndpointRole::Destination)?;
        let endpoint = self.geocode(text, EndpointRole::Destination).await?;
        self.destination = Some(endpoint);
        self.reroute().await
    }

    /// Sets the origin to a point picked on a map or read from GPS.
    pub async fn pick_origin(
        &mut self,
        coordinate: Coordinate,
    ) -> Result<Option<&FareQuote>, QuoteError> {
        let endpoint = self.name_point(coordinate).await;
        self.origin = Some(endpoint);
        self.reroute().await
    }

    pub async fn pick_destination(
        &mut self,
        coordinate: Coordinate,
    ) -> Result<Option<&FareQuote>, QuoteError> {
        let endpoint = self.name_point(coordinate).await;
        self.destination = Some(endpoint);
        self.reroute().await
    }

    /// Recomputes the fare from the stored route. Never calls the router.
    pub fn set_surcharge(&mut self, surcharge: Surcharge, enabled: bool) -> Option<&FareQuote> {
        self.flags.set(surcharge, enabled);
        self.recompute();
        self.quote.as_ref()
    }

    pub fn toggle_surcharge(&mut self, surcharge: Surcharge) -> Option<&FareQuote> {
        let enabled = self.flags.toggle(surcharge);
        debug!("Surcharge {} is now {}", surcharge, if enabled { "on" } else { "off" });
        self.recompute();
        self.quote.as_ref()
    }

    pub fn set_flags(&mut self, flags: SurchargeFlags) -> Option<&FareQuote> {
        self.flags = flags;
        self.recompute();
        self.quote.as_ref()
    }

    async fn geocode(&self, text: &str, role: EndpointRole) -> Result<Endpoint, QuoteError> {
        let candidates = self
            .geocoder
            .search(text)
            .await
            .map_err(QuoteError::from_geocoding)?;

        let Some(candidate) = candidates.into_iter().next() else {
            info!("No match for {} \"{}\"", role, text);
            return Err(QuoteError::NoMatch {
                role,
                query: text.to_string(),
            });
        };

        debug!("{} \"{}\" resolved to {} ({})", role, text, candidate.coordinate, candidate.label);

        Ok(Endpoint {
            label: text.to_string(),
            coordinate: candidate.coordinate,
        })
    }

    async fn name_point(&self, coordinate: Coordinate) -> Endpoint {
        let label = match self.geocoder.reverse(coordinate).await {
            Ok(reverse) if reverse.matched => reverse.label,
            Ok(_) => self.pick_label.clone(),
            Err(error) => {
                warn!("Reverse lookup of {} failed: {}", coordinate, error);
                self.pick_label.clone()
            }
        };

        Endpoint { label, coordinate }
    }

    async fn reroute(&mut self) -> Result<Option<&FareQuote>, QuoteError> {
        self.route = None;
        self.quote = None;

        let (Some(origin), Some(destination)) = (&self.origin, &self.destination) else {
            return Ok(None);
        };
        let (origin, destination) = (origin.coordinate, destination.coordinate);

        let route = self
            .router
            .route(origin, destination)
            .await
            .map_err(QuoteError::from_routing)?;

        info!(
            "Routed {} -> {}: {:.2} km, {}",
            origin,
            destination,
            route.distance().km(),
            route.duration()
        );

        self.route = Some(route);
        self.recompute();
        Ok(self.quote.as_ref())
    }

    fn recompute(&mut self) {
        self.quote = self
            .route
            .as_ref()
            .map(|route| self.engine.quote_route(route, &self.flags));
    }
}

fn non_empty(text: &str, role: EndpointRole) -> Result<&str, QuoteError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(QuoteError::MissingAddress(role));
    }
    Ok(text)
}
