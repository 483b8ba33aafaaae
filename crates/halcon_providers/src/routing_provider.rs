use std::future::Future;

use halcon_fare::{coordinate::Coordinate, route_metrics::RouteMetrics};

use crate::error::ProviderError;

pub trait RoutingProvider: Send + Sync {
    /// Driving route from `origin` to `destination`. Distance, duration and
    /// polyline all come from one response.
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> impl Future<Output = Result<RouteMetrics, ProviderError>> + Send;
}
