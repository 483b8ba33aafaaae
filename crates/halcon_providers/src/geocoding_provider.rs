use std::future::Future;

use halcon_fare::coordinate::Coordinate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeocodeCandidate {
    pub coordinate: Coordinate,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReverseGeocode {
    pub label: String,
    /// `false` when `label` is the generic fallback
    pub matched: bool,
}

pub trait GeocodingProvider: Send + Sync {
    /// Candidates for a free text address, best first. Empty when nothing
    /// matches.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<GeocodeCandidate>, ProviderError>> + Send;

    /// Nearest address label, or a fallback label when nothing lies within
    /// the provider's search radius.
    fn reverse(
        &self,
        coordinate: Coordinate,
    ) -> impl Future<Output = Result<ReverseGeocode, ProviderError>> + Send;
}
