use halcon_fare::{
    coordinate::{Coordinate, CoordinateError},
    route_metrics::RouteMetricsError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Incomplete response: {0}")]
    IncompleteResponse(&'static str),

    #[error("Invalid number in response: {0}")]
    InvalidNumber(String),

    #[error("Invalid coordinate in response: {0}")]
    InvalidCoordinate(#[from] CoordinateError),

    #[error("Invalid route in response: {0}")]
    InvalidRoute(#[from] RouteMetricsError),

    #[error("No route from {origin} to {destination}")]
    NoRoute {
        origin: Coordinate,
        destination: Coordinate,
    },

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl ProviderError {
    /// Errors that no retry will fix without changing the setup.
    pub fn is_misconfiguration(&self) -> bool {
        matches!(
            self,
            ProviderError::MissingConfiguration(_)
                | ProviderError::InvalidConfiguration(_)
                | ProviderError::Api {
                    status: 401 | 403,
                    ..
                }
        )
    }
}
