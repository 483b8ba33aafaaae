use std::fmt::Display;

use halcon_providers::error::ProviderError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointRole {
    Origin,
    Destination,
}

impl Display for EndpointRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointRole::Origin => write!(f, "origin"),
            EndpointRole::Destination => write!(f, "destination"),
        }
    }
}

/// How a failure should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The user can fix the input and try again.
    NoMatch,
    /// A provider could not be reached or failed. Try again later.
    ProviderUnavailable,
    /// Setup problem. Retrying will not help.
    Misconfiguration,
}

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("The {0} address is empty")]
    MissingAddress(EndpointRole),

    #[error("No address matched the {role} \"{query}\"")]
    NoMatch { role: EndpointRole, query: String },

    #[error("No route found between the origin and the destination")]
    NoRoute(#[source] ProviderError),

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(#[source] ProviderError),

    #[error("Provider misconfigured: {0}")]
    Misconfiguration(#[source] ProviderError),
}

impl QuoteError {
    pub(crate) fn from_geocoding(error: ProviderError) -> Self {
        if error.is_misconfiguration() {
            QuoteError::Misconfiguration(error)
        } else {
            QuoteError::ProviderUnavailable(error)
        }
    }

    /// ORS answers 404 when a point has no road nearby.
    pub(crate) fn from_routing(error: ProviderError) -> Self {
        match error {
            ProviderError::NoRoute { .. } | ProviderError::Api { status: 404, .. } => {
                QuoteError::NoRoute(error)
            }
            error if error.is_misconfiguration() => QuoteError::Misconfiguration(error),
            error => QuoteError::ProviderUnavailable(error),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            QuoteError::MissingAddress(_) | QuoteError::NoMatch { .. } | QuoteError::NoRoute(_) => {
                FailureKind::NoMatch
            }
            QuoteError::ProviderUnavailable(_) => FailureKind::ProviderUnavailable,
            QuoteError::Misconfiguration(_) => FailureKind::Misconfiguration,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.kind() == FailureKind::Misconfiguration
    }

    /// Message meant for the person asking for a quote, without provider
    /// details.
    pub fn user_message(&self) -> String {
        match self {
            QuoteError::MissingAddress(_) => {
                String::from("Please write both the origin and the destination.")
            }
            QuoteError::NoMatch { role, query } => {
                format!("We could not find the {role} \"{query}\". Check the address and try again.")
            }
            QuoteError::NoRoute(_) => String::from(
                "We could not find a route between these points. Try a nearby street.",
            ),
            QuoteError::ProviderUnavailable(_) => String::from(
                "The map service is not responding right now. Please try again later.",
            ),
            QuoteError::Misconfiguration(_) => String::from(
                "Quoting is not available because the service is not configured.",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use halcon_fare::coordinate::Coordinate;

    use super::*;

    fn api_error(status: u16) -> ProviderError {
        ProviderError::Api {
            status,
            message: String::from("error"),
        }
    }

    #[test]
    fn test_routing_classification() {
        assert_eq!(
            QuoteError::from_routing(api_error(503)).kind(),
            FailureKind::ProviderUnavailable
        );
        assert_eq!(
            QuoteError::from_routing(api_error(403)).kind(),
            FailureKind::Misconfiguration
        );
        assert_eq!(QuoteError::from_routing(api_error(404)).kind(), FailureKind::NoMatch);

        let origin = Coordinate::new(4.6, -74.08).unwrap();
        let no_route = QuoteError::from_routing(ProviderError::NoRoute {
            origin,
            destination: origin,
        });
        assert!(matches!(no_route, QuoteError::NoRoute(_)));
        assert!(!no_route.is_fatal());
    }

    #[test]
    fn test_geocoding_classification() {
        assert!(matches!(
            QuoteError::from_geocoding(api_error(500)),
            QuoteError::ProviderUnavailable(_)
        ));
        assert!(
            QuoteError::from_geocoding(ProviderError::MissingConfiguration(String::from("key")))
                .is_fatal()
        );
    }

    #[test]
    fn test_user_message_hides_provider_details() {
        let error = QuoteError::ProviderUnavailable(api_error(502));
        assert!(!error.user_message().contains("502"));

        let error = QuoteError::NoMatch {
            role: EndpointRole::Destination,
            query: String::from("Calle 1000"),
        };
        assert_eq!(
            error.user_message(),
            "We could not find the destination \"Calle 1000\". Check the address and try again."
        );
    }
}
