use std::{fmt::Display, str::FromStr, time::Duration};

use halcon_fare::{coordinate::Coordinate, route_metrics::RouteMetrics};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::{error::ProviderError, routing_provider::RoutingProvider};

pub const OPENROUTESERVICE_API_URL: &str = "https://api.openrouteservice.org";

/// ORS points are `[lon, lat]`
pub type OrsPoint = [f64; 2];

#[derive(Debug, Deserialize, Serialize, JsonSchema, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum OrsProfile {
    #[default]
    DrivingCar,
    DrivingHgv,
    CyclingRegular,
    CyclingElectric,
    FootWalking,
}

impl Display for OrsProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                OrsProfile::DrivingCar => "driving-car",
                OrsProfile::DrivingHgv => "driving-hgv",
                OrsProfile::CyclingRegular => "cycling-regular",
                OrsProfile::CyclingElectric => "cycling-electric",
                OrsProfile::FootWalking => "foot-walking",
            }
        )
    }
}

impl FromStr for OrsProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driving-car" => Ok(OrsProfile::DrivingCar),
            "driving-hgv" => Ok(OrsProfile::DrivingHgv),
            "cycling-regular" => Ok(OrsProfile::CyclingRegular),
            "cycling-electric" => Ok(OrsProfile::CyclingElectric),
            "foot-walking" => Ok(OrsProfile::FootWalking),
            other => Err(format!("Unknown openrouteservice profile: {other}")),
        }
    }
}

#[derive(Debug, Serialize)]
struct DirectionsRequestBody {
    coordinates: [OrsPoint; 2],
}

#[derive(Deserialize)]
struct DirectionsCollection {
    features: Vec<DirectionsFeature>,
}

#[derive(Deserialize)]
struct DirectionsFeature {
    properties: DirectionsProperties,
    geometry: Option<LineGeometry>,
}

#[derive(Deserialize)]
struct DirectionsProperties {
    summary: Option<DirectionsSummary>,
}

/// ORS leaves out zero values, e.g. for a route that starts where it ends.
#[derive(Deserialize, Default)]
#[serde(default)]
struct DirectionsSummary {
    /// Meters
    distance: f64,
    /// Seconds
    duration: f64,
}

#[derive(Deserialize)]
struct LineGeometry {
    coordinates: Vec<OrsPoint>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OrsErrorBody {
    Detailed { error: OrsErrorDetail },
    Plain { error: String },
}

#[derive(Deserialize)]
struct OrsErrorDetail {
    code: Option<u32>,
    message: String,
}

pub struct OpenRouteServiceClientParams {
    pub api_key: String,
    pub base_url: String,
    pub profile: OrsProfile,
    pub timeout: Duration,
}

pub struct OpenRouteServiceClient {
    params: OpenRouteServiceClientParams,
    client: reqwest::Client,
}

impl OpenRouteServiceClient {
    pub fn new(params: OpenRouteServiceClientParams) -> Result<Self, ProviderError> {
        if params.api_key.trim().is_empty() {
            return Err(ProviderError::MissingConfiguration(String::from(
                "openrouteservice API key is empty",
            )));
        }

        let client = reqwest::Client::builder().timeout(params.timeout).build()?;

        Ok(Self { params, client })
    }

    pub fn profile(&self) -> OrsProfile {
        self.params.profile
    }
}

impl RoutingProvider for OpenRouteServiceClient {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteMetrics, ProviderError> {
        if origin == destination {
            debug!("OpenRouteService: origin and destination are identical, returning zero route");
            return Ok(RouteMetrics::new(0.0, 0.0, vec![origin])?);
        }

        let url = format!(
            "{}/v2/directions/{}/geojson",
            self.params.base_url.trim_end_matches('/'),
            self.params.profile
        );
        let body = DirectionsRequestBody {
            coordinates: [to_ors_point(&origin), to_ors_point(&destination)],
        };

        debug!("OpenRouteService: routing {} -> {}", origin, destination);

        let response = self
            .client
            .post(&url)
            .header("Authorization", &self.params.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let error = parse_error_response(status.as_u16(), &text);
            error!("OpenRouteService: {} for {:?}", error, body);
            return Err(error);
        }

        parse_directions_response(&text)
    }
}

fn to_ors_point(coordinate: &Coordinate) -> OrsPoint {
    [coordinate.lon(), coordinate.lat()]
}

pub fn parse_directions_response(text: &str) -> Result<RouteMetrics, ProviderError> {
    let collection: DirectionsCollection = serde_json::from_str(text)?;
    let feature = collection
        .features
        .into_iter()
        .next()
        .ok_or(ProviderError::IncompleteResponse("no route feature"))?;

    let summary = feature
        .properties
        .summary
        .ok_or(ProviderError::IncompleteResponse("no route summary"))?;

    let polyline = feature
        .geometry
        .map(|geometry| geometry.coordinates)
        .unwrap_or_default()
        .into_iter()
        .map(|[lon, lat]| Coordinate::new(lat, lon))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RouteMetrics::new(
        summary.distance,
        summary.duration,
        polyline,
    )?)
}

pub fn parse_error_response(status: u16, text: &str) -> ProviderError {
    let message = match serde_json::from_str::<OrsErrorBody>(text) {
        Ok(OrsErrorBody::Detailed { error }) => match error.code {
            Some(code) => format!("({}) {}", code, error.message),
            None => error.message,
        },
        Ok(OrsErrorBody::Plain { error }) => error,
        Err(_) => text.to_string(),
    };

    ProviderError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use halcon_fare::meters::Meters;

    use super::*;

    #[test]
    fn test_parse_directions_response() {
        let text = r#"{
            "type": "FeatureCollection",
            "bbox": [-74.08, 4.60, -74.06, 4.63],
            "features": [{
                "bbox": [-74.08, 4.60, -74.06, 4.63],
                "type": "Feature",
                "properties": {
                    "segments": [],
                    "summary": { "distance": 3245.7, "duration": 512.3 },
                    "way_points": [0, 2]
                },
                "geometry": {
                    "coordinates": [[-74.08, 4.60], [-74.07, 4.615], [-74.06, 4.63]],
                    "type": "LineString"
                }
            }]
        }"#;

        let route = parse_directions_response(text).unwrap();
        assert_eq!(route.distance(), Meters::new(3245.7));
        assert!((route.duration().as_secs_f64() - 512.3).abs() < 1e-6);
        assert_eq!(route.polyline().len(), 3);
        assert_eq!(route.polyline()[0], Coordinate::new(4.60, -74.08).unwrap());
        assert_eq!(route.polyline()[2], Coordinate::new(4.63, -74.06).unwrap());
    }

    #[test]
    fn test_parse_empty_summary_is_zero_route() {
        let text = r#"{
            "features": [{
                "properties": { "summary": {} },
                "geometry": { "coordinates": [] }
            }]
        }"#;

        let route = parse_directions_response(text).unwrap();
        assert!(route.distance().is_zero());
        assert!(route.polyline().is_empty());
    }

    #[test]
    fn test_parse_missing_feature() {
        assert!(matches!(
            parse_directions_response(r#"{ "features": [] }"#),
            Err(ProviderError::IncompleteResponse(_))
        ));
        assert!(matches!(
            parse_directions_response(r#"{ "features": [{ "properties": {} }] }"#),
            Err(ProviderError::IncompleteResponse(_))
        ));
    }

    #[test]
    fn test_parse_negative_distance_is_rejected() {
        let text = r#"{ "features": [{ "properties": { "summary": { "distance": -3.0, "duration": 4.0 } } }] }"#;
        assert!(matches!(
            parse_directions_response(text),
            Err(ProviderError::InvalidRoute(_))
        ));
    }

    #[test]
    fn test_parse_error_response() {
        let detailed = parse_error_response(
            404,
            r#"{"error":{"code":2010,"message":"Could not find routable point within a radius of 350.0 meters"}}"#,
        );
        match detailed {
            ProviderError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(
                    message,
                    "(2010) Could not find routable point within a radius of 350.0 meters"
                );
            }
            other => panic!("unexpected error {other:?}"),
        }

        let plain = parse_error_response(403, r#"{"error":"Access to this API has been disallowed"}"#);
        assert!(plain.is_misconfiguration());

        let raw = parse_error_response(502, "Bad Gateway");
        assert!(matches!(raw, ProviderError::Api { status: 502, message } if message == "Bad Gateway"));
    }

    #[test]
    fn test_profile_roundtrip() {
        for profile in [
            OrsProfile::DrivingCar,
            OrsProfile::DrivingHgv,
            OrsProfile::CyclingRegular,
            OrsProfile::CyclingElectric,
            OrsProfile::FootWalking,
        ] {
            assert_eq!(profile.to_string().parse::<OrsProfile>().unwrap(), profile);
        }
        assert!("boat".parse::<OrsProfile>().is_err());
    }

    #[test]
    fn test_empty_api_key_is_misconfiguration() {
        let result = OpenRouteServiceClient::new(OpenRouteServiceClientParams {
            api_key: String::from("  "),
            base_url: OPENROUTESERVICE_API_URL.to_string(),
            profile: OrsProfile::DrivingCar,
            timeout: Duration::from_secs(5),
        });
        assert!(matches!(result, Err(ProviderError::MissingConfiguration(_))));
    }
}
