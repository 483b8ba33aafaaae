use std::time::Duration;

use halcon_fare::coordinate::Coordinate;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::ProviderError,
    geocoding_provider::{GeocodeCandidate, GeocodingProvider, ReverseGeocode},
};

pub const NOMINATIM_API_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Deserialize)]
struct SearchPlace {
    lat: String,
    lon: String,
    display_name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ReverseResponse {
    Found { display_name: String },
    NotFound { error: String },
}

pub struct NominatimClientParams {
    pub base_url: String,
    /// Nominatim rejects requests without an identifying user agent
    pub user_agent: String,
    pub search_limit: u8,
    /// Detail level of reverse lookups, 18 is building level
    pub reverse_zoom: u8,
    pub country_codes: Option<String>,
    pub fallback_label: String,
    pub timeout: Duration,
}

impl Default for NominatimClientParams {
    fn default() -> Self {
        Self {
            base_url: NOMINATIM_API_URL.to_string(),
            user_agent: format!("halcon-cotizador/{}", env!("CARGO_PKG_VERSION")),
            search_limit: 5,
            reverse_zoom: 18,
            country_codes: None,
            fallback_label: String::from("Map location"),
            timeout: Duration::from_secs(15),
        }
    }
}

pub struct NominatimClient {
    params: NominatimClientParams,
    client: reqwest::Client,
}

impl NominatimClient {
    pub fn new(params: NominatimClientParams) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .user_agent(params.user_agent.clone())
            .timeout(params.timeout)
            .build()?;

        Ok(Self { params, client })
    }

    async fn get_text(&self, path: &str, query: &[(&str, String)]) -> Result<String, ProviderError> {
        let url = format!("{}{}", self.params.base_url.trim_end_matches('/'), path);
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        Ok(text)
    }
}

impl GeocodingProvider for NominatimClient {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeCandidate>, ProviderError> {
        debug!("Nominatim: searching \"{}\"", query);

        let mut params = vec![
            ("format", String::from("json")),
            ("q", query.to_string()),
            ("limit", self.params.search_limit.to_string()),
        ];
        if let Some(country_codes) = &self.params.country_codes {
            params.push(("countrycodes", country_codes.clone()));
        }

        let text = self.get_text("/search", &params).await?;
        parse_search_response(&text)
    }

    async fn reverse(&self, coordinate: Coordinate) -> Result<ReverseGeocode, ProviderError> {
        debug!("Nominatim: reverse lookup of {}", coordinate);

        let params = [
            ("format", String::from("json")),
            ("lat", coordinate.lat().to_string()),
            ("lon", coordinate.lon().to_string()),
            ("zoom", self.params.reverse_zoom.to_string()),
        ];

        let text = self.get_text("/reverse", &params).await?;
        parse_reverse_response(&text, &self.params.fallback_label)
    }
}

fn parse_number(value: &str) -> Result<f64, ProviderError> {
    value
        .trim()
        .parse()
        .map_err(|_| ProviderError::InvalidNumber(value.to_string()))
}

/// Nominatim sends latitude and longitude as strings.
pub fn parse_search_response(text: &str) -> Result<Vec<GeocodeCandidate>, ProviderError> {
    let places: Vec<SearchPlace> = serde_json::from_str(text)?;

    places
        .into_iter()
        .map(|place| {
            let coordinate = Coordinate::new(parse_number(&place.lat)?, parse_number(&place.lon)?)?;
            Ok(GeocodeCandidate {
                coordinate,
                label: place.display_name,
            })
        })
        .collect()
}

pub fn parse_reverse_response(
    text: &str,
    fallback_label: &str,
) -> Result<ReverseGeocode, ProviderError> {
    match serde_json::from_str(text)? {
        ReverseResponse::Found { display_name } => Ok(ReverseGeocode {
            label: display_name,
            matched: true,
        }),
        ReverseResponse::NotFound { error } => {
            debug!("Nominatim: no reverse match ({}), using fallback label", error);
            Ok(ReverseGeocode {
                label: fallback_label.to_string(),
                matched: false,
            })
        }
    }
}
