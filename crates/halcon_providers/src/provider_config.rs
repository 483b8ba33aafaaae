use std::{path::PathBuf, time::Duration};

use tracing::info;

use crate::{
    cache::{CachedRouter, FileRouteCache},
    error::ProviderError,
    nominatim_api::{NOMINATIM_API_URL, NominatimClient, NominatimClientParams},
    openrouteservice_api::{
        OPENROUTESERVICE_API_URL, OpenRouteServiceClient, OpenRouteServiceClientParams, OrsProfile,
    },
};

pub const ORS_API_KEY: &str = "ORS_API_KEY";
pub const ORS_BASE_URL: &str = "ORS_BASE_URL";
pub const ORS_PROFILE: &str = "ORS_PROFILE";
pub const NOMINATIM_BASE_URL: &str = "NOMINATIM_BASE_URL";
pub const NOMINATIM_USER_AGENT: &str = "NOMINATIM_USER_AGENT";
pub const NOMINATIM_COUNTRY_CODES: &str = "NOMINATIM_COUNTRY_CODES";
pub const HTTP_TIMEOUT_SECS: &str = "HALCON_HTTP_TIMEOUT_SECS";
pub const CACHE_FOLDER: &str = "HALCON_CACHE_FOLDER";

const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Checked when the routing client is built, so geocoding works without it
    pub ors_api_key: Option<String>,
    pub ors_base_url: String,
    pub ors_profile: OrsProfile,
    pub nominatim_base_url: String,
    pub nominatim_user_agent: Option<String>,
    pub nominatim_country_codes: Option<String>,
    pub timeout: Duration,
    pub cache_folder: Option<PathBuf>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            ors_api_key: None,
            ors_base_url: OPENROUTESERVICE_API_URL.to_string(),
            ors_profile: OrsProfile::default(),
            nominatim_base_url: NOMINATIM_API_URL.to_string(),
            nominatim_user_agent: None,
            nominatim_country_codes: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_folder: None,
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();

        let ors_profile = match get(ORS_PROFILE) {
            Some(profile) => profile
                .parse::<OrsProfile>()
                .map_err(ProviderError::InvalidConfiguration)?,
            None => defaults.ors_profile,
        };

        let timeout = match get(HTTP_TIMEOUT_SECS) {
            Some(secs) => match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ProviderError::InvalidConfiguration(format!(
                        "{HTTP_TIMEOUT_SECS} must be a positive number of seconds, got {secs}"
                    )));
                }
            },
            None => defaults.timeout,
        };

        Ok(Self {
            ors_api_key: get(ORS_API_KEY),
            ors_base_url: get(ORS_BASE_URL).unwrap_or(defaults.ors_base_url),
            ors_profile,
            nominatim_base_url: get(NOMINATIM_BASE_URL).unwrap_or(defaults.nominatim_base_url),
            nominatim_user_agent: get(NOMINATIM_USER_AGENT),
            nominatim_country_codes: get(NOMINATIM_COUNTRY_CODES),
            timeout,
            cache_folder: get(CACHE_FOLDER).map(PathBuf::from),
        })
    }

    pub fn geocoding_client(&self) -> Result<NominatimClient, ProviderError> {
        let defaults = NominatimClientParams::default();

        NominatimClient::new(NominatimClientParams {
            base_url: self.nominatim_base_url.clone(),
            user_agent: self
                .nominatim_user_agent
                .clone()
                .unwrap_or(defaults.user_agent),
            country_codes: self.nominatim_country_codes.clone(),
            timeout: self.timeout,
            ..defaults
        })
    }

    pub fn routing_client(&self) -> Result<OpenRouteServiceClient, ProviderError> {
        let api_key = self
            .ors_api_key
            .clone()
            .ok_or_else(|| ProviderError::MissingConfiguration(format!("{ORS_API_KEY} is not set")))?;

        OpenRouteServiceClient::new(OpenRouteServiceClientParams {
            api_key,
            base_url: self.ors_base_url.clone(),
            profile: self.ors_profile,
            timeout: self.timeout,
        })
    }

    /// Routing client behind the file cache when a cache folder is configured.
    pub fn cached_routing_client(
        &self,
    ) -> Result<CachedRouter<OpenRouteServiceClient>, anyhow::Error> {
        let client = self.routing_client()?;

        let cache = match &self.cache_folder {
            Some(folder) => {
                info!("Caching routes in {}", folder.display());
                Some(FileRouteCache::new(folder)?)
            }
            None => None,
        };

        Ok(CachedRouter::new(client, cache, self.ors_profile.to_string()))
    }
}
