pub mod cache;
pub mod error;
pub mod geocoding_provider;
pub mod memory;
pub mod nominatim_api;
pub mod openrouteservice_api;
pub mod provider_config;
pub mod routing_provider;
