pub mod coordinate;
pub mod eta;
pub mod fare_engine;
pub mod fare_quote;
pub mod kmh;
pub mod meters;
pub mod money;
pub mod pricing_config;
pub mod pricing_tiers;
pub mod route_metrics;
pub mod schema;
pub mod surcharge;
