use clap::Args;
use halcon_fare::coordinate::Coordinate;
use halcon_providers::{geocoding_provider::GeocodingProvider, provider_config::ProviderConfig};
use tracing::info;

use crate::{parsers, report};

#[derive(Args)]
pub struct GeocodeArgs {
    /// Free text address
    address: String,
}

#[derive(Args)]
pub struct ReverseArgs {
    /// Point as "lat,lon"
    #[arg(value_parser = parsers::parse_coordinate)]
    point: Coordinate,
}

pub async fn run_geocode(args: GeocodeArgs) -> Result<(), anyhow::Error> {
    let geocoder = ProviderConfig::from_env()?.geocoding_client()?;
    let candidates = geocoder.search(&args.address).await?;

    if candidates.is_empty() {
        info!("No address matched \"{}\"", args.address);
        return Ok(());
    }

    println!("{}", report::candidates_table(&candidates));

    Ok(())
}

pub async fn run_reverse(args: ReverseArgs) -> Result<(), anyhow::Error> {
    let geocoder = ProviderConfig::from_env()?.geocoding_client()?;
    let reverse = geocoder.reverse(args.point).await?;

    if !reverse.matched {
        info!("No address found near {}", args.point);
    }

    println!("{}", reverse.label);

    Ok(())
}
