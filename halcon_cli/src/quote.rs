use clap::Args;
use halcon_fare::{coordinate::Coordinate, fare_engine::FareEngine};
use halcon_providers::{
    geocoding_provider::GeocodingProvider, provider_config::ProviderConfig,
    routing_provider::RoutingProvider,
};
use halcon_quoter::{error::QuoteError, quote_session::QuoteSession};
use tracing::error;

use crate::{
    args::{PricingArgs, SurchargeArgs},
    file_utils::load_pricing,
    parsers, report,
};

#[derive(Args)]
pub struct QuoteArgs {
    /// Pickup address
    #[arg(short, long, required_unless_present = "from_point", conflicts_with = "from_point")]
    from: Option<String>,

    /// Pickup point as "lat,lon"
    #[arg(long, value_parser = parsers::parse_coordinate)]
    from_point: Option<Coordinate>,

    /// Drop-off address
    #[arg(short, long, required_unless_present = "to_point", conflicts_with = "to_point")]
    to: Option<String>,

    /// Drop-off point as "lat,lon"
    #[arg(long, value_parser = parsers::parse_coordinate)]
    to_point: Option<Coordinate>,

    #[command(flatten)]
    surcharges: SurchargeArgs,

    #[command(flatten)]
    pricing: PricingArgs,
}

enum EndpointInput<'a> {
    Address(&'a str),
    Point(Coordinate),
}

impl<'a> EndpointInput<'a> {
    fn from_args(address: &'a Option<String>, point: Option<Coordinate>) -> Self {
        match (address, point) {
            (Some(address), _) => EndpointInput::Address(address),
            (None, Some(point)) => EndpointInput::Point(point),
            (None, None) => EndpointInput::Address(""),
        }
    }
}

async fn resolve<G, R>(
    session: &mut QuoteSession<G, R>,
    origin: EndpointInput<'_>,
    destination: EndpointInput<'_>,
) -> Result<(), QuoteError>
where
    G: GeocodingProvider,
    R: RoutingProvider,
{
    if let (EndpointInput::Address(origin), EndpointInput::Address(destination)) =
        (&origin, &destination)
    {
        session.resolve_addresses(origin, destination).await?;
        return Ok(());
    }

    match origin {
        EndpointInput::Address(address) => session.set_origin_address(address).await?,
        EndpointInput::Point(point) => session.pick_origin(point).await?,
    };

    match destination {
        EndpointInput::Address(address) => session.set_destination_address(address).await?,
        EndpointInput::Point(point) => session.pick_destination(point).await?,
    };

    Ok(())
}

pub async fn run(args: QuoteArgs) -> Result<(), anyhow::Error> {
    let pricing = load_pricing(args.pricing.pricing.as_deref(), args.pricing.velocity_band)?;
    let config = ProviderConfig::from_env()?;

    let mut session = QuoteSession::new(
        config.geocoding_client()?,
        config.cached_routing_client()?,
        FareEngine::new(pricing),
    )
    .with_flags(args.surcharges.flags());

    let origin = EndpointInput::from_args(&args.from, args.from_point);
    let destination = EndpointInput::from_args(&args.to, args.to_point);

    if let Err(quote_error) = resolve(&mut session, origin, destination).await {
        error!("{}", quote_error);
        return Err(anyhow::anyhow!(quote_error.user_message()));
    }

    let Some(summary) = session.summary() else {
        return Err(anyhow::anyhow!("No quote could be computed"));
    };

    if args.pricing.json {
        println!("{}", serde_json::to_string_pretty(&summary.quote)?);
        return Ok(());
    }

    println!(
        "{}",
        report::quote_table(&summary.quote, &session.flags(), session.engine().config())
    );
    println!();
    println!("{}", summary);

    Ok(())
}
