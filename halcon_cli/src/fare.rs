use clap::Args;
use halcon_fare::{
    eta::{EtaModel, compute_eta_band},
    fare_engine::FareEngine,
    fare_quote::FareQuote,
    meters::Meters,
    route_metrics::RouteMetrics,
};

use crate::{
    args::{PricingArgs, SurchargeArgs},
    file_utils::load_pricing,
    parsers, report,
};

#[derive(Args)]
pub struct FareArgs {
    /// Trip distance in kilometers
    #[arg(short = 'k', long, value_parser = parsers::parse_distance_km)]
    distance_km: f64,

    /// Trip duration (e.g., "14m", "PT14M", "840"), adds a time estimate
    #[arg(short, long, value_parser = parsers::parse_duration)]
    duration: Option<jiff::SignedDuration>,

    #[command(flatten)]
    surcharges: SurchargeArgs,

    #[command(flatten)]
    pricing: PricingArgs,
}

fn compute(engine: &FareEngine, args: &FareArgs) -> Result<FareQuote, anyhow::Error> {
    let flags = args.surcharges.flags();

    match args.duration {
        Some(duration) => {
            let route = RouteMetrics::new(
                args.distance_km * 1000.0,
                duration.as_secs_f64(),
                vec![],
            )?;
            Ok(engine.quote_route(&route, &flags))
        }
        None => {
            let mut quote = engine.quote(args.distance_km, &flags);
            // the speed band only needs the distance
            if let EtaModel::VelocityBand(band) = &engine.config().eta {
                quote.eta = Some(compute_eta_band(Meters::from_km(args.distance_km), band));
            }
            Ok(quote)
        }
    }
}

pub fn run(args: FareArgs) -> Result<(), anyhow::Error> {
    let engine = FareEngine::new(load_pricing(
        args.pricing.pricing.as_deref(),
        args.pricing.velocity_band,
    )?);
    let quote = compute(&engine, &args)?;

    if args.pricing.json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        println!(
            "{}",
            report::quote_table(&quote, &args.surcharges.flags(), engine.config())
        );
    }

    Ok(())
}
