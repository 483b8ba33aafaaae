use clap::{Parser, Subcommand};

#[cfg(not(feature = "dhat-heap"))]
use mimalloc::MiMalloc;

use crate::{
    fare::FareArgs,
    generate::GenerateSubcommands,
    lookup::{GeocodeArgs, ReverseArgs},
    quote::QuoteArgs,
};

mod args;
mod fare;
mod file_utils;
mod generate;
mod lookup;
mod parsers;
mod quote;
mod report;

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

#[cfg(not(feature = "dhat-heap"))]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote a delivery between two addresses or points
    #[command(visible_alias = "q")]
    Quote {
        #[command(flatten)]
        args: QuoteArgs,
    },
    /// Quote a known distance without calling any provider
    Fare {
        #[command(flatten)]
        args: FareArgs,
    },
    /// Look up the coordinates of an address
    Geocode {
        #[command(flatten)]
        args: GeocodeArgs,
    },
    /// Look up the address of a point
    Reverse {
        #[command(flatten)]
        args: ReverseArgs,
    },
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Quote { args } => quote::run(args).await?,
        Commands::Fare { args } => fare::run(args)?,
        Commands::Geocode { args } => lookup::run_geocode(args).await?,
        Commands::Reverse { args } => lookup::run_reverse(args).await?,
        Commands::Generate { commands } => generate::run(commands)?,
    }

    Ok(())
}
