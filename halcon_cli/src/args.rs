use std::path::PathBuf;

use clap::Args;
use halcon_fare::surcharge::{Surcharge, SurchargeFlags};

#[derive(Args, Debug, Default)]
pub struct SurchargeArgs {
    /// Service requested after 9 pm
    #[arg(long)]
    pub after_nine: bool,

    /// It is raining
    #[arg(long)]
    pub rain: bool,

    /// Pickup or drop-off in a hard to access neighborhood
    #[arg(long)]
    pub complex_neighborhood: bool,
}

impl SurchargeArgs {
    pub fn flags(&self) -> SurchargeFlags {
        let mut flags = SurchargeFlags::none();
        flags.set(Surcharge::AfterNine, self.after_nine);
        flags.set(Surcharge::Rain, self.rain);
        flags.set(Surcharge::ComplexNeighborhood, self.complex_neighborhood);
        flags
    }
}

#[derive(Args, Debug, Default)]
pub struct PricingArgs {
    /// JSON pricing table, the built-in table is used when omitted
    #[arg(short, long)]
    pub pricing: Option<PathBuf>,

    /// Estimate the time from the urban speed band instead of the provider
    #[arg(long)]
    pub velocity_band: bool,

    /// Print the quote as JSON
    #[arg(long)]
    pub json: bool,
}
