use std::path::Path;

use anyhow::Context;
use halcon_fare::{
    eta::{EtaModel, VelocityBand},
    pricing_config::PricingConfig,
};
use tracing::info;

/// Pricing table from `path`, or the built-in one. `velocity_band` switches a
/// provider based estimate to the urban speed band and keeps a band already
/// set in the file.
pub fn load_pricing(path: Option<&Path>, velocity_band: bool) -> Result<PricingConfig, anyhow::Error> {
    let config = match path {
        Some(path) => {
            info!("Loading pricing from {}", path.display());
            PricingConfig::from_json_file(path)
                .with_context(|| format!("Invalid pricing file {}", path.display()))?
        }
        None => PricingConfig::default(),
    };

    if velocity_band && config.eta == EtaModel::Provider {
        return Ok(config.with_eta(EtaModel::VelocityBand(VelocityBand::urban()))?);
    }

    Ok(config)
}
