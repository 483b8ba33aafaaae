use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL};
use halcon_fare::{
    fare_quote::FareQuote,
    pricing_config::PricingConfig,
    surcharge::{Surcharge, SurchargeFlags},
};
use halcon_providers::geocoding_provider::GeocodeCandidate;
use halcon_quoter::summary::format_currency;

fn amount_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

pub fn quote_table(quote: &FareQuote, flags: &SurchargeFlags, config: &PricingConfig) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Item", "Amount"]);

    table.add_row(vec![
        Cell::new(format!("Base fare ({})", quote.tier)),
        amount_cell(format_currency(quote.base_fare)),
    ]);

    for surcharge in Surcharge::ALL {
        if flags.is_set(surcharge) {
            table.add_row(vec![
                Cell::new(format!("Surcharge: {}", surcharge)),
                amount_cell(format_currency(config.surcharges.amount(surcharge))),
            ]);
        }
    }

    table.add_row(vec![
        Cell::new("Total"),
        amount_cell(format_currency(quote.total_fare)),
    ]);
    table.add_row(vec![
        Cell::new("Distance"),
        amount_cell(format!("{:.2} km", quote.distance_km)),
    ]);

    if let Some(eta) = &quote.eta {
        table.add_row(vec![Cell::new("Time"), amount_cell(eta.to_string())]);
    }

    table
}

pub fn candidates_table(candidates: &[GeocodeCandidate]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Address", "Latitude", "Longitude"]);

    for (index, candidate) in candidates.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&candidate.label),
            amount_cell(format!("{:.6}", candidate.coordinate.lat())),
            amount_cell(format!("{:.6}", candidate.coordinate.lon())),
        ]);
    }

    table
}
