use std::fmt::Display;

use halcon_fare::{fare_quote::FareQuote, money::Money};
use serde::Serialize;

pub const DEFAULT_GREETING: &str = "Halcón Express - Delivery request";

/// Peso style amount: `$ 12.500`.
pub fn format_currency(amount: Money) -> String {
    let digits = amount.value().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("$ {grouped}")
}

/// Text block handed to the outbound messaging channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteSummary {
    pub greeting: String,
    pub origin: String,
    pub destination: String,
    pub quote: FareQuote,
}

impl QuoteSummary {
    pub fn new(origin: &str, destination: &str, quote: FareQuote) -> Self {
        QuoteSummary {
            greeting: DEFAULT_GREETING.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            quote,
        }
    }

    pub fn with_greeting(mut self, greeting: &str) -> Self {
        self.greeting = greeting.to_string();
        self
    }
}

impl Display for QuoteSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.greeting)?;
        writeln!(f)?;
        writeln!(f, "Origin: {}", self.origin)?;
        writeln!(f, "Destination: {}", self.destination)?;
        writeln!(f, "Total: {}", format_currency(self.quote.total_fare))?;
        write!(f, "Distance: {:.2} km", self.quote.distance_km)?;

        if let Some(eta) = &self.quote.eta {
            write!(f, "\nTime: {}", eta)?;
        }

        Ok(())
    }
}
