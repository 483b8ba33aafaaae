use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Surcharge {
    AfterNine,
    Rain,
    ComplexNeighborhood,
}

impl Surcharge {
    pub const ALL: [Surcharge; 3] = [
        Surcharge::AfterNine,
        Surcharge::Rain,
        Surcharge::ComplexNeighborhood,
    ];
}

impl Display for Surcharge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Surcharge::AfterNine => "after 9 pm",
                Surcharge::Rain => "rain",
                Surcharge::ComplexNeighborhood => "complex neighborhood",
            }
        )
    }
}

/// Independent toggles chosen by the user. They have no relation to the
/// route and only meet it when a quote is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct SurchargeFlags {
    pub after_nine: bool,
    pub rain: bool,
    pub complex_neighborhood: bool,
}

impl SurchargeFlags {
    pub fn none() -> Self {
        SurchargeFlags::default()
    }

    pub fn all() -> Self {
        SurchargeFlags {
            after_nine: true,
            rain: true,
            complex_neighborhood: true,
        }
    }

    pub fn with(mut self, surcharge: Surcharge) -> Self {
        self.set(surcharge, true);
        self
    }

    pub fn is_set(&self, surcharge: Surcharge) -> bool {
        match surcharge {
            Surcharge::AfterNine => self.after_nine,
            Surcharge::Rain => self.rain,
            Surcharge::ComplexNeighborhood => self.complex_neighborhood,
        }
    }

    pub fn set(&mut self, surcharge: Surcharge, enabled: bool) {
        let flag = match surcharge {
            Surcharge::AfterNine => &mut self.after_nine,
            Surcharge::Rain => &mut self.rain,
            Surcharge::ComplexNeighborhood => &mut self.complex_neighborhood,
        };
        *flag = enabled;
    }

    /// Flips one flag and returns its new state.
    pub fn toggle(&mut self, surcharge: Surcharge) -> bool {
        let enabled = !self.is_set(surcharge);
        self.set(surcharge, enabled);
        enabled
    }

    pub fn iter_set(&self) -> impl Iterator<Item = Surcharge> + '_ {
        Surcharge::ALL
            .into_iter()
            .filter(|surcharge| self.is_set(*surcharge))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SurchargeConfig {
    pub after_nine: Money,
    pub rain: Money,
    pub complex_neighborhood: Money,
}

impl SurchargeConfig {
    pub fn amount(&self, surcharge: Surcharge) -> Money {
        match surcharge {
            Surcharge::AfterNine => self.after_nine,
            Surcharge::Rain => self.rain,
            Surcharge::ComplexNeighborhood => self.complex_neighborhood,
        }
    }
}

impl Default for SurchargeConfig {
    fn default() -> Self {
        SurchargeConfig {
            after_nine: Money::new(1000),
            rain: Money::new(2000),
            complex_neighborhood: Money::new(3000),
        }
    }
}
