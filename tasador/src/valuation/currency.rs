//! Currency conversion and money formatting.
//!
//! All adjustment math runs in soles; conversion happens once at the end.

use serde::{Deserialize, Serialize};
use tasador_common::util::format_grouped;

/// Target currency for an estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "Option<String>")]
pub enum Currency {
    /// Peruvian sol
    #[default]
    Pen,
    /// US dollar
    Usd,
}

impl Currency {
    /// Anything other than "USD" means soles.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("usd") {
            Self::Usd
        } else {
            Self::Pen
        }
    }

    /// Display label appended to amounts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pen => "S/",
            Self::Usd => "USD",
        }
    }

    /// Whether an exchange rate is needed to express soles in this currency.
    pub fn needs_rate(self) -> bool {
        self == Self::Usd
    }

    /// Convert an amount in soles given a PEN-per-USD rate.
    pub fn convert(self, amount_pen: f64, pen_per_usd: f64) -> f64 {
        match self {
            Self::Pen => amount_pen,
            Self::Usd => amount_pen / pen_per_usd,
        }
    }

    /// Format an amount already expressed in this currency.
    pub fn format(self, amount: f64) -> String {
        format!("{} {}", format_grouped(amount), self.label())
    }
}

impl From<Option<String>> for Currency {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map_or(Self::Pen, Self::from_label)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pen => write!(f, "PEN"),
            Self::Usd => write!(f, "USD"),
        }
    }
}
