//! Stateless price rendering.

use serde::{Deserialize, Serialize};

/// How prices are displayed to players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFormat {
    #[serde(default = "default_decimals")]
    pub decimals: usize,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_decimals() -> usize { 2 }
fn default_currency_symbol() -> String { "$".to_string() }

impl Default for PriceFormat {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Renders `amount` with the configured precision and currency symbol.
pub fn format_price(amount: f64, format: &PriceFormat) -> String {
    format!(
        "{}{:.*}",
        format.currency_symbol, format.decimals, amount
    )
}
