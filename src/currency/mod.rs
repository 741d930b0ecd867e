//! Currency conversion from free text like `"100 usd to eur"`.
//!
//! Rates come from exchangerate-api.com, quoted against USD, and are kept in
//! memory for an hour.

mod names;
mod parse;
mod rates;

use std::fmt;

pub use names::currency_name;
pub use parse::{ConversionRequest, parse_request};
pub use rates::{RATES_TTL, Rates, RatesCache, RatesClient};

use crate::formatting::format_amount;

/// Currency errors
#[derive(Debug, thiserror::Error)]
pub enum CurrencyError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse rates: {0}")]
    Parse(String),
}

/// A finished conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub converted: f64,
}

impl Conversion {
    /// Convert through the USD base: `amount / rate_from * rate_to`.
    ///
    /// `None` when either code has no usable rate.
    pub fn compute(request: &ConversionRequest, rates: &Rates) -> Option<Self> {
        let rate_from = rates.get(&request.from).copied().filter(|r| *r > 0.0)?;
        let rate_to = rates.get(&request.to).copied().filter(|r| *r > 0.0)?;

        Some(Self {
            amount: request.amount,
            from: request.from.clone(),
            to: request.to.clone(),
            converted: request.amount / rate_from * rate_to,
        })
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ≈ {} {}",
            format_amount(self.amount),
            currency_name(&self.from),
            format_amount(self.converted),
            currency_name(&self.to)
        )
    }
}

/// Parses requests and converts them against cached rates.
pub struct CurrencyConverter {
    rates: RatesCache,
}

impl CurrencyConverter {
    pub fn new(rates: RatesCache) -> Self {
        Self { rates }
    }

    /// Convert the first request found in `text`.
    ///
    /// `Ok(None)` when the text holds no request or names a currency we have
    /// no rate for.
    pub async fn convert(&self, text: &str) -> Result<Option<Conversion>, CurrencyError> {
        let Some(request) = parse_request(text) else {
            return Ok(None);
        };

        let rates = self.rates.rates().await?;
        let conversion = Conversion::compute(&request, &rates);
        if conversion.is_none() {
            tracing::debug!(from = %request.from, to = %request.to, "No rate for currency pair");
        }
        Ok(conversion)
    }
}
