//! Currency conversion command.

use tokio::runtime::Runtime;

use super::Context;
use crate::currency::{CurrencyConverter, RatesCache, RatesClient};

/// Convert the first `<amount> <code> to <code>` found in `text`
pub fn cmd_convert(rt: &Runtime, ctx: &Context, text: &str) -> anyhow::Result<()> {
    let converter = CurrencyConverter::new(RatesCache::new(RatesClient::new(ctx.http.clone())));

    rt.block_on(async {
        match converter.convert(text).await? {
            Some(conversion) => println!("{conversion}"),
            None => {
                println!("✗ Nothing to convert in {text:?}.");
                println!("  Try something like: 100 usd to eur");
            }
        }
        Ok(())
    })
}
