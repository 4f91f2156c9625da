//! Till grocery invoice printer

use std::io;

use anyhow::Result;
use tracing::info;

use till::{
    fixtures::Fixture,
    input::{read_purchases, tokenize},
    pricebook::Pricebook,
    render::write_invoice,
};

use crate::config::Config;

mod config;
mod logging;

fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|err| err.exit());

    logging::init_subscriber(&config.logging)?;

    let pricebook = match &config.fixtures {
        Some(base_path) => {
            let fixture = Fixture::from_set(base_path, &config.set)?;

            info!(
                set = %config.set,
                skipped = fixture.report().rejected().len(),
                "loaded fixture set"
            );

            fixture.into_pricebook()?
        }
        None => Pricebook::grocery(),
    };

    let stdout = io::stdout();

    let line = match config.items {
        Some(items) => items,
        None => read_purchases(io::stdin().lock(), stdout.lock())?,
    };

    let invoice = pricebook
        .engine(config.offer_policy.into())
        .invoice(tokenize(&line))?;

    write_invoice(stdout.lock(), &invoice)?;

    Ok(())
}
