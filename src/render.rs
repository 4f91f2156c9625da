//! Invoice rendering

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Style, Theme, object::Columns},
};
use thiserror::Error;

use crate::{invoice::Invoice, pricing::round_total};

/// Errors that can occur when writing an invoice.
#[derive(Debug, Error)]
pub enum RenderError {
    /// IO error
    #[error("failed to write invoice: {0}")]
    Io(#[from] io::Error),
}

/// Writes the invoice as an item table followed by the total and savings.
///
/// Line prices are shown rounded to cents.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_invoice(mut out: impl io::Write, invoice: &Invoice) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Quantity", "Price"]);

    for line in invoice.lines() {
        builder.push_record([
            line.name().capitalized(),
            line.quantity().to_string(),
            round_total(line.price()).to_string(),
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Columns::new(1..3), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out)?;
    writeln!(out, "Total price : {}", invoice.total_amount())?;
    writeln!(out, "You saved {} today.", invoice.saved_amount())?;

    Ok(())
}
