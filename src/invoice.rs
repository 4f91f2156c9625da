//! Invoice

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    names::ItemName,
    pricing::{LinePricing, PricingError},
};

/// Errors that can occur while building an invoice.
#[derive(Debug, Error, PartialEq)]
pub enum InvoiceError {
    /// Error pricing a line or summing the totals.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// A line's quantity exceeded the supported range.
    #[error("quantity of {0} overflowed")]
    QuantityOverflow(ItemName),
}

impl From<MoneyError> for InvoiceError {
    fn from(err: MoneyError) -> Self {
        InvoiceError::Pricing(PricingError::Money(err))
    }
}

/// A single resolved purchase: one unit at its catalog price.
#[derive(Clone, Debug, PartialEq)]
pub struct PurchaseLine {
    /// Normalized item name
    pub name: ItemName,

    /// Units purchased
    pub quantity: u32,

    /// Price before any offer
    pub price: Money<'static, Currency>,
}

/// Purchases of the same item grouped together.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedLine {
    /// Normalized item name
    pub name: ItemName,

    /// Units purchased across all grouped lines
    pub quantity: u32,

    /// Sum of the grouped lines' prices, before any offer
    pub naive_price: Money<'static, Currency>,
}

/// Final line of an invoice.
#[derive(Clone, Debug, PartialEq)]
pub struct InvoiceLine {
    name: ItemName,
    quantity: u32,
    base_price: Money<'static, Currency>,
    price: Money<'static, Currency>,
    pricing: LinePricing,
}

impl InvoiceLine {
    /// Create a new invoice line.
    pub fn new(
        name: ItemName,
        quantity: u32,
        base_price: Money<'static, Currency>,
        price: Money<'static, Currency>,
        pricing: LinePricing,
    ) -> Self {
        Self {
            name,
            quantity,
            base_price,
            price,
            pricing,
        }
    }

    /// Normalized item name
    pub fn name(&self) -> &ItemName {
        &self.name
    }

    /// Units purchased
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price of the line before any offer
    pub fn base_price(&self) -> Money<'static, Currency> {
        self.base_price
    }

    /// Price charged for the line, after any offer
    pub fn price(&self) -> Money<'static, Currency> {
        self.price
    }

    /// How the charged price was arrived at
    pub fn pricing(&self) -> LinePricing {
        self.pricing
    }
}

/// Priced invoice for a list of purchases.
#[derive(Clone, Debug, PartialEq)]
pub struct Invoice {
    /// Lines in the order their items were first purchased
    lines: SmallVec<[InvoiceLine; 8]>,

    /// Total amount charged
    total: Money<'static, Currency>,

    /// Amount saved through offers
    saved: Money<'static, Currency>,

    /// Currency used for all monetary values
    currency: &'static Currency,
}

impl Invoice {
    /// Create a new invoice with the given details.
    pub fn new(
        lines: SmallVec<[InvoiceLine; 8]>,
        total: Money<'static, Currency>,
        saved: Money<'static, Currency>,
        currency: &'static Currency,
    ) -> Self {
        Self {
            lines,
            total,
            saved,
            currency,
        }
    }

    /// Invoice lines, in first-purchase order.
    pub fn lines(&self) -> &[InvoiceLine] {
        &self.lines
    }

    /// Look up the line for an item, in any letter case.
    pub fn line(&self, name: &str) -> Option<&InvoiceLine> {
        let name = ItemName::new(name)?;

        self.lines.iter().find(|line| line.name == name)
    }

    /// Total amount charged
    pub fn total_amount(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Amount saved through offers
    pub fn saved_amount(&self) -> Money<'static, Currency> {
        self.saved
    }

    /// Currency used for all monetary values.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Check if no purchases made it onto the invoice.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;

    fn milk_line() -> Result<InvoiceLine, &'static str> {
        let name = ItemName::new("milk").ok_or("blank name")?;

        Ok(InvoiceLine::new(
            name,
            2,
            Money::from_minor(794, USD),
            Money::from_minor(500, USD),
            LinePricing::Offer,
        ))
    }

    #[test]
    fn accessors_return_values_from_constructor() -> TestResult {
        let invoice = Invoice::new(
            smallvec![milk_line()?],
            Money::from_minor(500, USD),
            Money::from_minor(294, USD),
            USD,
        );

        assert_eq!(invoice.lines().len(), 1);
        assert_eq!(invoice.total_amount(), Money::from_minor(500, USD));
        assert_eq!(invoice.saved_amount(), Money::from_minor(294, USD));
        assert_eq!(invoice.currency(), USD);
        assert!(!invoice.is_empty());

        Ok(())
    }

    #[test]
    fn line_lookup_ignores_case() -> TestResult {
        let invoice = Invoice::new(
            smallvec![milk_line()?],
            Money::from_minor(500, USD),
            Money::from_minor(294, USD),
            USD,
        );

        let line = invoice.line("MILK").ok_or("milk line missing")?;

        assert_eq!(line.quantity(), 2);
        assert_eq!(line.base_price(), Money::from_minor(794, USD));
        assert_eq!(line.price(), Money::from_minor(500, USD));
        assert_eq!(line.pricing(), LinePricing::Offer);
        assert!(invoice.line("bread").is_none());

        Ok(())
    }

    #[test]
    fn money_errors_convert_into_pricing_errors() {
        let err = InvoiceError::from(MoneyError::CurrencyMismatch {
            expected: "USD",
            actual: "GBP",
        });

        assert!(matches!(
            err,
            InvoiceError::Pricing(PricingError::Money(MoneyError::CurrencyMismatch { .. }))
        ));
    }
}
