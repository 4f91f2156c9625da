//! Catalog Fixtures

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;

use crate::fixtures::FixtureError;

/// Wrapper for catalog items in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Catalog items, in registration order
    #[serde(default)]
    pub items: Vec<CatalogItemFixture>,
}

/// Catalog Item Fixture
#[derive(Debug, Deserialize)]
pub struct CatalogItemFixture {
    /// Item name
    pub name: Option<String>,

    /// Unit price (e.g., "3.97 USD")
    pub price: Option<String>,
}

impl CatalogFixture {
    /// Parse every item's price, keeping absent fields absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a price that is present is malformed.
    pub fn parse_entries(
        self,
    ) -> Result<Vec<(Option<String>, Option<Money<'static, Currency>>)>, FixtureError> {
        self.items
            .into_iter()
            .map(|item| {
                parse_optional_price(item.price.as_deref()).map(|price| (item.name, price))
            })
            .collect()
    }
}

/// Parse a price that may be absent.
///
/// # Errors
///
/// Returns an error if the price is present but malformed.
pub fn parse_optional_price(
    s: Option<&str>,
) -> Result<Option<Money<'static, Currency>>, FixtureError> {
    s.map(parse_price).transpose()
}

/// Parse a price written as `"<amount> <ISO code>"`, e.g. `"3.97 USD"`.
///
/// The amount keeps every decimal place it was written with.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPrice`] unless the input is exactly a
/// decimal amount and a currency code, and [`FixtureError::UnknownCurrency`]
/// if the code is not an ISO 4217 currency.
pub fn parse_price(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = iso::find(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))?;

    Ok(Money::from_decimal(amount, currency))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{JPY, USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_reads_amount_and_currency() -> TestResult {
        let price = parse_price("3.97 USD")?;

        assert_eq!(price, Money::from_minor(397, USD));
        assert_eq!(price.currency(), USD);

        Ok(())
    }

    #[test]
    fn parse_price_keeps_sub_cent_precision() -> TestResult {
        let price = parse_price("0.333 USD")?;

        assert_eq!(*price.amount(), Decimal::new(333, 3));

        Ok(())
    }

    #[test]
    fn parse_price_tolerates_extra_spacing() -> TestResult {
        assert_eq!(parse_price("  150   JPY ")?, Money::from_minor(150, JPY));

        Ok(())
    }

    #[test]
    fn parse_price_requires_amount_and_code() {
        for input in ["2.99USD", "2.99", "", "2.99 USD each"] {
            assert!(
                matches!(parse_price(input), Err(FixtureError::InvalidPrice(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn parse_price_rejects_non_numeric_amount() {
        let result = parse_price("cheap USD");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_entries_keeps_missing_fields() -> TestResult {
        let fixture: CatalogFixture = serde_norway::from_str(
            "items:\n  - name: Milk\n    price: 3.97 USD\n  - name: Cheese\n  - price: 1.00 USD\n",
        )?;

        let entries = fixture.parse_entries()?;

        assert_eq!(
            entries,
            vec![
                (Some("Milk".to_string()), Some(Money::from_minor(397, USD))),
                (Some("Cheese".to_string()), None),
                (None, Some(Money::from_minor(100, USD))),
            ]
        );

        Ok(())
    }
}
