//! Offer Fixtures

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::fixtures::{FixtureError, catalog::parse_optional_price};

/// A parsed offer entry: name, trigger quantity and bundle price, each possibly absent.
pub type OfferEntry = (Option<String>, Option<u32>, Option<Money<'static, Currency>>);

/// Wrapper for offers in YAML
#[derive(Debug, Deserialize)]
pub struct OffersFixture {
    /// Offers, in registration order
    #[serde(default)]
    pub offers: Vec<OfferFixture>,
}

/// Offer Fixture
#[derive(Debug, Deserialize)]
pub struct OfferFixture {
    /// Item name the offer applies to
    pub name: Option<String>,

    /// Number of units the bundle price covers
    pub quantity: Option<u32>,

    /// Bundle price (e.g., "5.00 USD")
    pub price: Option<String>,
}

impl OffersFixture {
    /// Parse every offer's bundle price, keeping absent fields absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a price that is present is malformed.
    pub fn parse_entries(self) -> Result<Vec<OfferEntry>, FixtureError> {
        self.offers
            .into_iter()
            .map(|offer| {
                parse_optional_price(offer.price.as_deref())
                    .map(|price| (offer.name, offer.quantity, price))
            })
            .collect()
    }
}
