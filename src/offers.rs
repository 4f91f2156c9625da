//! Offers

use std::num::NonZeroU32;

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use tracing::debug;

use crate::{
    names::ItemName,
    registration::{Registration, Rejection, require_name, require_price, upsert},
};

/// Bulk-purchase offer: `trigger_quantity` units of the item for a flat `bundle_price`.
///
/// Units beyond the trigger quantity are charged at the catalog unit price.
#[derive(Clone, Debug, PartialEq)]
pub struct Offer {
    name: ItemName,
    trigger_quantity: NonZeroU32,
    bundle_price: Money<'static, Currency>,
}

impl Offer {
    /// Normalized item name
    pub fn name(&self) -> &ItemName {
        &self.name
    }

    /// Number of units the bundle price covers
    pub fn trigger_quantity(&self) -> u32 {
        self.trigger_quantity.get()
    }

    /// Flat price for `trigger_quantity` units
    pub fn bundle_price(&self) -> Money<'static, Currency> {
        self.bundle_price
    }
}

/// Offers keyed by normalized item name.
///
/// Items without an entry are never discounted.
#[derive(Clone, Debug)]
pub struct OfferTable {
    offers: FxHashMap<ItemName, Offer>,
    currency: &'static Currency,
}

impl OfferTable {
    /// Create an empty offer table priced in `currency`.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        OfferTable {
            offers: FxHashMap::default(),
            currency,
        }
    }

    /// Register a bulk offer for an item.
    ///
    /// The registration is a no-op if any parameter is absent, the name is
    /// blank, the trigger quantity is zero or the bundle price is in a
    /// different currency from the table. Registering a name that is already
    /// present overwrites its offer.
    pub fn register<'n>(
        &mut self,
        name: impl Into<Option<&'n str>>,
        trigger_quantity: impl Into<Option<u32>>,
        bundle_price: impl Into<Option<Money<'static, Currency>>>,
    ) -> Registration {
        let offer = match self.validate(
            name.into(),
            trigger_quantity.into(),
            bundle_price.into(),
        ) {
            Ok(offer) => offer,
            Err(reason) => return Registration::Rejected(reason),
        };

        debug!(
            item = %offer.name,
            trigger_quantity = offer.trigger_quantity.get(),
            bundle_price = %offer.bundle_price,
            "registering offer"
        );

        upsert(&mut self.offers, offer.name.clone(), offer)
    }

    fn validate(
        &self,
        name: Option<&str>,
        trigger_quantity: Option<u32>,
        bundle_price: Option<Money<'static, Currency>>,
    ) -> Result<Offer, Rejection> {
        let name = require_name(name)?;
        let trigger_quantity = trigger_quantity.ok_or(Rejection::MissingQuantity)?;
        let bundle_price = require_price(bundle_price, self.currency)?;
        let trigger_quantity = NonZeroU32::new(trigger_quantity).ok_or(Rejection::ZeroTrigger)?;

        Ok(Offer {
            name,
            trigger_quantity,
            bundle_price,
        })
    }

    /// Look up an offer by item name, in any letter case.
    pub fn lookup(&self, name: &str) -> Option<&Offer> {
        ItemName::new(name).and_then(|name| self.get(&name))
    }

    /// Look up an offer by normalized item name.
    pub fn get(&self, name: &ItemName) -> Option<&Offer> {
        self.offers.get(name)
    }

    /// Number of registered offers.
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// Check if there are no offers.
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// Currency of every bundle price in the table.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Iterate over the registered offers, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Offer> {
        self.offers.values()
    }
}
