//! Pricebook

use rusty_money::{
    Money,
    iso::{self, Currency},
};
use tracing::warn;

use crate::{catalog::Catalog, engine::InvoiceEngine, offers::OfferTable, pricing::OfferPolicy};

/// Grocery unit prices, in cents.
const GROCERY_ITEMS: [(&str, i64); 4] = [
    ("Milk", 397),
    ("Bread", 217),
    ("Banana", 99),
    ("Apple", 89),
];

/// Grocery bulk offers: item, trigger quantity, bundle price in cents.
const GROCERY_OFFERS: [(&str, u32, i64); 2] = [("milk", 2, 500), ("bread", 3, 600)];

/// The catalog and offer table an invoice is priced against.
#[derive(Clone, Debug)]
pub struct Pricebook {
    catalog: Catalog,
    offers: OfferTable,
}

impl Pricebook {
    /// Create a pricebook from a catalog and its offers.
    #[must_use]
    pub fn new(catalog: Catalog, offers: OfferTable) -> Self {
        Self { catalog, offers }
    }

    /// Create a pricebook with an empty offer table.
    #[must_use]
    pub fn without_offers(catalog: Catalog) -> Self {
        let offers = OfferTable::new(catalog.currency());

        Self { catalog, offers }
    }

    /// The built-in grocery pricebook, priced in US dollars.
    #[must_use]
    pub fn grocery() -> Self {
        let currency: &'static Currency = iso::USD;

        let mut catalog = Catalog::new(currency);

        for (name, cents) in GROCERY_ITEMS {
            let registration = catalog.register(name, Money::from_minor(cents, currency));

            if let Some(reason) = registration.rejection() {
                warn!(item = name, %reason, "built-in catalog item rejected");
            }
        }

        let mut offers = OfferTable::new(currency);

        for (name, trigger, cents) in GROCERY_OFFERS {
            let registration = offers.register(name, trigger, Money::from_minor(cents, currency));

            if let Some(reason) = registration.rejection() {
                warn!(item = name, %reason, "built-in offer rejected");
            }
        }

        Self { catalog, offers }
    }

    /// Catalog of unit prices
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Bulk offers
    pub fn offers(&self) -> &OfferTable {
        &self.offers
    }

    /// Create an invoice engine over this pricebook.
    pub fn engine(&self, policy: OfferPolicy) -> InvoiceEngine<'_> {
        InvoiceEngine::new(&self.catalog, &self.offers).with_policy(policy)
    }
}
