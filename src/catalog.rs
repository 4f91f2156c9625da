//! Catalog

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use tracing::debug;

use crate::{
    names::ItemName,
    registration::{Registration, require_name, require_price, upsert},
};

/// A catalog item and its unit price.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogEntry {
    name: ItemName,
    unit_price: Money<'static, Currency>,
}

impl CatalogEntry {
    /// Normalized item name
    pub fn name(&self) -> &ItemName {
        &self.name
    }

    /// Price of a single unit
    pub fn unit_price(&self) -> Money<'static, Currency> {
        self.unit_price
    }
}

/// Unit prices keyed by normalized item name.
///
/// All prices share the catalog currency.
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: FxHashMap<ItemName, CatalogEntry>,
    currency: &'static Currency,
}

impl Catalog {
    /// Create an empty catalog priced in `currency`.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Catalog {
            entries: FxHashMap::default(),
            currency,
        }
    }

    /// Register an item's unit price.
    ///
    /// The registration is a no-op if the name is absent or blank, the price
    /// is absent, or the price is in a different currency from the catalog.
    /// Registering a name that is already present overwrites its entry.
    pub fn register<'n>(
        &mut self,
        name: impl Into<Option<&'n str>>,
        unit_price: impl Into<Option<Money<'static, Currency>>>,
    ) -> Registration {
        let name = match require_name(name.into()) {
            Ok(name) => name,
            Err(reason) => return Registration::Rejected(reason),
        };

        let unit_price = match require_price(unit_price.into(), self.currency) {
            Ok(price) => price,
            Err(reason) => return Registration::Rejected(reason),
        };

        debug!(item = %name, %unit_price, "registering catalog item");

        upsert(
            &mut self.entries,
            name.clone(),
            CatalogEntry { name, unit_price },
        )
    }

    /// Look up an item by name, in any letter case.
    pub fn lookup(&self, name: &str) -> Option<&CatalogEntry> {
        ItemName::new(name).and_then(|name| self.get(&name))
    }

    /// Look up an item by its normalized name.
    pub fn get(&self, name: &ItemName) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Currency of every price in the catalog.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Iterate over the registered entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }
}
