//! Registration outcomes shared by the catalog and the offer table.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::names::ItemName;

/// Outcome of registering an entry in a [`Catalog`](crate::catalog::Catalog)
/// or an [`OfferTable`](crate::offers::OfferTable).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Registration {
    /// A new entry was stored.
    Created,

    /// An existing entry with the same normalized name was overwritten.
    Replaced,

    /// Nothing was stored.
    Rejected(Rejection),
}

impl Registration {
    /// Returns true if the entry was stored.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Registration::Rejected(_))
    }

    /// Returns the rejection reason, if the entry was not stored.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Registration::Rejected(reason) => Some(*reason),
            Registration::Created | Registration::Replaced => None,
        }
    }
}

/// Reason a registration was turned into a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The name was absent or blank.
    #[error("name is missing")]
    MissingName,

    /// The price was absent.
    #[error("price is missing")]
    MissingPrice,

    /// The offer trigger quantity was absent.
    #[error("trigger quantity is missing")]
    MissingQuantity,

    /// The offer trigger quantity was zero.
    #[error("trigger quantity must be greater than zero")]
    ZeroTrigger,

    /// The price currency differs from the table currency (table currency, price currency).
    #[error("price has currency {actual}, but the table uses {expected}")]
    CurrencyMismatch {
        /// Currency of the table
        expected: &'static str,
        /// Currency of the rejected price
        actual: &'static str,
    },
}

/// Resolves the registration name, rejecting absent or blank names.
pub(crate) fn require_name(name: Option<&str>) -> Result<ItemName, Rejection> {
    name.and_then(ItemName::new).ok_or(Rejection::MissingName)
}

/// Resolves the registration price, rejecting absent prices and foreign currencies.
pub(crate) fn require_price(
    price: Option<Money<'static, Currency>>,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, Rejection> {
    let price = price.ok_or(Rejection::MissingPrice)?;
    let price_currency = price.currency();

    if price_currency == currency {
        Ok(price)
    } else {
        Err(Rejection::CurrencyMismatch {
            expected: currency.iso_alpha_code,
            actual: price_currency.iso_alpha_code,
        })
    }
}

/// Stores `value` under `name`, overwriting any previous entry.
pub(crate) fn upsert<V>(
    entries: &mut FxHashMap<ItemName, V>,
    name: ItemName,
    value: V,
) -> Registration {
    match entries.entry(name) {
        Entry::Occupied(mut occupied) => {
            occupied.insert(value);
            Registration::Replaced
        }
        Entry::Vacant(vacant) => {
            vacant.insert(value);
            Registration::Created
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn require_name_rejects_missing_and_blank() {
        assert_eq!(require_name(None), Err(Rejection::MissingName));
        assert_eq!(require_name(Some("  ")), Err(Rejection::MissingName));
    }

    #[test]
    fn require_price_rejects_missing_price() {
        assert_eq!(require_price(None, USD), Err(Rejection::MissingPrice));
    }

    #[test]
    fn require_price_rejects_foreign_currency() {
        let result = require_price(Some(Money::from_minor(100, GBP)), USD);

        assert_eq!(
            result,
            Err(Rejection::CurrencyMismatch {
                expected: USD.iso_alpha_code,
                actual: GBP.iso_alpha_code,
            })
        );
    }

    #[test]
    fn upsert_reports_created_then_replaced() -> TestResult {
        let mut entries = FxHashMap::default();
        let name = ItemName::new("milk").ok_or("blank name")?;

        assert_eq!(upsert(&mut entries, name.clone(), 1), Registration::Created);
        assert_eq!(upsert(&mut entries, name.clone(), 2), Registration::Replaced);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get(&name), Some(&2));

        Ok(())
    }

    #[test]
    fn rejection_accessor_matches_variant() {
        let rejected = Registration::Rejected(Rejection::ZeroTrigger);

        assert!(!rejected.is_accepted());
        assert_eq!(rejected.rejection(), Some(Rejection::ZeroTrigger));
        assert!(Registration::Created.is_accepted());
        assert_eq!(Registration::Replaced.rejection(), None);
    }
}
