//! Fixtures
//!
//! Loads a [`Pricebook`] from YAML files laid out as
//! `<base>/catalog/<set>.yml` and `<base>/offers/<set>.yml`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    catalog::Catalog,
    fixtures::{catalog::CatalogFixture, offers::OffersFixture},
    offers::OfferTable,
    pricebook::Pricebook,
    registration::{Registration, Rejection},
};

pub mod catalog;
pub mod offers;

pub use catalog::parse_price;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// No catalog price to take the currency from
    #[error("No catalog prices loaded yet; currency unknown")]
    NoCurrency,

    /// Offers or a pricebook were requested before the catalog was loaded
    #[error("No catalog loaded")]
    NoCatalog,
}

/// Which fixture table an entry was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixtureTable {
    /// `catalog/<set>.yml`
    Catalog,

    /// `offers/<set>.yml`
    Offers,
}

/// A fixture entry that was skipped because its registration was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedEntry {
    /// Table the entry belongs to
    pub table: FixtureTable,

    /// Position of the entry in its file
    pub index: usize,

    /// Name given for the entry, if any
    pub name: Option<String>,

    /// Why the entry was not registered
    pub reason: Rejection,
}

/// Entries skipped while loading fixtures.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    rejected: Vec<RejectedEntry>,
}

impl LoadReport {
    /// Entries that were not registered.
    pub fn rejected(&self) -> &[RejectedEntry] {
        &self.rejected
    }

    /// Check if every entry was registered.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    fn record(
        &mut self,
        table: FixtureTable,
        index: usize,
        name: Option<&str>,
        registration: Registration,
    ) {
        let Some(reason) = registration.rejection() else {
            return;
        };

        warn!(?table, index, name, %reason, "skipping fixture entry");

        self.rejected.push(RejectedEntry {
            table,
            index,
            name: name.map(str::to_string),
            reason,
        });
    }
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    catalog: Option<Catalog>,
    offers: Option<OfferTable>,

    report: LoadReport,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: None,
            offers: None,
            report: LoadReport::default(),
        }
    }

    /// Load catalog prices from `catalog/<name>.yml`.
    ///
    /// Every price must share one currency; the currency of the first price
    /// (or of an already loaded catalog) wins and mismatching entries are
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a price is
    /// malformed, or no price is available to take the currency from.
    pub fn load_catalog(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let path = self.table_path("catalog", name);
        let fixture: CatalogFixture = read_yaml(&path)?;

        let entries = fixture.parse_entries()?;

        let currency = match &self.catalog {
            Some(catalog) => catalog.currency(),
            None => first_currency(entries.iter().map(|(_, price)| *price))?,
        };

        let catalog = self.catalog.get_or_insert_with(|| Catalog::new(currency));

        for (index, (name, price)) in entries.into_iter().enumerate() {
            let registration = catalog.register(name.as_deref(), price);

            self.report
                .record(FixtureTable::Catalog, index, name.as_deref(), registration);
        }

        info!(path = %path.display(), items = catalog.len(), "loaded catalog fixture");

        Ok(self)
    }

    /// Load bulk offers from `offers/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog has not been loaded, or if the file
    /// cannot be read or parsed or a price is malformed.
    pub fn load_offers(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let currency = self
            .catalog
            .as_ref()
            .map(Catalog::currency)
            .ok_or(FixtureError::NoCatalog)?;

        let path = self.table_path("offers", name);
        let fixture: OffersFixture = read_yaml(&path)?;

        let entries = fixture.parse_entries()?;
        let offers = self.offers.get_or_insert_with(|| OfferTable::new(currency));

        for (index, (name, quantity, price)) in entries.into_iter().enumerate() {
            let registration = offers.register(name.as_deref(), quantity, price);

            self.report
                .record(FixtureTable::Offers, index, name.as_deref(), registration);
        }

        info!(path = %path.display(), offers = offers.len(), "loaded offers fixture");

        Ok(self)
    }

    /// Load a complete fixture set (catalog and offers with the same name).
    ///
    /// The offers file is optional; a set without one has no offers.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture.load_catalog(name)?;

        if fixture.table_path("offers", name).exists() {
            fixture.load_offers(name)?;
        }

        Ok(fixture)
    }

    /// Entries skipped so far.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Build the pricebook from the loaded tables.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCatalog`] if no catalog was loaded.
    pub fn into_pricebook(self) -> Result<Pricebook, FixtureError> {
        let catalog = self.catalog.ok_or(FixtureError::NoCatalog)?;

        Ok(match self.offers {
            Some(offers) => Pricebook::new(catalog, offers),
            None => Pricebook::without_offers(catalog),
        })
    }

    fn table_path(&self, table: &str, name: &str) -> PathBuf {
        self.base_path.join(table).join(format!("{name}.yml"))
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, FixtureError> {
    let contents = fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(serde_norway::from_str(&contents)?)
}

fn first_currency<I>(prices: I) -> Result<&'static Currency, FixtureError>
where
    I: IntoIterator<Item = Option<Money<'static, Currency>>>,
{
    prices
        .into_iter()
        .flatten()
        .map(|price| price.currency())
        .next()
        .ok_or(FixtureError::NoCurrency)
}
