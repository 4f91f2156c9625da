//! Invoice engine
//!
//! Turns raw item-name tokens into an [`Invoice`] in four passes:
//!
//! 1. resolve each token against the [`Catalog`], dropping unknown names;
//! 2. group resolved purchases by normalized name, keeping first-purchase order;
//! 3. price each group, applying its [`Offer`](crate::offers::Offer) if it has one;
//! 4. total the effective prices and the savings against the unit prices,
//!    rounding each to cents only after summing.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, debug_span};

use crate::{
    catalog::Catalog,
    invoice::{AggregatedLine, Invoice, InvoiceError, InvoiceLine, PurchaseLine},
    names::ItemName,
    offers::OfferTable,
    pricing::{LinePricing, OfferPolicy, offer_price, round_total, total_price},
};

/// Prices purchase lists against a catalog and an offer table.
#[derive(Clone, Copy, Debug)]
pub struct InvoiceEngine<'p> {
    catalog: &'p Catalog,
    offers: &'p OfferTable,
    policy: OfferPolicy,
}

impl<'p> InvoiceEngine<'p> {
    /// Create an engine using the default [`OfferPolicy`].
    #[must_use]
    pub fn new(catalog: &'p Catalog, offers: &'p OfferTable) -> Self {
        Self {
            catalog,
            offers,
            policy: OfferPolicy::default(),
        }
    }

    /// Use `policy` for offers whose trigger quantity was not reached.
    #[must_use]
    pub fn with_policy(mut self, policy: OfferPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The offer policy in use.
    pub fn policy(&self) -> OfferPolicy {
        self.policy
    }

    /// Build the invoice for a list of purchased item names.
    ///
    /// Names are matched case-insensitively; names missing from the catalog
    /// are left off the invoice.
    ///
    /// # Errors
    ///
    /// Returns an [`InvoiceError`] if a price overflows or the catalog and
    /// offer table currencies differ.
    pub fn invoice<I>(&self, purchases: I) -> Result<Invoice, InvoiceError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let span = debug_span!("invoice", policy = ?self.policy);
        let _guard = span.enter();

        let currency = self.catalog.currency();
        let purchase_lines = self.resolve(purchases);
        let groups = aggregate(&purchase_lines)?;

        let lines = groups
            .into_iter()
            .map(|group| self.price_group(group))
            .collect::<Result<SmallVec<[InvoiceLine; 8]>, _>>()?;

        let naive_total = total_price(purchase_lines.iter().map(|line| line.price), currency)?;
        let effective_total = total_price(lines.iter().map(InvoiceLine::price), currency)?;

        let total = round_total(effective_total);
        let saved = round_total(naive_total.sub(effective_total)?);

        debug!(lines = lines.len(), %total, %saved, "invoice complete");

        Ok(Invoice::new(lines, total, saved, currency))
    }

    /// Resolve raw item names against the catalog.
    ///
    /// Each known name becomes a single-unit [`PurchaseLine`] at its catalog
    /// price. Unknown and blank names are dropped.
    pub fn resolve<I>(&self, purchases: I) -> Vec<PurchaseLine>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        purchases
            .into_iter()
            .filter_map(|raw| {
                let raw = raw.as_ref();
                let entry = self.catalog.lookup(raw);

                if entry.is_none() {
                    debug!(item = raw, "dropping item missing from catalog");
                }

                entry
            })
            .map(|entry| PurchaseLine {
                name: entry.name().clone(),
                quantity: 1,
                price: entry.unit_price(),
            })
            .collect()
    }

    /// Price an aggregated group, applying its offer when there is one.
    fn price_group(&self, group: AggregatedLine) -> Result<InvoiceLine, InvoiceError> {
        let offer = self.offers.get(&group.name);
        let entry = self.catalog.get(&group.name);

        let (price, pricing) = match (offer, entry) {
            (Some(offer), Some(entry)) => {
                offer_price(entry.unit_price(), group.quantity, offer, self.policy)?
            }
            _ => (group.naive_price, LinePricing::Unit),
        };

        debug!(
            item = %group.name,
            quantity = group.quantity,
            base_price = %group.naive_price,
            %price,
            ?pricing,
            "priced line"
        );

        Ok(InvoiceLine::new(
            group.name,
            group.quantity,
            group.naive_price,
            price,
            pricing,
        ))
    }
}

/// Group purchase lines by item name, summing quantities and prices.
///
/// Groups keep the order in which their item was first purchased.
///
/// # Errors
///
/// Returns an [`InvoiceError`] if a quantity overflows or prices for the same
/// item are in different currencies.
pub fn aggregate(lines: &[PurchaseLine]) -> Result<Vec<AggregatedLine>, InvoiceError> {
    let mut groups: Vec<AggregatedLine> = Vec::new();
    let mut positions: FxHashMap<&ItemName, usize> = FxHashMap::default();

    for line in lines {
        match positions.get(&line.name).copied() {
            Some(position) => {
                let Some(group) = groups.get_mut(position) else {
                    continue;
                };

                group.quantity = group
                    .quantity
                    .checked_add(line.quantity)
                    .ok_or_else(|| InvoiceError::QuantityOverflow(line.name.clone()))?;

                group.naive_price = group.naive_price.add(line.price)?;
            }
            None => {
                positions.insert(&line.name, groups.len());
                groups.push(AggregatedLine {
                    name: line.name.clone(),
                    quantity: line.quantity,
                    naive_price: line.price,
                });
            }
        }
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{
        Money,
        iso::{EUR, USD},
    };
    use testresult::TestResult;

    use super::*;

    fn tables() -> (Catalog, OfferTable) {
        let mut catalog = Catalog::new(USD);
        _ = catalog.register("Milk", Money::from_minor(397, USD));
        _ = catalog.register("Bread", Money::from_minor(217, USD));
        _ = catalog.register("Banana", Money::from_minor(99, USD));
        _ = catalog.register("Apple", Money::from_minor(89, USD));

        let mut offers = OfferTable::new(USD);
        _ = offers.register("milk", 2_u32, Money::from_minor(500, USD));
        _ = offers.register("bread", 3_u32, Money::from_minor(600, USD));

        (catalog, offers)
    }

    #[test]
    fn resolve_drops_unknown_and_blank_names() {
        let (catalog, offers) = tables();
        let engine = InvoiceEngine::new(&catalog, &offers);

        let lines = engine.resolve(["milk", "caviar", "", "APPLE"]);

        let names: Vec<&str> = lines.iter().map(|line| line.name.as_str()).collect();

        assert_eq!(names, ["milk", "apple"]);
        assert!(lines.iter().all(|line| line.quantity == 1));
    }

    #[test]
    fn aggregate_groups_in_first_purchase_order() -> TestResult {
        let (catalog, offers) = tables();
        let engine = InvoiceEngine::new(&catalog, &offers);

        let lines = engine.resolve(["banana", "milk", "Banana", "milk", "BANANA"]);
        let groups = aggregate(&lines)?;

        assert_eq!(groups.len(), 2);

        let banana = groups.first().ok_or("missing banana group")?;
        let milk = groups.get(1).ok_or("missing milk group")?;

        assert_eq!(banana.name.as_str(), "banana");
        assert_eq!(banana.quantity, 3);
        assert_eq!(banana.naive_price, Money::from_minor(297, USD));
        assert_eq!(milk.name.as_str(), "milk");
        assert_eq!(milk.quantity, 2);
        assert_eq!(milk.naive_price, Money::from_minor(794, USD));

        Ok(())
    }

    #[test]
    fn aggregate_empty_list_is_empty() -> TestResult {
        assert!(aggregate(&[])?.is_empty());

        Ok(())
    }

    #[test]
    fn invoice_for_unknown_items_is_empty() -> TestResult {
        let (catalog, offers) = tables();
        let engine = InvoiceEngine::new(&catalog, &offers);

        let invoice = engine.invoice(["caviar", "truffle"])?;

        assert!(invoice.is_empty());
        assert_eq!(invoice.total_amount(), Money::from_minor(0, USD));
        assert_eq!(invoice.saved_amount(), Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn invoice_applies_offers_literally() -> TestResult {
        let (catalog, offers) = tables();
        let engine = InvoiceEngine::new(&catalog, &offers);

        let invoice = engine.invoice(["milk", "milk", "bread", "banana"])?;

        let milk = invoice.line("milk").ok_or("milk line missing")?;
        let bread = invoice.line("bread").ok_or("bread line missing")?;

        assert_eq!(milk.price(), Money::from_minor(500, USD));
        assert_eq!(milk.pricing(), LinePricing::Offer);
        assert_eq!(bread.price(), Money::from_minor(166, USD));
        assert_eq!(bread.pricing(), LinePricing::UnderThreshold);
        assert_eq!(invoice.total_amount(), Money::from_minor(765, USD));
        assert_eq!(invoice.saved_amount(), Money::from_minor(345, USD));

        Ok(())
    }

    #[test]
    fn invoice_with_threshold_policy_charges_unit_price_below_trigger() -> TestResult {
        let (catalog, offers) = tables();
        let engine = InvoiceEngine::new(&catalog, &offers).with_policy(OfferPolicy::Threshold);

        let invoice = engine.invoice(["milk", "milk", "bread", "banana"])?;

        let bread = invoice.line("bread").ok_or("bread line missing")?;

        assert_eq!(engine.policy(), OfferPolicy::Threshold);
        assert_eq!(bread.price(), Money::from_minor(217, USD));
        assert_eq!(bread.pricing(), LinePricing::BelowThreshold);
        assert_eq!(invoice.total_amount(), Money::from_minor(816, USD));
        assert_eq!(invoice.saved_amount(), Money::from_minor(294, USD));

        Ok(())
    }

    #[test]
    fn invoice_rounds_totals_once_after_summing() -> TestResult {
        let mut catalog = Catalog::new(USD);
        _ = catalog.register("Apple", Money::from_decimal(Decimal::new(333, 3), USD));

        let mut offers = OfferTable::new(USD);
        let engine = InvoiceEngine::new(&catalog, &offers);

        let invoice = engine.invoice(["apple", "apple", "apple"])?;

        assert_eq!(*invoice.total_amount().amount(), Decimal::new(100, 2));

        _ = offers.register("apple", 2_u32, Money::from_decimal(Decimal::new(50, 2), USD));
        let engine = InvoiceEngine::new(&catalog, &offers);

        let invoice = engine.invoice(["apple", "apple", "apple"])?;
        let apple = invoice.line("apple").ok_or("apple line missing")?;

        assert_eq!(*apple.price().amount(), Decimal::new(833, 3));
        assert_eq!(*invoice.total_amount().amount(), Decimal::new(83, 2));
        assert_eq!(*invoice.saved_amount().amount(), Decimal::new(17, 2));

        Ok(())
    }

    #[test]
    fn invoice_errors_when_offer_currency_differs() {
        let (catalog, _) = tables();
        let mut offers = OfferTable::new(EUR);
        _ = offers.register("milk", 2_u32, Money::from_minor(500, EUR));

        let engine = InvoiceEngine::new(&catalog, &offers);

        assert!(matches!(
            engine.invoice(["milk", "milk"]),
            Err(InvoiceError::Pricing(_))
        ));
    }
}
