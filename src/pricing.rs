//! Prices
//!
//! Line prices keep the full precision of their unit and bundle prices.
//! Only invoice totals are rounded, once, after summing.

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;
use tracing::warn;

use crate::offers::Offer;

/// Errors that can occur while pricing purchases.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A price exceeded the representable decimal range.
    #[error("price overflowed the representable range")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// How an offer is applied when fewer units than its trigger quantity were bought.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OfferPolicy {
    /// Always price as `(quantity - trigger) × unit price + bundle price`.
    ///
    /// Below the trigger quantity the remainder is negative, so the line is
    /// charged less than its unit price would be.
    #[default]
    Literal,

    /// Only apply the bundle price once the trigger quantity is reached;
    /// otherwise charge the unit price.
    Threshold,
}

/// How an invoice line's price was arrived at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinePricing {
    /// Charged at unit price, no offer exists for the item.
    Unit,

    /// An offer was applied with at least its trigger quantity bought.
    Offer,

    /// An offer was applied with fewer units than its trigger quantity.
    UnderThreshold,

    /// An offer exists but the trigger quantity was not reached, so the unit
    /// price was charged.
    BelowThreshold,
}

/// Calculates the sum of a list of prices.
///
/// An empty list sums to zero in `currency`.
///
/// # Errors
///
/// - [`PricingError::Money`]: a price is not in `currency`.
pub fn total_price<I>(
    prices: I,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError>
where
    I: IntoIterator<Item = Money<'static, Currency>>,
{
    let total = prices
        .into_iter()
        .try_fold(Money::from_minor(0, currency), |acc, price| acc.add(price))?;

    Ok(total)
}

/// Decimal places invoice totals are rounded to.
pub const TOTAL_DECIMAL_PLACES: u32 = 2;

/// Multiplies a unit price by a (possibly negative) quantity, without rounding.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the result does not fit in a decimal.
pub fn extended_price(
    unit_price: Money<'static, Currency>,
    quantity: i64,
) -> Result<Money<'static, Currency>, PricingError> {
    let amount = unit_price
        .amount()
        .checked_mul(Decimal::from(quantity))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_decimal(amount, unit_price.currency()))
}

/// Rounds an amount to [`TOTAL_DECIMAL_PLACES`], halves away from zero.
pub fn round_total(amount: Money<'static, Currency>) -> Money<'static, Currency> {
    let rounded = amount
        .amount()
        .round_dp_with_strategy(TOTAL_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);

    Money::from_decimal(rounded, amount.currency())
}

/// Prices `quantity` units of an item with an offer.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: an intermediate price does not fit in a decimal.
/// - [`PricingError::Money`]: the offer and unit price currencies differ.
pub fn offer_price(
    unit_price: Money<'static, Currency>,
    quantity: u32,
    offer: &Offer,
    policy: OfferPolicy,
) -> Result<(Money<'static, Currency>, LinePricing), PricingError> {
    let trigger = offer.trigger_quantity();
    let reached = quantity >= trigger;

    if !reached && policy == OfferPolicy::Threshold {
        let price = extended_price(unit_price, i64::from(quantity))?;

        return Ok((price, LinePricing::BelowThreshold));
    }

    let remainder = i64::from(quantity) - i64::from(trigger);
    let price = extended_price(unit_price, remainder)?.add(offer.bundle_price())?;

    if reached {
        Ok((price, LinePricing::Offer))
    } else {
        warn!(
            item = %offer.name(),
            quantity,
            trigger,
            %price,
            "offer applied below its trigger quantity"
        );

        Ok((price, LinePricing::UnderThreshold))
    }
}
