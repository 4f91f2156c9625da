//! Till prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogEntry},
    engine::InvoiceEngine,
    fixtures::{Fixture, FixtureError, LoadReport},
    input::tokenize,
    invoice::{Invoice, InvoiceError, InvoiceLine},
    names::ItemName,
    offers::{Offer, OfferTable},
    pricebook::Pricebook,
    pricing::{LinePricing, OfferPolicy, PricingError},
    registration::{Registration, Rejection},
    render::{RenderError, write_invoice},
};
