//! Till
//!
//! Till prices grocery purchases against a catalog of unit prices and a table
//! of bulk-purchase offers, producing an invoice with the amount charged and
//! the amount saved.

pub mod catalog;
pub mod engine;
pub mod fixtures;
pub mod input;
pub mod invoice;
pub mod names;
pub mod offers;
pub mod prelude;
pub mod pricebook;
pub mod pricing;
pub mod registration;
pub mod render;
