//! Offering extraction and named-graph store management.
//!
//! This crate holds the catalogue's actual logic:
//!
//! - [`extract::extract_offerings`] isolates, for every offering instance in
//!   a published document, the closure of statements that describe it;
//! - [`OfferingStore`] commits those closures as named graphs (replace, not
//!   merge), reads them back, deletes them, and derives the listing metadata
//!   served by the web layer;
//! - [`document`] parses and serializes the RDF documents flowing in and out.

pub mod document;
pub mod extract;
mod listing;
mod store;

pub use listing::OfferingSummary;
pub use store::{DeleteOutcome, OfferingStore};
