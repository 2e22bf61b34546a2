//! # Medinfo Catalog
//!
//! Static reference catalogs for the medinfo system.
//!
//! This crate holds the compiled-in medical records searched by the rest of
//! the workspace:
//!
//! - [`Disease`] and [`Drug`] record types with their fixed catalogs
//! - The [`Searchable`] capability shared by both record types
//! - [`MatchFields`], the per-catalog matching breadth
//! - [`SearchQuery`], a validated non-blank query string
//!
//! All catalog data is fictional reference material, declared once at
//! process start and never mutated. There is no external data source: in a
//! production deployment these catalogs would be replaced by a real backend
//! with the same matching semantics.

pub mod disease;
pub mod drug;
pub mod query;
pub mod record;

pub use disease::{disease_catalog, Disease};
pub use drug::{drug_catalog, Drug};
pub use query::{QueryError, SearchQuery};
pub use record::{MatchFields, RecordId, Searchable};
