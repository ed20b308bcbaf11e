//! # Vitrine Store
//!
//! Storage backends for the product catalog.
//!
//! The [`Catalog`] trait is the seam between the HTTP surface and persistence.
//! Two implementations are provided:
//! - [`SqlCatalog`]: SQLite via sqlx, the production backend
//! - [`MemoryCatalog`]: in-memory, for development and testing

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod sql;

pub use catalog::{Catalog, MemoryCatalog};
pub use sql::SqlCatalog;
