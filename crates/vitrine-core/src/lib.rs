//! # Vitrine Core
//!
//! Core types for the Vitrine catalog service.
//!
//! This crate provides the foundational pieces shared across all Vitrine components:
//! - The unified error type
//! - The `Product` record as it exists in the database and on the wire

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod product;

pub use error::{Error, Result};
pub use product::{NewProduct, Product};
