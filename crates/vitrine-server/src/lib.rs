//! # Vitrine Server
//!
//! HTTP API server exposing the product catalog as JSON.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod server;

pub use server::{AppState, Server, ServerConfig, ServerConfigBuilder};
