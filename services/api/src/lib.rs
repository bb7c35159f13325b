//! services/api/src/lib.rs
//!
//! The sailing log HTTP service: configuration, the Postgres adapter, and the
//! axum handlers. The `api` binary wires these together.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
