//! # wikilinks core
//!
//! Runtime-free building blocks of the wikilinks search: article models,
//! the link extractor, per-run bookkeeping, and path reconstruction.
//!
//! This crate has no tokio, HTTP, or filesystem dependencies. The
//! orchestrator that drives fetches concurrently lives in the `wikilinks`
//! application crate and feeds its results into these types.

pub mod error;
pub mod extract;
pub mod models;
pub mod path;
pub mod store;
