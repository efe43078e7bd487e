//! # wikilinks
//!
//! Finds the shortest chain of links between two Wikipedia articles and
//! explains every hop with the sentence the link appears in.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐   ┌──────────────────────────┐   ┌──────────────┐
//! │ validate  │──▶│ crawl::PathFinder        │──▶│ render       │
//! │ URL → id  │   │ batches of fetch+extract │   │ text / JSON  │
//! └───────────┘   └────┬───────────────┬─────┘   └──────────────┘
//!                      ▼               ▼
//!               ┌────────────┐  ┌──────────────────────────┐
//!               │ fetch      │  │ wikilinks-core           │
//!               │ HTTP pages │  │ extract · store · path   │
//!               └────────────┘  └──────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! wikilinks search \
//!     --from https://ru.wikipedia.org/wiki/Xbox_360_S \
//!     --to https://ru.wikipedia.org/wiki/Nintendo_3DS --depth 3
//! wikilinks validate https://ru.wikipedia.org/wiki/Nintendo_3DS
//! wikilinks log clear
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`validate`] | URL → article id |
//! | [`fetch`] | Page fetcher trait and HTTP implementation |
//! | [`crawl`] | Breadth-first search orchestrator |
//! | [`activity_log`] | Append-only log of scheduled articles |
//! | [`progress`] | Search progress on stderr |
//! | [`render`] | Text and JSON output |
//! | [`search_cmd`] | CLI command implementations |

pub mod activity_log;
pub mod config;
pub mod crawl;
pub mod fetch;
pub mod progress;
pub mod render;
pub mod search_cmd;
pub mod validate;
