//! # shopverse-locator: Store Catalog for Shopverse
//!
//! This crate loads the static store catalog and serves the map screen's
//! lookups over it. The distance math itself lives in `shopverse-core`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopverse Store Lookup                           │
//! │                                                                         │
//! │  CLI command (nearest --lat --lon)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                 shopverse-locator (THIS CRATE)                  │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐   │    │
//! │  │   │  StoreSource  │    │    catalog     │    │  Repository  │   │    │
//! │  │   │  file / JSON  │───►│ parse + filter │───►│ Arc cache    │   │    │
//! │  │   └───────────────┘    └────────────────┘    └──────┬───────┘   │    │
//! │  │                                                     │           │    │
//! │  └─────────────────────────────────────────────────────┼───────────┘    │
//! │                                                        ▼                │
//! │                                    shopverse_core::geo::{nearest, ...}  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`catalog`] - Catalog document parsing and entry filtering
//! - [`repository`] - Cached store repository and its sources
//! - [`error`] - Locator error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shopverse_locator::{StoreRepository, StoreSource};
//!
//! let repo = StoreRepository::new(StoreSource::file("assets/stores.json"));
//! let catalog = repo.load().await?;
//! let hit = repo.nearest(user).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{parse_catalog, Catalog};
pub use error::{LocatorError, LocatorResult};
pub use repository::{LoadedCatalog, StoreRepository, StoreSource};
