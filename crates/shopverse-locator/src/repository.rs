//! # Store Repository
//!
//! Loads the store catalog once and answers lookups from the cached copy.
//!
//! ## Cache Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Cache                                        │
//! │                                                                         │
//! │  load() ──► cache hit? ──yes──► Arc<LoadedCatalog> (shared, no copy)    │
//! │                 │                                                       │
//! │                 no                                                      │
//! │                 ▼                                                       │
//! │  StoreSource::read ──► parse_catalog ──► store in cache ──► Arc         │
//! │                 │                                                       │
//! │                 └── error ──► returned, cache stays empty               │
//! │                                                                         │
//! │  reload()      ──► always reads the source, replaces on success         │
//! │  clear_cache() ──► next load() reads the source again                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The cache sits behind a `tokio::sync::RwLock`. Readers share the lock;
//! a miss upgrades to the write lock and re-checks before reading the
//! source, so concurrent first calls parse the catalog once.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

use shopverse_core::geo::{self, Coordinate, Proximity};
use shopverse_core::Store;

use crate::catalog::parse_catalog;
use crate::error::{LocatorError, LocatorResult};

// =============================================================================
// Source
// =============================================================================

/// Where the catalog document comes from.
#[derive(Debug, Clone)]
pub enum StoreSource {
    /// A `stores.json` file on disk.
    File(PathBuf),

    /// A document already in memory (bundled asset, tests).
    Embedded(String),
}

impl StoreSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        StoreSource::File(path.into())
    }

    pub fn embedded(json: impl Into<String>) -> Self {
        StoreSource::Embedded(json.into())
    }

    async fn read(&self) -> LocatorResult<String> {
        match self {
            StoreSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LocatorError::Io {
                        path: path.clone(),
                        source,
                    })
            }
            StoreSource::Embedded(json) => Ok(json.clone()),
        }
    }
}

// =============================================================================
// Loaded Catalog
// =============================================================================

/// A parsed catalog as held by the cache.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    /// Valid stores, in catalog order.
    pub stores: Vec<Store>,

    /// Entries dropped while parsing.
    pub skipped: usize,

    pub loaded_at: DateTime<Utc>,
}

// =============================================================================
// Repository
// =============================================================================

/// Cached store catalog with distance lookups.
///
/// ## Usage
/// ```rust,ignore
/// let repo = StoreRepository::new(StoreSource::file("assets/stores.json"));
///
/// // First call reads and parses; later calls hit the cache
/// let catalog = repo.load().await?;
///
/// // Lookups load on demand
/// let store = repo.get_by_id("s1").await?;
/// let around = repo.nearby(user, 10.0).await?;
/// ```
#[derive(Debug)]
pub struct StoreRepository {
    source: StoreSource,
    cache: RwLock<Option<Arc<LoadedCatalog>>>,
}

impl StoreRepository {
    /// Creates a repository. Nothing is read until the first lookup.
    pub fn new(source: StoreSource) -> Self {
        StoreRepository {
            source,
            cache: RwLock::new(None),
        }
    }

    pub fn source(&self) -> &StoreSource {
        &self.source
    }

    /// Returns the cached catalog, reading the source on a miss.
    ///
    /// A failed read or parse is returned as-is and leaves the cache empty,
    /// so the next call tries again.
    pub async fn load(&self) -> LocatorResult<Arc<LoadedCatalog>> {
        if let Some(catalog) = self.cache.read().await.as_ref() {
            return Ok(Arc::clone(catalog));
        }

        let mut cache = self.cache.write().await;
        if let Some(catalog) = cache.as_ref() {
            return Ok(Arc::clone(catalog));
        }

        let catalog = self.fetch().await?;
        *cache = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Reads the source again and replaces the cache on success.
    ///
    /// On failure the previous catalog, if any, stays cached.
    pub async fn reload(&self) -> LocatorResult<Arc<LoadedCatalog>> {
        let catalog = self.fetch().await?;
        *self.cache.write().await = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Drops the cached catalog.
    pub async fn clear_cache(&self) {
        if self.cache.write().await.take().is_some() {
            debug!("Store catalog cache cleared");
        }
    }

    pub async fn is_loaded(&self) -> bool {
        self.cache.read().await.is_some()
    }

    /// All valid stores, in catalog order.
    pub async fn all(&self) -> LocatorResult<Vec<Store>> {
        Ok(self.load().await?.stores.clone())
    }

    /// Finds a store by id.
    ///
    /// ## Errors
    /// - `StoreNotFound` when no store has this id
    pub async fn get_by_id(&self, id: &str) -> LocatorResult<Store> {
        let catalog = self.load().await?;
        catalog
            .stores
            .iter()
            .find(|store| store.id == id)
            .cloned()
            .ok_or_else(|| LocatorError::store_not_found(id))
    }

    /// The store closest to `origin`, or `None` for an empty catalog.
    pub async fn nearest(&self, origin: Coordinate) -> LocatorResult<Option<Proximity<Store>>> {
        let catalog = self.load().await?;
        let hit = geo::nearest(origin, &catalog.stores)?;

        if let Some(hit) = &hit {
            debug!(store_id = %hit.item.id, distance_km = hit.distance_km, "Nearest store resolved");
        }

        Ok(hit.map(owned))
    }

    /// Stores within `radius_km` of `origin`, closest first.
    pub async fn nearby(
        &self,
        origin: Coordinate,
        radius_km: f64,
    ) -> LocatorResult<Vec<Proximity<Store>>> {
        let catalog = self.load().await?;
        let hits = geo::within(origin, &catalog.stores, radius_km)?;

        debug!(radius_km, count = hits.len(), "Nearby stores resolved");

        Ok(hits.into_iter().map(owned).collect())
    }

    /// Every store ordered by distance from `origin`.
    pub async fn ranked(&self, origin: Coordinate) -> LocatorResult<Vec<Proximity<Store>>> {
        let catalog = self.load().await?;
        let ranked = geo::rank_by_distance(origin, &catalog.stores)?;
        Ok(ranked.into_iter().map(owned).collect())
    }

    async fn fetch(&self) -> LocatorResult<Arc<LoadedCatalog>> {
        let json = self.source.read().await?;
        let parsed = parse_catalog(&json)?;

        info!(
            stores = parsed.stores.len(),
            skipped = parsed.skipped,
            "Store catalog loaded"
        );

        Ok(Arc::new(LoadedCatalog {
            stores: parsed.stores,
            skipped: parsed.skipped,
            loaded_at: Utc::now(),
        }))
    }
}

fn owned(hit: Proximity<&Store>) -> Proximity<Store> {
    Proximity {
        item: hit.item.clone(),
        distance_km: hit.distance_km,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
