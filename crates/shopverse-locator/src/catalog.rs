//! # Store Catalog Parsing
//!
//! Turns a catalog document into the stores the map can show.
//!
//! ## Document Format
//! ```text
//! {
//!   "stores": [
//!     { "id": "s1", "name": "Shopverse Ben Thanh",
//!       "latitude": 10.7725, "longitude": 106.698,
//!       "address": "...", "hours": "08:00 - 22:00" },
//!     ...
//!   ]
//! }
//! ```
//!
//! ## Entry Filtering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw entry ──► null or mistyped?        ──► skip (warn)                 │
//! │            ──► missing id/name/lat/lon? ──► skip (warn)                 │
//! │            ──► Store::validate fails?   ──► skip (warn)                 │
//! │            ──► id seen before?          ──► skip (warn)                 │
//! │            ──► keep, catalog order                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! One bad entry never hides the rest of the catalog. Only a document that
//! is not JSON at all, or whose `stores` is not an array, is an error.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{debug, warn};

use shopverse_core::geo::Coordinate;
use shopverse_core::{Store, ValidationError};

use crate::error::LocatorResult;

/// Top-level catalog document. A missing `stores` key is an empty catalog.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    stores: Vec<serde_json::Value>,
}

/// A catalog entry before validation; every field may be absent.
#[derive(Debug, Deserialize)]
struct RawStore {
    id: Option<String>,
    name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    address: Option<String>,
    hours: Option<String>,
}

impl RawStore {
    fn into_store(self) -> Result<Store, ValidationError> {
        let required = |field: &str| ValidationError::Required {
            field: field.to_string(),
        };

        let store = Store {
            id: self.id.ok_or_else(|| required("id"))?,
            name: self.name.ok_or_else(|| required("name"))?,
            location: Coordinate {
                latitude: self.latitude.ok_or_else(|| required("latitude"))?,
                longitude: self.longitude.ok_or_else(|| required("longitude"))?,
            },
            address: self.address.unwrap_or_default(),
            hours: self.hours.unwrap_or_default(),
        };
        store.validate()?;
        Ok(store)
    }
}

/// Stores that survived filtering, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub stores: Vec<Store>,

    /// Number of entries dropped by the filter.
    pub skipped: usize,
}

/// Parses a catalog document and drops entries the map cannot show.
///
/// ## Example
/// ```rust
/// use shopverse_locator::parse_catalog;
///
/// let json = r#"{"stores": [
///     {"id": "s1", "name": "Ben Thanh", "latitude": 10.77, "longitude": 106.69},
///     {"id": "s2", "name": "Broken", "latitude": 123.0, "longitude": 106.69}
/// ]}"#;
/// let catalog = parse_catalog(json).unwrap();
/// assert_eq!(catalog.stores.len(), 1);
/// assert_eq!(catalog.skipped, 1);
/// ```
pub fn parse_catalog(json: &str) -> LocatorResult<Catalog> {
    let document: CatalogDocument = serde_json::from_str(json)?;

    let mut seen = HashSet::new();
    let mut stores = Vec::with_capacity(document.stores.len());
    let mut skipped = 0;

    for (index, entry) in document.stores.into_iter().enumerate() {
        if entry.is_null() {
            warn!(index, "Skipping null store entry");
            skipped += 1;
            continue;
        }

        let raw: RawStore = match serde_json::from_value(entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(index, error = %e, "Skipping mistyped store entry");
                skipped += 1;
                continue;
            }
        };

        let store = match raw.into_store() {
            Ok(store) => store,
            Err(e) => {
                warn!(index, error = %e, "Skipping invalid store entry");
                skipped += 1;
                continue;
            }
        };

        if !seen.insert(store.id.clone()) {
            let e = ValidationError::Duplicate {
                field: "store id".to_string(),
                value: store.id,
            };
            warn!(index, error = %e, "Skipping duplicate store entry");
            skipped += 1;
            continue;
        }

        stores.push(store);
    }

    debug!(count = stores.len(), skipped, "Parsed store catalog");

    Ok(Catalog { stores, skipped })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocatorError;

    #[test]
    fn test_parse_full_entries() {
        let json = r#"{"stores": [
            {"id": "s1", "name": "Ben Thanh", "latitude": 10.7725, "longitude": 106.698,
             "address": "Le Loi, District 1", "hours": "08:00 - 22:00"},
            {"id": "s2", "name": "Thu Duc", "latitude": 10.8494, "longitude": 106.7537}
        ]}"#;
        let catalog = parse_catalog(json).unwrap();

        assert_eq!(catalog.skipped, 0);
        let ids: Vec<_> = catalog.stores.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2"]);
        assert_eq!(catalog.stores[0].hours, "08:00 - 22:00");
        assert_eq!(catalog.stores[1].address, "");
    }

    #[test]
    fn test_skips_invalid_entries() {
        let json = r#"{"stores": [
            null,
            {"id": "no-coords", "name": "Nowhere"},
            {"id": "no-name", "latitude": 10.0, "longitude": 106.0},
            {"id": "blank", "name": "  ", "latitude": 10.0, "longitude": 106.0},
            {"id": "off-map", "name": "Pole", "latitude": 91.0, "longitude": 0.0},
            {"id": "ok", "name": "Kept", "latitude": 10.0, "longitude": 106.0},
            {"id": "ok", "name": "Copy", "latitude": 11.0, "longitude": 107.0},
            {"id": "typo", "name": "Typo", "latitude": "10.0", "longitude": 106.0}
        ]}"#;
        let catalog = parse_catalog(json).unwrap();

        assert_eq!(catalog.stores.len(), 1);
        assert_eq!(catalog.stores[0].name, "Kept");
        assert_eq!(catalog.skipped, 7);
    }

    #[test]
    fn test_missing_stores_key_is_empty() {
        let catalog = parse_catalog("{}").unwrap();
        assert!(catalog.stores.is_empty());
        assert_eq!(catalog.skipped, 0);
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(parse_catalog("not json"), Err(LocatorError::Parse(_))));
        assert!(matches!(
            parse_catalog(r#"{"stores": {"id": "s1"}}"#),
            Err(LocatorError::Parse(_))
        ));
    }
}
