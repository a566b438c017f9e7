//! # Geo Module
//!
//! Great-circle distances and nearest-store resolution.
//!
//! ## Where This Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Map screen                                                             │
//! │                                                                         │
//! │  "Nearest store" tap ──► nearest(user, stores) ──► highlight marker     │
//! │                                                                         │
//! │  Location fix ─────────► within(user, stores, 10 km) ──► camera bounds  │
//! │                                                                         │
//! │  Store list ───────────► rank_by_distance(user, stores) ──► list order  │
//! │                          format_distance(km) ──► "850 m" / "2.4 km"     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a pure function of its arguments. Candidates are
//! assumed valid (the catalog loader drops bad coordinates); the origin is
//! checked on every query because it comes from the device or a geocoder.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::types::Store;
use crate::validation::{validate_latitude, validate_longitude, validate_radius_km, ValidationResult};
use crate::EARTH_RADIUS_KM;

// =============================================================================
// Coordinate
// =============================================================================

/// A WGS84 position in decimal degrees.
///
/// Fields are public so catalog and device data deserialize as-is; use
/// [`Coordinate::new`] or [`Coordinate::validate`] before trusting a value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a validated coordinate.
    ///
    /// ## Example
    /// ```rust
    /// use shopverse_core::geo::Coordinate;
    ///
    /// assert!(Coordinate::new(21.0285, 105.8542).is_ok());
    /// assert!(Coordinate::new(91.0, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> ValidationResult<Self> {
        let coordinate = Coordinate {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Checks latitude ∈ [-90, 90] and longitude ∈ [-180, 180].
    pub fn validate(&self) -> ValidationResult<()> {
        validate_latitude(self.latitude)?;
        validate_longitude(self.longitude)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// =============================================================================
// Located
// =============================================================================

/// Anything with a position that can be ranked by distance.
pub trait Located {
    fn coordinate(&self) -> Coordinate;
}

impl Located for Coordinate {
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

impl Located for Store {
    fn coordinate(&self) -> Coordinate {
        self.location
    }
}

/// `(id, coordinate)` pairs, for callers that do not hold full stores.
impl<K> Located for (K, Coordinate) {
    fn coordinate(&self) -> Coordinate {
        self.1
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn coordinate(&self) -> Coordinate {
        (**self).coordinate()
    }
}

/// A candidate paired with its distance from the query origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Proximity<T> {
    pub item: T,
    pub distance_km: f64,
}

// =============================================================================
// Distance
// =============================================================================

/// Great-circle distance in kilometers (haversine, R = 6371 km).
///
/// ## Formula
/// ```text
/// Δlat = rad(b.lat − a.lat)      Δlon = rad(b.lon − a.lon)
/// h    = sin²(Δlat/2) + cos(rad a.lat)·cos(rad b.lat)·sin²(Δlon/2)
/// d    = 2·R·asin(min(1, √h))
/// ```
/// The `min(1, ·)` clamp keeps `asin` in its domain when rounding pushes
/// `h` a hair above 1 for antipodal points.
///
/// ## Example
/// ```rust
/// use shopverse_core::geo::{distance_km, Coordinate};
///
/// let hanoi = Coordinate::new(21.0285, 105.8542).unwrap();
/// let saigon = Coordinate::new(10.8231, 106.6297).unwrap();
/// let d = distance_km(hanoi, saigon);
/// assert!((d - 1138.0).abs() < 5.0);
/// ```
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let sin_lat = (d_lat / 2.0).sin();
    let sin_lon = (d_lon / 2.0).sin();

    let h = sin_lat * sin_lat
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * sin_lon * sin_lon;

    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

// =============================================================================
// Queries
// =============================================================================

/// Finds the closest candidate to `origin`.
///
/// ## Rules
/// - Linear scan; a later candidate replaces the best only when strictly
///   closer, so the first of several equidistant candidates wins
/// - Empty input returns `Ok(None)`
/// - An invalid origin fails with [`CoreError::InvalidInput`](crate::CoreError)
///
/// ## Example
/// ```rust
/// use shopverse_core::geo::{nearest, Coordinate};
///
/// let user = Coordinate::new(10.77, 106.70).unwrap();
/// let stores = vec![
///     ("far", Coordinate::new(21.03, 105.85).unwrap()),
///     ("near", Coordinate::new(10.78, 106.69).unwrap()),
/// ];
/// let hit = nearest(user, &stores).unwrap().unwrap();
/// assert_eq!(hit.item.0, "near");
/// ```
pub fn nearest<I>(origin: Coordinate, candidates: I) -> CoreResult<Option<Proximity<I::Item>>>
where
    I: IntoIterator,
    I::Item: Located,
{
    origin.validate()?;

    let mut best: Option<Proximity<I::Item>> = None;
    for item in candidates {
        let distance = distance_km(origin, item.coordinate());
        let closer = match &best {
            Some(current) => distance < current.distance_km,
            None => true,
        };
        if closer {
            best = Some(Proximity {
                item,
                distance_km: distance,
            });
        }
    }

    Ok(best)
}

/// Returns the candidates within `radius_km` of `origin`, closest first.
///
/// ## Rules
/// - Inclusive: a candidate exactly `radius_km` away is kept
/// - Stable: equal distances keep input order
/// - Invalid origin or a negative / non-finite radius fails with
///   [`CoreError::InvalidInput`](crate::CoreError)
pub fn within<I>(
    origin: Coordinate,
    candidates: I,
    radius_km: f64,
) -> CoreResult<Vec<Proximity<I::Item>>>
where
    I: IntoIterator,
    I::Item: Located,
{
    validate_radius_km(radius_km)?;

    let mut hits: Vec<_> = rank_by_distance(origin, candidates)?;
    hits.retain(|hit| hit.distance_km <= radius_km);
    Ok(hits)
}

/// Pairs every candidate with its distance and sorts ascending (stable).
///
/// This is the store list ordering when a location fix is available.
pub fn rank_by_distance<I>(origin: Coordinate, candidates: I) -> CoreResult<Vec<Proximity<I::Item>>>
where
    I: IntoIterator,
    I::Item: Located,
{
    origin.validate()?;

    let mut ranked: Vec<_> = candidates
        .into_iter()
        .map(|item| {
            let distance_km = distance_km(origin, item.coordinate());
            Proximity { item, distance_km }
        })
        .collect();

    // Vec::sort_by is stable
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    Ok(ranked)
}

// =============================================================================
// Presentation
// =============================================================================

/// Formats a distance for a store card or toast.
///
/// ## Rules
/// - Below 1 km: whole meters, `"850 m"`
/// - Otherwise: one decimal, `"2.4 km"`
///
/// ## Example
/// ```rust
/// use shopverse_core::geo::format_distance;
///
/// assert_eq!(format_distance(0.25), "250 m");
/// assert_eq!(format_distance(12.345), "12.3 km");
/// ```
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{} m", (km * 1000.0).round() as i64)
    } else {
        format!("{:.1} km", km)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
