//! # Viewport Module
//!
//! Decides where the map camera should go. The map screen executes the
//! returned [`CameraPlan`]; nothing here talks to a map SDK.
//!
//! ## Camera Decisions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Event                      Plan                                        │
//! │  ─────                      ────                                        │
//! │  Location fix               stores within radius?                       │
//! │                               yes ──► FitBounds(user + stores, 150 px)  │
//! │                               no  ──► Center(user, zoom 13)             │
//! │                                                                         │
//! │  No location permission     FitBounds(all stores, 100 px)               │
//! │                                                                         │
//! │  "Nearest store" tap        Center(store, zoom 15)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::geo::{within, Coordinate, Located};

/// Zoom used when centering on the user with no store nearby.
pub const USER_LOCATION_ZOOM: f64 = 13.0;

/// Zoom used when highlighting a single store.
pub const NEAREST_STORE_ZOOM: f64 = 15.0;

/// Edge padding when fitting the user and nearby stores.
pub const NEARBY_PADDING_PX: u32 = 150;

/// Edge padding when fitting the whole catalog.
pub const OVERVIEW_PADDING_PX: u32 = 100;

// =============================================================================
// Bounds
// =============================================================================

/// Axis-aligned lat/lon envelope.
///
/// Does not handle envelopes crossing the antimeridian; every store the
/// catalog serves is far from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    /// Smallest envelope containing every point, or `None` for no points.
    ///
    /// ## Example
    /// ```rust
    /// use shopverse_core::geo::Coordinate;
    /// use shopverse_core::viewport::Bounds;
    ///
    /// let points = [
    ///     Coordinate { latitude: 10.0, longitude: 107.0 },
    ///     Coordinate { latitude: 11.0, longitude: 106.0 },
    /// ];
    /// let bounds = Bounds::from_points(points).unwrap();
    /// assert_eq!(bounds.south_west, Coordinate { latitude: 10.0, longitude: 106.0 });
    /// assert_eq!(bounds.north_east, Coordinate { latitude: 11.0, longitude: 107.0 });
    /// ```
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: Located,
    {
        let mut points = points.into_iter().map(|p| p.coordinate());
        let first = points.next()?;

        let mut bounds = Bounds {
            south_west: first,
            north_east: first,
        };
        for point in points {
            bounds.extend(point);
        }
        Some(bounds)
    }

    /// Grows the envelope to include `point`.
    pub fn extend(&mut self, point: Coordinate) {
        self.south_west.latitude = self.south_west.latitude.min(point.latitude);
        self.south_west.longitude = self.south_west.longitude.min(point.longitude);
        self.north_east.latitude = self.north_east.latitude.max(point.latitude);
        self.north_east.longitude = self.north_east.longitude.max(point.longitude);
    }

    /// Inclusive containment check.
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south_west.latitude..=self.north_east.latitude).contains(&point.latitude)
            && (self.south_west.longitude..=self.north_east.longitude).contains(&point.longitude)
    }

    pub fn center(&self) -> Coordinate {
        Coordinate {
            latitude: (self.south_west.latitude + self.north_east.latitude) / 2.0,
            longitude: (self.south_west.longitude + self.north_east.longitude) / 2.0,
        }
    }
}

// =============================================================================
// Camera Plans
// =============================================================================

/// What the map camera should do next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraPlan {
    Center { target: Coordinate, zoom: f64 },
    FitBounds { bounds: Bounds, padding_px: u32 },
}

/// Camera for a fresh location fix.
///
/// Fits the user and every store within `radius_km`; with no store in
/// range the camera centers on the user instead.
///
/// ## Errors
/// Invalid `user` or `radius_km`, as for [`within`].
pub fn plan_user_camera<I>(user: Coordinate, stores: I, radius_km: f64) -> CoreResult<CameraPlan>
where
    I: IntoIterator,
    I::Item: Located,
{
    let nearby = within(user, stores, radius_km)?;
    if nearby.is_empty() {
        return Ok(focus(user, USER_LOCATION_ZOOM));
    }

    let mut bounds = Bounds {
        south_west: user,
        north_east: user,
    };
    for hit in &nearby {
        bounds.extend(hit.item.coordinate());
    }

    Ok(CameraPlan::FitBounds {
        bounds,
        padding_px: NEARBY_PADDING_PX,
    })
}

/// Camera showing the whole catalog, or `None` when there are no stores.
pub fn plan_overview<I>(stores: I) -> Option<CameraPlan>
where
    I: IntoIterator,
    I::Item: Located,
{
    Bounds::from_points(stores).map(|bounds| CameraPlan::FitBounds {
        bounds,
        padding_px: OVERVIEW_PADDING_PX,
    })
}

/// Camera highlighting a single store.
pub fn focus_on(target: Coordinate) -> CameraPlan {
    focus(target, NEAREST_STORE_ZOOM)
}

fn focus(target: Coordinate, zoom: f64) -> CameraPlan {
    CameraPlan::Center { target, zoom }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;

    fn coord(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate {
            latitude,
            longitude,
        }
    }

    fn saigon_stores() -> Vec<(&'static str, Coordinate)> {
        vec![
            ("ben_thanh", coord(10.7725, 106.6980)),
            ("district7", coord(10.7295, 106.7218)),
            ("hanoi", coord(21.0285, 105.8542)),
        ]
    }

    #[test]
    fn test_bounds_from_points() {
        assert!(Bounds::from_points(Vec::<Coordinate>::new()).is_none());

        let single = Bounds::from_points([coord(10.0, 106.0)]).unwrap();
        assert_eq!(single.south_west, single.north_east);

        let bounds = Bounds::from_points(saigon_stores().iter()).unwrap();
        assert_eq!(bounds.south_west, coord(10.7295, 105.8542));
        assert_eq!(bounds.north_east, coord(21.0285, 106.7218));
        assert!(bounds.contains(coord(15.0, 106.0)));
        assert!(!bounds.contains(coord(9.0, 106.0)));
    }

    #[test]
    fn test_bounds_center() {
        let bounds = Bounds::from_points([coord(10.0, 100.0), coord(20.0, 110.0)]).unwrap();
        assert_eq!(bounds.center(), coord(15.0, 105.0));
    }

    #[test]
    fn test_user_camera_fits_nearby_stores() {
        let user = coord(10.7769, 106.7009);
        let plan = plan_user_camera(user, saigon_stores().iter(), 10.0).unwrap();

        match plan {
            CameraPlan::FitBounds { bounds, padding_px } => {
                assert_eq!(padding_px, NEARBY_PADDING_PX);
                assert!(bounds.contains(user));
                assert!(bounds.contains(coord(10.7295, 106.7218)));
                // Hanoi is outside the radius and must not stretch the view
                assert!(!bounds.contains(coord(21.0285, 105.8542)));
            }
            other => panic!("expected FitBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_user_camera_centers_when_nothing_nearby() {
        let user = coord(16.0544, 108.2022);
        let plan = plan_user_camera(user, saigon_stores().iter(), 10.0).unwrap();
        assert_eq!(
            plan,
            CameraPlan::Center {
                target: user,
                zoom: USER_LOCATION_ZOOM
            }
        );
    }

    #[test]
    fn test_user_camera_rejects_bad_radius() {
        let result = plan_user_camera(coord(10.0, 106.0), saigon_stores().iter(), -1.0);
        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn test_overview_and_focus() {
        assert!(plan_overview(Vec::<Coordinate>::new()).is_none());

        match plan_overview(saigon_stores().iter()) {
            Some(CameraPlan::FitBounds { padding_px, .. }) => {
                assert_eq!(padding_px, OVERVIEW_PADDING_PX)
            }
            other => panic!("expected FitBounds, got {:?}", other),
        }

        let store = coord(10.7725, 106.6980);
        assert_eq!(
            focus_on(store),
            CameraPlan::Center {
                target: store,
                zoom: NEAREST_STORE_ZOOM
            }
        );
    }

    #[test]
    fn test_camera_plan_json_is_tagged() {
        let json = serde_json::to_value(focus_on(coord(1.0, 2.0))).unwrap();
        assert_eq!(json["kind"], "center");
        assert_eq!(json["zoom"], 15.0);
    }
}
