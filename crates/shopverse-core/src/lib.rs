//! # shopverse-core: Pure Storefront Logic for Shopverse
//!
//! This crate holds the store-locator math and the cart/checkout rules of
//! the Shopverse storefront as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Shopverse Storefront Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                 storefront-cli (shopverse binary)               │    │
//! │  │    stores ─── nearest ─── nearby ─── checkout                   │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │             shopverse-locator (catalog loading + cache)         │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ shopverse-core (THIS CRATE) ★                   │    │
//! │  │                                                                 │    │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐  │    │
//! │  │   │   geo   │ │viewport │ │  cart   │ │ checkout │ │  money  │  │    │
//! │  │   │ nearest │ │ camera  │ │ +/- qty │ │ summary  │ │  Money  │  │    │
//! │  │   │ within  │ │ bounds  │ │ select  │ │  order   │ │         │  │    │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └─────────┘  │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO NETWORK • NO LOGGING • PURE FUNCTIONS             │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`geo`] - Haversine distance, nearest / within queries, distance labels
//! - [`viewport`] - Map camera plans derived from the user and the stores
//! - [`cart`] - Cart view state: quantities, selection, selected subtotal
//! - [`checkout`] - Checkout totals and order drafts
//! - [`types`] - Domain types (Store, CartLine, ProductSnapshot)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use shopverse_core::geo::{format_distance, nearest, Coordinate};
//!
//! let user = Coordinate::new(10.7769, 106.7009).unwrap();
//! let stores = [
//!     ("district7", Coordinate::new(10.7295, 106.7218).unwrap()),
//!     ("ben_thanh", Coordinate::new(10.7725, 106.6980).unwrap()),
//! ];
//!
//! let hit = nearest(user, stores.iter()).unwrap().unwrap();
//! assert_eq!(hit.item.0, "ben_thanh");
//! assert_eq!(format_distance(hit.distance_km), "583 m");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod geo;
pub mod money;
pub mod types;
pub mod validation;
pub mod viewport;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartAggregator, CartSummary};
pub use checkout::{CheckoutSummary, OrderDraft, OrderStatus};
pub use error::{CoreError, CoreResult, ValidationError};
pub use geo::{Coordinate, Located, Proximity};
pub use money::Money;
pub use types::*;
pub use viewport::{Bounds, CameraPlan};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Radius of the "stores around me" view on the map.
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 10.0;

/// Smallest quantity a cart line may hold.
///
/// Going below it is a removal, which the cart screen confirms separately.
pub const MIN_LINE_QUANTITY: i64 = 1;

/// Largest quantity a cart line may hold.
///
/// ## Business Reason
/// Stops a mistyped quantity (1000 instead of 10) from reaching checkout.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum number of lines a cart may hold.
pub const MAX_CART_LINES: usize = 100;

/// Largest unit price or fee accepted, in minor units.
///
/// Together with [`MAX_LINE_QUANTITY`] and [`MAX_CART_LINES`] this keeps every
/// cart and order total inside `i64`.
pub const MAX_AMOUNT: Money = Money::from_minor(1_000_000_000_000);

/// Flat shipping fee added to every order (20 000 ₫).
pub const DEFAULT_SHIPPING_FEE: Money = Money::from_minor(20_000);
