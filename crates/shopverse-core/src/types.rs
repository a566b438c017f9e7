//! # Domain Types
//!
//! Core domain types shared by the map and cart screens.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │     Store       │   │    CartLine     │   │ ProductSnapshot │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id             │   │  user_id  ┐ key │   │  unit_price     │        │
//! │  │  name           │   │  product_id┘    │──►│  stock          │        │
//! │  │  location       │   │  quantity ≥ 1   │   │  is_active      │        │
//! │  │  address, hours │   │  selected (UI)  │   │  name           │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Composite Identity
//! A cart line is identified by `(user_id, product_id)`, mirroring the
//! backend's `cart_items` primary key. There is no surrogate id.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::geo::Coordinate;
use crate::money::Money;
use crate::validation::{validate_amount, validate_quantity, validate_required, ValidationResult};

// =============================================================================
// Store
// =============================================================================

/// A physical store shown on the map.
///
/// Loaded once from the static store catalog and never mutated.
/// Serializes with the flat catalog layout:
/// `{"id", "name", "latitude", "longitude", "address", "hours"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Store {
    /// Unique identifier within the catalog.
    pub id: String,

    /// Display name on the marker and the info panel.
    pub name: String,

    #[serde(flatten)]
    pub location: Coordinate,

    #[serde(default)]
    pub address: String,

    /// Free-text opening hours, e.g. "08:00 - 22:00".
    #[serde(default)]
    pub hours: String,
}

impl Store {
    /// Checks that the store can be placed on the map.
    ///
    /// ## Rules
    /// - `id` and `name` must not be blank
    /// - Coordinates must be in range
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required("id", &self.id)?;
        validate_required("name", &self.name)?;
        self.location.validate()
    }
}

// =============================================================================
// Product Snapshot
// =============================================================================

/// The product data joined onto a cart line.
///
/// Only the fields the cart math needs; the full product lives in the
/// catalog screens. Reads the product service's row as-is: unknown
/// columns (`product_id`, `description`, `brands`, ...) are ignored and
/// `unit_price` may arrive as a whole-number double.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSnapshot {
    #[serde(default, rename = "product_name")]
    pub name: Option<String>,

    /// Price per unit in the smallest currency unit.
    pub unit_price: Money,

    /// Units available for sale.
    pub stock: i64,

    /// Inactive products stay in carts but cannot be bought.
    ///
    /// Carried as `status` (`"active"` / `"inactive"`). A row without a
    /// status counts as active.
    #[serde(rename = "status", with = "product_status", default = "default_true")]
    #[ts(type = "string")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl ProductSnapshot {
    pub fn new(unit_price: Money, stock: i64) -> Self {
        ProductSnapshot {
            name: None,
            unit_price,
            stock,
            is_active: true,
        }
    }

    /// Checks the price bounds. Stock is not checked: a negative stock
    /// just makes the line unavailable.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_amount("unit_price", self.unit_price)
    }
}

/// `status` column of the product row: matched case-insensitively against
/// `"active"`; anything else, including `null`, is inactive.
mod product_status {
    use serde::{Deserialize, Deserializer, Serializer};

    const ACTIVE: &str = "active";
    const INACTIVE: &str = "inactive";

    pub fn serialize<S: Serializer>(is_active: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *is_active { ACTIVE } else { INACTIVE })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let status = Option::<String>::deserialize(deserializer)?;
        Ok(status.is_some_and(|s| s.trim().eq_ignore_ascii_case(ACTIVE)))
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One product in one user's cart.
///
/// ## Invariants
/// - `1 <= quantity <= MAX_LINE_QUANTITY` (enforced by the cart operations,
///   and on the floor by the backend's `CHECK (quantity > 0)`)
/// - `product` is `None` when the product join failed; such a line
///   contributes nothing to totals
/// - `selected` is UI-local: accepted on input, never sent back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub user_id: String,

    pub product_id: String,

    pub quantity: i64,

    /// Joined product row (`products` in the backend's embedded select).
    #[serde(default, rename = "products")]
    pub product: Option<ProductSnapshot>,

    #[serde(default, skip_serializing)]
    #[ts(skip)]
    pub selected: bool,
}

impl CartLine {
    /// Creates an unselected line without product data.
    pub fn new(user_id: impl Into<String>, product_id: impl Into<String>, quantity: i64) -> Self {
        CartLine {
            user_id: user_id.into(),
            product_id: product_id.into(),
            quantity,
            product: None,
            selected: false,
        }
    }

    /// Attaches product data.
    pub fn with_product(mut self, product: ProductSnapshot) -> Self {
        self.product = Some(product);
        self
    }

    /// Sets the selection flag.
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Returns true if this line has the given composite key.
    #[inline]
    pub fn matches(&self, user_id: &str, product_id: &str) -> bool {
        self.user_id == user_id && self.product_id == product_id
    }

    /// Composite key as a single string, `"{user_id}_{product_id}"`.
    ///
    /// Handy as a list-diffing key in the UI.
    pub fn composite_key(&self) -> String {
        format!("{}_{}", self.user_id, self.product_id)
    }

    /// Unit price × quantity, or zero when the product is missing.
    ///
    /// Saturates on lines that never passed [`validate`](Self::validate).
    pub fn subtotal(&self) -> Money {
        self.product
            .as_ref()
            .map(|p| p.unit_price.saturating_multiply_quantity(self.quantity))
            .unwrap_or_default()
    }

    /// Known stock for this line, if the product is present.
    #[inline]
    pub fn stock(&self) -> Option<i64> {
        self.product.as_ref().map(|p| p.stock)
    }

    /// Whether the line can be bought as-is.
    ///
    /// Requires a present, active product with enough stock for the
    /// current quantity.
    pub fn is_available(&self) -> bool {
        self.product
            .as_ref()
            .is_some_and(|p| p.is_active && p.stock >= self.quantity)
    }

    /// Checks the identity fields, the quantity bounds and the joined
    /// product's price.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required("user_id", &self.user_id)?;
        validate_required("product_id", &self.product_id)?;
        validate_quantity(self.quantity)?;
        match &self.product {
            Some(product) => product.validate(),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
