//! # Cart Module
//!
//! In-memory view state for the cart screen.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart View State Operations                           │
//! │                                                                         │
//! │  Screen Action         CartAggregator               Sync collaborator   │
//! │  ─────────────         ──────────────               ─────────────────   │
//! │                                                                         │
//! │  Screen opens ───────► set_lines(rows) ◄─────────── GET cart_items      │
//! │                                                                         │
//! │  Tap "+" / "−" ──────► request_increment/decrement ─► PATCH quantity    │
//! │                        (rejects before any request)                     │
//! │                                                                         │
//! │  Tap checkbox ───────► toggle_selection             (local only)        │
//! │  Tap "select all" ───► set_all_selected             (local only)        │
//! │                                                                         │
//! │  Swipe delete ───────► remove_line ◄──────────────── DELETE confirmed   │
//! │                                                                         │
//! │  Totals bar ─────────► summary() / selected_subtotal()                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are derived on read, so every mutation is immediately reflected
//! in [`CartAggregator::selected_subtotal`] and [`CartAggregator::all_selected`].
//!
//! The aggregator holds no lock. The owning screen serializes mutations
//! (two taps on "+" for the same line must not race).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::CartLine;
use crate::validation::{validate_cart_lines, validate_quantity};
use crate::{MAX_LINE_QUANTITY, MIN_LINE_QUANTITY};

/// Cart lines in the order the sync collaborator delivered them.
///
/// ## Invariants
/// - At most one line per `(user_id, product_id)`
/// - Every held line passes [`CartLine::validate`]
/// - Order is never re-sorted
///
/// Lines only enter through the validating loaders below, so a rejected
/// batch leaves the cart as it was.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CartAggregator {
    lines: Vec<CartLine>,
}

impl CartAggregator {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartAggregator { lines: Vec::new() }
    }

    /// Creates a cart holding `lines` in the given order.
    ///
    /// ## Errors
    /// `InvalidInput` if any line is invalid or a key repeats.
    pub fn from_lines(lines: Vec<CartLine>) -> CoreResult<Self> {
        validate_cart_lines(&lines)?;
        Ok(CartAggregator { lines })
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Replaces the held lines wholesale.
    ///
    /// Selection flags of the previous lines are dropped; the new lines keep
    /// whatever flag they arrived with (fresh rows come in unselected). Use
    /// [`merge_lines`](Self::merge_lines) to carry selection across a reload.
    ///
    /// ## Errors
    /// `InvalidInput` if any line is invalid or a key repeats; the held
    /// lines are kept.
    pub fn set_lines(&mut self, lines: Vec<CartLine>) -> CoreResult<()> {
        validate_cart_lines(&lines)?;
        self.lines = lines;
        Ok(())
    }

    /// Replaces the held lines, re-applying the previous selection by key.
    ///
    /// ## Behavior
    /// - A line whose key was held before keeps its old `selected` flag
    /// - A new key keeps the flag it arrived with
    /// - Keys that disappeared are dropped
    ///
    /// Rejects the same batches as [`set_lines`](Self::set_lines).
    pub fn merge_lines(&mut self, mut lines: Vec<CartLine>) -> CoreResult<()> {
        validate_cart_lines(&lines)?;

        let previous: HashMap<(&str, &str), bool> = self
            .lines
            .iter()
            .map(|l| ((l.user_id.as_str(), l.product_id.as_str()), l.selected))
            .collect();

        for line in &mut lines {
            if let Some(&selected) = previous.get(&(line.user_id.as_str(), line.product_id.as_str())) {
                line.selected = selected;
            }
        }

        self.lines = lines;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Quantity
    // -------------------------------------------------------------------------

    /// Adds one unit to a line.
    ///
    /// ## Behavior
    /// - Unknown key: `LineNotFound`, nothing changes
    /// - Product present and `quantity + 1 > stock`: `StockExceeded`,
    ///   quantity unchanged
    /// - Already at [`MAX_LINE_QUANTITY`]: `AboveMaximum`, quantity unchanged
    /// - Product missing: no stock to check, the increment goes through
    ///
    /// ## Returns
    /// The new quantity.
    pub fn request_increment(&mut self, user_id: &str, product_id: &str) -> CoreResult<i64> {
        let line = self.line_mut(user_id, product_id)?;

        if line.quantity >= MAX_LINE_QUANTITY {
            return Err(CoreError::AboveMaximum {
                product_id: line.product_id.clone(),
                maximum: MAX_LINE_QUANTITY,
            });
        }
        let requested = line.quantity + 1;

        if let Some(available) = line.stock() {
            if requested > available {
                return Err(CoreError::StockExceeded {
                    product_id: line.product_id.clone(),
                    available,
                    requested,
                });
            }
        }

        line.quantity = requested;
        Ok(requested)
    }

    /// Removes one unit from a line.
    ///
    /// A decrement that would go below [`MIN_LINE_QUANTITY`] is rejected
    /// with `BelowMinimum`; it is not clamped and the line is not removed.
    pub fn request_decrement(&mut self, user_id: &str, product_id: &str) -> CoreResult<i64> {
        let line = self.line_mut(user_id, product_id)?;
        let requested = line.quantity - 1;

        if requested < MIN_LINE_QUANTITY {
            return Err(CoreError::BelowMinimum {
                product_id: line.product_id.clone(),
                minimum: MIN_LINE_QUANTITY,
            });
        }

        line.quantity = requested;
        Ok(requested)
    }

    /// Applies a quantity the sync collaborator has confirmed.
    ///
    /// Stock is not re-checked here; the backend row is authoritative.
    pub fn set_quantity(&mut self, user_id: &str, product_id: &str, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;
        let line = self.line_mut(user_id, product_id)?;
        line.quantity = quantity;
        Ok(())
    }

    /// Drops a line after its deletion was confirmed.
    pub fn remove_line(&mut self, user_id: &str, product_id: &str) -> CoreResult<CartLine> {
        let index = self
            .lines
            .iter()
            .position(|l| l.matches(user_id, product_id))
            .ok_or_else(|| CoreError::line_not_found(user_id, product_id))?;
        Ok(self.lines.remove(index))
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Flips the selection flag of exactly one line.
    ///
    /// ## Returns
    /// The line's new flag.
    pub fn toggle_selection(&mut self, user_id: &str, product_id: &str) -> CoreResult<bool> {
        let line = self.line_mut(user_id, product_id)?;
        line.selected = !line.selected;
        Ok(line.selected)
    }

    /// Sets every line's selection flag.
    pub fn set_all_selected(&mut self, value: bool) {
        for line in &mut self.lines {
            line.selected = value;
        }
    }

    /// True iff the cart is non-empty and every line is selected.
    pub fn all_selected(&self) -> bool {
        !self.lines.is_empty() && self.lines.iter().all(|l| l.selected)
    }

    /// Selected lines, in held order.
    pub fn selected_lines(&self) -> Vec<&CartLine> {
        self.lines.iter().filter(|l| l.selected).collect()
    }

    // -------------------------------------------------------------------------
    // Totals
    // -------------------------------------------------------------------------

    /// Sum of `unit_price × quantity` over selected lines with a product.
    pub fn selected_subtotal(&self) -> Money {
        self.lines
            .iter()
            .filter(|l| l.selected)
            .map(CartLine::subtotal)
            .sum()
    }

    /// Totals bar values in one pass over the lines.
    pub fn summary(&self) -> CartSummary {
        CartSummary::from(self)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up a line by composite key.
    pub fn line(&self, user_id: &str, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(user_id, product_id))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, user_id: &str, product_id: &str) -> CoreResult<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.matches(user_id, product_id))
            .ok_or_else(|| CoreError::line_not_found(user_id, product_id))
    }
}

/// Cart totals for the totals bar and the checkout button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub line_count: usize,
    pub selected_count: usize,
    pub selected_quantity: i64,
    pub selected_subtotal: Money,
    pub all_selected: bool,
}

impl From<&CartAggregator> for CartSummary {
    fn from(cart: &CartAggregator) -> Self {
        let selected = cart.lines.iter().filter(|l| l.selected);

        let mut selected_count = 0;
        let mut selected_quantity = 0;
        let mut selected_subtotal = Money::zero();
        for line in selected {
            selected_count += 1;
            selected_quantity += line.quantity;
            selected_subtotal += line.subtotal();
        }

        CartSummary {
            line_count: cart.len(),
            selected_count,
            selected_quantity,
            selected_subtotal,
            all_selected: cart.all_selected(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::ProductSnapshot;

    fn line(product_id: &str, qty: i64, price: i64, stock: i64, selected: bool) -> CartLine {
        CartLine::new("u1", product_id, qty)
            .with_product(ProductSnapshot::new(Money::from_minor(price), stock))
            .with_selected(selected)
    }

    /// [(u1,p1,qty=2,price=100,stock=5,unselected), (u1,p2,qty=1,price=50,stock=1,selected)]
    fn scenario_cart() -> CartAggregator {
        CartAggregator::from_lines(vec![
            line("p1", 2, 100, 5, false),
            line("p2", 1, 50, 1, true),
        ])
        .unwrap()
    }

    #[test]
    fn test_scenario_subtotal_and_toggle() {
        let mut cart = scenario_cart();
        assert_eq!(cart.selected_subtotal(), Money::from_minor(50));

        assert_eq!(cart.toggle_selection("u1", "p1"), Ok(true));
        assert_eq!(cart.selected_subtotal(), Money::from_minor(250));
        assert!(cart.all_selected());
    }

    #[test]
    fn test_increment_rejected_at_stock() {
        let mut cart = scenario_cart();

        let err = cart.request_increment("u1", "p2").unwrap_err();
        assert_eq!(
            err,
            CoreError::StockExceeded {
                product_id: "p2".to_string(),
                available: 1,
                requested: 2,
            }
        );
        assert_eq!(cart.line("u1", "p2").unwrap().quantity, 1);
    }

    #[test]
    fn test_increment_within_stock() {
        let mut cart = scenario_cart();
        assert_eq!(cart.request_increment("u1", "p1"), Ok(3));
        assert_eq!(cart.request_increment("u1", "p1"), Ok(4));
        assert_eq!(cart.request_increment("u1", "p1"), Ok(5));
        assert!(matches!(
            cart.request_increment("u1", "p1"),
            Err(CoreError::StockExceeded { .. })
        ));
        assert_eq!(cart.line("u1", "p1").unwrap().quantity, 5);
    }

    #[test]
    fn test_increment_without_product_is_unbounded() {
        let mut cart = CartAggregator::from_lines(vec![CartLine::new("u1", "ghost", 1)]).unwrap();
        assert_eq!(cart.request_increment("u1", "ghost"), Ok(2));
    }

    #[test]
    fn test_increment_stops_at_line_cap() {
        let mut cart = CartAggregator::from_lines(vec![
            line("p1", MAX_LINE_QUANTITY - 1, 100, i64::MAX, false),
            CartLine::new("u1", "ghost", MAX_LINE_QUANTITY),
        ])
        .unwrap();

        assert_eq!(cart.request_increment("u1", "p1"), Ok(MAX_LINE_QUANTITY));
        for product_id in ["p1", "ghost"] {
            assert_eq!(
                cart.request_increment("u1", product_id),
                Err(CoreError::AboveMaximum {
                    product_id: product_id.to_string(),
                    maximum: MAX_LINE_QUANTITY,
                })
            );
            assert_eq!(cart.line("u1", product_id).unwrap().quantity, MAX_LINE_QUANTITY);
        }
    }

    #[test]
    fn test_decrement_rejected_at_one() {
        let mut cart = scenario_cart();

        assert_eq!(
            cart.request_decrement("u1", "p2"),
            Err(CoreError::BelowMinimum {
                product_id: "p2".to_string(),
                minimum: 1,
            })
        );
        assert_eq!(cart.line("u1", "p2").unwrap().quantity, 1);

        assert_eq!(cart.request_decrement("u1", "p1"), Ok(1));
    }

    #[test]
    fn test_missing_key_is_not_found_and_noop() {
        let mut cart = scenario_cart();
        let before = cart.clone();

        let not_found = CoreError::line_not_found("u2", "p1");
        assert_eq!(cart.request_increment("u2", "p1"), Err(not_found.clone()));
        assert_eq!(cart.request_decrement("u2", "p1"), Err(not_found.clone()));
        assert_eq!(cart.toggle_selection("u2", "p1"), Err(not_found.clone()));
        assert_eq!(cart.remove_line("u2", "p1"), Err(not_found));

        assert_eq!(cart.lines(), before.lines());
    }

    #[test]
    fn test_all_selected_edge_cases() {
        let mut empty = CartAggregator::new();
        assert!(!empty.all_selected());
        empty.set_all_selected(true);
        assert!(!empty.all_selected());

        let mut cart = scenario_cart();
        assert!(!cart.all_selected());

        cart.set_all_selected(true);
        assert!(cart.all_selected());

        cart.set_all_selected(false);
        assert!(!cart.all_selected());
        assert_eq!(cart.selected_subtotal(), Money::zero());
    }

    #[test]
    fn test_subtotal_ignores_lines_without_product() {
        let mut cart = CartAggregator::from_lines(vec![
            line("p1", 2, 100, 5, true),
            CartLine::new("u1", "ghost", 3).with_selected(true),
        ])
        .unwrap();
        assert_eq!(cart.selected_subtotal(), Money::from_minor(200));

        cart.toggle_selection("u1", "p1").unwrap();
        assert_eq!(cart.selected_subtotal(), Money::zero());
    }

    #[test]
    fn test_selected_lines_keep_order() {
        let cart = CartAggregator::from_lines(vec![
            line("p3", 1, 10, 9, true),
            line("p1", 1, 10, 9, false),
            line("p2", 1, 10, 9, true),
        ])
        .unwrap();
        let ids: Vec<_> = cart
            .selected_lines()
            .iter()
            .map(|l| l.product_id.as_str())
            .collect();
        assert_eq!(ids, vec!["p3", "p2"]);
    }

    #[test]
    fn test_set_lines_drops_selection() {
        let mut cart = scenario_cart();
        cart.set_all_selected(true);

        cart.set_lines(vec![line("p1", 2, 100, 5, false), line("p2", 1, 50, 1, false)])
            .unwrap();
        assert!(cart.selected_lines().is_empty());
        assert_eq!(cart.selected_subtotal(), Money::zero());
    }

    #[test]
    fn test_merge_lines_keeps_selection_by_key() {
        let mut cart = scenario_cart();
        cart.toggle_selection("u1", "p1").unwrap();

        cart.merge_lines(vec![
            line("p2", 1, 50, 3, false),
            line("p1", 4, 100, 5, false),
            line("p9", 1, 10, 1, false),
        ])
        .unwrap();

        assert!(cart.line("u1", "p1").unwrap().selected);
        assert!(cart.line("u1", "p2").unwrap().selected);
        assert!(!cart.line("u1", "p9").unwrap().selected);
        assert_eq!(cart.line("u1", "p1").unwrap().quantity, 4);
        assert_eq!(cart.lines()[0].product_id, "p2");
    }

    #[test]
    fn test_loaders_reject_invalid_batches() {
        let batches = [
            vec![line("p1", 0, 100, 5, true)],
            vec![line("p1", -3, 100, 5, true), line("p2", 2, 100, 5, true)],
            vec![line("p1", 1, 100, 5, true), line("p1", 2, 100, 5, true)],
            vec![line("p1", MAX_LINE_QUANTITY + 1, 100, 5, true)],
            vec![line("p1", 1, -100, 5, true)],
        ];

        for batch in batches {
            assert!(matches!(
                CartAggregator::from_lines(batch.clone()),
                Err(CoreError::InvalidInput(_))
            ));

            let mut cart = scenario_cart();
            let before = cart.lines().to_vec();
            assert!(cart.set_lines(batch.clone()).is_err());
            assert!(cart.merge_lines(batch).is_err());
            assert_eq!(cart.lines(), before.as_slice());
            assert_eq!(cart.selected_subtotal(), Money::from_minor(50));
        }
    }

    #[test]
    fn test_duplicate_key_reports_composite_key() {
        let err = CartAggregator::from_lines(vec![
            line("p1", 2, 100, 5, true),
            line("p1", 2, 100, 5, true),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidInput(ValidationError::Duplicate {
                field: "cart line".to_string(),
                value: "u1_p1".to_string(),
            })
        );
    }

    #[test]
    fn test_set_quantity_and_remove() {
        let mut cart = scenario_cart();

        cart.set_quantity("u1", "p1", 4).unwrap();
        assert_eq!(cart.line("u1", "p1").unwrap().quantity, 4);
        assert!(matches!(
            cart.set_quantity("u1", "p1", 0),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(matches!(
            cart.set_quantity("u1", "p1", MAX_LINE_QUANTITY + 1),
            Err(CoreError::InvalidInput(_))
        ));
        assert_eq!(cart.line("u1", "p1").unwrap().quantity, 4);

        let removed = cart.remove_line("u1", "p2").unwrap();
        assert_eq!(removed.product_id, "p2");
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.selected_subtotal(), Money::zero());
    }

    #[test]
    fn test_summary() {
        let mut cart = scenario_cart();
        cart.set_all_selected(true);

        let summary = cart.summary();
        assert_eq!(
            summary,
            CartSummary {
                line_count: 2,
                selected_count: 2,
                selected_quantity: 3,
                selected_subtotal: Money::from_minor(250),
                all_selected: true,
            }
        );
    }
}
