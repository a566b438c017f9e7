//! # Checkout Module
//!
//! Turns the selected cart lines into totals and an order draft.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart screen: selected_lines()                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CheckoutSummary::from_lines ──► subtotal + shipping = total            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  prepare_order(user, lines, address) ──► OrderDraft                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  (order service) create order → create items → payment link             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Shipping is a flat fee per order.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::CartLine;
use crate::validation::{validate_amount, validate_cart_lines, validate_shipping_address};

/// Checkout totals shown above the "Place order" button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub item_count: usize,
    pub subtotal: Money,
    pub shipping_fee: Money,
    pub total: Money,
}

impl CheckoutSummary {
    /// Computes totals for the lines being checked out.
    ///
    /// Lines without a product count as items but add nothing to the
    /// subtotal. An empty checkout still carries the shipping fee.
    ///
    /// Totals stay in range for lines that passed
    /// [`validate_cart_lines`] and a fee that passed [`validate_amount`].
    pub fn from_lines<'a, I>(lines: I, shipping_fee: Money) -> Self
    where
        I: IntoIterator<Item = &'a CartLine>,
    {
        let mut item_count = 0;
        let mut subtotal = Money::zero();
        for line in lines {
            item_count += 1;
            subtotal += line.subtotal();
        }

        CheckoutSummary {
            item_count,
            subtotal,
            shipping_fee,
            total: subtotal + shipping_fee,
        }
    }
}

/// Lifecycle of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created, waiting for payment.
    #[default]
    Pending,
    Completed,
    Cancelled,
}

/// One `order_items` row to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemDraft {
    pub product_id: String,
    pub quantity: i64,
    /// Price frozen at checkout time.
    pub unit_price: Money,
}

/// An order ready to be submitted to the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub user_id: String,
    pub address: String,
    pub status: OrderStatus,
    pub total_price: Money,
    pub total_discount: Money,
    pub items: Vec<OrderItemDraft>,
    pub summary: CheckoutSummary,
}

/// Validates a checkout and builds the order draft.
///
/// ## Rules
/// - Blank address: `InvalidInput(Required)`
/// - No lines: `EmptyCheckout`
/// - Invalid line, repeated key or out-of-range shipping fee:
///   `InvalidInput`
/// - Only lines with product data become order items; the price on the
///   item is the snapshot's unit price
/// - `total_price` includes the shipping fee; no discounts are applied
///
/// ## Example
/// ```rust
/// use shopverse_core::checkout::prepare_order;
/// use shopverse_core::{CartLine, Money, ProductSnapshot};
///
/// let lines = vec![CartLine::new("u1", "p1", 2)
///     .with_product(ProductSnapshot::new(Money::from_minor(100_000), 5))];
/// let order = prepare_order("u1", &lines, "1 Le Loi", Money::from_minor(20_000)).unwrap();
/// assert_eq!(order.total_price, Money::from_minor(220_000));
/// ```
pub fn prepare_order(
    user_id: &str,
    lines: &[CartLine],
    address: &str,
    shipping_fee: Money,
) -> CoreResult<OrderDraft> {
    let address = validate_shipping_address(address)?;

    if lines.is_empty() {
        return Err(CoreError::EmptyCheckout);
    }
    validate_cart_lines(lines)?;
    validate_amount("shipping_fee", shipping_fee)?;

    let summary = CheckoutSummary::from_lines(lines, shipping_fee);

    let items = lines
        .iter()
        .filter_map(|line| {
            line.product.as_ref().map(|product| OrderItemDraft {
                product_id: line.product_id.clone(),
                quantity: line.quantity,
                unit_price: product.unit_price,
            })
        })
        .collect();

    Ok(OrderDraft {
        user_id: user_id.to_string(),
        address,
        status: OrderStatus::Pending,
        total_price: summary.total,
        total_discount: Money::zero(),
        items,
        summary,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
