//! Command handlers.
//!
//! Each handler loads what it needs, logs at debug level and prints its
//! result to stdout. Logs go to stderr.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use shopverse_core::checkout::{prepare_order, OrderDraft};
use shopverse_core::geo::{format_distance, Coordinate};
use shopverse_core::viewport::{focus_on, plan_overview, plan_user_camera};
use shopverse_core::{CartAggregator, CartLine, CoreError, Money};
use shopverse_locator::StoreRepository;

use crate::error::{AppError, AppResult};

/// `shopverse stores`
pub async fn list_stores(repo: &StoreRepository) -> AppResult<()> {
    let catalog = repo.load().await?;

    if let Some(plan) = plan_overview(&catalog.stores) {
        debug!(?plan, "Overview camera");
    }

    if catalog.stores.is_empty() {
        println!("No stores available");
        return Ok(());
    }

    for store in &catalog.stores {
        println!("{:<12} {:<24} {}", store.id, store.name, store.address);
    }
    Ok(())
}

/// `shopverse nearest --lat --lon`
pub async fn nearest(repo: &StoreRepository, lat: f64, lon: f64) -> AppResult<()> {
    let origin = Coordinate::new(lat, lon)?;

    match repo.nearest(origin).await? {
        Some(hit) => {
            debug!(plan = ?focus_on(hit.item.location), "Nearest store camera");
            println!(
                "{} ({}) - {}",
                hit.item.name,
                format_distance(hit.distance_km),
                hit.item.address
            );
        }
        None => println!("No stores available"),
    }
    Ok(())
}

/// `shopverse nearby --lat --lon [--radius-km]`
pub async fn nearby(repo: &StoreRepository, lat: f64, lon: f64, radius_km: f64) -> AppResult<()> {
    let origin = Coordinate::new(lat, lon)?;
    let hits = repo.nearby(origin, radius_km).await?;

    let catalog = repo.load().await?;
    let plan = plan_user_camera(origin, &catalog.stores, radius_km)?;
    debug!(?plan, "User camera");

    if hits.is_empty() {
        println!("No stores within {}", format_distance(radius_km));
        return Ok(());
    }

    for hit in &hits {
        println!("{:>9}  {}", format_distance(hit.distance_km), hit.item.name);
    }
    Ok(())
}

/// `shopverse checkout --cart <file> --address <text> [--select-all]`
pub async fn checkout(
    cart_path: &Path,
    address: &str,
    select_all: bool,
    shipping_fee: Money,
) -> AppResult<()> {
    let json = tokio::fs::read_to_string(cart_path)
        .await
        .map_err(|source| AppError::CartFile {
            path: cart_path.to_path_buf(),
            source,
        })?;
    let document: CartDocument = serde_json::from_str(&json)?;

    let order = build_order(document, address, select_all, shipping_fee)?;
    info!(
        user_id = %order.user_id,
        items = order.items.len(),
        total = order.total_price.minor(),
        "Order draft prepared"
    );

    println!("Items:     {}", order.summary.item_count);
    println!("Subtotal:  {}", order.summary.subtotal.minor());
    println!("Shipping:  {}", order.summary.shipping_fee.minor());
    println!("Total:     {}", order.total_price.minor());
    println!("Ship to:   {}", order.address);
    Ok(())
}

/// Cart document as exported by the cart service: `{"lines": [...]}`.
#[derive(Debug, Deserialize)]
pub struct CartDocument {
    #[serde(default)]
    pub lines: Vec<CartLine>,
}

/// Runs the cart screen's checkout path over a cart document.
pub fn build_order(
    document: CartDocument,
    address: &str,
    select_all: bool,
    shipping_fee: Money,
) -> AppResult<OrderDraft> {
    let mut cart = CartAggregator::from_lines(document.lines)?;
    if select_all {
        cart.set_all_selected(true);
    }

    let summary = cart.summary();
    debug!(
        lines = summary.line_count,
        selected = summary.selected_count,
        subtotal = summary.selected_subtotal.minor(),
        "Cart loaded"
    );

    let selected: Vec<CartLine> = cart.selected_lines().into_iter().cloned().collect();
    let user_id = selected
        .first()
        .map(|line| line.user_id.clone())
        .ok_or(CoreError::EmptyCheckout)?;

    Ok(prepare_order(&user_id, &selected, address, shipping_fee)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CART: &str = r#"{"lines": [
        {"user_id": "u1", "product_id": "p1", "quantity": 2,
         "products": {"unit_price": 100, "stock": 5}, "selected": false},
        {"user_id": "u1", "product_id": "p2", "quantity": 1,
         "products": {"product_name": "Cap", "unit_price": 50.0, "stock": 1,
                      "status": "active"}, "selected": true}
    ]}"#;

    fn document() -> CartDocument {
        serde_json::from_str(CART).unwrap()
    }

    #[test]
    fn test_build_order_uses_selected_lines() {
        let order = build_order(document(), "1 Le Loi", false, Money::from_minor(20_000)).unwrap();
        assert_eq!(order.user_id, "u1");
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.summary.subtotal, Money::from_minor(50));
        assert_eq!(order.total_price, Money::from_minor(20_050));
    }

    #[test]
    fn test_build_order_select_all() {
        let order = build_order(document(), "1 Le Loi", true, Money::zero()).unwrap();
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total_price, Money::from_minor(250));
    }

    #[test]
    fn test_build_order_nothing_selected() {
        let document: CartDocument = serde_json::from_str(r#"{"lines": []}"#).unwrap();
        assert!(matches!(
            build_order(document, "1 Le Loi", true, Money::zero()),
            Err(AppError::Core(CoreError::EmptyCheckout))
        ));
    }

    #[test]
    fn test_build_order_rejects_invalid_lines() {
        for lines in [
            r#"[{"user_id": "u1", "product_id": "p1", "quantity": -3,
                 "products": {"unit_price": 100, "stock": 5}, "selected": true},
                {"user_id": "u1", "product_id": "p2", "quantity": 2,
                 "products": {"unit_price": 100, "stock": 5}, "selected": true}]"#,
            r#"[{"user_id": "u1", "product_id": "p1", "quantity": 1, "selected": true},
                {"user_id": "u1", "product_id": "p1", "quantity": 2, "selected": true}]"#,
        ] {
            let document: CartDocument =
                serde_json::from_str(&format!(r#"{{"lines": {lines}}}"#)).unwrap();
            assert!(matches!(
                build_order(document, "1 Le Loi", true, Money::zero()),
                Err(AppError::Core(CoreError::InvalidInput(_)))
            ));
        }
    }

    #[test]
    fn test_bundled_cart_asset() {
        let document: CartDocument =
            serde_json::from_str(include_str!("../assets/cart.json")).unwrap();
        let order = build_order(document, "1 Le Loi", false, Money::from_minor(20_000)).unwrap();

        assert_eq!(order.user_id, "user_42");
        assert_eq!(order.summary.item_count, 2);
        assert_eq!(order.summary.subtotal, Money::from_minor(300_000));
        assert_eq!(order.total_price, Money::from_minor(320_000));
    }

    #[test]
    fn test_build_order_blank_address() {
        assert!(matches!(
            build_order(document(), "  ", false, Money::zero()),
            Err(AppError::Core(CoreError::InvalidInput(_)))
        ));
    }
}
