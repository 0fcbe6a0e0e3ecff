//! Cart and stock reservation workflow.
//!
//! Every operation takes the stores it touches by reference and validates
//! before it mutates, so a failed call leaves catalog and cart untouched.
//! Available stock moves as units enter and leave the cart; total stock
//! only moves at checkout (and through catalog edits).

use std::collections::HashMap;

use orderflow_catalog::{Catalog, CatalogError, InventoryError, Product, ProductDraft};
use orderflow_offer::OfferBook;
use orderflow_shared::ProductId;
use tracing::debug;

use crate::cart::{Cart, CartLine, CartRecord};
use crate::error::CartError;
use crate::models::Order;
use crate::notifier::CheckoutNotifier;
use crate::pricing::PricingEngine;

/// Reserve one more unit of `product_id`. Returns the line's new quantity.
pub fn add_item(
    catalog: &mut Catalog,
    cart: &mut Cart,
    product_id: &ProductId,
) -> Result<u32, CartError> {
    let product = catalog.get(product_id)?;
    let available = product.stock.available();

    let quantity = match cart.line(product_id) {
        None => {
            if available == 0 {
                return Err(CartError::OutOfStock(*product_id));
            }
            let line = CartLine::new(product, 1);
            catalog.reserve(product_id, 1)?;
            cart.push(line);
            1
        }
        Some(line) => {
            if available == 0 {
                return Err(CartError::StockLimitExceeded {
                    product_id: *product_id,
                    requested: 1,
                    available,
                });
            }
            let quantity = line.quantity + 1;
            catalog.reserve(product_id, 1)?;
            set_line_quantity(cart, product_id, quantity)?;
            quantity
        }
    };

    debug!(product_id = %product_id, quantity, "cart item added");
    Ok(quantity)
}

/// Set a line to exactly `quantity` units; zero removes the line.
pub fn set_quantity(
    catalog: &mut Catalog,
    cart: &mut Cart,
    product_id: &ProductId,
    quantity: u32,
) -> Result<u32, CartError> {
    let available = catalog.get(product_id)?.stock.available();
    let current = cart
        .line(product_id)
        .map(|line| line.quantity)
        .ok_or(CartError::NotInCart(*product_id))?;

    if quantity == 0 {
        remove_line(catalog, cart, product_id)?;
        return Ok(0);
    }

    if quantity > current {
        let delta = quantity - current;
        if delta > available {
            return Err(CartError::StockLimitExceeded {
                product_id: *product_id,
                requested: delta,
                available,
            });
        }
        catalog.reserve(product_id, delta)?;
    } else if quantity < current {
        catalog.release(product_id, current - quantity)?;
    }

    set_line_quantity(cart, product_id, quantity)?;
    debug!(product_id = %product_id, from = current, to = quantity, "cart quantity set");
    Ok(quantity)
}

/// Drop a line and hand its units back to available stock.
pub fn remove_line(
    catalog: &mut Catalog,
    cart: &mut Cart,
    product_id: &ProductId,
) -> Result<CartLine, CartError> {
    let quantity = cart
        .line(product_id)
        .map(|line| line.quantity)
        .ok_or(CartError::NotInCart(*product_id))?;

    catalog.release(product_id, quantity)?;
    let line = cart
        .remove(product_id)
        .ok_or(CartError::NotInCart(*product_id))?;

    debug!(product_id = %product_id, released = quantity, "cart line removed");
    Ok(line)
}

/// Release every reservation and empty the cart.
pub fn clear_cart(catalog: &mut Catalog, cart: &mut Cart) -> Result<(), CartError> {
    for line in cart.lines() {
        let reserved = catalog.get(&line.product_id)?.stock.reserved();
        if reserved < line.quantity {
            return Err(CartError::Catalog(CatalogError::Inventory(
                InventoryError::InsufficientReserved {
                    requested: line.quantity,
                    reserved,
                },
            )));
        }
    }

    for line in cart.lines() {
        catalog.release(&line.product_id, line.quantity)?;
    }
    let released = cart.unit_count();
    cart.clear();

    debug!(released, "cart cleared");
    Ok(())
}

/// Turn the cart into an order.
///
/// Total stock drops by each line's quantity; available stock already
/// excludes those units and does not change. The cart ends up empty.
pub fn checkout(
    catalog: &mut Catalog,
    cart: &mut Cart,
    engine: &PricingEngine<'_>,
    notifier: &dyn CheckoutNotifier,
) -> Result<Order, CartError> {
    if cart.is_empty() {
        return Err(CartError::EmptyCart);
    }

    for line in cart.lines() {
        catalog
            .get(&line.product_id)?
            .stock
            .check_commit(line.quantity)
            .map_err(CatalogError::Inventory)?;
    }

    let order = Order::from_pricing(engine.price_cart(cart));

    for line in cart.lines() {
        catalog.commit(&line.product_id, line.quantity)?;
    }
    cart.clear();

    debug!(
        order_id = %order.id,
        lines = order.lines.len(),
        units = order.unit_count(),
        total = %order.total,
        "checkout complete"
    );
    notifier.order_placed(&order);

    Ok(order)
}

/// Rebuild the cart from persisted records.
///
/// Duplicate records for one product are merged. Stored subtotals are
/// ignored and recomputed from current prices. Units already held by the
/// current cart count as available, since the current cart is released
/// first. Any bad record rejects the whole restore.
pub fn restore_cart(
    catalog: &mut Catalog,
    cart: &mut Cart,
    records: &[CartRecord],
) -> Result<(), CartError> {
    let mut order: Vec<ProductId> = Vec::new();
    let mut wanted: HashMap<ProductId, u32> = HashMap::new();

    for record in records {
        if record.quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }
        let quantity = wanted.entry(record.product_id).or_insert_with(|| {
            order.push(record.product_id);
            0
        });
        *quantity = quantity.saturating_add(record.quantity);
    }

    for product_id in &order {
        let quantity = wanted[product_id];
        let product = catalog.get(product_id)?;
        let available = product.stock.available() + cart.quantity_of(product_id);
        if available == 0 {
            return Err(CartError::OutOfStock(*product_id));
        }
        if quantity > available {
            return Err(CartError::StockLimitExceeded {
                product_id: *product_id,
                requested: quantity,
                available,
            });
        }
    }

    clear_cart(catalog, cart)?;

    for product_id in &order {
        let quantity = wanted[product_id];
        let line = CartLine::new(catalog.get(product_id)?, quantity);
        catalog.reserve(product_id, quantity)?;
        cart.push(line);
    }

    debug!(lines = cart.len(), units = cart.unit_count(), "cart restored");
    Ok(())
}

/// Edit a product and keep its cart line's name and price in step.
pub fn update_product(
    catalog: &mut Catalog,
    cart: &mut Cart,
    product_id: &ProductId,
    draft: ProductDraft,
) -> Result<Product, CartError> {
    let product = catalog.update(product_id, draft)?.clone();

    if let Some(line) = cart.line_mut(product_id) {
        line.name = product.name.clone();
        line.unit_price = product.price;
        debug!(product_id = %product_id, price = %product.price, "cart line repriced");
    }

    Ok(product)
}

/// Remove a product from the catalog together with its cart line and any
/// offers scoped to it.
pub fn delete_product(
    catalog: &mut Catalog,
    offers: &mut OfferBook,
    cart: &mut Cart,
    product_id: &ProductId,
) -> Result<Product, CartError> {
    catalog.get(product_id)?;

    if cart.line(product_id).is_some() {
        remove_line(catalog, cart, product_id)?;
    }
    let dropped = offers.remove_targeting(product_id);
    let product = catalog.remove(product_id)?;

    debug!(
        product_id = %product_id,
        offers_dropped = dropped.len(),
        "product deleted"
    );
    Ok(product)
}

fn set_line_quantity(
    cart: &mut Cart,
    product_id: &ProductId,
    quantity: u32,
) -> Result<(), CartError> {
    let line = cart
        .line_mut(product_id)
        .ok_or(CartError::NotInCart(*product_id))?;
    line.quantity = quantity;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderflow_catalog::MAX_PRICE;
    use orderflow_offer::{OfferDraft, OfferScope};
    use orderflow_shared::OrderId;
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        placed: Mutex<Vec<OrderId>>,
    }

    impl CheckoutNotifier for RecordingNotifier {
        fn order_placed(&self, order: &Order) {
            self.placed.lock().unwrap().push(order.id);
        }
    }

    fn product(catalog: &mut Catalog, name: &str, cents: i64, stock: u32) -> ProductId {
        catalog
            .insert(ProductDraft::new(name, Decimal::new(cents, 2), stock))
            .unwrap()
            .id
    }

    fn counters(catalog: &Catalog, id: &ProductId) -> (u32, u32) {
        let stock = &catalog.get(id).unwrap().stock;
        (stock.stock(), stock.available())
    }

    fn assert_stock_invariant(catalog: &Catalog) {
        for product in catalog.list() {
            assert!(product.stock.available() <= product.stock.stock());
        }
    }

    #[test]
    fn test_reservation_scenario() {
        let mut catalog = Catalog::new();
        let mut cart = Cart::new();
        let p = product(&mut catalog, "P", 1000, 5);

        for _ in 0..3 {
            add_item(&mut catalog, &mut cart, &p).unwrap();
        }
        assert_eq!(cart.quantity_of(&p), 3);
        assert_eq!(counters(&catalog, &p), (5, 2));

        assert_eq!(add_item(&mut catalog, &mut cart, &p).unwrap(), 4);
        assert_eq!(counters(&catalog, &p), (5, 1));

        let line = remove_line(&mut catalog, &mut cart, &p).unwrap();
        assert_eq!(line.quantity, 4);
        assert!(cart.is_empty());
        assert_eq!(counters(&catalog, &p), (5, 5));
    }

    #[test]
    fn test_add_out_of_stock() {
        let mut catalog = Catalog::new();
        let mut cart = Cart::new();
        let chocolate = product(&mut catalog, "Artisan Chocolate", 1299, 0);

        let err = add_item(&mut catalog, &mut cart, &chocolate).unwrap_err();
        assert_eq!(err, CartError::OutOfStock(chocolate));
        assert!(cart.is_empty());
        assert_eq!(counters(&catalog, &chocolate), (0, 0));
    }

    #[test]
    fn test_add_past_limit_leaves_state() {
        let mut catalog = Catalog::new();
        let mut cart = Cart::new();
        let p = product(&mut catalog, "P", 100, 2);

        add_item(&mut catalog, &mut cart, &p).unwrap();
        add_item(&mut catalog, &mut cart, &p).unwrap();
        let err = add_item(&mut catalog, &mut cart, &p).unwrap_err();

        assert!(matches!(err, CartError::StockLimitExceeded { available: 0, .. }));
        assert_eq!(cart.quantity_of(&p), 2);
        assert_eq!(counters(&catalog, &p), (2, 0));
    }

    #[test]
    fn test_add_unknown_product() {
        let mut catalog = Catalog::new();
        let mut cart = Cart::new();
        let ghost = ProductId::new();

        let err = add_item(&mut catalog, &mut cart, &ghost).unwrap_err();
        assert_eq!(err, CartError::UnknownProduct(ghost));
    }

    #[test]
    fn test_set_quantity_moves_stock_by_delta() {
        let mut catalog = Catalog::new();
        let mut cart = Cart::new();
        let p = product(&mut catalog, "P", 250, 10);
        add_item(&mut catalog, &mut cart, &p).unwrap();

        set_quantity(&mut catalog, &mut cart, &p, 6).unwrap();
        assert_eq!(counters(&catalog, &p), (10, 4));
        assert_eq!(cart.line(&p).unwrap().subtotal(), Decimal::new(1500, 2));

        set_quantity(&mut catalog, &mut cart, &p, 2).unwrap();
        assert_eq!(counters(&catalog, &p), (10, 8));

        let err = set_quantity(&mut catalog, &mut cart, &p, 11).unwrap_err();
        assert_eq!(
            err,
            CartError::StockLimitExceeded {
                product_id: p,
                requested: 9,
                available: 8,
            }
        );
        assert_eq!(cart.quantity_of(&p), 2);
        assert_eq!(counters(&catalog, &p), (10, 8));

        assert_eq!(set_quantity(&mut catalog, &mut cart, &p, 0).unwrap(), 0);
        assert!(cart.line(&p).is_none());
        assert_eq!(counters(&catalog, &p), (10, 10));
    }

    #[test]
    fn test_missing_line() {
        let mut catalog = Catalog::new();
        let mut cart = Cart::new();
        let p = product(&mut catalog, "P", 100, 3);

        assert_eq!(
            set_quantity(&mut catalog, &mut cart, &p, 2).unwrap_err(),
            CartError::NotInCart(p)
        );
        assert_eq!(
            remove_line(&mut catalog, &mut cart, &p).unwrap_err(),
            CartError::NotInCart(p)
        );
        assert_eq!(counters(&catalog, &p), (3, 3));
    }

    #[test]
    fn test_stock_invariant_over_sequence() {
        let mut catalog = Catalog::new();
        let mut cart = Cart::new();
        let a = product(&mut catalog, "A", 100, 4);
        let b = product(&mut catalog, "B", 200, 1);

        let _ = add_item(&mut catalog, &mut cart, &a);
        let _ = add_item(&mut catalog, &mut cart, &b);
        let _ = add_item(&mut catalog, &mut cart, &b);
        let _ = set_quantity(&mut catalog, &mut cart, &a, 9);
        let _ = set_quantity(&mut catalog, &mut cart, &a, 4);
        let _ = add_item(&mut catalog, &mut cart, &a);
        let _ = set_quantity(&mut catalog, &mut cart, &a, 1);
        let _ = remove_line(&mut catalog, &mut cart, &b);
        let _ = remove_line(&mut catalog, &mut cart, &b);

        assert_stock_invariant(&catalog);
        assert_eq!(counters(&catalog, &a), (4, 3));
        assert_eq!(counters(&catalog, &b), (1, 1));
    }

    #[test]
    fn test_checkout_commits_total_stock() {
        let mut catalog = Catalog::new();
        let mut offers = OfferBook::new();
        let mut cart = Cart::new();
        let coffee = product(&mut catalog, "Coffee", 2499, 50);
        let tea = product(&mut catalog, "Tea", 1899, 30);
        offers
            .insert(
                OfferDraft::new("15% coffee", Decimal::new(15, 0), 3, OfferScope::Product(coffee)),
                &catalog,
            )
            .unwrap();

        add_item(&mut catalog, &mut cart, &coffee).unwrap();
        set_quantity(&mut catalog, &mut cart, &coffee, 3).unwrap();
        add_item(&mut catalog, &mut cart, &tea).unwrap();

        let notifier = RecordingNotifier::default();
        let engine = PricingEngine::new(offers.list());
        let order = checkout(&mut catalog, &mut cart, &engine, &notifier).unwrap();

        assert!(cart.is_empty());
        assert_eq!(counters(&catalog, &coffee), (47, 47));
        assert_eq!(counters(&catalog, &tea), (29, 29));
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.unit_count(), 4);
        assert_eq!(order.original_total, Decimal::new(9396, 2));
        assert_eq!(order.total, Decimal::new(827145, 4));
        assert!(order.lines[0].applied_offer.is_some());
        assert_eq!(*notifier.placed.lock().unwrap(), vec![order.id]);
    }

    #[test]
    fn test_ceiling_priced_cart_totals() {
        let mut catalog = Catalog::new();
        let mut offers = OfferBook::new();
        let mut cart = Cart::new();
        let gold = catalog
            .insert(ProductDraft::new("Gold", MAX_PRICE, u32::MAX))
            .unwrap()
            .id;
        let silver = catalog
            .insert(ProductDraft::new("Silver", MAX_PRICE, u32::MAX))
            .unwrap()
            .id;
        offers
            .insert(OfferDraft::new("10%", Decimal::TEN, 2, OfferScope::AllProducts), &catalog)
            .unwrap();

        add_item(&mut catalog, &mut cart, &gold).unwrap();
        add_item(&mut catalog, &mut cart, &gold).unwrap();
        add_item(&mut catalog, &mut cart, &silver).unwrap();
        set_quantity(&mut catalog, &mut cart, &silver, u32::MAX).unwrap();

        let line_max = MAX_PRICE * Decimal::from(u32::MAX);
        let engine = PricingEngine::new(offers.list());
        let totals = engine.cart_totals(&cart);
        assert_eq!(totals.original_total, MAX_PRICE * Decimal::TWO + line_max);
        assert_eq!(totals.savings, totals.original_total / Decimal::TEN);
        assert_eq!(cart.to_records()[1].subtotal, line_max);

        // A price past the ceiling never reaches the line
        let draft = ProductDraft::new("Gold", Decimal::MAX, 10);
        let err = update_product(&mut catalog, &mut cart, &gold, draft).unwrap_err();
        assert!(matches!(err, CartError::Catalog(CatalogError::InvalidProduct(_))));
        assert_eq!(cart.line(&gold).unwrap().unit_price, MAX_PRICE);

        let order = checkout(&mut catalog, &mut cart, &engine, &RecordingNotifier::default()).unwrap();
        assert_eq!(order.total, totals.total);
        assert_eq!(counters(&catalog, &silver), (0, 0));
    }

    #[test]
    fn test_empty_checkout_mutates_nothing() {
        let mut catalog = Catalog::new();
        let mut cart = Cart::new();
        let p = product(&mut catalog, "P", 100, 3);
        let notifier = RecordingNotifier::default();

        let err = checkout(&mut catalog, &mut cart, &PricingEngine::new(&[]), &notifier).unwrap_err();
        assert_eq!(err, CartError::EmptyCart);
        assert_eq!(counters(&catalog, &p), (3, 3));
        assert!(notifier.placed.lock().unwrap().is_empty());
    }

    #[test]
    fn test_clear_cart_releases_everything() {
        let mut catalog = Catalog::new();
        let mut cart = Cart::new();
        let a = product(&mut catalog, "A", 100, 4);
        let b = product(&mut catalog, "B", 100, 4);
        add_item(&mut catalog, &mut cart, &a).unwrap();
        add_item(&mut catalog, &mut cart, &b).unwrap();
        add_item(&mut catalog, &mut cart, &b).unwrap();

        clear_cart(&mut catalog, &mut cart).unwrap();
        assert!(cart.is_empty());
        assert_eq!(counters(&catalog, &a), (4, 4));
        assert_eq!(counters(&catalog, &b), (4, 4));
    }

    #[test]
    fn test_restore_cart() {
        let mut catalog = Catalog::new();
        let mut cart = Cart::new();
        let a = product(&mut catalog, "A", 150, 5);
        let b = product(&mut catalog, "B", 300, 2);
        add_item(&mut catalog, &mut cart, &b).unwrap();

        let records = vec![
            CartRecord { product_id: a, quantity: 2, subtotal: Decimal::ZERO },
            CartRecord { product_id: b, quantity: 2, subtotal: Decimal::ZERO },
            CartRecord { product_id: a, quantity: 1, subtotal: Decimal::ZERO },
        ];
        restore_cart(&mut catalog, &mut cart, &records).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.quantity_of(&a), 3);
        assert_eq!(cart.line(&a).unwrap().subtotal(), Decimal::new(450, 2));
        assert_eq!(cart.quantity_of(&b), 2);
        assert_eq!(counters(&catalog, &a), (5, 2));
        assert_eq!(counters(&catalog, &b), (2, 0));
    }

    #[test]
    fn test_restore_is_all_or_nothing() {
        let mut catalog = Catalog::new();
        let mut cart = Cart::new();
        let a = product(&mut catalog, "A", 150, 5);
        let b = product(&mut catalog, "B", 300, 1);
        add_item(&mut catalog, &mut cart, &a).unwrap();

        let records = vec![
            CartRecord { product_id: a, quantity: 2, subtotal: Decimal::ZERO },
            CartRecord { product_id: b, quantity: 3, subtotal: Decimal::ZERO },
        ];
        let err = restore_cart(&mut catalog, &mut cart, &records).unwrap_err();
        assert!(matches!(err, CartError::StockLimitExceeded { requested: 3, .. }));

        let ghost = ProductId::new();
        let records = vec![CartRecord { product_id: ghost, quantity: 1, subtotal: Decimal::ZERO }];
        assert_eq!(
            restore_cart(&mut catalog, &mut cart, &records).unwrap_err(),
            CartError::UnknownProduct(ghost)
        );

        let records = vec![CartRecord { product_id: a, quantity: 0, subtotal: Decimal::ZERO }];
        assert_eq!(
            restore_cart(&mut catalog, &mut cart, &records).unwrap_err(),
            CartError::InvalidQuantity(0)
        );

        assert_eq!(cart.quantity_of(&a), 1);
        assert_eq!(counters(&catalog, &a), (5, 4));
        assert_eq!(counters(&catalog, &b), (1, 1));
    }

    #[test]
    fn test_update_product_reprices_line() {
        let mut catalog = Catalog::new();
        let mut cart = Cart::new();
        let p = product(&mut catalog, "Tea", 1899, 30);
        add_item(&mut catalog, &mut cart, &p).unwrap();
        add_item(&mut catalog, &mut cart, &p).unwrap();

        update_product(
            &mut catalog,
            &mut cart,
            &p,
            ProductDraft::new("Organic Tea", Decimal::new(2000, 2), 10),
        )
        .unwrap();
        let line = cart.line(&p).unwrap();
        assert_eq!(line.name, "Organic Tea");
        assert_eq!(line.subtotal(), Decimal::new(4000, 2));
        assert_eq!(counters(&catalog, &p), (10, 8));

        let err = update_product(
            &mut catalog,
            &mut cart,
            &p,
            ProductDraft::new("Organic Tea", Decimal::new(2000, 2), 1),
        )
        .unwrap_err();
        assert!(matches!(err, CartError::Catalog(CatalogError::Inventory(_))));
        assert_eq!(counters(&catalog, &p), (10, 8));
    }

    #[test]
    fn test_delete_product_cascades() {
        let mut catalog = Catalog::new();
        let mut offers = OfferBook::new();
        let mut cart = Cart::new();
        let cookies = product(&mut catalog, "Cookies", 899, 40);
        let tea = product(&mut catalog, "Tea", 1899, 30);
        offers
            .insert(OfferDraft::new("cookies", Decimal::new(20, 0), 5, OfferScope::Product(cookies)), &catalog)
            .unwrap();
        offers
            .insert(OfferDraft::new("all", Decimal::TEN, 2, OfferScope::AllProducts), &catalog)
            .unwrap();
        add_item(&mut catalog, &mut cart, &cookies).unwrap();
        add_item(&mut catalog, &mut cart, &tea).unwrap();

        let removed = delete_product(&mut catalog, &mut offers, &mut cart, &cookies).unwrap();
        assert_eq!(removed.id, cookies);
        assert!(!catalog.contains(&cookies));
        assert!(cart.line(&cookies).is_none());
        assert_eq!(cart.len(), 1);
        assert_eq!(offers.len(), 1);

        assert_eq!(
            delete_product(&mut catalog, &mut offers, &mut cart, &cookies).unwrap_err(),
            CartError::UnknownProduct(cookies)
        );
    }
}
