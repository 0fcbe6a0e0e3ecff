use orderflow_catalog::{Catalog, Product, ProductDraft};
use orderflow_offer::{Offer, OfferBook, OfferDraft};
use orderflow_order::{
    workflow, Cart, CartLine, CartPricing, CartRecord, CartTotals, CheckoutNotifier, Order,
    PricingEngine,
};
use orderflow_shared::{OfferId, ProductId};
use tracing::info;

use crate::CoreResult;

/// The storefront as a single logical actor.
///
/// Owns the catalog, the offer book and the active cart; every mutation
/// goes through here and on to [`workflow`], so the stock counters and the
/// cart can't drift apart.
#[derive(Debug, Clone, Default)]
pub struct Shop {
    catalog: Catalog,
    offers: OfferBook,
    cart: Cart,
}

impl Shop {
    pub fn new(catalog: Catalog, offers: OfferBook) -> Self {
        Self {
            catalog,
            offers,
            cart: Cart::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn offers(&self) -> &OfferBook {
        &self.offers
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    // Catalog management

    pub fn list_products(&self) -> Vec<&Product> {
        self.catalog.list()
    }

    pub fn product(&self, id: &ProductId) -> CoreResult<&Product> {
        Ok(self.catalog.get(id)?)
    }

    pub fn create_product(&mut self, draft: ProductDraft) -> CoreResult<Product> {
        let product = self.catalog.insert(draft)?.clone();
        info!(product_id = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    pub fn update_product(&mut self, id: &ProductId, draft: ProductDraft) -> CoreResult<Product> {
        Ok(workflow::update_product(
            &mut self.catalog,
            &mut self.cart,
            id,
            draft,
        )?)
    }

    pub fn delete_product(&mut self, id: &ProductId) -> CoreResult<Product> {
        let product =
            workflow::delete_product(&mut self.catalog, &mut self.offers, &mut self.cart, id)?;
        info!(product_id = %id, "product deleted");
        Ok(product)
    }

    pub fn list_offers(&self) -> &[Offer] {
        self.offers.list()
    }

    pub fn offer(&self, id: &OfferId) -> CoreResult<&Offer> {
        Ok(self.offers.get(id)?)
    }

    pub fn create_offer(&mut self, draft: OfferDraft) -> CoreResult<Offer> {
        let offer = self.offers.insert(draft, &self.catalog)?.clone();
        info!(offer_id = %offer.id, percent = %offer.discount_percent, "offer created");
        Ok(offer)
    }

    pub fn update_offer(&mut self, id: &OfferId, draft: OfferDraft) -> CoreResult<Offer> {
        Ok(self.offers.update(id, draft, &self.catalog)?.clone())
    }

    pub fn delete_offer(&mut self, id: &OfferId) -> CoreResult<Offer> {
        Ok(self.offers.remove(id)?)
    }

    // Cart

    pub fn add_item(&mut self, product_id: &ProductId) -> CoreResult<u32> {
        Ok(workflow::add_item(&mut self.catalog, &mut self.cart, product_id)?)
    }

    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) -> CoreResult<u32> {
        Ok(workflow::set_quantity(
            &mut self.catalog,
            &mut self.cart,
            product_id,
            quantity,
        )?)
    }

    pub fn remove_line(&mut self, product_id: &ProductId) -> CoreResult<CartLine> {
        Ok(workflow::remove_line(&mut self.catalog, &mut self.cart, product_id)?)
    }

    pub fn clear_cart(&mut self) -> CoreResult<()> {
        Ok(workflow::clear_cart(&mut self.catalog, &mut self.cart)?)
    }

    pub fn restore_cart(&mut self, records: &[CartRecord]) -> CoreResult<()> {
        Ok(workflow::restore_cart(&mut self.catalog, &mut self.cart, records)?)
    }

    pub fn cart_records(&self) -> Vec<CartRecord> {
        self.cart.to_records()
    }

    pub fn cart_totals(&self) -> CartTotals {
        PricingEngine::new(self.offers.list()).cart_totals(&self.cart)
    }

    /// Priced lines and totals for display.
    pub fn price_cart(&self) -> CartPricing {
        PricingEngine::new(self.offers.list()).price_cart(&self.cart)
    }

    pub fn checkout(&mut self, notifier: &dyn CheckoutNotifier) -> CoreResult<Order> {
        let engine = PricingEngine::new(self.offers.list());
        Ok(workflow::checkout(
            &mut self.catalog,
            &mut self.cart,
            &engine,
            notifier,
        )?)
    }
}
