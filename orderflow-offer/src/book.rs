use orderflow_catalog::Catalog;
use orderflow_shared::{OfferId, ProductId};
use tracing::debug;

use crate::error::OfferError;
use crate::models::{Offer, OfferDraft, OfferScope};

/// The set of active offers, in creation order.
///
/// Order matters: best-offer selection keeps the first of several equal
/// discounts, so iteration has to be stable.
#[derive(Debug, Clone, Default)]
pub struct OfferBook {
    offers: Vec<Offer>,
}

impl OfferBook {
    pub fn new() -> Self {
        Self { offers: Vec::new() }
    }

    /// Create an offer. A product-scoped offer must target a product the
    /// catalog knows about.
    pub fn insert(&mut self, draft: OfferDraft, catalog: &Catalog) -> Result<&Offer, OfferError> {
        Self::check_target(&draft.scope, catalog)?;
        let offer = Offer::from_draft(OfferId::new(), draft)?;
        debug!(offer_id = %offer.id, percent = %offer.discount_percent, "offer added");
        self.offers.push(offer);
        Ok(&self.offers[self.offers.len() - 1])
    }

    pub fn get(&self, id: &OfferId) -> Result<&Offer, OfferError> {
        self.offers
            .iter()
            .find(|offer| offer.id == *id)
            .ok_or(OfferError::UnknownOffer(*id))
    }

    pub fn list(&self) -> &[Offer] {
        &self.offers
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// Replace an offer's fields, keeping its id and position.
    pub fn update(
        &mut self,
        id: &OfferId,
        draft: OfferDraft,
        catalog: &Catalog,
    ) -> Result<&Offer, OfferError> {
        let index = self.position(id)?;
        Self::check_target(&draft.scope, catalog)?;
        let offer = Offer::from_draft(*id, draft)?;
        debug!(offer_id = %id, "offer updated");
        self.offers[index] = offer;
        Ok(&self.offers[index])
    }

    pub fn remove(&mut self, id: &OfferId) -> Result<Offer, OfferError> {
        let index = self.position(id)?;
        debug!(offer_id = %id, "offer removed");
        Ok(self.offers.remove(index))
    }

    /// Drop every offer scoped to `product_id`; used when the product
    /// leaves the catalog.
    pub fn remove_targeting(&mut self, product_id: &ProductId) -> Vec<Offer> {
        let (dropped, kept): (Vec<Offer>, Vec<Offer>) = self
            .offers
            .drain(..)
            .partition(|offer| offer.scope == OfferScope::Product(*product_id));
        self.offers = kept;
        if !dropped.is_empty() {
            debug!(product_id = %product_id, count = dropped.len(), "offers dropped with product");
        }
        dropped
    }

    fn position(&self, id: &OfferId) -> Result<usize, OfferError> {
        self.offers
            .iter()
            .position(|offer| offer.id == *id)
            .ok_or(OfferError::UnknownOffer(*id))
    }

    fn check_target(scope: &OfferScope, catalog: &Catalog) -> Result<(), OfferError> {
        match scope {
            OfferScope::Product(target) if !catalog.contains(target) => {
                Err(OfferError::UnknownProduct(*target))
            }
            _ => Ok(()),
        }
    }
}

impl<'a> IntoIterator for &'a OfferBook {
    type Item = &'a Offer;
    type IntoIter = std::slice::Iter<'a, Offer>;

    fn into_iter(self) -> Self::IntoIter {
        self.offers.iter()
    }
}
