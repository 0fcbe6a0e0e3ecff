use orderflow_shared::{OfferId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::OfferError;

/// Which products an offer can discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "product_id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferScope {
    AllProducts,
    Product(ProductId),
}

impl OfferScope {
    pub fn covers(&self, product_id: &ProductId) -> bool {
        match self {
            OfferScope::AllProducts => true,
            OfferScope::Product(target) => target == product_id,
        }
    }

    pub fn target(&self) -> Option<ProductId> {
        match self {
            OfferScope::AllProducts => None,
            OfferScope::Product(target) => Some(*target),
        }
    }
}

/// A quantity discount: `discount_percent` off a cart line once it holds
/// at least `min_quantity` units of a covered product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub description: String,
    pub discount_percent: Decimal,
    pub min_quantity: u32,
    pub scope: OfferScope,
}

impl Offer {
    pub fn from_draft(id: OfferId, draft: OfferDraft) -> Result<Self, OfferError> {
        draft.validate()?;
        Ok(Self {
            id,
            description: draft.description,
            discount_percent: draft.discount_percent,
            min_quantity: draft.min_quantity,
            scope: draft.scope,
        })
    }

    /// Does this offer apply to `quantity` units of `product_id`?
    pub fn applies_to(&self, product_id: &ProductId, quantity: u32) -> bool {
        self.scope.covers(product_id) && quantity >= self.min_quantity
    }

    /// Multiplier left after the discount, e.g. 0.8 for 20% off.
    pub fn remaining_fraction(&self) -> Decimal {
        Decimal::ONE - self.discount_percent / Decimal::ONE_HUNDRED
    }
}

/// Editable offer fields, as submitted by catalog management.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferDraft {
    pub description: String,
    pub discount_percent: Decimal,
    pub min_quantity: u32,
    pub scope: OfferScope,
}

impl OfferDraft {
    pub fn new(
        description: impl Into<String>,
        discount_percent: Decimal,
        min_quantity: u32,
        scope: OfferScope,
    ) -> Self {
        Self {
            description: description.into(),
            discount_percent,
            min_quantity,
            scope,
        }
    }

    pub fn validate(&self) -> Result<(), OfferError> {
        if self.description.trim().is_empty() {
            return Err(OfferError::InvalidOffer("description must not be empty".to_string()));
        }
        if self.discount_percent < Decimal::ZERO || self.discount_percent > Decimal::ONE_HUNDRED {
            return Err(OfferError::InvalidOffer(format!(
                "discount percent must be within 0..=100, got {}",
                self.discount_percent
            )));
        }
        if self.min_quantity == 0 {
            return Err(OfferError::InvalidOffer(
                "minimum quantity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
