use orderflow_offer::{applicable_offers, best_offer, Offer};
use orderflow_shared::{OfferId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine};

/// Cart-level money figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of discounted line subtotals.
    pub total: Decimal,
    /// Sum of undiscounted line subtotals.
    pub original_total: Decimal,
    pub savings: Decimal,
}

/// The offer a line was priced with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedOffer {
    pub offer_id: OfferId,
    pub description: String,
    pub discount_percent: Decimal,
}

impl From<&Offer> for AppliedOffer {
    fn from(offer: &Offer) -> Self {
        Self {
            offer_id: offer.id,
            description: offer.description.clone(),
            discount_percent: offer.discount_percent,
        }
    }
}

/// A cart line together with its pricing outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
    pub discounted_subtotal: Decimal,
    pub applied_offer: Option<AppliedOffer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartPricing {
    pub lines: Vec<PricedLine>,
    pub totals: CartTotals,
}

/// Per-line discount pricing over a fixed set of offers.
///
/// Every line is priced on its own: the single best applicable offer is
/// applied and offers never combine. The engine is a pure function of the
/// offers and the cart it is handed.
#[derive(Debug, Clone, Copy)]
pub struct PricingEngine<'a> {
    offers: &'a [Offer],
}

impl<'a> PricingEngine<'a> {
    pub fn new(offers: &'a [Offer]) -> Self {
        Self { offers }
    }

    pub fn applicable_offers(&self, line: &CartLine) -> Vec<&'a Offer> {
        applicable_offers(self.offers, &line.product_id, line.quantity)
    }

    pub fn best_offer(&self, line: &CartLine) -> Option<&'a Offer> {
        best_offer(self.applicable_offers(line))
    }

    /// Line subtotal after the best applicable offer, or the plain subtotal
    /// when nothing applies.
    pub fn discounted_subtotal(&self, line: &CartLine) -> Decimal {
        Self::discount(line.subtotal(), self.best_offer(line))
    }

    pub fn price_line(&self, line: &CartLine) -> PricedLine {
        let offer = self.best_offer(line);
        let subtotal = line.subtotal();

        PricedLine {
            product_id: line.product_id,
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            subtotal,
            discounted_subtotal: Self::discount(subtotal, offer),
            applied_offer: offer.map(AppliedOffer::from),
        }
    }

    pub fn cart_totals(&self, cart: &Cart) -> CartTotals {
        let (original_total, total) = cart.lines().iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(original, discounted), line| {
                (original + line.subtotal(), discounted + self.discounted_subtotal(line))
            },
        );

        Self::totals(original_total, total)
    }

    /// Lines and totals in one pass, for cart views and checkout.
    pub fn price_cart(&self, cart: &Cart) -> CartPricing {
        let lines: Vec<PricedLine> = cart.lines().iter().map(|line| self.price_line(line)).collect();
        let original_total = lines.iter().map(|line| line.subtotal).sum();
        let total = lines.iter().map(|line| line.discounted_subtotal).sum();

        CartPricing {
            lines,
            totals: Self::totals(original_total, total),
        }
    }

    fn discount(subtotal: Decimal, offer: Option<&Offer>) -> Decimal {
        match offer {
            Some(offer) => (subtotal * offer.remaining_fraction()).max(Decimal::ZERO),
            None => subtotal,
        }
    }

    fn totals(original_total: Decimal, total: Decimal) -> CartTotals {
        CartTotals {
            total,
            original_total,
            savings: (original_total - total).max(Decimal::ZERO),
        }
    }
}
