use orderflow_shared::ProductId;

use crate::models::Offer;

/// Every offer that covers `product_id` and whose minimum quantity is met.
/// No match is an empty list, not an error.
pub fn applicable_offers<'a, I>(offers: I, product_id: &ProductId, quantity: u32) -> Vec<&'a Offer>
where
    I: IntoIterator<Item = &'a Offer>,
{
    offers
        .into_iter()
        .filter(|offer| offer.applies_to(product_id, quantity))
        .collect()
}

/// The offer with the strictly greatest discount. On a tie the first one
/// seen wins; offers never stack.
pub fn best_offer<'a, I>(offers: I) -> Option<&'a Offer>
where
    I: IntoIterator<Item = &'a Offer>,
{
    let mut best: Option<&Offer> = None;

    for offer in offers {
        match best {
            Some(current) if offer.discount_percent <= current.discount_percent => {}
            _ => best = Some(offer),
        }
    }

    best
}

/// Shorthand for `best_offer(applicable_offers(..))`.
pub fn best_applicable<'a, I>(offers: I, product_id: &ProductId, quantity: u32) -> Option<&'a Offer>
where
    I: IntoIterator<Item = &'a Offer>,
{
    best_offer(applicable_offers(offers, product_id, quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OfferDraft, OfferScope};
    use orderflow_shared::OfferId;
    use rust_decimal::Decimal;

    fn offer(percent: i64, min_quantity: u32, scope: OfferScope) -> Offer {
        Offer::from_draft(
            OfferId::new(),
            OfferDraft::new(format!("{}% off", percent), Decimal::new(percent, 0), min_quantity, scope),
        )
        .unwrap()
    }

    #[test]
    fn test_applicable_filters_scope_and_minimum() {
        let coffee = ProductId::new();
        let tea = ProductId::new();
        let offers = vec![
            offer(15, 3, OfferScope::Product(coffee)),
            offer(10, 2, OfferScope::Product(tea)),
            offer(5, 1, OfferScope::AllProducts),
        ];

        let hits = applicable_offers(&offers, &coffee, 3);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|o| o.id != offers[1].id));

        let hits = applicable_offers(&offers, &coffee, 2);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, offers[2].id);

        assert!(applicable_offers(&offers[..2], &coffee, 1).is_empty());
    }

    #[test]
    fn test_best_offer_picks_greatest_discount() {
        let product = ProductId::new();
        let offers = vec![
            offer(10, 1, OfferScope::AllProducts),
            offer(25, 5, OfferScope::AllProducts),
        ];

        let best = best_applicable(&offers, &product, 5).unwrap();
        assert_eq!(best.discount_percent, Decimal::new(25, 0));

        let best = best_applicable(&offers, &product, 4).unwrap();
        assert_eq!(best.discount_percent, Decimal::new(10, 0));
    }

    #[test]
    fn test_best_offer_tie_keeps_first() {
        let offers = vec![
            offer(20, 1, OfferScope::AllProducts),
            offer(20, 1, OfferScope::AllProducts),
        ];
        assert_eq!(best_offer(&offers).unwrap().id, offers[0].id);
    }

    #[test]
    fn test_best_offer_empty() {
        let offers: Vec<Offer> = Vec::new();
        assert!(best_offer(&offers).is_none());
    }
}
