use std::collections::HashMap;

use orderflow_catalog::{Catalog, CatalogError, ProductDraft};
use orderflow_core::Shop;
use orderflow_offer::{OfferBook, OfferDraft, OfferError, OfferScope};
use orderflow_shared::ProductId;
use tracing::info;

use crate::app_config::CatalogSeed;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Duplicate product key: {0}")]
    DuplicateKey(String),
    #[error("Offer '{offer}' refers to unknown product key '{key}'")]
    UnknownProductKey { offer: String, key: String },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Offer(#[from] OfferError),
}

/// Build the shop's catalog and offer book from configuration.
pub fn build_shop(seed: &CatalogSeed) -> Result<Shop, SeedError> {
    let mut catalog = Catalog::new();
    let mut keys: HashMap<&str, ProductId> = HashMap::new();

    for product in &seed.products {
        if keys.contains_key(product.key.as_str()) {
            return Err(SeedError::DuplicateKey(product.key.clone()));
        }
        let draft = ProductDraft::new(product.name.clone(), product.price, product.stock)
            .with_image(product.image.clone());
        let id = catalog
            .insert_with_id(product.id.unwrap_or_default(), draft)?
            .id;
        keys.insert(product.key.as_str(), id);
    }

    let mut offers = OfferBook::new();
    for offer in &seed.offers {
        let scope = match &offer.product {
            None => OfferScope::AllProducts,
            Some(key) => match keys.get(key.as_str()) {
                Some(id) => OfferScope::Product(*id),
                None => {
                    return Err(SeedError::UnknownProductKey {
                        offer: offer.description.clone(),
                        key: key.clone(),
                    })
                }
            },
        };
        offers.insert(
            OfferDraft::new(
                offer.description.clone(),
                offer.discount_percent,
                offer.min_quantity,
                scope,
            ),
            &catalog,
        )?;
    }

    info!(
        products = catalog.len(),
        offers = offers.len(),
        "catalog seeded"
    );
    Ok(Shop::new(catalog, offers))
}
