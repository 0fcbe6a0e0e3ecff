pub mod book;
pub mod error;
pub mod models;
pub mod rules;

pub use book::OfferBook;
pub use error::OfferError;
pub use models::{Offer, OfferDraft, OfferScope};
pub use rules::{applicable_offers, best_applicable, best_offer};
