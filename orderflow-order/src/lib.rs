pub mod cart;
pub mod error;
pub mod models;
pub mod notifier;
pub mod pricing;
pub mod workflow;

pub use cart::{Cart, CartLine, CartRecord};
pub use error::CartError;
pub use models::Order;
pub use notifier::{CheckoutNotifier, TracingNotifier};
pub use pricing::{AppliedOffer, CartPricing, CartTotals, PricedLine, PricingEngine};
