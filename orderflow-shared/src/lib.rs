pub mod events;
pub mod ids;

pub use events::OrderPlacedEvent;
pub use ids::{OfferId, OrderId, ProductId};
