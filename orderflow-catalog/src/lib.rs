pub mod catalog;
pub mod error;
pub mod inventory;
pub mod product;

pub use catalog::Catalog;
pub use error::CatalogError;
pub use inventory::{InventoryError, StockLevel};
pub use product::{Product, ProductDraft, MAX_PRICE};
