pub mod app_config;
pub mod cart_repo;
pub mod order_repo;
pub mod seed;

pub use app_config::Config;
pub use cart_repo::{JsonCartRepository, MemoryCartRepository};
pub use order_repo::MemoryOrderRepository;
pub use seed::{build_shop, SeedError};
