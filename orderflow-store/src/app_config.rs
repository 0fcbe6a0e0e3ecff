use orderflow_shared::ProductId;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogSeed,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// JSON file the active cart is persisted to. In memory when unset.
    pub cart_path: Option<String>,
}

/// Products and offers loaded into the shop at startup.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogSeed {
    #[serde(default)]
    pub products: Vec<ProductSeed>,
    #[serde(default)]
    pub offers: Vec<OfferSeed>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProductSeed {
    /// Name offers use to refer to this product.
    pub key: String,
    /// Fixed id, so a persisted cart still matches after a restart.
    pub id: Option<ProductId>,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OfferSeed {
    pub description: String,
    pub discount_percent: Decimal,
    pub min_quantity: u32,
    /// Product key; every product when absent.
    pub product: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `ORDERFLOW__SERVER__PORT=8080`
            .add_source(config::Environment::with_prefix("ORDERFLOW").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Parse a single TOML document, without the file and env layers.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
