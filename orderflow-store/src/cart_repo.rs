use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use orderflow_core::repository::CartRepository;
use orderflow_order::CartRecord;
use tokio::sync::RwLock;
use tracing::debug;

/// Keeps the cart in a JSON file. A missing file reads as an empty cart.
pub struct JsonCartRepository {
    path: PathBuf,
}

impl JsonCartRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CartRepository for JsonCartRepository {
    async fn load(&self) -> Result<Vec<CartRecord>, Box<dyn std::error::Error + Send + Sync>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(
        &self,
        records: &[CartRecord],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // Write then rename so a crash never leaves half a file behind
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(records)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), lines = records.len(), "cart saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Default)]
pub struct MemoryCartRepository {
    records: RwLock<Vec<CartRecord>>,
}

impl MemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for MemoryCartRepository {
    async fn load(&self) -> Result<Vec<CartRecord>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.records.read().await.clone())
    }

    async fn save(
        &self,
        records: &[CartRecord],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        *self.records.write().await = records.to_vec();
        Ok(())
    }

    async fn clear(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.records.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderflow_shared::ProductId;
    use rust_decimal::Decimal;

    fn records() -> Vec<CartRecord> {
        vec![
            CartRecord {
                product_id: ProductId::new(),
                quantity: 3,
                subtotal: Decimal::new(7497, 2),
            },
            CartRecord {
                product_id: ProductId::new(),
                quantity: 1,
                subtotal: Decimal::new(399, 2),
            },
        ]
    }

    #[tokio::test]
    async fn test_json_repository() {
        let dir = std::env::temp_dir().join(format!("orderflow-{}", uuid::Uuid::new_v4()));
        let repo = JsonCartRepository::new(dir.join("cart.json"));

        assert!(repo.load().await.unwrap().is_empty());

        let saved = records();
        repo.save(&saved).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), saved);

        let raw = tokio::fs::read_to_string(dir.join("cart.json")).await.unwrap();
        assert!(raw.contains("\"subtotal\": \"74.97\""));

        repo.clear().await.unwrap();
        assert!(repo.load().await.unwrap().is_empty());
        repo.clear().await.unwrap();

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_json_repository_rejects_garbage() {
        let path = std::env::temp_dir().join(format!("orderflow-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, b"not json").await.unwrap();

        let repo = JsonCartRepository::new(path.clone());
        assert!(repo.load().await.is_err());

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_memory_repository() {
        let repo = MemoryCartRepository::new();
        let saved = records();

        repo.save(&saved).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), saved);
        repo.clear().await.unwrap();
        assert!(repo.load().await.unwrap().is_empty());
    }
}
