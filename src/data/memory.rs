use crate::domain::models::{Deal, Product, Shop};
use crate::domain::repository::{DealRepository, ProductRepository, ShopRepository};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct InMemoryDealRepository {
    storage: Arc<RwLock<HashMap<u32, Deal>>>,
}

impl InMemoryDealRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryDealRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DealRepository for InMemoryDealRepository {
    async fn save(&self, deal: Deal) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(deal.id, deal);
        Ok(())
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<Deal>> {
        let storage = self.storage.read().await;
        Ok(storage.get(&id).cloned())
    }

    async fn update(&self, deal: Deal) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(deal.id, deal);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Deal>> {
        let storage = self.storage.read().await;
        Ok(storage.values().cloned().collect())
    }
}

#[derive(Clone)]
pub struct InMemoryProductRepository {
    storage: Arc<RwLock<HashMap<u32, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, product: Product) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(product.id, product);
        Ok(())
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<Product>> {
        let storage = self.storage.read().await;
        Ok(storage.get(&id).cloned())
    }

    async fn all(&self) -> Result<Vec<Product>> {
        let storage = self.storage.read().await;
        Ok(storage.values().cloned().collect())
    }
}

#[derive(Clone)]
pub struct InMemoryShopRepository {
    storage: Arc<RwLock<HashMap<u32, Shop>>>,
}

impl InMemoryShopRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryShopRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShopRepository for InMemoryShopRepository {
    async fn save(&self, shop: Shop) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(shop.id, shop);
        Ok(())
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<Shop>> {
        let storage = self.storage.read().await;
        Ok(storage.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::DiscountPercent;
    use chrono::Utc;

    fn deal(id: u32, title: &str) -> Deal {
        Deal {
            id,
            product_id: 1,
            shop_id: 1,
            title: title.to_string(),
            discount_percent: DiscountPercent::new(10).unwrap(),
            expires_at: None,
            sustainability_score: None,
            eco_certifications: vec![],
            local_production: false,
            carbon_footprint: None,
            categories: vec![],
            is_featured: false,
            is_verified: true,
            coupon_code: None,
            views_count: 0,
            clicks_count: 0,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_and_find_deal() {
        let repo = InMemoryDealRepository::new();
        repo.save(deal(1, "Weekend special")).await.unwrap();

        let found = repo.find_by_id(1).await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().title, "Weekend special");
    }

    #[tokio::test]
    async fn test_find_deal_returns_none_for_unknown_id() {
        let repo = InMemoryDealRepository::new();
        assert!(repo.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_overwrites_deal() {
        let repo = InMemoryDealRepository::new();
        repo.save(deal(7, "Before")).await.unwrap();

        let mut updated = deal(7, "After");
        updated.views_count = 3;
        repo.update(updated).await.unwrap();

        let found = repo.find_by_id(7).await.unwrap().unwrap();
        assert_eq!(found.title, "After");
        assert_eq!(found.views_count, 3);
    }

    #[tokio::test]
    async fn test_all_returns_every_deal() {
        let repo = InMemoryDealRepository::new();
        for i in 1..=4 {
            repo.save(deal(i, &format!("Deal {i}"))).await.unwrap();
        }

        let all = repo.all().await.unwrap();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn test_concurrent_deal_writes() {
        let repo = InMemoryDealRepository::new();

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let repo_clone = repo.clone();
                tokio::spawn(async move { repo_clone.save(deal(i, "Concurrent")).await })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        assert_eq!(repo.all().await.unwrap().len(), 10);
    }
}
