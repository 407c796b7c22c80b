use crate::domain::models::{Deal, Product, Shop};
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait DealRepository: Send + Sync {
    async fn save(&self, deal: Deal) -> Result<()>;
    async fn find_by_id(&self, id: u32) -> Result<Option<Deal>>;
    async fn update(&self, deal: Deal) -> Result<()>;
    async fn all(&self) -> Result<Vec<Deal>>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn save(&self, product: Product) -> Result<()>;
    async fn find_by_id(&self, id: u32) -> Result<Option<Product>>;
    async fn all(&self) -> Result<Vec<Product>>;
}

#[async_trait]
pub trait ShopRepository: Send + Sync {
    async fn save(&self, shop: Shop) -> Result<()>;
    async fn find_by_id(&self, id: u32) -> Result<Option<Shop>>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save_user(&self, user: User) -> Result<()>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>>;
}
