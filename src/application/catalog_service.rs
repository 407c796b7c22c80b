use crate::domain::error::DomainError;
use crate::domain::models::{
    CreateProduct, CreateShop, Price, Product, ProductCategory, Shop, SustainabilityScore,
};
use crate::domain::repository::{ProductRepository, ShopRepository};
use anyhow::Result;
use chrono::Utc;
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct CatalogService<P, S>
where
    P: ProductRepository,
    S: ShopRepository,
{
    products: Arc<P>,
    shops: Arc<S>,
}

impl<P, S> CatalogService<P, S>
where
    P: ProductRepository,
    S: ShopRepository,
{
    pub fn new(products: Arc<P>, shops: Arc<S>) -> Self {
        Self { products, shops }
    }

    #[instrument(skip(self), fields(name = %req.name))]
    pub async fn create_shop(&self, req: CreateShop) -> Result<Shop> {
        if req.name.trim().is_empty() {
            return Err(DomainError::Validation("Shop name must not be empty".to_string()).into());
        }

        let shop = Shop {
            id: fastrand::u32(..),
            name: req.name,
            carbon_neutral: req.carbon_neutral,
            created_at: Utc::now(),
        };
        self.shops.save(shop.clone()).await?;

        info!(shop_id = shop.id, name = %shop.name, "Shop created");
        Ok(shop)
    }

    pub async fn get_shop(&self, id: u32) -> Result<Shop> {
        self.shops
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Shop not found: {id}")).into())
    }

    #[instrument(skip(self), fields(shop_id = req.shop_id, name = %req.name))]
    pub async fn create_product(&self, req: CreateProduct) -> Result<Product> {
        if req.name.trim().is_empty() {
            return Err(
                DomainError::Validation("Product name must not be empty".to_string()).into(),
            );
        }
        let shop = self.get_shop(req.shop_id).await?;

        let sustainability_score = req
            .sustainability_score
            .map(SustainabilityScore::new)
            .transpose()?;

        let product = Product {
            id: fastrand::u32(..),
            shop_id: shop.id,
            name: req.name,
            price: Price::new(req.price),
            sustainability_score,
            category: req.category,
            is_available: true,
            created_at: Utc::now(),
        };
        self.products.save(product.clone()).await?;

        info!(product_id = product.id, shop_id = shop.id, "Product created");
        Ok(product)
    }

    pub async fn get_product(&self, id: u32) -> Result<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Product not found: {id}")).into())
    }

    /// Available products, newest first, optionally narrowed to one category.
    pub async fn list_products(&self, category: Option<ProductCategory>) -> Result<Vec<Product>> {
        let mut products: Vec<Product> = self
            .products
            .all()
            .await?
            .into_iter()
            .filter(|p| p.is_available)
            .filter(|p| category.as_ref().is_none_or(|c| &p.category == c))
            .collect();
        products.sort_by_key(|p| Reverse(p.created_at));
        Ok(products)
    }
}
