use crate::domain::error::DomainError;
use crate::domain::models::{CreateDeal, Deal, DiscountPercent, Shop, SustainabilityScore};
use crate::domain::repository::{DealRepository, ProductRepository, ShopRepository};
use crate::domain::scoring::compute_sustainability_score;
use anyhow::Result;
use chrono::{Duration, Utc};
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub struct DealService<D, P, S>
where
    D: DealRepository,
    P: ProductRepository,
    S: ShopRepository,
{
    deals: Arc<D>,
    products: Arc<P>,
    shops: Arc<S>,
}

impl<D, P, S> DealService<D, P, S>
where
    D: DealRepository,
    P: ProductRepository,
    S: ShopRepository,
{
    pub fn new(deals: Arc<D>, products: Arc<P>, shops: Arc<S>) -> Self {
        Self {
            deals,
            products,
            shops,
        }
    }

    #[instrument(skip(self), fields(product_id = req.product_id, title = %req.title))]
    pub async fn create_deal(&self, req: CreateDeal) -> Result<Deal> {
        let discount_percent = DiscountPercent::new(req.discount_percent)?;

        let product = self
            .products
            .find_by_id(req.product_id)
            .await?
            .ok_or_else(|| {
                warn!(product_id = req.product_id, "Product not found for new deal");
                DomainError::NotFound(format!("Product not found: {}", req.product_id))
            })?;
        let shop = self
            .shops
            .find_by_id(product.shop_id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!("Shop not found: {}", product.shop_id))
            })?;

        let sustainability_score =
            self.resolve_score(&req, shop.carbon_neutral)?;

        let deal = Deal {
            id: fastrand::u32(..),
            product_id: product.id,
            shop_id: shop.id,
            title: req.title,
            discount_percent,
            expires_at: req.expires_at,
            sustainability_score,
            eco_certifications: req.eco_certifications,
            local_production: req.local_production,
            carbon_footprint: req.carbon_footprint,
            categories: req.categories,
            is_featured: req.is_featured,
            is_verified: true,
            coupon_code: req.coupon_code,
            views_count: 0,
            clicks_count: 0,
            created_at: Utc::now(),
        };
        self.deals.save(deal.clone()).await?;

        info!(
            deal_id = deal.id,
            shop_id = deal.shop_id,
            score = deal.sustainability_score.map(|s| s.inner()),
            "Deal created"
        );
        Ok(deal)
    }

    /// An explicit score wins over a derived one; a deal that carries no eco
    /// metadata at all keeps `None` so clients can tell "unrated" apart from
    /// "rated zero".
    fn resolve_score(
        &self,
        req: &CreateDeal,
        shop_carbon_neutral: bool,
    ) -> Result<Option<SustainabilityScore>> {
        if let Some(value) = req.sustainability_score {
            return Ok(Some(SustainabilityScore::new(value)?));
        }

        let has_metadata = !req.eco_certifications.is_empty()
            || req.local_production
            || !req.categories.is_empty()
            || req.carbon_footprint.is_some();
        if !has_metadata {
            return Ok(None);
        }

        Ok(Some(compute_sustainability_score(
            req.eco_certifications.len(),
            req.local_production,
            shop_carbon_neutral,
            req.categories.len(),
            req.carbon_footprint,
        )))
    }

    pub async fn get_deal(&self, id: u32) -> Result<Deal> {
        self.deals
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Deal not found: {id}")).into())
    }

    /// The deal together with the shop it belongs to, for card rendering.
    pub async fn get_deal_with_shop(&self, id: u32) -> Result<(Deal, Shop)> {
        let deal = self.get_deal(id).await?;
        let shop = self
            .shops
            .find_by_id(deal.shop_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Shop not found: {}", deal.shop_id)))?;
        Ok((deal, shop))
    }

    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Result<Vec<Deal>> {
        let now = Utc::now();
        let mut deals: Vec<Deal> = self
            .deals
            .all()
            .await?
            .into_iter()
            .filter(|d| d.is_active(now))
            .collect();
        deals.sort_by_key(|d| Reverse(d.created_at));
        debug!(count = deals.len(), "Active deals listed");
        Ok(deals)
    }

    pub async fn list_featured(&self, limit: usize) -> Result<Vec<Deal>> {
        let mut deals = self.list_active().await?;
        deals.retain(|d| d.is_featured);
        deals.truncate(limit);
        Ok(deals)
    }

    /// Active deals expiring within `days`, soonest first.
    pub async fn list_ending_soon(&self, days: i64, limit: usize) -> Result<Vec<Deal>> {
        let now = Utc::now();
        let cutoff = now + Duration::days(days);
        let mut deals: Vec<Deal> = self
            .deals
            .all()
            .await?
            .into_iter()
            .filter(|d| {
                d.is_active(now) && d.expires_at.is_some_and(|end| end <= cutoff)
            })
            .collect();
        deals.sort_by_key(|d| d.expires_at);
        deals.truncate(limit);
        Ok(deals)
    }

    /// Active deals whose score is at least `min_score`. Unrated deals never
    /// qualify.
    pub async fn list_sustainable(&self, min_score: f64) -> Result<Vec<Deal>> {
        let mut deals = self.list_active().await?;
        deals.retain(|d| {
            d.sustainability_score
                .is_some_and(|s| s.inner() >= min_score)
        });
        Ok(deals)
    }

    #[instrument(skip(self), fields(deal_id = id))]
    pub async fn record_view(&self, id: u32) -> Result<Deal> {
        let mut deal = self.get_deal(id).await?;
        deal.views_count += 1;
        self.deals.update(deal.clone()).await?;
        Ok(deal)
    }

    #[instrument(skip(self), fields(deal_id = id))]
    pub async fn record_click(&self, id: u32) -> Result<Deal> {
        let mut deal = self.get_deal(id).await?;
        deal.clicks_count += 1;
        self.deals.update(deal.clone()).await?;
        Ok(deal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::{
        InMemoryDealRepository, InMemoryProductRepository, InMemoryShopRepository,
    };
    use crate::domain::models::{Price, Product, ProductCategory};
    use crate::domain::taxonomy::EcoCategory;

    async fn service_with_product(
        carbon_neutral: bool,
    ) -> (
        DealService<InMemoryDealRepository, InMemoryProductRepository, InMemoryShopRepository>,
        u32,
    ) {
        let deals = Arc::new(InMemoryDealRepository::new());
        let products = Arc::new(InMemoryProductRepository::new());
        let shops = Arc::new(InMemoryShopRepository::new());

        let shop = Shop {
            id: 1,
            name: "Corner Refill".to_string(),
            carbon_neutral,
            created_at: Utc::now(),
        };
        shops.save(shop).await.unwrap();

        let product = Product {
            id: 10,
            shop_id: 1,
            name: "Bamboo toothbrush".to_string(),
            price: Price::new(399),
            sustainability_score: None,
            category: ProductCategory::Eco(EcoCategory::ZeroWaste),
            is_available: true,
            created_at: Utc::now(),
        };
        products.save(product).await.unwrap();

        (DealService::new(deals, products, shops), 10)
    }

    fn create_request(product_id: u32) -> CreateDeal {
        CreateDeal {
            product_id,
            title: "Launch discount".to_string(),
            discount_percent: 25,
            expires_at: None,
            sustainability_score: None,
            eco_certifications: vec![],
            local_production: false,
            carbon_footprint: None,
            categories: vec![],
            is_featured: false,
            coupon_code: None,
        }
    }

    #[tokio::test]
    async fn test_create_deal_without_metadata_stays_unrated() {
        let (service, product_id) = service_with_product(false).await;

        let deal = service.create_deal(create_request(product_id)).await.unwrap();

        assert_eq!(deal.product_id, product_id);
        assert_eq!(deal.discount_percent.inner(), 25);
        assert!(deal.sustainability_score.is_none());
        assert!(deal.is_verified);
    }

    #[tokio::test]
    async fn test_create_deal_computes_score_from_metadata() {
        let (service, product_id) = service_with_product(true).await;

        let mut req = create_request(product_id);
        req.local_production = true;
        req.categories = vec![EcoCategory::Organic, EcoCategory::LocalArtisan];
        let deal = service.create_deal(req).await.unwrap();

        // local 20 + carbon-neutral shop 20 + two categories 20
        let score = deal.sustainability_score.unwrap();
        assert_eq!(score.inner(), 60.0);
    }

    #[tokio::test]
    async fn test_create_deal_explicit_score_wins() {
        let (service, product_id) = service_with_product(true).await;

        let mut req = create_request(product_id);
        req.local_production = true;
        req.sustainability_score = Some(91.5);
        let deal = service.create_deal(req).await.unwrap();

        assert_eq!(deal.sustainability_score.unwrap().inner(), 91.5);
    }

    #[tokio::test]
    async fn test_create_deal_rejects_out_of_range_discount() {
        let (service, product_id) = service_with_product(false).await;

        let mut req = create_request(product_id);
        req.discount_percent = 130;
        assert!(service.create_deal(req).await.is_err());
    }

    #[tokio::test]
    async fn test_create_deal_rejects_out_of_range_score() {
        let (service, product_id) = service_with_product(false).await;

        let mut req = create_request(product_id);
        req.sustainability_score = Some(120.0);
        assert!(service.create_deal(req).await.is_err());
    }

    #[tokio::test]
    async fn test_create_deal_unknown_product_is_not_found() {
        let (service, _) = service_with_product(false).await;

        let err = service.create_deal(create_request(999)).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_sustainable_skips_unrated_deals() {
        let (service, product_id) = service_with_product(false).await;

        service.create_deal(create_request(product_id)).await.unwrap();
        let mut rated = create_request(product_id);
        rated.sustainability_score = Some(85.0);
        service.create_deal(rated).await.unwrap();

        let sustainable = service.list_sustainable(70.0).await.unwrap();
        assert_eq!(sustainable.len(), 1);
        assert_eq!(sustainable[0].sustainability_score.unwrap().inner(), 85.0);
    }

    #[tokio::test]
    async fn test_list_featured_filters_and_limits() {
        let (service, product_id) = service_with_product(false).await;

        for i in 0..3 {
            let mut req = create_request(product_id);
            req.title = format!("Featured {i}");
            req.is_featured = true;
            service.create_deal(req).await.unwrap();
        }
        service.create_deal(create_request(product_id)).await.unwrap();

        let featured = service.list_featured(2).await.unwrap();
        assert_eq!(featured.len(), 2);
        assert!(featured.iter().all(|d| d.is_featured));
    }

    #[tokio::test]
    async fn test_list_ending_soon_orders_by_expiry() {
        let (service, product_id) = service_with_product(false).await;
        let now = Utc::now();

        let mut later = create_request(product_id);
        later.expires_at = Some(now + Duration::days(2));
        let later = service.create_deal(later).await.unwrap();

        let mut sooner = create_request(product_id);
        sooner.expires_at = Some(now + Duration::hours(6));
        let sooner = service.create_deal(sooner).await.unwrap();

        let mut far = create_request(product_id);
        far.expires_at = Some(now + Duration::days(30));
        service.create_deal(far).await.unwrap();

        let ending = service.list_ending_soon(3, 10).await.unwrap();
        let ids: Vec<u32> = ending.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![sooner.id, later.id]);
    }

    #[tokio::test]
    async fn test_record_view_and_click_increment_counters() {
        let (service, product_id) = service_with_product(false).await;
        let deal = service.create_deal(create_request(product_id)).await.unwrap();

        service.record_view(deal.id).await.unwrap();
        let after_views = service.record_view(deal.id).await.unwrap();
        assert_eq!(after_views.views_count, 2);

        let after_click = service.record_click(deal.id).await.unwrap();
        assert_eq!(after_click.clicks_count, 1);
        assert_eq!(after_click.views_count, 2);
    }
}
