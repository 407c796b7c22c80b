use crate::application::auth_service::AuthService;
use crate::application::catalog_service::CatalogService;
use crate::application::deal_service::DealService;
use crate::data::memory::{
    InMemoryDealRepository, InMemoryProductRepository, InMemoryShopRepository,
};
use crate::data::user_repository::InMemoryUserRepository;
use crate::domain::error::DomainError;
use crate::domain::models::{CreateDeal, CreateProduct, CreateShop, ProductCategory};
use crate::domain::taxonomy::{EcoCategory, ImpactTier};
use crate::presentation::card::DealCard;
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{FromRequest, HttpMessage, HttpResponse, ResponseError, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

pub type AppDealService =
    DealService<InMemoryDealRepository, InMemoryProductRepository, InMemoryShopRepository>;
pub type AppCatalogService = CatalogService<InMemoryProductRepository, InMemoryShopRepository>;

// AppState holding the services
pub struct AppState {
    pub deal_service: AppDealService,
    pub catalog_service: AppCatalogService,
    pub auth_service: Arc<AuthService<InMemoryUserRepository>>,
}

// Uniform error response format
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    details: serde_json::Value,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            ApiError::Validation(_) => actix_web::http::StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => actix_web::http::StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => actix_web::http::StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = self.to_string();

        let details = match self {
            ApiError::Validation(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Internal(msg) => serde_json::json!({ "message": msg }),
        };

        match self {
            ApiError::Validation(_) => {
                warn!(error = %error_msg, status = %status, "Validation error")
            }
            ApiError::NotFound(_) => {
                warn!(error = %error_msg, status = %status, "Resource not found")
            }
            ApiError::Unauthorized(_) => {
                warn!(error = %error_msg, status = %status, "Unauthorized")
            }
            ApiError::Internal(_) => {
                error!(error = %error_msg, status = %status, "Internal error")
            }
        }

        let error_response = ErrorResponse {
            error: error_msg,
            details,
        };

        HttpResponse::build(status).json(error_response)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DomainError>() {
            Some(DomainError::Validation(msg)) => ApiError::Validation(msg.clone()),
            Some(DomainError::NotFound(msg)) => ApiError::NotFound(msg.clone()),
            Some(DomainError::Unauthorized(msg)) => ApiError::Unauthorized(msg.clone()),
            Some(DomainError::Internal(msg)) => ApiError::Internal(msg.clone()),
            None => ApiError::Internal(err.to_string()),
        }
    }
}

// AuthenticatedUser extractor
impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        Box::pin(async move {
            user.ok_or_else(|| ApiError::Unauthorized("User not authenticated".to_string()))
        })
    }
}

// Handlers

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[instrument]
pub async fn health_check() -> HttpResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };
    HttpResponse::Ok().json(response)
}

/// The fixed eco-category slugs, in their stable order.
#[instrument]
pub async fn list_eco_categories() -> HttpResponse {
    let slugs: Vec<&str> = EcoCategory::ALL.iter().map(|c| c.slug()).collect();
    HttpResponse::Ok().json(slugs)
}

#[derive(Serialize)]
struct ImpactEntry {
    tier: ImpactTier,
    co2_kg: u32,
    water_liters: u32,
}

/// The static impact-tier estimate table.
#[instrument]
pub async fn impact_table() -> HttpResponse {
    let entries: Vec<ImpactEntry> = [ImpactTier::Low, ImpactTier::Medium, ImpactTier::High]
        .into_iter()
        .map(|tier| {
            let estimate = tier.estimate();
            ImpactEntry {
                tier,
                co2_kg: estimate.co2_kg,
                water_liters: estimate.water_liters,
            }
        })
        .collect();
    HttpResponse::Ok().json(entries)
}

#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn create_shop(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CreateShop>,
) -> Result<HttpResponse, ApiError> {
    info!(name = %req.name, "Creating shop");
    let shop = state
        .catalog_service
        .create_shop(req.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Created().json(shop))
}

#[instrument(skip(state), fields(shop_id = %*path))]
pub async fn get_shop(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    let shop = state
        .catalog_service
        .get_shop(path.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(shop))
}

#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn create_product(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CreateProduct>,
) -> Result<HttpResponse, ApiError> {
    info!(name = %req.name, shop_id = req.shop_id, "Creating product");
    let product = state
        .catalog_service
        .create_product(req.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Created().json(product))
}

#[instrument(skip(state), fields(product_id = %*path))]
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    let product = state
        .catalog_service
        .get_product(path.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(product))
}

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub category: Option<String>,
}

#[instrument(skip(state))]
pub async fn list_products(
    state: web::Data<AppState>,
    query: web::Query<ProductListQuery>,
) -> Result<HttpResponse, ApiError> {
    let category = query
        .into_inner()
        .category
        .map(|label| ProductCategory::from_label(&label));
    let products = state
        .catalog_service
        .list_products(category)
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(products))
}

#[instrument(skip(state, user), fields(user_id = %user.user_id, deal_id))]
pub async fn create_deal(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CreateDeal>,
) -> Result<HttpResponse, ApiError> {
    info!(title = %req.title, product_id = req.product_id, "Creating deal");
    let deal = state
        .deal_service
        .create_deal(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create deal");
            ApiError::from(e)
        })?;
    tracing::Span::current().record("deal_id", deal.id);
    Ok(HttpResponse::Created().json(deal))
}

#[instrument(skip(state), fields(deal_id = %*path))]
pub async fn get_deal(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    let deal = state
        .deal_service
        .get_deal(path.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(deal))
}

#[instrument(skip(state))]
pub async fn list_deals(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let deals = state
        .deal_service
        .list_active()
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(deals))
}

#[derive(Debug, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<usize>,
}

#[instrument(skip(state))]
pub async fn featured_deals(
    state: web::Data<AppState>,
    query: web::Query<FeaturedQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = query.limit.unwrap_or(6);
    let deals = state
        .deal_service
        .list_featured(limit)
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(deals))
}

#[derive(Debug, Deserialize)]
pub struct EndingSoonQuery {
    pub days: Option<i64>,
    pub limit: Option<usize>,
}

#[instrument(skip(state))]
pub async fn ending_soon_deals(
    state: web::Data<AppState>,
    query: web::Query<EndingSoonQuery>,
) -> Result<HttpResponse, ApiError> {
    let days = query.days.unwrap_or(3);
    let limit = query.limit.unwrap_or(6);
    let deals = state
        .deal_service
        .list_ending_soon(days, limit)
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(deals))
}

#[derive(Debug, Deserialize)]
pub struct SustainableQuery {
    pub min_score: Option<f64>,
}

#[instrument(skip(state))]
pub async fn sustainable_deals(
    state: web::Data<AppState>,
    query: web::Query<SustainableQuery>,
) -> Result<HttpResponse, ApiError> {
    let min_score = query.min_score.unwrap_or(70.0);
    let deals = state
        .deal_service
        .list_sustainable(min_score)
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(deals))
}

#[instrument(skip(state), fields(deal_id = %*path))]
pub async fn deal_card(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    let (deal, shop) = state
        .deal_service
        .get_deal_with_shop(path.into_inner())
        .await
        .map_err(ApiError::from)?;
    let card = DealCard::render(&deal, &shop, Utc::now());
    Ok(HttpResponse::Ok().json(card))
}

#[derive(Serialize)]
struct TrackResponse {
    status: String,
}

#[instrument(skip(state), fields(deal_id = %*path))]
pub async fn track_view(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    state
        .deal_service
        .record_view(path.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(TrackResponse {
        status: "view recorded".to_string(),
    }))
}

#[instrument(skip(state), fields(deal_id = %*path))]
pub async fn track_click(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    state
        .deal_service
        .record_click(path.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(TrackResponse {
        status: "click recorded".to_string(),
    }))
}
