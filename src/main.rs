use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use eco_deals_api::application::auth_service::AuthService;
use eco_deals_api::application::catalog_service::CatalogService;
use eco_deals_api::application::deal_service::DealService;
use eco_deals_api::data::memory::{
    InMemoryDealRepository, InMemoryProductRepository, InMemoryShopRepository,
};
use eco_deals_api::data::user_repository::InMemoryUserRepository;
use eco_deals_api::infrastructure::config::AppConfig;
use eco_deals_api::infrastructure::logging::init_logging;
use eco_deals_api::presentation::auth::{get_token, login, register};
use eco_deals_api::presentation::handlers::{
    AppState, create_deal, create_product, create_shop, deal_card, ending_soon_deals,
    featured_deals, get_deal, get_product, get_shop, health_check, impact_table, list_deals,
    list_eco_categories, list_products, sustainable_deals, track_click, track_view,
};
use eco_deals_api::presentation::middleware::{
    JwtAuthMiddleware, RequestIdMiddleware, TimingMiddleware,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_logging();
    let config = AppConfig::from_env();
    info!(bind_addr = %config.bind_addr, "Configuration loaded");

    let deal_repository = Arc::new(InMemoryDealRepository::new());
    let product_repository = Arc::new(InMemoryProductRepository::new());
    let shop_repository = Arc::new(InMemoryShopRepository::new());
    let user_repository = Arc::new(InMemoryUserRepository::new());

    let deal_service = DealService::new(
        deal_repository,
        product_repository.clone(),
        shop_repository.clone(),
    );
    let catalog_service = CatalogService::new(product_repository, shop_repository);
    let auth_service = Arc::new(AuthService::new(user_repository, config.jwt_secret.clone()));

    let state = web::Data::new(AppState {
        deal_service,
        catalog_service,
        auth_service,
    });

    let jwt_secret = config.jwt_secret.clone();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(JwtAuthMiddleware::new(jwt_secret.clone()))
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(cors)
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(health_check))
                    .route("/categories", web::get().to(list_eco_categories))
                    .route("/impact", web::get().to(impact_table))
                    .route("/auth/register", web::post().to(register))
                    .route("/auth/login", web::post().to(login))
                    .route("/auth/token", web::post().to(get_token))
                    .route("/shops", web::post().to(create_shop))
                    .route("/shops/{id}", web::get().to(get_shop))
                    .route("/products", web::post().to(create_product))
                    .route("/products", web::get().to(list_products))
                    .route("/products/{id}", web::get().to(get_product))
                    .route("/deals", web::post().to(create_deal))
                    .route("/deals", web::get().to(list_deals))
                    .route("/deals/featured", web::get().to(featured_deals))
                    .route("/deals/ending-soon", web::get().to(ending_soon_deals))
                    .route("/deals/sustainable", web::get().to(sustainable_deals))
                    .route("/deals/{id}", web::get().to(get_deal))
                    .route("/deals/{id}/card", web::get().to(deal_card))
                    .route("/deals/{id}/view", web::post().to(track_view))
                    .route("/deals/{id}/click", web::post().to(track_click)),
            )
    });

    info!(bind_addr = %config.bind_addr, "Starting HTTP server");
    server.bind(config.bind_addr.as_str())?.run().await
}
