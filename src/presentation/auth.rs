use crate::domain::user::{CreateUser, LoginRequest};
use crate::presentation::handlers::{ApiError, AppState};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetTokenRequest {
    pub user_id: String,
}

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn register(
    state: web::Data<AppState>,
    req: web::Json<CreateUser>,
) -> Result<HttpResponse, ApiError> {
    info!("Registration request received");

    let user = state
        .auth_service
        .register_user(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to register user");
            ApiError::from(e)
        })?;

    let response = RegisterResponse {
        id: user.id,
        email: user.email,
    };

    info!(user_id = %response.id, "User registered successfully");
    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Login request received");

    let token = state.auth_service.login(req.into_inner()).await.map_err(|e| {
        error!(error = %e, "Failed to login");
        ApiError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token: token,
    }))
}

#[instrument(skip(state, req), fields(user_id = %req.user_id))]
pub async fn get_token(
    state: web::Data<AppState>,
    req: web::Json<GetTokenRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Token request received");

    let token = state
        .auth_service
        .get_token(&req.user_id)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to generate token");
            ApiError::from(e)
        })?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token: token,
    }))
}
