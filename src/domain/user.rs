use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::taxonomy::EcoCategory;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Ordered by preference; an empty list means no preference recorded.
    pub preferred_categories: Vec<EcoCategory>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub preferred_categories: Vec<EcoCategory>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
