use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::taxonomy::EcoCategory;

/// Price in minor currency units (cents).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(u64);

impl Price {
    pub fn new(value: u64) -> Self {
        Price(value)
    }

    pub fn inner(&self) -> u64 {
        self.0
    }
}

/// Discount percentage, valid only in [0, 100].
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DiscountPercent(u8);

impl DiscountPercent {
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value > 100 {
            return Err(DomainError::Validation(format!(
                "discount percentage {value} is outside 0-100"
            )));
        }
        Ok(DiscountPercent(value))
    }

    pub fn inner(&self) -> u8 {
        self.0
    }
}

/// Sustainability rating in [0.0, 100.0], higher is better.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, PartialOrd)]
pub struct SustainabilityScore(f64);

impl SustainabilityScore {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(DomainError::Validation(format!(
                "sustainability score {value} is outside 0-100"
            )));
        }
        Ok(SustainabilityScore(value))
    }

    /// Construction for internally computed values, clamping into range.
    pub fn clamped(value: f64) -> Self {
        SustainabilityScore(value.clamp(0.0, 100.0))
    }

    pub fn inner(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Shop {
    pub id: u32,
    pub name: String,
    pub carbon_neutral: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateShop {
    pub name: String,
    #[serde(default)]
    pub carbon_neutral: bool,
}

/// A product category: either one of the fixed eco categories or a free-form
/// label for everything else. On the wire both forms are plain strings; the
/// fixed slugs win during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductCategory {
    Eco(EcoCategory),
    Other(String),
}

impl ProductCategory {
    pub fn from_label(label: &str) -> Self {
        EcoCategory::from_slug(label)
            .map(ProductCategory::Eco)
            .unwrap_or_else(|| ProductCategory::Other(label.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    pub id: u32,
    pub shop_id: u32,
    pub name: String,
    pub price: Price,
    pub sustainability_score: Option<SustainabilityScore>,
    pub category: ProductCategory,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProduct {
    pub shop_id: u32,
    pub name: String,
    pub price: u64,
    pub sustainability_score: Option<f64>,
    pub category: ProductCategory,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Deal {
    pub id: u32,
    pub product_id: u32,
    pub shop_id: u32,
    pub title: String,
    pub discount_percent: DiscountPercent,
    pub expires_at: Option<DateTime<Utc>>,
    pub sustainability_score: Option<SustainabilityScore>,
    pub eco_certifications: Vec<String>,
    pub local_production: bool,
    pub carbon_footprint: Option<f64>,
    pub categories: Vec<EcoCategory>,
    pub is_featured: bool,
    pub is_verified: bool,
    pub coupon_code: Option<String>,
    pub views_count: u32,
    pub clicks_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Deal {
    /// A deal is active while it is verified and not past its expiry.
    /// Deals without an expiry never lapse.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.is_verified && self.expires_at.is_none_or(|end| now <= end)
    }

    /// Deals younger than three days are highlighted as new.
    pub fn is_new(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.created_at) < Duration::days(3)
    }

    /// Human-readable time remaining, `None` when the deal has no expiry.
    pub fn time_left(&self, now: DateTime<Utc>) -> Option<String> {
        let end = self.expires_at?;
        if now > end {
            return Some("Expired".to_string());
        }

        let left = end.signed_duration_since(now);
        let days = left.num_days();
        if days > 0 {
            return Some(format!("{days} days"));
        }

        let hours = left.num_hours();
        if hours > 0 {
            return Some(format!("{hours} hours"));
        }

        let minutes = left.num_minutes();
        Some(format!("{minutes} minutes"))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDeal {
    pub product_id: u32,
    pub title: String,
    pub discount_percent: u8,
    pub expires_at: Option<DateTime<Utc>>,
    pub sustainability_score: Option<f64>,
    #[serde(default)]
    pub eco_certifications: Vec<String>,
    #[serde(default)]
    pub local_production: bool,
    pub carbon_footprint: Option<f64>,
    #[serde(default)]
    pub categories: Vec<EcoCategory>,
    #[serde(default)]
    pub is_featured: bool,
    pub coupon_code: Option<String>,
}
