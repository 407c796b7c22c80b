use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::{Deal, Shop};
use crate::domain::scoring::{ScoreLabel, label_for_score};

/// Client-facing rendering of a deal.
///
/// The wire format is camelCase (`sustainabilityScore`) while the domain
/// stores `sustainability_score`; the rename lives here, at the presentation
/// boundary, and nowhere else.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealCard {
    pub id: u32,
    pub title: String,
    pub shop_name: String,
    pub discount: String,
    pub sustainability_score: f64,
    pub sustainability_label: ScoreLabel,
    pub coupon_code: Option<String>,
    pub time_left: Option<String>,
    pub is_new: bool,
}

impl DealCard {
    /// An unrated deal renders as score 0, which labels as
    /// "Needs improvement".
    pub fn render(deal: &Deal, shop: &Shop, now: DateTime<Utc>) -> Self {
        let score = deal.sustainability_score.map_or(0.0, |s| s.inner());

        Self {
            id: deal.id,
            title: deal.title.clone(),
            shop_name: shop.name.clone(),
            discount: format!("{}%", deal.discount_percent.inner()),
            sustainability_score: score,
            sustainability_label: label_for_score(score),
            coupon_code: deal.coupon_code.clone(),
            time_left: deal.time_left(now),
            is_new: deal.is_new(now),
        }
    }
}
