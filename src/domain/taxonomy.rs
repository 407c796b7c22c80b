use serde::{Deserialize, Serialize};

/// Fixed sustainability categories a deal or product can belong to.
///
/// The set is closed: scoring and user preferences only recognize these five
/// members. Products may additionally carry free-form categories, see
/// `ProductCategory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EcoCategory {
    ZeroWaste,
    Organic,
    Recycled,
    FairTrade,
    LocalArtisan,
}

impl EcoCategory {
    /// All categories in declaration order. Callers rely on this order being
    /// stable (user preference lists, category pickers).
    pub const ALL: [EcoCategory; 5] = [
        EcoCategory::ZeroWaste,
        EcoCategory::Organic,
        EcoCategory::Recycled,
        EcoCategory::FairTrade,
        EcoCategory::LocalArtisan,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            EcoCategory::ZeroWaste => "zero-waste",
            EcoCategory::Organic => "organic",
            EcoCategory::Recycled => "recycled",
            EcoCategory::FairTrade => "fair-trade",
            EcoCategory::LocalArtisan => "local-artisan",
        }
    }

    pub fn from_slug(slug: &str) -> Option<EcoCategory> {
        EcoCategory::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

/// Environmental impact severity of a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactTier {
    Low,
    Medium,
    High,
}

/// Fixed CO2/water estimates per impact tier. A static lookup table, not a
/// computed model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImpactEstimate {
    pub co2_kg: u32,
    pub water_liters: u32,
}

impl ImpactTier {
    pub const fn estimate(self) -> ImpactEstimate {
        match self {
            ImpactTier::Low => ImpactEstimate {
                co2_kg: 1,
                water_liters: 50,
            },
            ImpactTier::Medium => ImpactEstimate {
                co2_kg: 5,
                water_liters: 200,
            },
            ImpactTier::High => ImpactEstimate {
                co2_kg: 12,
                water_liters: 500,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eco_categories_are_exactly_five_in_stable_order() {
        let slugs: Vec<&str> = EcoCategory::ALL.iter().map(|c| c.slug()).collect();
        assert_eq!(
            slugs,
            vec![
                "zero-waste",
                "organic",
                "recycled",
                "fair-trade",
                "local-artisan"
            ]
        );
    }

    #[test]
    fn test_slug_round_trip() {
        for category in EcoCategory::ALL {
            assert_eq!(EcoCategory::from_slug(category.slug()), Some(category));
        }
    }

    #[test]
    fn test_from_slug_rejects_unknown() {
        assert_eq!(EcoCategory::from_slug("vegan"), None);
        assert_eq!(EcoCategory::from_slug(""), None);
        assert_eq!(EcoCategory::from_slug("ZeroWaste"), None);
    }

    #[test]
    fn test_eco_category_serializes_as_kebab_case() {
        let json = serde_json::to_string(&EcoCategory::FairTrade).unwrap();
        assert_eq!(json, "\"fair-trade\"");
        let back: EcoCategory = serde_json::from_str("\"local-artisan\"").unwrap();
        assert_eq!(back, EcoCategory::LocalArtisan);
    }

    #[test]
    fn test_impact_table_values() {
        assert_eq!(
            ImpactTier::Low.estimate(),
            ImpactEstimate {
                co2_kg: 1,
                water_liters: 50
            }
        );
        assert_eq!(
            ImpactTier::Medium.estimate(),
            ImpactEstimate {
                co2_kg: 5,
                water_liters: 200
            }
        );
        assert_eq!(
            ImpactTier::High.estimate(),
            ImpactEstimate {
                co2_kg: 12,
                water_liters: 500
            }
        );
    }
}
