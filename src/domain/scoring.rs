use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::models::SustainabilityScore;

/// Qualitative rating shown next to a sustainability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreLabel {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs improvement")]
    NeedsImprovement,
}

impl ScoreLabel {
    pub const fn as_str(self) -> &'static str {
        match self {
            ScoreLabel::Excellent => "Excellent",
            ScoreLabel::Good => "Good",
            ScoreLabel::Fair => "Fair",
            ScoreLabel::NeedsImprovement => "Needs improvement",
        }
    }
}

impl fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a numeric score to its qualitative label.
///
/// Input is deliberately not range-checked: out-of-range values fall through
/// the same thresholds, so anything below 40 (including negatives) reads
/// "Needs improvement" and anything at or above 80 reads "Excellent".
pub fn label_for_score(score: f64) -> ScoreLabel {
    if score >= 80.0 {
        ScoreLabel::Excellent
    } else if score >= 60.0 {
        ScoreLabel::Good
    } else if score >= 40.0 {
        ScoreLabel::Fair
    } else {
        ScoreLabel::NeedsImprovement
    }
}

/// Derives a 0-100 sustainability score from a deal's eco metadata.
///
/// Certifications count up to 40 points, local production and a
/// carbon-neutral shop 20 each, eco categories up to 25, and a low absolute
/// carbon footprint up to 20. The sum is capped at 100.
pub fn compute_sustainability_score(
    certifications: usize,
    local_production: bool,
    shop_carbon_neutral: bool,
    eco_categories: usize,
    carbon_footprint_kg: Option<f64>,
) -> SustainabilityScore {
    let mut score = 0.0;

    score += (certifications as f64 * 15.0).min(40.0);

    if local_production {
        score += 20.0;
    }

    if shop_carbon_neutral {
        score += 20.0;
    }

    score += (eco_categories as f64 * 10.0).min(25.0);

    if let Some(kg) = carbon_footprint_kg {
        if kg < 5.0 {
            score += 20.0;
        } else if kg < 10.0 {
            score += 10.0;
        }
    }

    SustainabilityScore::clamped(score)
}
