use tracing::debug;

use crate::constants::{HIGH_RISK_SIMILARITY, MEDIUM_RISK_SIMILARITY};

use super::types::{CoverageScore, RiskAssessment, RiskLevel};

/// `max(0, 1 - distance)`. Distances above 1 would otherwise go negative.
#[inline]
pub fn similarity_from_distance(distance: f32) -> f32 {
    (1.0 - distance).max(0.0)
}

/// Maps a similarity to its risk band.
///
/// HIGH is checked before MEDIUM; boundary values fall into the lower-risk band
/// (0.3 is MEDIUM, 0.5 is LOW).
pub fn classify(similarity: f32) -> RiskLevel {
    if similarity < HIGH_RISK_SIMILARITY {
        RiskLevel::High
    } else if similarity < MEDIUM_RISK_SIMILARITY {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Scores a context-to-job cosine distance.
pub fn assess_distance(distance: f32) -> RiskAssessment {
    let similarity = similarity_from_distance(distance);
    let level = classify(similarity);

    debug!(distance, similarity, risk = %level, "Risk classified");

    RiskAssessment {
        distance,
        similarity,
        level,
    }
}

/// CV-to-job coverage as a percentage.
pub fn coverage_from_distance(distance: f32) -> CoverageScore {
    let similarity = similarity_from_distance(distance);
    let coverage_score = round_decimals(similarity * 100.0, 2);

    CoverageScore {
        distance,
        similarity,
        coverage_score,
    }
}

/// Rounds half away from zero to `decimals` places.
pub fn round_decimals(value: f32, decimals: i32) -> f32 {
    let factor = 10f32.powi(decimals);
    (value * factor).round() / factor
}
