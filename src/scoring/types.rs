use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
/// Conversational risk band, ordered from most to least similar to the job description.
pub enum RiskLevel {
    /// Similarity ≥ 0.5.
    Low,
    /// 0.3 ≤ similarity < 0.5.
    Medium,
    /// Similarity < 0.3.
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Outcome of scoring a context vector against the job description.
pub struct RiskAssessment {
    /// Raw cosine distance.
    pub distance: f32,
    /// `max(0, 1 - distance)`.
    pub similarity: f32,
    pub level: RiskLevel,
}

impl std::fmt::Display for RiskAssessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (similarity: {:.4})", self.level, self.similarity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Macro-level match between a CV and a job description.
pub struct CoverageScore {
    pub distance: f32,
    pub similarity: f32,
    /// Similarity as a percentage, rounded to two decimals.
    pub coverage_score: f32,
}
