//! Risk classification.
//!
//! The engine compares the session context against the job description and turns the
//! resulting similarity into a [`RiskLevel`]. A HIGH level means the conversation has
//! drifted away from what the role requires and the next question should steer back.

pub mod classifier;
pub mod types;


pub use classifier::{
    assess_distance, classify, coverage_from_distance, round_decimals, similarity_from_distance,
};
pub use types::{CoverageScore, RiskAssessment, RiskLevel};
