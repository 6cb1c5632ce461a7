// Trust Score
// Combines AI likelihood, readability, clarity and phrase-repetition impact into 0-100

use crate::models::PlagiarismMatch;

const AI_WEIGHT: f64 = 0.4;
const READABILITY_WEIGHT: f64 = 0.3;
const CLARITY_WEIGHT: f64 = 0.3;
/// Summed `matches` at which plagiarism impact saturates
const PLAGIARISM_SATURATION: f64 = 1000.0;

/// Inputs are expected in [0, 1] but are not validated; the output is clamped
/// to [0, 100] and non-finite results collapse to 0.
pub fn calculate_trust_score(
    ai_score: f64,
    readability_score: f64,
    clarity_score: f64,
    plagiarism_results: &[PlagiarismMatch],
) -> f64 {
    let impact = plagiarism_impact(plagiarism_results);
    let base = (1.0 - ai_score) * AI_WEIGHT
        + readability_score * READABILITY_WEIGHT
        + clarity_score * CLARITY_WEIGHT;
    let trust = base * (1.0 - impact) * 100.0;
    if trust.is_finite() {
        trust.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// `min(1, sum(matches) / 1000)`; 0 for no results
pub fn plagiarism_impact(plagiarism_results: &[PlagiarismMatch]) -> f64 {
    let total: f64 = plagiarism_results.iter().map(|p| p.matches as f64).sum();
    (total / PLAGIARISM_SATURATION).min(1.0)
}
