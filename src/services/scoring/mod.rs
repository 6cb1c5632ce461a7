// Scoring Module
// Heuristic, synchronous text scoring organized into submodules:
// - ai_score: AI-likelihood from complexity/formality/passivity/repetition
// - tone: word-list sentiment
// - keywords: keyword density
// - plagiarism: same-document repeated opening phrases
// - readability: Flesch reading ease and clarity
// - trust: composite 0-100 trust score
// - verdict: display bands for the AI score
// - suggestions: writing tips derived from the sub-scores

pub mod ai_score;
pub mod keywords;
pub mod plagiarism;
pub mod readability;
pub mod suggestions;
pub mod tone;
pub mod trust;
pub mod verdict;

pub use ai_score::{ai_score_breakdown, get_ai_score};
pub use keywords::{get_keyword_density, keyword_density, top_keywords};
pub use plagiarism::{find_plagiarism_phrases, plagiarism_phrases};
pub use readability::{clarity_score, get_clarity_score, get_readability_score, readability_score};
pub use suggestions::writing_suggestions;
pub use tone::{get_tone_analysis, tone_analysis};
pub use trust::calculate_trust_score;
pub use verdict::{content_breakdown, verdict_for};

use crate::models::AnalysisResult;
use crate::services::sentence_segmenter::Document;

/// Everything the detect mode reports, computed from one segmentation.
/// The trust score is left to the caller, which knows whether plagiarism
/// results exist for the same request.
pub fn detect_scores(doc: &Document) -> AnalysisResult {
    let breakdown = ai_score_breakdown(doc);
    let verdict = verdict_for(breakdown.score);
    let suggestions = writing_suggestions(&breakdown, readability::long_sentence_ratio(doc));

    AnalysisResult {
        ai_score: Some(breakdown.score),
        verdict: Some(verdict),
        verdict_label: Some(verdict.label().to_string()),
        content_breakdown: Some(content_breakdown(breakdown.score)),
        ai_score_breakdown: Some(breakdown),
        readability_score: Some(readability_score(doc)),
        clarity_score: Some(clarity_score(doc)),
        suggestions: Some(suggestions),
        tone_analysis: Some(tone_analysis(doc)),
        keyword_density: Some(keyword_density(doc)),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::sentence_segmenter::segment;

    #[test]
    fn test_detect_scores_fills_detect_fields() {
        let doc = segment("This is a wonderful day. Moreover, the work was finished early.");
        let result = detect_scores(&doc);
        assert!(result.ai_score.is_some());
        assert!(result.verdict.is_some());
        assert!(result.readability_score.is_some());
        assert!(result.clarity_score.is_some());
        assert!(result.tone_analysis.is_some());
        assert!(result.keyword_density.is_some());
        assert!(result.humanized_text.is_none());
        assert!(result.trust_score.is_none());
    }

    #[test]
    fn test_detect_scores_on_empty_document() {
        let result = detect_scores(&Document::default());
        assert_eq!(result.ai_score, Some(0.0));
        assert_eq!(result.readability_score, Some(0.0));
        assert_eq!(result.keyword_density.map(|d| d.len()), Some(0));
    }
}
