// AI-likelihood Scorer
// Averages complexity, formality, passive-voice and repetition sub-scores

use crate::models::AiScoreBreakdown;
use crate::services::sentence_segmenter::{segment, Document, Term};
use std::collections::HashSet;

/// Formal connectives that AI-generated prose tends to overuse
pub const FORMAL_CONNECTIVES: &[&str] = &[
    "therefore",
    "hence",
    "thus",
    "consequently",
    "furthermore",
    "moreover",
];

/// Words per sentence at which the complexity sub-score saturates
const COMPLEXITY_SATURATION: f64 = 20.0;
/// Per-sentence rate multiplier for formality and passivity
const RATE_WEIGHT: f64 = 2.0;

/// Score text for AI likelihood in [0, 1]
pub fn get_ai_score(text: &str) -> f64 {
    ai_score_breakdown(&segment(text)).score
}

/// Sub-scores and final AI-likelihood score for a segmented document
pub fn ai_score_breakdown(doc: &Document) -> AiScoreBreakdown {
    let sentence_count = doc.sentence_count();
    let term_count = doc.term_count();

    let (avg_words, formal_rate, passive_rate) = if sentence_count == 0 {
        (0.0, 0.0, 0.0)
    } else {
        let n = sentence_count as f64;
        (
            term_count as f64 / n,
            count_formal_connectives(doc) as f64 / n,
            count_passive_voice(doc) as f64 / n,
        )
    };

    let complexity = (avg_words / COMPLEXITY_SATURATION).clamp(0.0, 1.0);
    let formality = (formal_rate * RATE_WEIGHT).clamp(0.0, 1.0);
    let passivity = (passive_rate * RATE_WEIGHT).clamp(0.0, 1.0);
    let repetition = lexical_repetition(doc);

    let score = ((complexity + formality + passivity + repetition) / 4.0).clamp(0.0, 1.0);

    AiScoreBreakdown {
        complexity,
        formality,
        passivity,
        repetition,
        avg_words_per_sentence: avg_words,
        score,
    }
}

/// Whole-word, case-insensitive count of formal connectives
pub fn count_formal_connectives(doc: &Document) -> usize {
    doc.terms()
        .filter(|t| FORMAL_CONNECTIVES.contains(&t.normal.as_str()))
        .count()
}

/// Count `<noun> (was|were|has been|have been) <verb>` patterns within sentences
pub fn count_passive_voice(doc: &Document) -> usize {
    doc.sentences()
        .iter()
        .map(|s| count_passive_in(&s.terms))
        .sum()
}

fn count_passive_in(terms: &[Term]) -> usize {
    let mut count = 0;
    for (i, subject) in terms.iter().enumerate() {
        if !subject.noun_like {
            continue;
        }
        let Some(aux) = terms.get(i + 1) else {
            break;
        };
        let verb_at = match aux.normal.as_str() {
            "was" | "were" => i + 2,
            "has" | "have" if terms.get(i + 2).is_some_and(|t| t.normal == "been") => i + 3,
            _ => continue,
        };
        if terms.get(verb_at).is_some_and(|t| t.verb_like) {
            count += 1;
        }
    }
    count
}

/// `1 - unique/total` over normalized terms; 0 for an empty document
pub fn lexical_repetition(doc: &Document) -> f64 {
    let total = doc.term_count();
    if total == 0 {
        return 0.0;
    }
    let unique: HashSet<&str> = doc.terms().map(|t| t.normal.as_str()).collect();
    (1.0 - unique.len() as f64 / total as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_text_scores_zero() {
        assert_eq!(get_ai_score(""), 0.0);
        assert_eq!(get_ai_score("   \n "), 0.0);
        assert_eq!(get_ai_score("?!..."), 0.0);
    }

    #[test]
    fn test_formal_connectives_whole_word() {
        let doc = segment("Therefore we left. Thusly is not a word. Moreover, HENCE.");
        assert_eq!(count_formal_connectives(&doc), 3);
    }

    #[test]
    fn test_passive_voice_patterns() {
        let doc = segment(
            "The report was written by the team. The results have been published. \
             The cars were fast. It has been done.",
        );
        assert_eq!(count_passive_voice(&doc), 3);
    }

    #[test]
    fn test_repetition() {
        let doc = segment("Go go go go.");
        assert!((lexical_repetition(&doc) - 0.75).abs() < 1e-9);

        let doc = segment("All words differ here.");
        assert_eq!(lexical_repetition(&doc), 0.0);
    }

    #[test]
    fn test_breakdown_values() {
        // 2 sentences, 10 terms, 1 connective, 1 passive
        let doc = segment("The paper was reviewed twice. Therefore it is ready now.");
        let b = ai_score_breakdown(&doc);
        assert_eq!(doc.term_count(), 10);
        assert!((b.avg_words_per_sentence - 5.0).abs() < 1e-9);
        assert!((b.complexity - 0.25).abs() < 1e-9);
        assert!((b.formality - 1.0).abs() < 1e-9);
        assert!((b.passivity - 1.0).abs() < 1e-9);
        assert_eq!(b.repetition, 0.0);
        assert!((b.score - 0.5625).abs() < 1e-9);
    }

    #[test]
    fn test_formal_text_scores_higher_than_casual() {
        let formal = "The framework was implemented across all departments. Furthermore, \
                      the procedures were standardized. Consequently, the outcomes were improved. \
                      Moreover, the policies have been documented thoroughly.";
        let casual = "I love this. We went out. It was fun!";
        assert!(get_ai_score(formal) > get_ai_score(casual));
    }

    #[test]
    fn test_deterministic() {
        let text = "Moreover, the system was designed carefully. Thus it works.";
        assert_eq!(get_ai_score(text), get_ai_score(text));
    }

    proptest! {
        #[test]
        fn prop_score_is_bounded(text in "\\PC{0,400}") {
            let score = get_ai_score(&text);
            prop_assert!((0.0..=1.0).contains(&score));
        }

        #[test]
        fn prop_score_is_pure(text in "[a-zA-Z .!?,]{0,300}") {
            prop_assert_eq!(get_ai_score(&text), get_ai_score(&text));
        }
    }
}
