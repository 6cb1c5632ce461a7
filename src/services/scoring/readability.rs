// Readability and Clarity
// Flesch reading ease (normalized to 0-1) and a sentence-shape clarity heuristic

use crate::services::sentence_segmenter::{segment, Document};

use super::ai_score::{count_passive_voice, lexical_repetition};

/// Sentences with more terms than this count as long
pub const LONG_SENTENCE_TERMS: usize = 25;

const LONG_SENTENCE_WEIGHT: f64 = 0.5;
const PASSIVE_WEIGHT: f64 = 0.3;
const REPETITION_WEIGHT: f64 = 0.2;

pub fn get_readability_score(text: &str) -> f64 {
    readability_score(&segment(text))
}

pub fn get_clarity_score(text: &str) -> f64 {
    clarity_score(&segment(text))
}

/// Flesch reading ease clamped to [0, 100] and scaled to [0, 1]
pub fn readability_score(doc: &Document) -> f64 {
    let sentences = doc.sentence_count();
    let words = doc.term_count();
    if sentences == 0 || words == 0 {
        return 0.0;
    }

    let syllables: usize = doc.terms().map(|t| count_syllables(&t.normal)).sum();
    let words_per_sentence = words as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words as f64;

    let ease = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    ease.clamp(0.0, 100.0) / 100.0
}

/// Fraction of sentences longer than `LONG_SENTENCE_TERMS`
pub fn long_sentence_ratio(doc: &Document) -> f64 {
    if doc.is_empty() {
        return 0.0;
    }
    let long = doc
        .sentences()
        .iter()
        .filter(|s| s.terms.len() > LONG_SENTENCE_TERMS)
        .count();
    long as f64 / doc.sentence_count() as f64
}

/// Penalizes long sentences, passive constructions and repeated vocabulary
pub fn clarity_score(doc: &Document) -> f64 {
    if doc.is_empty() {
        return 0.0;
    }
    let passive_ratio =
        (count_passive_voice(doc) as f64 / doc.sentence_count() as f64).min(1.0);
    let penalty = LONG_SENTENCE_WEIGHT * long_sentence_ratio(doc)
        + PASSIVE_WEIGHT * passive_ratio
        + REPETITION_WEIGHT * lexical_repetition(doc);
    (1.0 - penalty).clamp(0.0, 1.0)
}

/// Vowel-group syllable estimate; at least one per word
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if letters.is_empty() {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups = 0usize;
    let mut prev_vowel = false;
    for &c in &letters {
        let v = is_vowel(c);
        if v && !prev_vowel {
            groups += 1;
        }
        prev_vowel = v;
    }

    // Silent trailing "e" ("make"), but not "-le" ("table")
    let n = letters.len();
    if n > 2 && letters[n - 1] == 'e' && !is_vowel(letters[n - 2]) && letters[n - 2] != 'l' {
        groups = groups.saturating_sub(1);
    }

    groups.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syllables() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("table"), 2);
        assert_eq!(count_syllables("reading"), 2);
        assert_eq!(count_syllables("beautiful"), 3);
        assert_eq!(count_syllables("42"), 1);
    }

    #[test]
    fn test_empty_scores_are_zero() {
        assert_eq!(get_readability_score(""), 0.0);
        assert_eq!(get_clarity_score(""), 0.0);
    }

    #[test]
    fn test_simple_text_is_more_readable() {
        let simple = "The cat sat on the mat. The dog ran to the park.";
        let dense = "Institutional interoperability necessitates comprehensive organizational \
                     standardization methodologies facilitating multidimensional collaboration.";
        assert!(get_readability_score(simple) > get_readability_score(dense));
        let score = get_readability_score(simple);
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_clarity_penalizes_passive_voice() {
        let active = "The team wrote the report. The manager approved it.";
        let passive = "The report was written. The plan was approved.";
        assert!(get_clarity_score(active) > get_clarity_score(passive));
        // 9 terms, 7 distinct: only the repetition penalty applies
        let expected = 1.0 - 0.2 * (1.0 - 7.0 / 9.0);
        assert!((get_clarity_score(active) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_long_sentence_ratio() {
        let long = vec!["word"; 30].join(" ") + ".";
        let text = format!("{} Short one here.", long);
        let doc = segment(&text);
        assert_eq!(long_sentence_ratio(&doc), 0.5);
    }
}
