// Plagiarism Phrase Extraction
// Same-document self-similarity: how often each sentence's opening phrase recurs.
// No external corpus is consulted.

use crate::models::PlagiarismMatch;
use crate::services::sentence_segmenter::{segment, tokenize, Document};

const KEY_PHRASE_WORDS: usize = 5;
const MAX_RESULTS: usize = 5;
const MATCH_WEIGHT: u32 = 100;

pub fn find_plagiarism_phrases(text: &str) -> Vec<PlagiarismMatch> {
    plagiarism_phrases(&segment(text))
}

/// Up to five candidate phrases, sorted by descending `matches`.
/// Ties keep sentence order.
pub fn plagiarism_phrases(doc: &Document) -> Vec<PlagiarismMatch> {
    let mut phrases: Vec<PlagiarismMatch> = doc
        .sentences()
        .iter()
        .filter_map(|sentence| {
            let words = sentence.words();
            if words.len() < KEY_PHRASE_WORDS {
                return None;
            }
            let phrase = words[..KEY_PHRASE_WORDS].join(" ");
            let commonality = count_occurrences(doc, &phrase) as u32;
            Some(PlagiarismMatch {
                phrase,
                matches: commonality * MATCH_WEIGHT,
            })
        })
        .collect();

    phrases.sort_by(|a, b| b.matches.cmp(&a.matches));
    phrases.truncate(MAX_RESULTS);
    phrases
}

/// Case-insensitive, punctuation-tolerant occurrences of `phrase` as a
/// contiguous term sequence inside any sentence
pub fn count_occurrences(doc: &Document, phrase: &str) -> usize {
    let needle: Vec<String> = tokenize(phrase).into_iter().map(|t| t.normal).collect();
    if needle.is_empty() {
        return 0;
    }

    doc.sentences()
        .iter()
        .map(|sentence| {
            let hay: Vec<&str> = sentence.terms.iter().map(|t| t.normal.as_str()).collect();
            if hay.len() < needle.len() {
                return 0;
            }
            hay.windows(needle.len())
                .filter(|w| w.iter().zip(needle.iter()).all(|(a, b)| *a == b.as_str()))
                .count()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_sentences_are_ignored() {
        assert!(find_plagiarism_phrases("Too short here. Also four words.").is_empty());
        assert!(find_plagiarism_phrases("").is_empty());
    }

    #[test]
    fn test_unique_phrase_counts_itself() {
        let results = find_plagiarism_phrases("The quick brown fox jumps over the lazy dog.");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].phrase, "The quick brown fox jumps");
        assert_eq!(results[0].matches, 100);
    }

    #[test]
    fn test_repeated_phrase_ranks_first() {
        let text = "Our team builds great tools daily. \
                    In our view the market grows. \
                    Our team builds great tools for everyone. \
                    As a rule we ship often and early.";
        let results = find_plagiarism_phrases(text);
        assert_eq!(results[0].phrase, "Our team builds great tools");
        assert_eq!(results[0].matches, 200);
        assert_eq!(results[1].phrase, "Our team builds great tools");
        // Remaining unique phrases keep sentence order
        assert_eq!(results[2].phrase, "In our view the market");
        assert_eq!(results[3].phrase, "As a rule we ship");
    }

    #[test]
    fn test_at_most_five_sorted_descending() {
        let mut text = String::new();
        for i in 0..8 {
            text.push_str(&format!("Sentence number {} has enough words here. ", i));
        }
        text.push_str("Repeat this phrase right now please. Repeat this phrase right now again.");
        let results = find_plagiarism_phrases(&text);
        assert_eq!(results.len(), 5);
        assert!(results.windows(2).all(|w| w[0].matches >= w[1].matches));
        assert_eq!(results[0].matches, 200);
    }

    #[test]
    fn test_occurrences_ignore_case_and_punctuation() {
        let doc = segment("Hello, big world of code! hello big world of CODE again.");
        assert_eq!(count_occurrences(&doc, "hello big world of code"), 2);
    }
}
