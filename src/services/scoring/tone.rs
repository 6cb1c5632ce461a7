// Tone Analysis
// Word-list sentiment: share of positive words among all sentiment words

use crate::models::{Sentiment, ToneAnalysis};
use crate::services::sentence_segmenter::{segment, Document};

pub const POSITIVE_WORDS: &[&str] = &[
    "great",
    "good",
    "excellent",
    "amazing",
    "wonderful",
    "fantastic",
    "beautiful",
    "love",
    "happy",
    "perfect",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "hate", "sad", "poor", "worst", "annoying",
];

const NEUTRAL_SCORE: f64 = 0.5;
const POSITIVE_ABOVE: f64 = 0.6;
const NEGATIVE_BELOW: f64 = 0.4;

pub fn get_tone_analysis(text: &str) -> ToneAnalysis {
    tone_analysis(&segment(text))
}

pub fn tone_analysis(doc: &Document) -> ToneAnalysis {
    let mut positive = 0usize;
    let mut negative = 0usize;
    for term in doc.terms() {
        let word = term.normal.as_str();
        if POSITIVE_WORDS.contains(&word) {
            positive += 1;
        } else if NEGATIVE_WORDS.contains(&word) {
            negative += 1;
        }
    }

    let total = positive + negative;
    let score = if total == 0 {
        NEUTRAL_SCORE
    } else {
        positive as f64 / total as f64
    };

    ToneAnalysis {
        sentiment: sentiment_for(score),
        score,
    }
}

fn sentiment_for(score: f64) -> Sentiment {
    if score > POSITIVE_ABOVE {
        Sentiment::Positive
    } else if score < NEGATIVE_BELOW {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
