// Sentence Segmenter
// Splits raw text into a Document (sentences of tagged terms) for the scorers

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

/// Abbreviations whose trailing period does not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "e.g", "i.e", "inc", "ltd", "co",
    "no", "fig", "approx", "etc",
];

/// Closed-class words that never count as noun-like.
const FUNCTION_WORDS: &[&str] = &[
    // determiners
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "all", "both", "either", "neither", "my", "your", "his", "her", "its", "our", "their",
    // prepositions
    "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
    "over", "under", "again", "than", "as", "via", "within", "without", "upon", "onto",
    "across", "among", "around",
    // conjunctions
    "and", "but", "or", "nor", "so", "yet", "because", "although", "though", "while", "if",
    "unless", "whereas", "whether",
    // auxiliaries and modals
    "is", "am", "are", "was", "were", "be", "been", "being", "has", "have", "had", "having",
    "do", "does", "did", "will", "would", "shall", "should", "may", "might", "must", "can",
    "could",
    // adverbs and wh-words
    "not", "very", "too", "also", "just", "then", "there", "here", "when", "where", "why",
    "how", "what", "which", "therefore", "hence", "thus", "consequently", "furthermore",
    "moreover", "however",
];

/// Irregular past participles and past forms.
const IRREGULAR_PARTICIPLES: &[&str] = &[
    "been", "born", "done", "made", "seen", "known", "given", "taken", "written", "shown",
    "grown", "drawn", "driven", "eaten", "fallen", "forgotten", "gotten", "hidden", "ridden",
    "risen", "spoken", "stolen", "sworn", "thrown", "woken", "worn", "chosen", "broken",
    "frozen", "begun", "sung", "run", "won", "built", "sent", "spent", "lent", "bent", "meant",
    "felt", "kept", "left", "lost", "held", "told", "sold", "found", "bound", "ground", "paid",
    "said", "laid", "heard", "brought", "bought", "caught", "taught", "thought", "fought",
    "sought", "put", "set", "cut", "hit", "hurt", "let", "shut", "read", "led", "fed", "met",
    "understood", "stood", "struck", "dug", "hung", "spun", "stuck", "swung", "overseen",
    "undertaken", "withdrawn",
];

/// A single word-level token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    /// Surface form as it appears in the text
    pub text: String,
    /// Lowercased form with typographic apostrophes folded
    pub normal: String,
    pub noun_like: bool,
    pub verb_like: bool,
}

impl Term {
    pub fn new(text: &str) -> Self {
        let normal = text.to_lowercase().replace('\u{2019}', "'");
        let verb_like = is_verb_like(&normal);
        let noun_like = !verb_like && is_noun_like(&normal);
        Self {
            text: text.to_string(),
            normal,
            noun_like,
            verb_like,
        }
    }

    /// Character length of the surface form
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    pub text: String,
    /// UTF-8 byte offset (0-based) into the segmented text.
    pub start: usize,
    /// UTF-8 byte offset (0-based, end-exclusive) into the segmented text.
    pub end: usize,
    pub terms: Vec<Term>,
}

impl Sentence {
    /// Words as delimited by whitespace, punctuation included
    pub fn words(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }
}

/// Segmented representation of a text: ordered sentences of ordered terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    sentences: Vec<Sentence>,
}

impl Document {
    pub fn from_sentences(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn term_count(&self) -> usize {
        self.sentences.iter().map(|s| s.terms.len()).sum()
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.sentences.iter().flat_map(|s| s.terms.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Tokenization policy, kept apart from the scoring policy.
pub trait Segmenter {
    fn segment(&self, text: &str) -> Document;
}

/// Punctuation-driven sentence splitter with regex term tokenization.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSegmenter;

impl Segmenter for RuleSegmenter {
    fn segment(&self, text: &str) -> Document {
        let sentences = split_sentence_spans(text)
            .into_iter()
            .filter_map(|(start, end)| {
                let raw = &text[start..end];
                let trimmed = raw.trim();
                let terms = tokenize(trimmed);
                if terms.is_empty() {
                    return None;
                }
                let lead = raw.len() - raw.trim_start().len();
                Some(Sentence {
                    text: trimmed.to_string(),
                    start: start + lead,
                    end: start + lead + trimmed.len(),
                    terms,
                })
            })
            .collect();
        Document::from_sentences(sentences)
    }
}

/// Segment text with the default segmenter
pub fn segment(text: &str) -> Document {
    RuleSegmenter.segment(text)
}

fn term_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[\p{L}\p{N}]+(?:['\u{2019}\-][\p{L}\p{N}]+)*").expect("term regex")
    })
}

/// Split a text fragment into terms (no sentence detection)
pub fn tokenize(text: &str) -> Vec<Term> {
    term_re().find_iter(text).map(|m| Term::new(m.as_str())).collect()
}

fn function_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| FUNCTION_WORDS.iter().copied().collect())
}

fn irregular_participles() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| IRREGULAR_PARTICIPLES.iter().copied().collect())
}

fn is_verb_like(normal: &str) -> bool {
    if irregular_participles().contains(normal) {
        return true;
    }
    if !normal.chars().all(|c| c.is_alphabetic()) {
        return false;
    }
    let len = normal.chars().count();
    (len > 4 && normal.ends_with("ing")) || (len > 3 && normal.ends_with("ed"))
}

fn is_noun_like(normal: &str) -> bool {
    let starts_alpha = normal.chars().next().is_some_and(|c| c.is_alphabetic());
    if !starts_alpha || function_words().contains(normal) {
        return false;
    }
    !(normal.chars().count() > 4 && normal.ends_with("ly"))
}

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '\u{2026}')
}

fn is_closer(ch: char) -> bool {
    matches!(ch, '"' | '\'' | '\u{201d}' | '\u{2019}' | ')' | ']')
}

/// The word right before byte offset `dot`, lowercased, e.g. "e.g" for "e.g."
fn word_before(chars: &[(usize, char)], dot: usize) -> String {
    let mut j = dot;
    while j > 0 {
        let c = chars[j - 1].1;
        if c.is_alphabetic() || c == '.' {
            j -= 1;
        } else {
            break;
        }
    }
    chars[j..dot]
        .iter()
        .map(|(_, c)| c.to_ascii_lowercase())
        .collect::<String>()
        .trim_matches('.')
        .to_string()
}

/// Byte spans of sentences, untrimmed
fn split_sentence_spans(text: &str) -> Vec<(usize, usize)> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut spans = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let (_, ch) = chars[i];
        if !is_terminator(ch) {
            i += 1;
            continue;
        }

        if ch == '.' {
            // Decimal numbers
            let prev_digit = i > 0 && chars[i - 1].1.is_ascii_digit();
            let next_digit = chars.get(i + 1).is_some_and(|(_, c)| c.is_ascii_digit());
            if prev_digit && next_digit {
                i += 1;
                continue;
            }
            let followed_by_space = chars.get(i + 1).map_or(true, |(_, c)| c.is_whitespace());
            if followed_by_space && ABBREVIATIONS.contains(&word_before(&chars, i).as_str()) {
                i += 1;
                continue;
            }
            // Inner dots of "e.g." style tokens
            if chars.get(i + 1).is_some_and(|(_, c)| c.is_alphabetic()) {
                i += 1;
                continue;
            }
        }

        // Swallow runs like "?!" or "..." and closing quotes/brackets
        let mut j = i + 1;
        while j < chars.len() && (is_terminator(chars[j].1) || is_closer(chars[j].1)) {
            j += 1;
        }
        let end = chars.get(j).map_or(text.len(), |(idx, _)| *idx);
        spans.push((start, end));
        start = end;
        i = j;
    }

    if start < text.len() {
        spans.push((start, text.len()));
    }

    spans
}
