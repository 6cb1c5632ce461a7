// Text Processing Service
// Input normalization, word limits and before/after comparison helpers

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\u{3000}\u{00A0}\u{2007}\u{202F}]").expect("space regex"))
}

fn horizontal_ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t\x0C\x0B]+").expect("whitespace regex"))
}

fn blank_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("blank line regex"))
}

/// Normalize typographic punctuation and whitespace in pasted text.
/// Paragraph breaks are preserved.
pub fn normalize_punctuation(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let s = text
        .replace(['\u{201c}', '\u{201d}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{2013}', '\u{2014}'], "-")
        .replace('\u{2026}', "...")
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let s = space_re().replace_all(&s, " ");
    let s = horizontal_ws_re().replace_all(&s, " ");

    s.lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Whitespace-delimited word count, as shown next to the input box
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split a generated response into versions on blank-line paragraph breaks.
/// A response without a delimiter is a single version.
pub fn split_versions(text: &str) -> Vec<String> {
    blank_line_re()
        .split(text.trim())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn bare_word(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(bare_word)
        .filter(|w| !w.is_empty())
        .collect()
}

/// Lowercase words of `rewritten` that do not occur in `original`,
/// deduplicated, in order of first appearance
pub fn changed_words(original: &str, rewritten: &str) -> Vec<String> {
    let before = word_set(original);
    let mut seen = HashSet::new();
    rewritten
        .split_whitespace()
        .map(bare_word)
        .filter(|w| !w.is_empty() && !before.contains(w))
        .filter(|w| seen.insert(w.clone()))
        .collect()
}

/// Share (0-100, one decimal) of the rewritten words that are new
pub fn modified_percentage(original: &str, rewritten: &str) -> f64 {
    let before = word_set(original);
    let words: Vec<String> = rewritten
        .split_whitespace()
        .map(bare_word)
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return 0.0;
    }
    let changed = words.iter().filter(|w| !before.contains(*w)).count();
    let pct = changed as f64 / words.len() as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_punctuation() {
        let input = "Hello\u{201c}World\u{201d} it\u{2019}s \u{2014} fine\u{2026}";
        let output = normalize_punctuation(input);
        assert_eq!(output, "Hello\"World\" it's - fine...");
    }

    #[test]
    fn test_normalize_keeps_paragraphs() {
        let input = "  First   line\u{00A0}here \r\n\r\nSecond\tline  ";
        assert_eq!(normalize_punctuation(input), "First line here\n\nSecond line");
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("  one two\nthree  "), 3);
    }

    #[test]
    fn test_split_versions() {
        let versions = split_versions("First take.\n\n  \nSecond take.\n\nThird.");
        assert_eq!(versions, vec!["First take.", "Second take.", "Third."]);

        assert_eq!(split_versions("Only one\nversion"), vec!["Only one\nversion"]);
        assert!(split_versions("   ").is_empty());
    }

    #[test]
    fn test_changed_words() {
        let changed = changed_words("The results were good.", "The outcome was good, really good!");
        assert_eq!(changed, vec!["outcome", "was", "really"]);
    }

    #[test]
    fn test_modified_percentage() {
        assert_eq!(modified_percentage("a b c d", "a b c d"), 0.0);
        assert_eq!(modified_percentage("a b c d", "a b x y"), 50.0);
        assert_eq!(modified_percentage("a b", ""), 0.0);
    }
}
