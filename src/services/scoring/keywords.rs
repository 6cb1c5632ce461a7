// Keyword Density
// Relative frequency of longer terms against the full term count

use crate::services::sentence_segmenter::{segment, Document};
use std::collections::BTreeMap;

/// Terms must be longer than this many characters to be counted
const MIN_KEYWORD_CHARS: usize = 3;

pub fn get_keyword_density(text: &str) -> BTreeMap<String, f64> {
    keyword_density(&segment(text))
}

/// Map of lowercased term to `count / total term count`, rounded to 3 places.
/// Short terms are excluded from the keys but still counted in the total.
pub fn keyword_density(doc: &Document) -> BTreeMap<String, f64> {
    let total = doc.term_count();
    if total == 0 {
        return BTreeMap::new();
    }

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for term in doc.terms().filter(|t| t.len() > MIN_KEYWORD_CHARS) {
        *counts.entry(term.normal.clone()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(term, count)| (term, round3(count as f64 / total as f64)))
        .collect()
}

/// The `n` densest keywords, ties broken alphabetically
pub fn top_keywords(density: &BTreeMap<String, f64>, n: usize) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = density.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    entries.truncate(n);
    entries
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert!(get_keyword_density("").is_empty());
    }

    #[test]
    fn test_short_terms_are_excluded() {
        let density = get_keyword_density("The cat and the big dog ran far away quickly.");
        assert!(density.keys().all(|k| k.chars().count() > 3));
        assert!(density.contains_key("away"));
        assert!(density.contains_key("quickly"));
        assert!(!density.contains_key("the"));
    }

    #[test]
    fn test_denominator_includes_short_terms() {
        // 6 terms total, "rust" appears twice
        let density = get_keyword_density("I like Rust. You like rust.");
        assert_eq!(density.get("rust"), Some(&0.333));
        assert_eq!(density.get("like"), Some(&0.333));
        assert_eq!(density.len(), 2);
        let sum: f64 = density.values().sum();
        assert!(sum < 1.0);
    }

    #[test]
    fn test_rounding_to_three_places() {
        let density = get_keyword_density("alpha b c d e f g");
        assert_eq!(density.get("alpha"), Some(&0.143));
    }

    #[test]
    fn test_top_keywords_ordering() {
        let density = get_keyword_density("zeta zeta beta beta alpha gamma");
        let top = top_keywords(&density, 3);
        let names: Vec<&str> = top.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["beta", "zeta", "alpha"]);
    }
}
