// Analysis Session
// Holds the latest merged result and a capped history of generated versions

use crate::models::{AnalysisResult, VersionEntry, WritingStyle};
use std::collections::VecDeque;
use uuid::Uuid;

pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

#[derive(Debug, Clone)]
pub struct Session {
    current: AnalysisResult,
    history: VecDeque<VersionEntry>,
    capacity: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            current: AnalysisResult::default(),
            history: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Fold a fresh result into the session and return the merged view.
    /// Generated texts are appended to the version history.
    pub fn record(&mut self, result: AnalysisResult, style: WritingStyle) -> &AnalysisResult {
        if let Some(text) = result.humanized_text.as_deref() {
            self.push_version(text, style);
        }
        if let Some(versions) = result.rephrased_versions.as_deref() {
            for version in versions {
                self.push_version(version, style);
            }
        }

        self.current.merge_from(result);
        self.current.version_history = self.history.iter().cloned().collect();
        &self.current
    }

    pub fn current(&self) -> &AnalysisResult {
        &self.current
    }

    pub fn history(&self) -> impl Iterator<Item = &VersionEntry> {
        self.history.iter()
    }

    pub fn clear(&mut self) {
        self.current = AnalysisResult::default();
        self.history.clear();
    }

    fn push_version(&mut self, text: &str, style: WritingStyle) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(VersionEntry {
            id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            text: text.to_string(),
            style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_merges_and_tracks_versions() {
        let mut session = Session::new();
        session.record(
            AnalysisResult {
                ai_score: Some(0.6),
                humanized_text: Some("Human take.".to_string()),
                ..Default::default()
            },
            WritingStyle::Casual,
        );
        let merged = session.record(
            AnalysisResult {
                rephrased_versions: Some(vec!["One.".to_string(), "Two.".to_string()]),
                ..Default::default()
            },
            WritingStyle::Academic,
        );

        assert_eq!(merged.ai_score, Some(0.6));
        assert_eq!(merged.humanized_text.as_deref(), Some("Human take."));
        assert_eq!(merged.version_history.len(), 3);
        assert_eq!(merged.version_history[0].style, WritingStyle::Casual);
        assert_eq!(merged.version_history[2].text, "Two.");
    }

    #[test]
    fn test_history_is_capped() {
        let mut session = Session::with_capacity(2);
        for i in 0..5 {
            session.record(
                AnalysisResult {
                    humanized_text: Some(format!("v{}", i)),
                    ..Default::default()
                },
                WritingStyle::Creative,
            );
        }
        let texts: Vec<&str> = session.history().map(|v| v.text.as_str()).collect();
        assert_eq!(texts, vec!["v3", "v4"]);
    }

    #[test]
    fn test_version_ids_are_unique() {
        let mut session = Session::new();
        session.record(
            AnalysisResult {
                rephrased_versions: Some(vec!["a".into(), "b".into()]),
                ..Default::default()
            },
            WritingStyle::Professional,
        );
        let ids: Vec<&str> = session.history().map(|v| v.id.as_str()).collect();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_clear() {
        let mut session = Session::new();
        session.record(
            AnalysisResult {
                humanized_text: Some("x".into()),
                ..Default::default()
            },
            WritingStyle::Casual,
        );
        session.clear();
        assert!(session.current().humanized_text.is_none());
        assert_eq!(session.history().count(), 0);
    }
}
