// Text Humanizer Data Models
// Result records, style presets and request options shared by services and the CLI

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============ Analysis Modes ============

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Detect,
    Humanize,
    Plagiarism,
    Rephrase,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 4] = [
        AnalysisMode::Detect,
        AnalysisMode::Humanize,
        AnalysisMode::Plagiarism,
        AnalysisMode::Rephrase,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisMode::Detect => "detect",
            AnalysisMode::Humanize => "humanize",
            AnalysisMode::Plagiarism => "plagiarism",
            AnalysisMode::Rephrase => "rephrase",
        }
    }

    /// Modes that call the external generation service
    pub fn is_generative(self) -> bool {
        matches!(self, AnalysisMode::Humanize | AnalysisMode::Rephrase)
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Writing Styles ============

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown writing style '{0}' (expected academic, casual, professional or creative)")]
pub struct StyleParseError(pub String);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritingStyle {
    Academic,
    #[default]
    Casual,
    Professional,
    Creative,
}

impl WritingStyle {
    pub const ALL: [WritingStyle; 4] = [
        WritingStyle::Academic,
        WritingStyle::Casual,
        WritingStyle::Professional,
        WritingStyle::Creative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WritingStyle::Academic => "academic",
            WritingStyle::Casual => "casual",
            WritingStyle::Professional => "professional",
            WritingStyle::Creative => "creative",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WritingStyle::Academic => "Academic",
            WritingStyle::Casual => "Casual",
            WritingStyle::Professional => "Professional",
            WritingStyle::Creative => "Creative",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WritingStyle::Academic => "Formal, scholarly language suited to papers and reports",
            WritingStyle::Casual => "Warm, conversational tone that reads like a friendly chat",
            WritingStyle::Professional => "Clear, concise business language focused on action",
            WritingStyle::Creative => "Vivid, descriptive language that sticks in the memory",
        }
    }

    /// Accent color name used by front ends
    pub fn color(self) -> &'static str {
        match self {
            WritingStyle::Academic => "blue",
            WritingStyle::Casual => "green",
            WritingStyle::Professional => "purple",
            WritingStyle::Creative => "orange",
        }
    }

    pub fn characteristics(self) -> &'static [&'static str] {
        match self {
            WritingStyle::Academic => &["objective", "precise", "well-structured"],
            WritingStyle::Casual => &["friendly", "simple", "engaging"],
            WritingStyle::Professional => &["concise", "direct", "actionable"],
            WritingStyle::Creative => &["vivid", "descriptive", "memorable"],
        }
    }

    pub fn info(self) -> StyleInfo {
        StyleInfo {
            id: self,
            label: self.label().to_string(),
            description: self.description().to_string(),
            color: self.color().to_string(),
            characteristics: self.characteristics().iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl fmt::Display for WritingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WritingStyle {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "academic" => Ok(WritingStyle::Academic),
            "casual" => Ok(WritingStyle::Casual),
            "professional" => Ok(WritingStyle::Professional),
            "creative" => Ok(WritingStyle::Creative),
            _ => Err(StyleParseError(s.to_string())),
        }
    }
}

/// Display metadata for a writing style
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleInfo {
    pub id: WritingStyle,
    pub label: String,
    pub description: String,
    pub color: String,
    pub characteristics: Vec<String>,
}

// ============ Generation Preferences ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiPreferences {
    /// 0-100
    #[serde(default = "default_level")]
    pub tone_strength: u8,
    /// 0-100
    #[serde(default = "default_level")]
    pub creativity_level: u8,
    #[serde(default)]
    pub preserve_keywords: bool,
    #[serde(default)]
    pub enhance_seo: bool,
}

impl Default for AiPreferences {
    fn default() -> Self {
        Self {
            tone_strength: 50,
            creativity_level: 50,
            preserve_keywords: false,
            enhance_seo: false,
        }
    }
}

fn default_level() -> u8 {
    50
}

// ============ Scoring Types ============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlagiarismMatch {
    pub phrase: String,
    pub matches: u32,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToneAnalysis {
    pub sentiment: Sentiment,
    pub score: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiScoreBreakdown {
    pub complexity: f64,
    pub formality: f64,
    pub passivity: f64,
    pub repetition: f64,
    pub avg_words_per_sentence: f64,
    pub score: f64,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiVerdict {
    LikelyAi,
    Mixed,
    LikelyHuman,
}

/// Percentages shown under the AI score
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentBreakdown {
    pub natural_flow: u32,
    pub complexity: u32,
    pub authenticity: u32,
}

// ============ Session Types ============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    pub id: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub text: String,
    pub style: WritingStyle,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// Missing or invalid local configuration, e.g. no API key
    Configuration,
    /// The external service was called and failed
    Service,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModeFailure {
    pub mode: AnalysisMode,
    pub kind: FailureKind,
    pub message: String,
}

// ============ Analysis Result ============

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_score_breakdown: Option<AiScoreBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<AiVerdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_breakdown: Option<ContentBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humanized_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plagiarism_results: Option<Vec<PlagiarismMatch>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rephrased_versions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readability_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clarity_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone_analysis: Option<ToneAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_density: Option<BTreeMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_words: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub version_history: Vec<VersionEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ModeFailure>,
}

impl AnalysisResult {
    /// Overlay fields produced by a newer run; fields it left empty keep
    /// their previous values. Errors are replaced by the newer run's errors.
    pub fn merge_from(&mut self, newer: AnalysisResult) {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if newer.$field.is_some() { self.$field = newer.$field; })*
            };
        }
        take!(
            ai_score,
            ai_score_breakdown,
            verdict,
            verdict_label,
            content_breakdown,
            humanized_text,
            plagiarism_results,
            rephrased_versions,
            readability_score,
            clarity_score,
            suggestions,
            tone_analysis,
            keyword_density,
            trust_score,
            modified_percentage,
            changed_words,
        );
        self.errors = newer.errors;
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_round_trip_names() {
        for style in WritingStyle::ALL {
            assert_eq!(style.as_str().parse::<WritingStyle>(), Ok(style));
        }
        assert_eq!(" Academic ".parse::<WritingStyle>(), Ok(WritingStyle::Academic));
        assert!("poetic".parse::<WritingStyle>().is_err());
    }

    #[test]
    fn test_style_metadata_is_distinct() {
        let colors: std::collections::HashSet<&str> =
            WritingStyle::ALL.iter().map(|s| s.color()).collect();
        assert_eq!(colors.len(), 4);
        assert_eq!(WritingStyle::Creative.info().label, "Creative");
    }

    #[test]
    fn test_result_serializes_camel_case_and_skips_empty() {
        let result = AnalysisResult {
            ai_score: Some(0.5),
            trust_score: Some(80.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["aiScore"], 0.5);
        assert_eq!(json["trustScore"], 80.0);
        assert!(json.get("humanizedText").is_none());
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_merge_keeps_previous_fields() {
        let mut current = AnalysisResult {
            ai_score: Some(0.4),
            ..Default::default()
        };
        current.merge_from(AnalysisResult {
            rephrased_versions: Some(vec!["v1".to_string()]),
            ..Default::default()
        });
        assert_eq!(current.ai_score, Some(0.4));
        assert_eq!(current.rephrased_versions.as_deref(), Some(&["v1".to_string()][..]));
    }

    #[test]
    fn test_sentiment_serialization() {
        let tone = ToneAnalysis {
            sentiment: Sentiment::Positive,
            score: 0.75,
        };
        let json = serde_json::to_string(&tone).unwrap();
        assert_eq!(json, r#"{"sentiment":"positive","score":0.75}"#);
    }
}
