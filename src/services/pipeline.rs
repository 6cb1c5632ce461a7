// Analysis Pipeline
// Runs the requested modes and merges them into one AnalysisResult
// - detect / plagiarism: local scorers over a single segmentation
// - humanize / rephrase: external generator, run concurrently
// A failing mode is recorded in `errors` and never drops another mode's output.

use crate::models::{
    AiPreferences, AnalysisMode, AnalysisResult, ModeFailure, WritingStyle,
};
use crate::services::providers::{ProviderError, TextGenerator};
use crate::services::scoring::{calculate_trust_score, detect_scores, plagiarism_phrases};
use crate::services::sentence_segmenter::segment;
use crate::services::text_processor::{changed_words, modified_percentage};
use crate::services::transformer::TextTransformer;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub text: String,
    pub modes: Vec<AnalysisMode>,
    pub style: WritingStyle,
    pub preferences: Option<AiPreferences>,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>, modes: &[AnalysisMode]) -> Self {
        Self {
            text: text.into(),
            modes: modes.to_vec(),
            style: WritingStyle::default(),
            preferences: None,
        }
    }

    pub fn with_style(mut self, style: WritingStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_preferences(mut self, preferences: AiPreferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    pub fn wants(&self, mode: AnalysisMode) -> bool {
        self.modes.contains(&mode)
    }

    pub fn wants_generation(&self) -> bool {
        self.modes.iter().any(|m| m.is_generative())
    }
}

pub struct Analyzer<G> {
    transformer: TextTransformer<G>,
}

impl<G: TextGenerator> Analyzer<G> {
    pub fn new(generator: G) -> Self {
        Self {
            transformer: TextTransformer::new(generator),
        }
    }

    pub fn transformer(&self) -> &TextTransformer<G> {
        &self.transformer
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        let started = Instant::now();
        info!(
            "[PIPELINE] modes={:?} style={} chars={}",
            request.modes,
            request.style,
            request.text.chars().count()
        );

        let mut result = local_scores(request);

        let prefs = request.preferences.as_ref();
        let humanize = async {
            if request.wants(AnalysisMode::Humanize) {
                Some(self.transformer.humanize(&request.text, request.style, prefs).await)
            } else {
                None
            }
        };
        let rephrase = async {
            if request.wants(AnalysisMode::Rephrase) {
                Some(self.transformer.rephrase(&request.text, request.style, prefs).await)
            } else {
                None
            }
        };
        let (humanized, rephrased) = tokio::join!(humanize, rephrase);

        match humanized {
            Some(Ok(text)) => {
                result.modified_percentage = Some(modified_percentage(&request.text, &text));
                result.changed_words = Some(changed_words(&request.text, &text));
                result.humanized_text = Some(text);
            }
            Some(Err(e)) => result.errors.push(failure(AnalysisMode::Humanize, &e)),
            None => {}
        }

        match rephrased {
            Some(Ok(versions)) => result.rephrased_versions = Some(versions),
            Some(Err(e)) => result.errors.push(failure(AnalysisMode::Rephrase, &e)),
            None => {}
        }

        info!(
            "[PIPELINE] done elapsed_ms={} errors={}",
            started.elapsed().as_millis(),
            result.errors.len()
        );
        result
    }
}

/// Detect and plagiarism modes; synchronous and pure
pub fn local_scores(request: &AnalysisRequest) -> AnalysisResult {
    let wants_detect = request.wants(AnalysisMode::Detect);
    let wants_plagiarism = request.wants(AnalysisMode::Plagiarism);
    if !wants_detect && !wants_plagiarism {
        return AnalysisResult::default();
    }

    let doc = segment(&request.text);
    let mut result = if wants_detect {
        detect_scores(&doc)
    } else {
        AnalysisResult::default()
    };

    if wants_plagiarism {
        result.plagiarism_results = Some(plagiarism_phrases(&doc));
    }

    if let (Some(ai), Some(readability), Some(clarity)) =
        (result.ai_score, result.readability_score, result.clarity_score)
    {
        let plagiarism = result.plagiarism_results.as_deref().unwrap_or(&[]);
        result.trust_score = Some(calculate_trust_score(ai, readability, clarity, plagiarism));
    }

    result
}

/// Local modes only; every requested generative mode is recorded as failed
/// with `err`. Used when no generator could be built.
pub fn without_generator(request: &AnalysisRequest, err: &ProviderError) -> AnalysisResult {
    let mut result = local_scores(request);
    for mode in request.modes.iter().copied().filter(|m| m.is_generative()) {
        result.errors.push(failure(mode, err));
    }
    result
}

fn failure(mode: AnalysisMode, err: &ProviderError) -> ModeFailure {
    warn!("[PIPELINE] {} failed ({:?}): {}", mode, err.kind(), err);
    ModeFailure {
        mode,
        kind: err.kind(),
        message: err.to_string(),
    }
}
