// Text Humanizer Core Services

pub mod text_processor;
pub mod sentence_segmenter;
pub mod config_store;
pub mod providers;
pub mod prompts;
pub mod transformer;
pub mod scoring;
pub mod pipeline;
pub mod session;
pub mod file_loader;

pub use text_processor::*;
pub use sentence_segmenter::{segment, tokenize, Document, RuleSegmenter, Segmenter, Sentence, Term};
pub use config_store::*;
pub use providers::*;
pub use prompts::{build_prompt, TransformMode};
pub use transformer::TextTransformer;
pub use pipeline::{local_scores, AnalysisRequest, Analyzer};
pub use session::Session;
pub use file_loader::{extract_text, load_text_file, LoadError};

// Re-export scoring entry points
pub use scoring::{
    calculate_trust_score,
    detect_scores,
    find_plagiarism_phrases,
    get_ai_score,
    get_clarity_score,
    get_keyword_density,
    get_readability_score,
    get_tone_analysis,
};
