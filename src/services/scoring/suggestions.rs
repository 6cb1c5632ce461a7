// Writing Suggestions
// Turns the sub-scores into the writing tips that apply to this text

use crate::models::AiScoreBreakdown;

const VARY_STRUCTURE_AT: f64 = 0.75;
const FORMALITY_AT: f64 = 0.5;
const PASSIVITY_AT: f64 = 0.5;
const REPETITION_AT: f64 = 0.5;
const LONG_SENTENCES_ABOVE: f64 = 0.3;

pub const TIP_VARY_STRUCTURE: &str =
    "Try varying your sentence structure for more natural flow";
pub const TIP_FEWER_CONNECTIVES: &str =
    "Use fewer formal connectives like \"moreover\" and \"therefore\" to sound more conversational";
pub const TIP_ACTIVE_VOICE: &str = "Use active voice for more engaging content";
pub const TIP_AVOID_REPETITION: &str = "Avoid repetitive phrases and sentence structures";
pub const TIP_SHORTER_SENTENCES: &str =
    "Break up long sentences and include transition words to improve readability";

/// Tips in a fixed order; empty when nothing stands out
pub fn writing_suggestions(breakdown: &AiScoreBreakdown, long_sentence_ratio: f64) -> Vec<String> {
    let checks = [
        (breakdown.complexity >= VARY_STRUCTURE_AT, TIP_VARY_STRUCTURE),
        (breakdown.formality >= FORMALITY_AT, TIP_FEWER_CONNECTIVES),
        (breakdown.passivity >= PASSIVITY_AT, TIP_ACTIVE_VOICE),
        (breakdown.repetition >= REPETITION_AT, TIP_AVOID_REPETITION),
        (long_sentence_ratio > LONG_SENTENCES_ABOVE, TIP_SHORTER_SENTENCES),
    ];

    checks
        .into_iter()
        .filter(|(applies, _)| *applies)
        .map(|(_, tip)| tip.to_string())
        .collect()
}
