// Prompt Builder
// Style x mode prompt templates for the humanize and rephrase transformations

use crate::models::{AiPreferences, WritingStyle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    Humanize,
    Rephrase,
}

impl TransformMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TransformMode::Humanize => "humanize",
            TransformMode::Rephrase => "rephrase",
        }
    }
}

struct PromptTemplate {
    /// Instruction placed before the quoted input text
    intro: &'static str,
    /// Put the quoted text on its own line after the intro
    text_on_new_line: bool,
    heading: &'static str,
    points: [&'static str; 4],
}

fn template(style: WritingStyle, mode: TransformMode) -> PromptTemplate {
    match (style, mode) {
        (WritingStyle::Academic, TransformMode::Humanize) => PromptTemplate {
            intro: "Transform this text into an academic style while maintaining its core message. \
                    Use scholarly language, formal tone, and proper citations where relevant:",
            text_on_new_line: false,
            heading: "Guidelines:",
            points: [
                "Use academic vocabulary and complex sentence structures",
                "Maintain objective and analytical tone",
                "Include transitional phrases common in academic writing",
                "Focus on clarity and precision",
            ],
        },
        (WritingStyle::Academic, TransformMode::Rephrase) => PromptTemplate {
            intro: "Rephrase this text in an academic style suitable for scholarly publications:",
            text_on_new_line: true,
            heading: "Requirements:",
            points: [
                "Use academic terminology",
                "Employ formal sentence structures",
                "Maintain scholarly tone",
                "Ensure logical flow",
            ],
        },
        (WritingStyle::Casual, TransformMode::Humanize) => PromptTemplate {
            intro: "Make this text sound more conversational and friendly while keeping its meaning. \
                    Add a warm, approachable tone:",
            text_on_new_line: false,
            heading: "Guidelines:",
            points: [
                "Use everyday language",
                "Add conversational elements",
                "Keep sentences short and engaging",
                "Make it feel like a friendly chat",
            ],
        },
        (WritingStyle::Casual, TransformMode::Rephrase) => PromptTemplate {
            intro: "Rephrase this text in a casual, friendly tone that's easy to read:",
            text_on_new_line: true,
            heading: "Requirements:",
            points: [
                "Use conversational language",
                "Keep it simple and relatable",
                "Add natural flow",
                "Make it engaging",
            ],
        },
        (WritingStyle::Professional, TransformMode::Humanize) => PromptTemplate {
            intro: "Transform this text into a professional business style while maintaining its message. \
                    Use clear, concise language suitable for a business context:",
            text_on_new_line: false,
            heading: "Guidelines:",
            points: [
                "Use business-appropriate vocabulary",
                "Maintain professional tone",
                "Be clear and direct",
                "Focus on actionable content",
            ],
        },
        (WritingStyle::Professional, TransformMode::Rephrase) => PromptTemplate {
            intro: "Rephrase this text in a professional business style:",
            text_on_new_line: true,
            heading: "Requirements:",
            points: [
                "Use business terminology",
                "Keep it concise and clear",
                "Maintain professional tone",
                "Ensure clarity and impact",
            ],
        },
        (WritingStyle::Creative, TransformMode::Humanize) => PromptTemplate {
            intro: "Transform this text into a creative, engaging style while keeping its core message. \
                    Add descriptive elements and vivid language:",
            text_on_new_line: false,
            heading: "Guidelines:",
            points: [
                "Use colorful, descriptive language",
                "Add creative elements",
                "Make it engaging and memorable",
                "Include sensory details",
            ],
        },
        (WritingStyle::Creative, TransformMode::Rephrase) => PromptTemplate {
            intro: "Rephrase this text in a creative, engaging style:",
            text_on_new_line: true,
            heading: "Requirements:",
            points: [
                "Use vivid language",
                "Add artistic elements",
                "Make it memorable",
                "Include descriptive details",
            ],
        },
    }
}

/// Build the generation prompt for `text`, optionally followed by preference directives
pub fn build_prompt(
    text: &str,
    style: WritingStyle,
    mode: TransformMode,
    preferences: Option<&AiPreferences>,
) -> String {
    let t = template(style, mode);
    let separator = if t.text_on_new_line { "\n" } else { " " };

    let mut prompt = format!("{}{}\"{}\"\n\n{}\n", t.intro, separator, text, t.heading);
    for point in t.points {
        prompt.push_str("- ");
        prompt.push_str(point);
        prompt.push('\n');
    }

    if let Some(prefs) = preferences {
        prompt.push('\n');
        prompt.push_str(&preference_directives(prefs));
    }

    if mode == TransformMode::Rephrase {
        prompt.push_str(
            "\nIf you offer more than one version, separate the versions with a blank line.\n",
        );
    }

    prompt
}

fn preference_directives(prefs: &AiPreferences) -> String {
    let mut out = String::from("Preferences:\n");
    out.push_str(&format!(
        "- Tone strength: {}/100\n",
        prefs.tone_strength.min(100)
    ));
    out.push_str(&format!(
        "- Creativity level: {}/100\n",
        prefs.creativity_level.min(100)
    ));
    if prefs.preserve_keywords {
        out.push_str("- Preserve the original keywords exactly\n");
    }
    if prefs.enhance_seo {
        out.push_str("- Optimize the wording for search engines (SEO)\n");
    }
    out
}
