// AI Verdict
// Maps the AI score onto display bands and the derived content percentages

use crate::models::{AiVerdict, ContentBreakdown};

const LIKELY_AI_ABOVE: f64 = 0.7;
const MIXED_ABOVE: f64 = 0.3;

pub fn verdict_for(score: f64) -> AiVerdict {
    if score > LIKELY_AI_ABOVE {
        AiVerdict::LikelyAi
    } else if score > MIXED_ABOVE {
        AiVerdict::Mixed
    } else {
        AiVerdict::LikelyHuman
    }
}

impl AiVerdict {
    pub fn label(self) -> &'static str {
        match self {
            AiVerdict::LikelyAi => "Highly likely AI-generated",
            AiVerdict::Mixed => "May contain AI-generated content",
            AiVerdict::LikelyHuman => "Likely human-written",
        }
    }
}

pub fn content_breakdown(score: f64) -> ContentBreakdown {
    let score = score.clamp(0.0, 1.0);
    ContentBreakdown {
        natural_flow: ((1.0 - score) * 100.0).round() as u32,
        complexity: (score * 80.0).round() as u32,
        authenticity: ((1.0 - score) * 90.0).round() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands() {
        assert_eq!(verdict_for(0.9), AiVerdict::LikelyAi);
        assert_eq!(verdict_for(0.7), AiVerdict::Mixed);
        assert_eq!(verdict_for(0.31), AiVerdict::Mixed);
        assert_eq!(verdict_for(0.3), AiVerdict::LikelyHuman);
        assert_eq!(verdict_for(0.0), AiVerdict::LikelyHuman);
    }

    #[test]
    fn test_breakdown() {
        let b = content_breakdown(0.25);
        assert_eq!(b.natural_flow, 75);
        assert_eq!(b.complexity, 20);
        assert_eq!(b.authenticity, 68);
    }
}
