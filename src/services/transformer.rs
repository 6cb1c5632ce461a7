// Text Transformer
// Humanize / rephrase via the external generator; no retries, no caching

use crate::models::{AiPreferences, WritingStyle};
use crate::services::prompts::{build_prompt, TransformMode};
use crate::services::providers::{ProviderError, TextGenerator};
use crate::services::text_processor::split_versions;
use tracing::info;

pub struct TextTransformer<G> {
    generator: G,
}

impl<G: TextGenerator> TextTransformer<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Send the style/mode prompt and return the generated text, trimmed
    pub async fn transform(
        &self,
        text: &str,
        style: WritingStyle,
        mode: TransformMode,
        preferences: Option<&AiPreferences>,
    ) -> Result<String, ProviderError> {
        let prompt = build_prompt(text, style, mode, preferences);
        info!(
            "[TRANSFORM] {} style={} model={} input_chars={}",
            mode.as_str(),
            style,
            self.generator.model_name(),
            text.chars().count()
        );
        let result = self.generator.generate(&prompt).await?;
        let content = result.content.trim();
        if content.is_empty() {
            return Err(ProviderError::MissingContent);
        }
        Ok(content.to_string())
    }

    pub async fn humanize(
        &self,
        text: &str,
        style: WritingStyle,
        preferences: Option<&AiPreferences>,
    ) -> Result<String, ProviderError> {
        self.transform(text, style, TransformMode::Humanize, preferences)
            .await
    }

    /// Generated versions, split on blank lines
    pub async fn rephrase(
        &self,
        text: &str,
        style: WritingStyle,
        preferences: Option<&AiPreferences>,
    ) -> Result<Vec<String>, ProviderError> {
        let content = self
            .transform(text, style, TransformMode::Rephrase, preferences)
            .await?;
        let versions = split_versions(&content);
        if versions.is_empty() {
            return Err(ProviderError::MissingContent);
        }
        Ok(versions)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use crate::services::providers::{ChatResult, ProviderError, TextGenerator};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-process generator: answers by prompt keyword and records prompts
    pub struct FakeGenerator {
        pub humanize_reply: Result<String, fn() -> ProviderError>,
        pub rephrase_reply: Result<String, fn() -> ProviderError>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl FakeGenerator {
        pub fn replying(humanize: &str, rephrase: &str) -> Self {
            Self {
                humanize_reply: Ok(humanize.to_string()),
                rephrase_reply: Ok(rephrase.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn recorded(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, prompt: &str) -> Result<ChatResult, ProviderError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            let reply = if prompt.starts_with("Rephrase") {
                &self.rephrase_reply
            } else {
                &self.humanize_reply
            };
            match reply {
                Ok(content) => Ok(ChatResult {
                    content: content.clone(),
                    latency_ms: 1,
                }),
                Err(make_err) => Err(make_err()),
            }
        }

        fn model_name(&self) -> &str {
            "fake"
        }
    }
}
