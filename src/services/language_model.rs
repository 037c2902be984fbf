use async_trait::async_trait;

use crate::error::AppResult;

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    /// Single-shot completion with a fixed small token budget. No streaming,
    /// no structured output.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> AppResult<String>;
}
