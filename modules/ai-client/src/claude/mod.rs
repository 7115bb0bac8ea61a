mod client;
pub(crate) mod types;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::traits::TextGenerator;
use client::ClaudeClient;
use types::{ChatRequest, ToolSpec, WireMessage};

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

const DEFAULT_MAX_TOKENS: u32 = 4096;

// =============================================================================
// Claude Agent
// =============================================================================

#[derive(Clone)]
pub struct Claude {
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: Option<String>,
}

impl Claude {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            base_url: None,
        }
    }

    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| anyhow!("ANTHROPIC_API_KEY environment variable not set"))?;
        Ok(Self::new(api_key, model))
    }

    /// Cap on generated output length, per call issued by this instance.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn client(&self) -> ClaudeClient {
        let client = ClaudeClient::new(&self.api_key);
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }

    // =========================================================================
    // Completion methods
    // =========================================================================

    /// Plain completion: one prompt in, concatenated text blocks out.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest::new(&self.model)
            .message(WireMessage::user(prompt))
            .max_tokens(self.max_tokens);
        self.send(request).await
    }

    /// Completion with the provider's hosted web search tool enabled. The
    /// response interleaves tool blocks with text; only the text is returned.
    pub async fn search(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest::new(&self.model)
            .message(WireMessage::user(prompt))
            .max_tokens(self.max_tokens)
            .tool(ToolSpec::web_search());
        self.send(request).await
    }

    async fn send(&self, request: ChatRequest) -> Result<String> {
        let response = self.client().chat(&request).await?;
        let text = response.text();
        if text.is_empty() {
            return Err(anyhow!("No text content in Claude response"));
        }
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for Claude {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.complete(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claude_new() {
        let ai = Claude::new("sk-ant-test", DEFAULT_MODEL);
        assert_eq!(ai.model(), "claude-sonnet-4-20250514");
        assert_eq!(ai.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn test_claude_with_max_tokens() {
        let ai = Claude::new("sk-ant-test", DEFAULT_MODEL).with_max_tokens(1000);
        assert_eq!(ai.max_tokens, 1000);
    }

    #[test]
    fn test_claude_with_base_url() {
        let ai = Claude::new("sk-ant-test", DEFAULT_MODEL)
            .with_base_url("https://custom.api.com");
        assert_eq!(ai.base_url, Some("https://custom.api.com".to_string()));
    }
}
