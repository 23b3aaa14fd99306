pub mod hosted;
pub mod intent;
pub mod ollama;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

use self::hosted::HostedProvider;
use self::ollama::OllamaProvider;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Sends the messages, preceded by `system_prompt` when it is non-empty,
    /// and returns the text of the top completion.
    async fn chat(&self, system_prompt: &str, messages: &[Message]) -> anyhow::Result<String>;
}

pub(crate) fn build_http_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

pub(crate) fn chat_messages(system_prompt: &str, messages: &[Message]) -> Vec<serde_json::Value> {
    let mut out = Vec::with_capacity(messages.len() + 1);
    if !system_prompt.is_empty() {
        out.push(serde_json::json!({ "role": "system", "content": system_prompt }));
    }
    for msg in messages {
        out.push(serde_json::json!({ "role": msg.role, "content": msg.content }));
    }
    out
}

/// Picks the completion backend named by `LLM_PROVIDER`.
pub fn from_config(config: &AppConfig) -> anyhow::Result<Box<dyn LlmProvider>> {
    let timeout = config.http_timeout();
    let provider: Box<dyn LlmProvider> = match config.llm_provider.as_str() {
        "groq" => {
            tracing::info!("using Groq LLM provider (model: {})", config.groq_model);
            Box::new(HostedProvider::groq(
                config.groq_api_key.clone(),
                config.groq_model.clone(),
                timeout,
            )?)
        }
        "ollama" => {
            tracing::info!("using Ollama LLM provider (url: {})", config.ollama_url);
            Box::new(OllamaProvider::new(
                config.ollama_url.clone(),
                config.ollama_model.clone(),
                timeout,
            )?)
        }
        _ => {
            tracing::info!("using Gemini LLM provider (model: {})", config.gemini_model);
            Box::new(HostedProvider::gemini(
                config.gemini_api_key.clone(),
                config.gemini_model.clone(),
                timeout,
            )?)
        }
    };
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_messages_skips_empty_system_prompt() {
        let msgs = vec![Message {
            role: "user".to_string(),
            content: "hi".to_string(),
        }];
        assert_eq!(chat_messages("", &msgs).len(), 1);

        let with_system = chat_messages("be brief", &msgs);
        assert_eq!(with_system.len(), 2);
        assert_eq!(with_system[0]["role"], "system");
        assert_eq!(with_system[1]["content"], "hi");
    }
}
