use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use super::{build_http_client, chat_messages, LlmProvider, Message};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Any hosted model behind an OpenAI-style `/chat/completions` endpoint.
pub struct HostedProvider {
    name: &'static str,
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl HostedProvider {
    pub fn new(
        name: &'static str,
        base_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            name,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            client: build_http_client(timeout)?,
        })
    }

    pub fn gemini(api_key: String, model: String, timeout: Duration) -> anyhow::Result<Self> {
        Self::new("Gemini", GEMINI_BASE_URL.to_string(), api_key, model, timeout)
    }

    pub fn groq(api_key: String, model: String, timeout: Duration) -> anyhow::Result<Self> {
        Self::new("Groq", GROQ_BASE_URL.to_string(), api_key, model, timeout)
    }
}

#[async_trait]
impl LlmProvider for HostedProvider {
    async fn chat(&self, system_prompt: &str, messages: &[Message]) -> anyhow::Result<String> {
        let body = json!({
            "model": self.model,
            "messages": chat_messages(system_prompt, messages),
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("failed to call {} API", self.name))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("{} API error ({}): {}", self.name, status, body.trim());
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .with_context(|| format!("failed to parse {} response", self.name))?;

        data["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing content in {} response", self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn user(content: &str) -> Vec<Message> {
        vec![Message {
            role: "user".to_string(),
            content: content.to_string(),
        }]
    }

    fn provider(server: &MockServer) -> HostedProvider {
        HostedProvider::new(
            "Gemini",
            server.uri(),
            "test-key".to_string(),
            "gemini-2.0-flash".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_returns_top_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({"model": "gemini-2.0-flash"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "  Hello there!  "}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = provider(&server).chat("", &user("hi")).await.unwrap();
        assert_eq!(reply, "  Hello there!  ");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": {"message": "bad key"}})))
            .mount(&server)
            .await;

        let err = provider(&server).chat("", &user("hi")).await.unwrap_err();
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_error_page_keeps_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(503).set_body_string("<html>Service Unavailable</html>"),
            )
            .mount(&server)
            .await;

        let err = provider(&server).chat("", &user("hi")).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("503"), "{msg}");
        assert!(msg.contains("Service Unavailable"), "{msg}");
    }

    #[tokio::test]
    async fn test_slow_completion_times_out_into_error_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "choices": [{"message": {"role": "assistant", "content": "too late"}}]
                    }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let provider = HostedProvider::new(
            "Gemini",
            server.uri(),
            "test-key".to_string(),
            "gemini-2.0-flash".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();

        let reply = crate::services::responder::respond(&provider, "", "hi").await;
        assert!(reply.starts_with("Error:"), "{reply}");
        assert!(!reply.contains("too late"));
    }

    #[tokio::test]
    async fn test_missing_content_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        assert!(provider(&server).chat("", &user("hi")).await.is_err());
    }
}
