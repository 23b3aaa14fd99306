use crate::services::ai::{LlmProvider, Message};

/// Single-turn completion. Never fails: provider errors come back as an
/// `Error: ...` string the caller can show as-is.
pub async fn respond(llm: &dyn LlmProvider, persona: &str, prompt: &str) -> String {
    let messages = [Message {
        role: "user".to_string(),
        content: prompt.to_string(),
    }];

    match llm.chat(persona, &messages).await {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "completion request failed");
            format!("Error: {e:#}")
        }
    }
}
