use crate::utils::error::{ProposalError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

/// Minimal chat-completions client. All agents share one instance; errors are
/// tagged with the calling agent's name so failures can be traced to a step.
pub struct ChatClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl ChatClient {
    pub fn new(api_base: &str, api_key: &str, model: &str, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// One prompt/response round-trip in JSON mode, returning the raw reply
    /// content.
    pub async fn complete(&self, agent: &str, prompt: &str) -> Result<String> {
        let endpoint = format!("{}/chat/completions", self.api_base);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            // Low temperature: proposal sections should stay close to the RFP.
            temperature: 0.2,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        tracing::debug!("📡 {}: Sending chat request to: {}", agent, endpoint);

        let response = self
            .client
            .post(&endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        tracing::debug!("📡 {}: API response status: {}", agent, response.status());

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProposalError::LlmError {
                agent: agent.to_string(),
                message: format!("API request failed with status {}: {}", status, body),
            });
        }

        let parsed: ChatResponse =
            response.json().await.map_err(|e| ProposalError::LlmError {
                agent: agent.to_string(),
                message: format!("API response body could not be decoded: {}", e),
            })?;

        if let Some(usage) = &parsed.usage {
            tracing::debug!(
                "📡 {}: Token usage: {} prompt, {} completion",
                agent,
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProposalError::LlmError {
                agent: agent.to_string(),
                message: "API response contained no choices".to_string(),
            })?;

        Ok(choice.message.content)
    }
}

/// Strips a surrounding Markdown code fence from a model reply. JSON mode
/// should make fences impossible, but some models emit them anyway.
pub fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    if let Some(rest) = trimmed.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        if let Some(inner) = rest.strip_suffix("```") {
            return inner.trim();
        }
    }
    trimmed
}
