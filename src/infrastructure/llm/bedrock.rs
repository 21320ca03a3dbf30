//! AWS Bedrock runtime provider for Anthropic Claude models

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{
    DomainError, FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, Usage,
};

const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// AWS Bedrock client trait for dependency injection
#[async_trait]
pub trait BedrockClientTrait: Send + Sync + std::fmt::Debug {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, DomainError>;
}

/// Bedrock provider speaking the Claude messages format
#[derive(Debug)]
pub struct BedrockProvider<C: BedrockClientTrait> {
    client: C,
}

impl<C: BedrockClientTrait> BedrockProvider<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    fn build_request(&self, request: &LlmRequest) -> serde_json::Value {
        let (system, messages) = split_system_messages(&request.messages);

        let claude_messages: Vec<BedrockMessage> =
            messages.into_iter().map(BedrockMessage::from_domain).collect();

        let mut body = serde_json::json!({
            "anthropic_version": ANTHROPIC_VERSION,
            "messages": claude_messages,
            "max_tokens": request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        });

        if let Some(system_content) = system {
            body["system"] = serde_json::json!(system_content);
        }

        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }

        if let Some(ref stop) = request.stop {
            body["stop_sequences"] = serde_json::json!(stop);
        }

        body
    }

    fn parse_response(&self, model: &str, bytes: &[u8]) -> Result<LlmResponse, DomainError> {
        let response: BedrockClaudeResponse = serde_json::from_slice(bytes).map_err(|e| {
            DomainError::provider("bedrock", format!("Failed to parse response: {}", e))
        })?;

        let content = response
            .content
            .into_iter()
            .filter(|block| block.content_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        let id = response
            .id
            .unwrap_or_else(|| format!("bedrock-{}", uuid::Uuid::new_v4()));

        Ok(LlmResponse::new(id, model, Message::assistant(content))
            .with_finish_reason(parse_stop_reason(response.stop_reason.as_deref()))
            .with_usage(Usage::new(
                response.usage.input_tokens,
                response.usage.output_tokens,
            )))
    }
}

fn is_claude_model(model: &str) -> bool {
    model.contains("anthropic") || model.contains("claude")
}

#[async_trait]
impl<C: BedrockClientTrait> LlmProvider for BedrockProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        if !is_claude_model(model) {
            return Err(DomainError::configuration(format!(
                "Bedrock model '{}' is not an Anthropic Claude model",
                model
            )));
        }

        let body = self.build_request(&request);
        let body_bytes = serde_json::to_vec(&body).map_err(|e| {
            DomainError::provider("bedrock", format!("Failed to serialize request: {}", e))
        })?;

        let response_bytes = self.client.invoke_model(model, body_bytes).await?;

        self.parse_response(model, &response_bytes)
    }

    fn provider_name(&self) -> &'static str {
        "bedrock"
    }
}

/// System messages go to the top-level `system` field, joined by newlines
fn split_system_messages(messages: &[Message]) -> (Option<String>, Vec<&Message>) {
    let (system, others): (Vec<&Message>, Vec<&Message>) = messages
        .iter()
        .partition(|m| m.role == MessageRole::System);

    let system_content = system
        .iter()
        .filter_map(|m| m.content_text())
        .collect::<Vec<_>>()
        .join("\n");

    let system = (!system_content.is_empty()).then_some(system_content);

    (system, others)
}

fn parse_stop_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("max_tokens") => FinishReason::Length,
        Some("guardrail_intervened") => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    }
}

// Bedrock API types

#[derive(Debug, Serialize)]
struct BedrockMessage {
    role: &'static str,
    content: String,
}

impl BedrockMessage {
    fn from_domain(message: &Message) -> Self {
        let role = match message.role {
            MessageRole::Assistant => "assistant",
            MessageRole::User | MessageRole::System => "user",
        };

        Self {
            role,
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BedrockClaudeResponse {
    id: Option<String>,
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: ClaudeUsage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClaudeUsage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Real AWS Bedrock runtime client
#[derive(Debug, Clone)]
pub struct BedrockClient {
    client: aws_sdk_bedrockruntime::Client,
}

impl BedrockClient {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_bedrockruntime::Client::new(config),
        }
    }
}

#[async_trait]
impl BedrockClientTrait for BedrockClient {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, DomainError> {
        let blob = aws_sdk_bedrockruntime::primitives::Blob::new(body);

        let response = self
            .client
            .invoke_model()
            .model_id(model_id)
            .body(blob)
            .content_type("application/json")
            .accept("application/json")
            .send()
            .await
            .map_err(|e| DomainError::provider("bedrock", format!("API error: {}", e)))?;

        Ok(response.body.into_inner())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    pub struct MockBedrockClient {
        responses: Mutex<HashMap<String, Vec<u8>>>,
        errors: Mutex<HashMap<String, String>>,
        bodies: Mutex<Vec<serde_json::Value>>,
    }

    impl MockBedrockClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(self, model_id: &str, response: serde_json::Value) -> Self {
            let bytes = serde_json::to_vec(&response).unwrap();
            self.responses
                .lock()
                .unwrap()
                .insert(model_id.to_string(), bytes);
            self
        }

        pub fn with_error(self, model_id: &str, error: &str) -> Self {
            self.errors
                .lock()
                .unwrap()
                .insert(model_id.to_string(), error.to_string());
            self
        }

        /// Request bodies received so far
        pub fn bodies(&self) -> Vec<serde_json::Value> {
            self.bodies.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BedrockClientTrait for MockBedrockClient {
        async fn invoke_model(
            &self,
            model_id: &str,
            body: Vec<u8>,
        ) -> Result<Vec<u8>, DomainError> {
            if let Ok(json) = serde_json::from_slice(&body) {
                self.bodies.lock().unwrap().push(json);
            }

            if let Some(error) = self.errors.lock().unwrap().get(model_id) {
                return Err(DomainError::provider("bedrock", error.clone()));
            }

            self.responses
                .lock()
                .unwrap()
                .get(model_id)
                .cloned()
                .ok_or_else(|| {
                    DomainError::provider("bedrock", format!("No mock response for {}", model_id))
                })
        }
    }
}
