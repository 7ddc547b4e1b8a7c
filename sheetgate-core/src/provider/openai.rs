//! OpenAI chat-completions provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ModelProvider, ModelResponse, ProviderError};
use crate::types::{ContentBlock, Message, Role, StopReason, ToolDefinition, ToolUseBlock};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Chat-completions client for the OpenAI API (or any compatible endpoint)
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: model.into(),
        }
    }

    /// Point the provider at a compatible endpoint other than api.openai.com
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn build_request(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        system_prompt: Option<&str>,
    ) -> ChatRequest {
        let mut wire_messages = Vec::with_capacity(messages.len() + 1);

        if let Some(system) = system_prompt {
            wire_messages.push(WireMessage {
                role: "system".to_string(),
                content: Some(system.to_string()),
                tool_calls: None,
                tool_call_id: None,
            });
        }

        for message in messages {
            wire_messages.extend(to_wire(message));
        }

        let tools = if tools.is_empty() {
            None
        } else {
            Some(tools.iter().map(to_wire_tool).collect())
        };

        ChatRequest {
            model: self.model.clone(),
            messages: wire_messages,
            tools,
        }
    }
}

#[async_trait]
impl ModelProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        system_prompt: Option<&str>,
    ) -> Result<ModelResponse, ProviderError> {
        let request = self.build_request(messages, tools, system_prompt);
        let url = format!("{}/chat/completions", self.api_base);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::Authentication(body),
                429 => ProviderError::RateLimited(body),
                500..=599 => ProviderError::ServiceUnavailable(body),
                _ => ProviderError::Model(format!("status {}: {}", status, body)),
            });
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Model(format!("malformed response: {}", e)))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Model("response contained no choices".to_string()))?;

        Ok(ModelResponse {
            message: from_wire(choice.message),
            stop_reason: parse_finish_reason(choice.finish_reason.as_deref()),
        })
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool>>,
}

#[derive(Serialize, Deserialize)]
struct WireMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    function: WireFunctionCall,
}

#[derive(Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    /// JSON-encoded arguments, as the API transmits them
    arguments: String,
}

#[derive(Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunction,
}

#[derive(Serialize)]
struct WireFunction {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: WireMessage,
    finish_reason: Option<String>,
}

fn to_wire_tool(def: &ToolDefinition) -> WireTool {
    WireTool {
        kind: "function",
        function: WireFunction {
            name: def.name.clone(),
            description: def.description.clone(),
            parameters: def.input_schema.clone(),
        },
    }
}

/// Translate one internal message into its wire messages.
///
/// Tool results expand to one `tool`-role message per result block; everything
/// else maps one-to-one.
fn to_wire(message: &Message) -> Vec<WireMessage> {
    match message.role {
        Role::User => {
            let mut out = Vec::new();
            let mut text = String::new();

            for block in &message.content {
                match block {
                    ContentBlock::Text { text: t } => {
                        if !text.is_empty() {
                            text.push('\n');
                        }
                        text.push_str(t);
                    }
                    ContentBlock::ToolResult(result) => {
                        out.push(WireMessage {
                            role: "tool".to_string(),
                            content: Some(result.content.as_text()),
                            tool_calls: None,
                            tool_call_id: Some(result.tool_use_id.clone()),
                        });
                    }
                    ContentBlock::ToolUse(_) => {}
                }
            }

            if !text.is_empty() || out.is_empty() {
                out.insert(
                    0,
                    WireMessage {
                        role: "user".to_string(),
                        content: Some(text),
                        tool_calls: None,
                        tool_call_id: None,
                    },
                );
            }

            out
        }
        Role::Assistant => {
            let text = message.text();
            let tool_calls: Vec<WireToolCall> = message
                .tool_uses()
                .into_iter()
                .map(|tu| WireToolCall {
                    id: tu.id.clone(),
                    kind: "function".to_string(),
                    function: WireFunctionCall {
                        name: tu.name.clone(),
                        arguments: tu.input.to_string(),
                    },
                })
                .collect();

            vec![WireMessage {
                role: "assistant".to_string(),
                content: if text.is_empty() { None } else { Some(text) },
                tool_calls: if tool_calls.is_empty() {
                    None
                } else {
                    Some(tool_calls)
                },
                tool_call_id: None,
            }]
        }
    }
}

fn from_wire(message: WireMessage) -> Message {
    let mut blocks = Vec::new();

    if let Some(text) = message.content {
        if !text.is_empty() {
            blocks.push(ContentBlock::Text { text });
        }
    }

    for call in message.tool_calls.unwrap_or_default() {
        // The API sends arguments as a JSON string; a string that fails to
        // parse is carried through as-is so input validation can report it
        let input = serde_json::from_str(&call.function.arguments)
            .unwrap_or(Value::String(call.function.arguments));

        blocks.push(ContentBlock::ToolUse(ToolUseBlock {
            id: call.id,
            name: call.function.name,
            input,
        }));
    }

    Message {
        role: Role::Assistant,
        content: blocks,
    }
}

fn parse_finish_reason(reason: Option<&str>) -> StopReason {
    match reason {
        Some("stop") => StopReason::EndTurn,
        Some("tool_calls") => StopReason::ToolUse,
        Some("length") => StopReason::MaxTokens,
        _ => StopReason::Unknown,
    }
}
