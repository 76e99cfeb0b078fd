//! OpenAI-compatible Chat Completions client implementing `LlmClient` (ChatOpenAI).
//!
//! Pointed at Gemini's OpenAI-compatible endpoint by default (see
//! [`ModelSettings`]); any other OpenAI-compatible base works through
//! `WEFT_API_BASE`. Tools set with [`ChatOpenAI::with_tools`] are sent as
//! function tools with `tool_choice = auto`, so the model may answer in text or
//! request tool calls.
//!
//! Tool-call turns and tool results are sent back as proper `assistant.tool_calls`
//! / `tool` messages so the provider can pair each result with its call.
//!
//! **Interaction**: Implements `LlmClient`; used by `ProcessNode` and `AgentNode`.

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse, LlmUsage, ModelSettings};
use crate::message::{Message, ToolCall};
use crate::tool_source::ToolSpec;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionMessageToolCall, ChatCompletionMessageToolCalls,
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestToolMessageArgs,
        ChatCompletionRequestUserMessage, ChatCompletionTool, ChatCompletionToolChoiceOption,
        ChatCompletionTools, CreateChatCompletionRequestArgs, FunctionCall, FunctionObject,
        ToolChoiceOptions,
    },
    Client,
};

/// OpenAI-compatible Chat Completions client.
///
/// Build with [`ChatOpenAI::from_settings`] for the Gemini defaults, or
/// [`ChatOpenAI::with_config`] for a custom endpoint.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    tools: Option<Vec<ToolSpec>>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl ChatOpenAI {
    /// Build client with custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
            tools: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Build client from model settings: base URL, key, model id, temperature and max tokens.
    ///
    /// A missing key is sent as an empty bearer token; the endpoint rejects it at call time.
    pub fn from_settings(settings: &ModelSettings) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(settings.api_base.clone())
            .with_api_key(settings.api_key.clone().unwrap_or_default());
        Self::with_config(config, settings.model.clone())
            .with_temperature(settings.temperature)
            .with_max_tokens(settings.max_tokens)
    }

    /// Set tools for this completion (enables tool_calls in response). An empty list sends no tools.
    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = if tools.is_empty() { None } else { Some(tools) };
        self
    }

    /// Set temperature (0–2). Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Cap on generated tokens per completion.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Convert our `Message` list to OpenAI request messages.
    fn messages_to_request(
        messages: &[Message],
    ) -> Result<Vec<ChatCompletionRequestMessage>, OpenAIError> {
        // Tool results follow their calls in order, so id-less results reuse the positional id.
        let mut result_index = 0usize;
        let mut out = Vec::with_capacity(messages.len());
        for m in messages {
            let msg = match m {
                Message::System(s) => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                ),
                Message::User(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
                Message::Assistant {
                    content,
                    tool_calls,
                } => {
                    result_index = 0;
                    let mut args = ChatCompletionRequestAssistantMessageArgs::default();
                    if !content.is_empty() || tool_calls.is_empty() {
                        args.content(content.as_str());
                    }
                    if !tool_calls.is_empty() {
                        args.tool_calls(
                            tool_calls
                                .iter()
                                .enumerate()
                                .map(|(i, tc)| to_request_tool_call(i, tc))
                                .collect::<Vec<_>>(),
                        );
                    }
                    ChatCompletionRequestMessage::Assistant(args.build()?)
                }
                Message::Tool {
                    call_id, content, ..
                } => {
                    let id = call_id
                        .clone()
                        .unwrap_or_else(|| positional_call_id(result_index));
                    result_index += 1;
                    ChatCompletionRequestMessage::Tool(
                        ChatCompletionRequestToolMessageArgs::default()
                            .tool_call_id(id)
                            .content(content.as_str())
                            .build()?,
                    )
                }
            };
            out.push(msg);
        }
        Ok(out)
    }

    fn tools_to_request(tools: &[ToolSpec]) -> Vec<ChatCompletionTools> {
        tools
            .iter()
            .map(|t| {
                ChatCompletionTools::Function(ChatCompletionTool {
                    function: FunctionObject {
                        name: t.name.clone(),
                        description: t.description.clone(),
                        parameters: Some(t.input_schema.clone()),
                        ..Default::default()
                    },
                })
            })
            .collect()
    }
}

fn positional_call_id(index: usize) -> String {
    format!("call_{}", index)
}

/// Calls without a provider id (e.g. replayed from a mock) get a positional one.
fn to_request_tool_call(index: usize, tc: &ToolCall) -> ChatCompletionMessageToolCalls {
    ChatCompletionMessageToolCalls::Function(ChatCompletionMessageToolCall {
        id: tc.id.clone().unwrap_or_else(|| positional_call_id(index)),
        function: FunctionCall {
            name: tc.name.clone(),
            arguments: tc.arguments.clone(),
        },
    })
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let openai_messages = Self::messages_to_request(messages).map_err(|e| {
            AgentError::ExecutionFailed(format!("OpenAI request build failed: {}", e))
        })?;
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(openai_messages);

        if let Some(ref tools) = self.tools {
            args.tools(Self::tools_to_request(tools));
            args.tool_choice(ChatCompletionToolChoiceOption::Mode(ToolChoiceOptions::Auto));
        }
        if let Some(t) = self.temperature {
            args.temperature(t);
        }
        if let Some(n) = self.max_tokens {
            args.max_completion_tokens(n);
        }

        let request = args.build().map_err(|e| {
            AgentError::ExecutionFailed(format!("OpenAI request build failed: {}", e))
        })?;

        debug!(
            model = %self.model,
            message_count = messages.len(),
            tools_count = self.tools.as_ref().map(|t| t.len()).unwrap_or(0),
            temperature = ?self.temperature,
            "chat completion create"
        );
        if let Ok(js) = serde_json::to_string_pretty(&request) {
            trace!(request = %js, "chat completion request body");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AgentError::ModelCall(e.to_string()))?;

        if let Ok(js) = serde_json::to_string_pretty(&response) {
            trace!(response = %js, "chat completion response body");
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::ModelCall("completion returned no choices".to_string()))?;

        let msg = choice.message;
        let content = msg.content.unwrap_or_default();
        let tool_calls: Vec<ToolCall> = msg
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tc| match tc {
                ChatCompletionMessageToolCalls::Function(f) => Some(ToolCall {
                    id: Some(f.id),
                    name: f.function.name,
                    arguments: f.function.arguments,
                }),
                _ => None,
            })
            .collect();

        let usage = response.usage.map(|u| LlmUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        debug!(
            content_len = content.len(),
            tool_calls = tool_calls.len(),
            usage = ?usage,
            "chat completion done"
        );
        Ok(LlmResponse {
            content,
            tool_calls,
            usage,
        })
    }
}
