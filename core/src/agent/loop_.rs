use crate::agent::{HistoryEntry, PersonaContext, ToolRegistry, TurnBudget, sanitize_history};
use crate::config::DEFAULT_MAX_TURNS;
use crate::traits::{ChatMessage, ChatRequest, Provider, ToolCall};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Inbound request: the new message plus the caller's record of prior turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatInput {
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}

impl From<&anyhow::Error> for ErrorReply {
    fn from(e: &anyhow::Error) -> Self {
        Self {
            error: format!("{:#}", e),
        }
    }
}

enum LoopState {
    AwaitingModel,
    Dispatching(Vec<ToolCall>),
    Done(String),
}

/// Drives one conversation turn: model call, tool dispatch, repeat, until
/// the model answers in plain text or the turn budget runs out.
///
/// Holds only shared read-only state, so one instance can serve concurrent
/// requests; every call builds its own transcript.
pub struct AgentLoop {
    provider: Arc<dyn Provider>,
    persona: Arc<PersonaContext>,
    tool_registry: Arc<ToolRegistry>,
    max_turns: usize,
}

impl AgentLoop {
    pub fn new(
        provider: Arc<dyn Provider>,
        persona: Arc<PersonaContext>,
        tool_registry: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            provider,
            persona,
            tool_registry,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns = max;
        self
    }

    pub fn persona(&self) -> &PersonaContext {
        &self.persona
    }

    pub async fn respond(&self, input: ChatInput) -> Result<ChatReply> {
        let reply = self
            .process_with_history(&input.message, &input.history)
            .await?;
        Ok(ChatReply { reply })
    }

    pub async fn process(&self, message: &str) -> Result<String> {
        self.process_with_history(message, &[]).await
    }

    pub fn build_messages(&self, history: &[HistoryEntry], message: &str) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::system(self.persona.system_prompt())];
        messages.extend(sanitize_history(history));
        messages.push(ChatMessage::user(message));
        messages
    }

    /// Returns the model's final text. Provider errors end the turn and are
    /// returned as-is; running out of budget is not an error and yields the
    /// text of the last response, which may be empty.
    pub async fn process_with_history(
        &self,
        message: &str,
        history: &[HistoryEntry],
    ) -> Result<String> {
        let mut messages = self.build_messages(history, message);
        let tools = self.tool_registry.get_specs();
        let mut budget = TurnBudget::new(self.max_turns);
        let mut last_text = String::new();
        let mut state = LoopState::AwaitingModel;

        loop {
            state = match state {
                LoopState::AwaitingModel => {
                    if !budget.try_consume() {
                        warn!(
                            turns = budget.used(),
                            max = budget.max(),
                            "turn budget exhausted, returning last response text"
                        );
                        return Ok(last_text);
                    }

                    let request = ChatRequest {
                        messages: &messages,
                        tools: if tools.is_empty() { None } else { Some(tools.as_slice()) },
                    };
                    let response = self.provider.chat(request).await?;
                    last_text = response.text_or_empty().to_string();
                    debug!(
                        turn = budget.used(),
                        finish_reason = ?response.finish_reason,
                        tool_calls = response.tool_calls.len(),
                        "provider responded"
                    );

                    if response.has_tool_calls() {
                        messages.push(ChatMessage::assistant_with_tool_calls(
                            last_text.clone(),
                            response.tool_calls.clone(),
                        ));
                        LoopState::Dispatching(response.tool_calls)
                    } else {
                        LoopState::Done(last_text.clone())
                    }
                }
                LoopState::Dispatching(tool_calls) => {
                    for tool_call in tool_calls {
                        info!(tool = %tool_call.name, id = %tool_call.id, "tool called");
                        let result = self.dispatch(&tool_call).await;
                        messages.push(ChatMessage::tool_result(tool_call.id, result.to_string()));
                    }
                    LoopState::AwaitingModel
                }
                LoopState::Done(text) => return Ok(text),
            };
        }
    }

    async fn dispatch(&self, tool_call: &ToolCall) -> Value {
        let raw = tool_call.arguments.trim();
        let args = if raw.is_empty() {
            Ok(json!({}))
        } else {
            serde_json::from_str::<Value>(raw)
        };

        match args {
            Ok(args) => self.tool_registry.dispatch(&tool_call.name, args).await,
            Err(e) => {
                warn!(tool = %tool_call.name, error = %e, "undecodable tool arguments");
                json!({
                    "error": format!("Failed to parse tool arguments for {}: {}", tool_call.name, e)
                })
            }
        }
    }
}
