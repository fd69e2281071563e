use crate::traits::ToolSpec;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const ROLE_SYSTEM: &str = "system";
pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";
pub const ROLE_TOOL: &str = "tool";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    fn plain(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::plain(ROLE_SYSTEM, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::plain(ROLE_USER, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::plain(ROLE_ASSISTANT, content)
    }

    pub fn assistant_with_tool_calls(
        content: impl Into<String>,
        tool_calls: Vec<ToolCall>,
    ) -> Self {
        Self {
            tool_calls: Some(tool_calls),
            ..Self::plain(ROLE_ASSISTANT, content)
        }
    }

    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            ..Self::plain(ROLE_TOOL, content)
        }
    }
}

/// A model-issued request to run a named tool. `arguments` is the raw
/// JSON text exactly as the provider returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    ToolCalls,
    Stop,
}

#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub finish_reason: FinishReason,
    pub text: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

impl ChatResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            finish_reason: FinishReason::Stop,
            text: Some(text.into()),
            tool_calls: vec![],
        }
    }

    pub fn with_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            finish_reason: FinishReason::ToolCalls,
            text: None,
            tool_calls,
        }
    }

    /// A response counts as a tool invocation only when the provider both
    /// flagged it and attached at least one request.
    pub fn has_tool_calls(&self) -> bool {
        self.finish_reason == FinishReason::ToolCalls && !self.tool_calls.is_empty()
    }

    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub messages: &'a [ChatMessage],
    pub tools: Option<&'a [ToolSpec]>,
}

#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    /// One round trip to the completion service, returning its first choice.
    async fn chat(&self, request: ChatRequest<'_>) -> anyhow::Result<ChatResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_result_references_call_id() {
        let msg = ChatMessage::tool_result("call_1", "{\"status\":\"ok\"}");
        assert_eq!(msg.role, ROLE_TOOL);
        assert_eq!(msg.tool_call_id.as_deref(), Some("call_1"));
        assert!(msg.tool_calls.is_none());
    }

    #[test]
    fn stop_with_stray_calls_is_not_a_tool_turn() {
        let mut response = ChatResponse::text("hi");
        response.tool_calls.push(ToolCall {
            id: "x".into(),
            name: "noop".into(),
            arguments: "{}".into(),
        });
        assert!(!response.has_tool_calls());
    }

    #[test]
    fn tool_calls_without_requests_is_not_a_tool_turn() {
        let response = ChatResponse::with_tool_calls(vec![]);
        assert!(!response.has_tool_calls());
        assert_eq!(response.text_or_empty(), "");
    }
}
