pub mod notifier;
pub mod provider;
pub mod tool;

pub use notifier::Notifier;
pub use provider::{ChatMessage, ChatRequest, ChatResponse, FinishReason, Provider, ToolCall};
pub use tool::{Tool, ToolSpec};
