pub mod agent;
pub mod config;
pub mod notify;
pub mod providers;
pub mod tools;
pub mod traits;

#[cfg(test)]
mod testing;

pub use agent::{
    AgentLoop, ChatInput, ChatReply, ErrorReply, HistoryEntry, PersonaContext, ToolRegistry,
    TurnBudget, build_agent,
};
pub use config::{Config, NotifyConfig, PersonaConfig, PersonaSource};
pub use notify::create_notifier;
pub use providers::{OpenAIProvider, create_provider};
pub use tools::default_tools;
pub use traits::*;
