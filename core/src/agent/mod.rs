pub mod budget;
pub mod context;
pub mod factory;
pub mod history;
pub mod loop_;
pub mod registry;

pub use budget::TurnBudget;
pub use context::PersonaContext;
pub use factory::build_agent;
pub use history::{HistoryEntry, sanitize_history};
pub use loop_::{AgentLoop, ChatInput, ChatReply, ErrorReply};
pub use registry::ToolRegistry;
