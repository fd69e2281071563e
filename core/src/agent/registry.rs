use crate::traits::{Tool, ToolSpec};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::warn;

pub const TOOL_NOT_FOUND: &str = "tool not found";

/// Fixed set of tools, built once and shared read-only between requests.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Fails if two tools share a name, since dispatch is by name.
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> anyhow::Result<Self> {
        for (i, tool) in tools.iter().enumerate() {
            if tools[..i].iter().any(|t| t.name() == tool.name()) {
                anyhow::bail!("Tool '{}' registered twice", tool.name());
            }
        }
        Ok(Self { tools })
    }

    pub fn get_specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Runs `name` with `args`. Never fails: unknown tools and tool errors
    /// come back as `{"error": ...}` so the model can react to them.
    pub async fn dispatch(&self, name: &str, args: Value) -> Value {
        let Some(tool) = self.tools.iter().find(|t| t.name() == name) else {
            warn!(tool = name, "model requested an unregistered tool");
            return json!({ "error": TOOL_NOT_FOUND });
        };

        match tool.execute(args).await {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = name, error = %e, "tool execution failed");
                json!({ "error": e.to_string() })
            }
        }
    }
}
