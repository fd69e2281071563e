use crate::traits::{Notifier, Tool};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;

pub mod record_unknown_question;
pub mod record_user_details;

pub use record_unknown_question::RecordUnknownQuestionTool;
pub use record_user_details::RecordUserDetailsTool;

/// The tools every persona agent advertises.
pub fn default_tools(notifier: Arc<dyn Notifier>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(RecordUserDetailsTool::new(notifier.clone())),
        Arc::new(RecordUnknownQuestionTool::new(notifier)),
    ]
}

/// Decodes tool arguments into the tool's typed parameter struct.
pub fn decode_args<T: DeserializeOwned>(tool: &str, args: Value) -> anyhow::Result<T> {
    serde_json::from_value(args)
        .map_err(|e| anyhow::anyhow!("Invalid arguments for {}: {}", tool, e))
}

pub(crate) fn acknowledged() -> Value {
    json!({ "status": "ok" })
}
