use crate::tools::{acknowledged, decode_args};
use crate::traits::{Notifier, Tool};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_NAME: &str = "Name not provided";
pub const DEFAULT_NOTES: &str = "not provided";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordUserDetailsArgs {
    email: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

pub struct RecordUserDetailsTool {
    notifier: Arc<dyn Notifier>,
}

impl RecordUserDetailsTool {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl Tool for RecordUserDetailsTool {
    fn name(&self) -> &str {
        "record_user_details"
    }

    fn description(&self) -> &str {
        "Use this tool to record that a user is interested in being in touch and provided an email address"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "email": {
                    "type": "string",
                    "description": "The email address of this user"
                },
                "name": {
                    "type": "string",
                    "description": "The user's name, if they provided it"
                },
                "notes": {
                    "type": "string",
                    "description": "Any additional information about the conversation that's worth recording to give context"
                }
            },
            "required": ["email"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<Value> {
        let args: RecordUserDetailsArgs = decode_args(self.name(), args)?;
        // Models sometimes send "" for fields they have nothing for.
        let name = args
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        let notes = args
            .notes
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NOTES.to_string());

        info!(email = %args.email, "recording user details");
        self.notifier
            .notify(&format!(
                "Recording {} with email {} and notes {}",
                name, args.email, notes
            ))
            .await;

        Ok(acknowledged())
    }
}
