use crate::tools::{acknowledged, decode_args};
use crate::traits::{Notifier, Tool};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordUnknownQuestionArgs {
    question: String,
}

pub struct RecordUnknownQuestionTool {
    notifier: Arc<dyn Notifier>,
}

impl RecordUnknownQuestionTool {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl Tool for RecordUnknownQuestionTool {
    fn name(&self) -> &str {
        "record_unknown_question"
    }

    fn description(&self) -> &str {
        "Always use this tool to record any question that couldn't be answered as you didn't know the answer"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "question": {
                    "type": "string",
                    "description": "The question that couldn't be answered"
                }
            },
            "required": ["question"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<Value> {
        let args: RecordUnknownQuestionArgs = decode_args(self.name(), args)?;

        info!("recording unknown question");
        self.notifier
            .notify(&format!("Recording {}", args.question))
            .await;

        Ok(acknowledged())
    }
}
