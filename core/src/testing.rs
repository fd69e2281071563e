//! Test doubles shared by unit tests.

use crate::traits::{ChatMessage, ChatRequest, ChatResponse, Notifier, Provider, ToolCall, ToolSpec};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    async fn notify(&self, text: &str) {
        self.messages.lock().unwrap().push(text.to_string());
    }
}

pub enum Scripted {
    Reply(ChatResponse),
    Fail(String),
}

/// Replays canned responses and records every request it sees. Once the
/// script runs out the last entry repeats.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Scripted>>,
    last: Mutex<Option<ChatResponse>>,
    pub seen: Mutex<Vec<(Vec<ChatMessage>, Vec<ToolSpec>)>>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            seen: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn request(&self, index: usize) -> Vec<ChatMessage> {
        self.seen.lock().unwrap()[index].0.clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn chat(&self, request: ChatRequest<'_>) -> anyhow::Result<ChatResponse> {
        self.seen.lock().unwrap().push((
            request.messages.to_vec(),
            request.tools.map(|t| t.to_vec()).unwrap_or_default(),
        ));

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Reply(response)) => {
                *self.last.lock().unwrap() = Some(response.clone());
                Ok(response)
            }
            Some(Scripted::Fail(message)) => Err(anyhow::anyhow!(message)),
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| anyhow::anyhow!("script exhausted")),
        }
    }
}

pub fn call(id: &str, name: &str, arguments: &str) -> ToolCall {
    ToolCall {
        id: id.into(),
        name: name.into(),
        arguments: arguments.into(),
    }
}
