//! Test doubles for the external collaborators: the text generator and the webhook.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::llm_client::{Attachment, LlmError, TextGenerator, Turn};
use crate::posts::webhook::{PublishError, PublishRequest, Publisher};

#[derive(Debug, Clone)]
enum Reply {
    Text { text: String, delay: Duration },
    Fail { status: u16, message: String },
}

#[derive(Debug, Clone)]
pub struct GenerateCall {
    pub prompt: String,
    pub files: Vec<Attachment>,
    pub history: Vec<Turn>,
}

/// Generator with canned replies keyed by prompt. Unknown prompts fail with a 404.
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<GenerateCall>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, prompt: &str, text: &str) -> Self {
        self.reply_after(prompt, text, Duration::ZERO)
    }

    pub fn reply_after(mut self, prompt: &str, text: &str, delay: Duration) -> Self {
        self.replies.insert(
            prompt.to_string(),
            Reply::Text {
                text: text.to_string(),
                delay,
            },
        );
        self
    }

    pub fn fail(mut self, prompt: &str, status: u16, message: &str) -> Self {
        self.replies.insert(
            prompt.to_string(),
            Reply::Fail {
                status,
                message: message.to_string(),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<GenerateCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_with_files(
        &self,
        prompt: &str,
        files: &[Attachment],
        history: &[Turn],
    ) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(GenerateCall {
            prompt: prompt.to_string(),
            files: files.to_vec(),
            history: history.to_vec(),
        });

        match self.replies.get(prompt).cloned() {
            Some(Reply::Text { text, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(text)
            }
            Some(Reply::Fail { status, message }) => Err(LlmError::Api { status, message }),
            None => Err(LlmError::Api {
                status: 404,
                message: format!("no scripted reply for {prompt:?}"),
            }),
        }
    }
}

/// Publisher that records every forward and can be told to reject.
#[derive(Default)]
pub struct RecordingPublisher {
    sent: Mutex<Vec<PublishRequest>>,
    reject_with: Option<u16>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(status: u16) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject_with: Some(status),
        }
    }

    pub fn sent(&self) -> Vec<PublishRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn forward(&self, request: &PublishRequest) -> Result<(), PublishError> {
        if let Some(status) = self.reject_with {
            return Err(PublishError::Rejected {
                status,
                body: "webhook said no".to_string(),
            });
        }
        self.sent.lock().unwrap().push(request.clone());
        Ok(())
    }
}
