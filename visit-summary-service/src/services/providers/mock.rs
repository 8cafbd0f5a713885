//! Mock provider implementation for testing.

use super::{Completion, CompletionParams, CompletionProvider, ProviderError};
use async_trait::async_trait;
use std::sync::Mutex;

/// One call observed by [`MockCompletionProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub system: String,
    pub prompt: String,
    pub params: CompletionParams,
}

enum Behavior {
    Reply(String),
    Fail(String),
}

/// Mock completion provider for testing.
pub struct MockCompletionProvider {
    behavior: Behavior,
    configured: bool,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockCompletionProvider {
    /// Always answers with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Reply(text.into()),
            configured: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always fails with `ProviderError::ApiError(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Fail(message.into()),
            configured: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Reports itself as not configured on readiness checks.
    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        params: &CompletionParams,
    ) -> Result<Completion, ProviderError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(RecordedCall {
                system: system.to_string(),
                prompt: prompt.to_string(),
                params: *params,
            });

        match &self.behavior {
            Behavior::Reply(text) => Ok(Completion {
                text: text.clone(),
                input_tokens: Some(prompt.len() as u32 / 4),
                output_tokens: Some(text.len() as u32 / 4),
            }),
            Behavior::Fail(message) => Err(ProviderError::ApiError(message.clone())),
        }
    }

    fn health_check(&self) -> Result<(), ProviderError> {
        if self.configured {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock provider not configured".to_string(),
            ))
        }
    }
}
