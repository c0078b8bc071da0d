/*!
 * Mock translator for tests and benchmarks.
 *
 * Behaviour is scripted per model identifier, with a default for models
 * without a script:
 * - `MockBehavior::Echo` - returns the input text unchanged
 * - `MockBehavior::Reply` - returns a fixed text
 * - `MockBehavior::Empty` - returns an empty string
 * - `MockBehavior::Failing` - returns a provider error
 * - `MockBehavior::Slow` - sleeps, then echoes
 * - `MockBehavior::Panicking` - panics inside the call
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Behaviour of the mock for one model
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Return the input text unchanged
    Echo,
    /// Return a fixed text
    Reply(String),
    /// Return an empty translation
    Empty,
    /// Fail with an API error
    Failing,
    /// Sleep before echoing (for deadline testing)
    Slow { delay_ms: u64 },
    /// Panic while translating
    Panicking,
}

/// One recorded call to the mock
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub text: String,
    pub target_language: String,
    pub model: String,
}

/// Scripted translator
#[derive(Debug, Clone)]
pub struct MockTranslator {
    default: MockBehavior,
    per_model: HashMap<String, MockBehavior>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockTranslator {
    /// Create a mock with the given default behaviour
    pub fn new(default: MockBehavior) -> Self {
        Self {
            default,
            per_model: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Mock that echoes its input
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Mock that always answers with `text`
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Reply(text.into()))
    }

    /// Mock that always returns empty text
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Script the behaviour of one model
    pub fn with_model(mut self, model: impl Into<String>, behavior: MockBehavior) -> Self {
        self.per_model.insert(model.into(), behavior);
        self
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Models called so far, in order
    pub fn called_models(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.model).collect()
    }

    fn behavior_for(&self, model: &str) -> &MockBehavior {
        self.per_model.get(model).unwrap_or(&self.default)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, target_language: &str, model: &str) -> Result<String, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(MockCall {
                text: text.to_string(),
                target_language: target_language.to_string(),
                model: model.to_string(),
            });
        }

        match self.behavior_for(model).clone() {
            MockBehavior::Echo => Ok(text.to_string()),
            MockBehavior::Reply(reply) => Ok(reply),
            MockBehavior::Empty => Ok(String::new()),
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: format!("Simulated failure for model {}", model),
            }),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(text.to_string())
            }
            MockBehavior::Panicking => panic!("Simulated panic for model {}", model),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
