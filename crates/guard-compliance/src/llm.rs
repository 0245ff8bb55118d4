//! LLM backend seam
//!
//! The reasoning layer talks to a language model through this trait so the
//! pipeline stays provider-agnostic. Implementations wrap whatever hosted or
//! local model the deployment ships; tests plug in canned responders. A
//! pipeline built without a backend (or whose backend errors) falls back to
//! rule-based narrative.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role of a chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions
    System,
    /// End-user or pipeline prompt
    User,
    /// Model output
    Assistant,
}

/// One message in a chat exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author role
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// System message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Generation parameters passed to the backend
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Wall-clock budget for one generation call
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        // Low temperature keeps compliance narrative consistent run to run
        Self {
            max_tokens: 1024,
            temperature: 0.3,
            timeout: Duration::from_secs(30),
        }
    }
}

/// LLM backend errors
#[derive(Debug, Error)]
pub enum LlmError {
    /// Model is not loaded or the provider is disabled
    #[error("LLM backend unavailable: {0}")]
    Unavailable(String),

    /// Generation call failed
    #[error("generation failed: {0}")]
    Generation(String),
}

/// Provider-agnostic text generation backend
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Generate a completion for a chat exchange
    async fn generate(
        &self,
        messages: &[ChatMessage],
        config: &LlmConfig,
    ) -> Result<String, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let msg = ChatMessage::user("hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "hello");
        assert_eq!(ChatMessage::system("x").role, Role::System);
        assert_eq!(ChatMessage::assistant("x").role, Role::Assistant);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }

    #[test]
    fn test_default_config() {
        let config = LlmConfig::default();
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
