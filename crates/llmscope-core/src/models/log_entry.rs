//! Log entry data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status label recorded for a completed call
pub const STATUS_SUCCESS: &str = "success";
/// Status label recorded for a failed call
pub const STATUS_ERROR: &str = "error";
/// Status label recorded for a call that timed out
pub const STATUS_TIMEOUT: &str = "timeout";

/// Token accounting for a single call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens sent in the prompt
    #[serde(default)]
    pub prompt_tokens: u64,

    /// Tokens generated in the completion
    #[serde(default)]
    pub completion_tokens: u64,

    /// Prompt plus completion tokens
    #[serde(default)]
    pub total_tokens: u64,
}

impl TokenUsage {
    /// Build a usage record whose total is derived from its parts
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    /// Whether `total_tokens == prompt_tokens + completion_tokens`
    pub fn is_consistent(&self) -> bool {
        self.prompt_tokens.checked_add(self.completion_tokens) == Some(self.total_tokens)
    }
}

/// Timing breakdown for a streamed call, all in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMetrics {
    /// Time until the first token arrived
    #[serde(default)]
    pub time_to_first_token: u64,

    /// Time spent streaming after the first token
    #[serde(default)]
    pub streaming_duration: u64,

    /// Wall-clock time of the whole call
    #[serde(default)]
    pub total_duration: u64,
}

impl RequestMetrics {
    /// Whether `total_duration == time_to_first_token + streaming_duration`
    pub fn is_consistent(&self) -> bool {
        self.time_to_first_token.checked_add(self.streaming_duration) == Some(self.total_duration)
    }
}

/// One recorded LLM API call
///
/// Entries are immutable once produced by a data source. Numeric fields that
/// are missing from serialized input decode as zero so that aggregates over
/// partially populated records stay well defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// When the call was made
    pub timestamp: DateTime<Utc>,

    /// User that issued the call
    #[serde(default)]
    pub user_id: u64,

    /// File the call was made against
    #[serde(default)]
    pub file_id: u64,

    /// Tenant the user belongs to
    #[serde(default)]
    pub tenant_id: u64,

    /// Model identifier (e.g., "gpt-4-turbo")
    pub model: String,

    /// Total wall-clock time of the call
    #[serde(default)]
    pub duration_ms: u64,

    /// Outcome label; see [`STATUS_SUCCESS`] and friends
    pub status: String,

    /// Request identifier assigned by the data source
    pub request_id: String,

    /// Upstream chat completion identifier, empty when unknown
    #[serde(default)]
    pub chat_completion_id: String,

    /// Token accounting
    #[serde(default)]
    pub token_usage: TokenUsage,

    /// Prompt text
    #[serde(default)]
    pub question: String,

    /// Completion text
    #[serde(default)]
    pub response: String,

    /// Timing breakdown
    #[serde(default)]
    pub metrics: RequestMetrics,
}

impl LogEntry {
    /// Check if the call completed successfully
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Check if a chat completion id was recorded
    pub fn has_chat_completion(&self) -> bool {
        !self.chat_completion_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_token_usage_total_is_derived() {
        let usage = TokenUsage::new(93, 24_569);
        assert_eq!(usage.total_tokens, 24_662);
        assert!(usage.is_consistent());

        let broken = TokenUsage {
            prompt_tokens: 1,
            completion_tokens: 1,
            total_tokens: 5,
        };
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_deserialize_recorded_entry() {
        let json = r#"{
            "timestamp": "2025-05-12T13:51:54.637330Z",
            "user_id": 1,
            "file_id": 2,
            "tenant_id": 3,
            "model": "llama-3.3-70b-instruct-quantized.w8a8",
            "duration_ms": 8169,
            "status": "success",
            "request_id": "f27334bb-c991-43e0-90eb-2a6ef8900b22",
            "chat_completion_id": "",
            "token_usage": {"prompt_tokens": 93, "completion_tokens": 24569, "total_tokens": 24662},
            "question": "Make the following text longer.",
            "response": "If you struggling with something...",
            "metrics": {"time_to_first_token": 2712, "streaming_duration": 5457, "total_duration": 8169}
        }"#;

        let entry: LogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.tenant_id, 3);
        assert_eq!(entry.duration_ms, 8169);
        assert!(entry.is_success());
        assert!(!entry.has_chat_completion());
        assert!(entry.token_usage.is_consistent());
        assert!(entry.metrics.is_consistent());
    }

    #[test]
    fn test_missing_numeric_fields_default_to_zero() {
        let json = r#"{
            "timestamp": "2025-05-12T13:51:54Z",
            "model": "gpt-4-turbo",
            "status": "error",
            "request_id": "req-1",
            "token_usage": {"prompt_tokens": 10}
        }"#;

        let entry: LogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.user_id, 0);
        assert_eq!(entry.duration_ms, 0);
        assert_eq!(entry.token_usage.total_tokens, 0);
        assert_eq!(entry.metrics, RequestMetrics::default());
    }
}
