//! Deterministic log entries for unit tests

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::models::{LogEntry, RequestMetrics, TokenUsage, STATUS_SUCCESS};

/// Fixed reference instant shared by fixtures
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 12, 12, 0, 0).unwrap()
}

/// A well-formed entry at `base_time() - minutes_ago`
pub fn entry(id: usize, minutes_ago: i64) -> LogEntry {
    let duration_ms = 1_000 + id as u64 * 100;
    let ttft = 500;
    LogEntry {
        timestamp: base_time() - Duration::minutes(minutes_ago),
        user_id: 1,
        file_id: 1,
        tenant_id: 1,
        model: "gpt-4-turbo".to_string(),
        duration_ms,
        status: STATUS_SUCCESS.to_string(),
        request_id: format!("req-{id:04}"),
        chat_completion_id: String::new(),
        token_usage: TokenUsage::new(100, 1_000),
        question: format!("question {id}"),
        response: format!("response {id}"),
        metrics: RequestMetrics {
            time_to_first_token: ttft,
            streaming_duration: duration_ms - ttft,
            total_duration: duration_ms,
        },
    }
}

/// `n` entries, newest first, one minute apart
pub fn entries(n: usize) -> Vec<LogEntry> {
    (0..n).map(|i| entry(i, i as i64)).collect()
}
