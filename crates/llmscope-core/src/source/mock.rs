//! Synthetic log entries standing in for a real backend

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;
use uuid::Uuid;

use crate::config::SourceConfig;
use crate::error::Result;
use crate::models::{
    FilterCriteria, LogEntry, RequestMetrics, TokenUsage, STATUS_ERROR, STATUS_SUCCESS,
    STATUS_TIMEOUT,
};
use crate::query;

use super::DataSource;

/// Models the mock source draws from
pub const KNOWN_MODELS: [&str; 4] = [
    "llama-3.3-70b-instruct-quantized.w8a8",
    "llama-3.1-8b-instruct",
    "gpt-4-turbo",
    "claude-3-haiku",
];

/// Status labels the mock source draws from
pub const KNOWN_STATUSES: [&str; 3] = [STATUS_SUCCESS, STATUS_ERROR, STATUS_TIMEOUT];

const SAMPLE_QUESTION: &str = "Make the following text longer. Return only the resulting text.Text: \"\"\"\nIf you struggling with something or need advice, I here to offer support and guidance. Sometimes, all it takes is someone to talk to, and I happy to be that person. We can work through challenges together and find ways to overcome obstacles. And when you do achieve your goals, we can celebrate together and bask in the joy of success.\r\n\n\"\"\"";

const SAMPLE_RESPONSE: &str = "If you struggling with something or need advice, I here to offer support and guidance. Sometimes, all it takes is someone to talk to, and I happy to be that person. We can work through challenges together and find ways to overcome obstacles, no matter how daunting they may seem. Whether you facing a difficult decision, dealing with a personal issue, or trying to achieve a long-term goal, I here to listen and provide a fresh perspective. And when you do achieve your goals, we can celebrate together and bask in the joy of success. The feeling of accomplishment and pride that comes with overcoming adversity is truly unbeatable, and I be honored to be a part of your journey. By working together and supporting one another, we can build a strong foundation for success and create a brighter, more fulfilling future. So don hesitate to reach out if you need someone to talk to - I here to offer a helping hand, a sympathetic ear, and a supportive presence whenever you need it. Together, we can navigate life ups and downs and emerge stronger, wiser, and more resilient than ever before.";

/// Random log entry generator
///
/// With a seed every fetch replays the same sequence, so a filtered fetch is
/// exactly the filtered form of the unfiltered fetch of the same size.
#[derive(Debug, Clone)]
pub struct MockDataSource {
    seed: Option<u64>,
    now: Option<DateTime<Utc>>,
    window: Duration,
}

impl Default for MockDataSource {
    fn default() -> Self {
        Self::new(&SourceConfig::default())
    }
}

impl MockDataSource {
    /// Create a source from configuration
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            seed: config.seed,
            now: None,
            window: Duration::try_days(i64::from(config.window_days)).unwrap_or(Duration::MAX),
        }
    }

    /// Replay the same entries on every fetch
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Pin the clock that timestamps are generated against
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// Generate `count` entries, newest first
    pub fn generate(&self, count: usize) -> Vec<LogEntry> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let now = self.now.unwrap_or_else(Utc::now);
        let start = now.checked_sub_signed(self.window).unwrap_or(DateTime::<Utc>::MIN_UTC);
        let span_ms = (now - start).num_milliseconds().max(0);

        let mut entries: Vec<LogEntry> = (0..count)
            .map(|_| random_entry(&mut rng, start, span_ms))
            .collect();

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }
}

fn random_entry(rng: &mut StdRng, start: DateTime<Utc>, span_ms: i64) -> LogEntry {
    let duration_ms: u64 = rng.gen_range(1_000..=15_000);
    let time_to_first_token: u64 = rng.gen_range(500..=3_000);
    let prompt_tokens: u64 = rng.gen_range(50..=200);
    let completion_tokens: u64 = rng.gen_range(5_000..=30_000);

    let timestamp = start + Duration::milliseconds(rng.gen_range(0..=span_ms));
    let model = KNOWN_MODELS.choose(rng).copied().unwrap_or(KNOWN_MODELS[0]);
    let status = KNOWN_STATUSES.choose(rng).copied().unwrap_or(STATUS_SUCCESS);

    let request_id = format!("req-{}", random_uuid(rng));
    let chat_completion_id = if rng.gen_bool(0.7) {
        format!("cc-{}", random_uuid(rng))
    } else {
        String::new()
    };

    LogEntry {
        timestamp,
        user_id: rng.gen_range(1..=10),
        file_id: rng.gen_range(1..=20),
        tenant_id: rng.gen_range(1..=5),
        model: model.to_string(),
        duration_ms,
        status: status.to_string(),
        request_id,
        chat_completion_id,
        token_usage: TokenUsage::new(prompt_tokens, completion_tokens),
        question: SAMPLE_QUESTION.to_string(),
        response: SAMPLE_RESPONSE.to_string(),
        metrics: RequestMetrics {
            time_to_first_token,
            streaming_duration: duration_ms.saturating_sub(time_to_first_token),
            total_duration: duration_ms,
        },
    }
}

fn random_uuid(rng: &mut StdRng) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

#[async_trait::async_trait]
impl DataSource for MockDataSource {
    async fn fetch_entries(&self, count: usize) -> Result<Vec<LogEntry>> {
        let entries = self.generate(count);
        debug!(count, "Generated mock entries");
        Ok(entries)
    }

    async fn fetch_filtered(&self, filter: &FilterCriteria, count: usize) -> Result<Vec<LogEntry>> {
        let generated = self.generate(count);
        let entries: Vec<LogEntry> = generated
            .into_iter()
            .filter(|entry| query::matches_fields(entry, filter))
            .collect();
        debug!(count, matched = entries.len(), "Generated filtered mock entries");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::base_time;
    use pretty_assertions::assert_eq;

    fn seeded() -> MockDataSource {
        MockDataSource::default().with_seed(42).with_clock(base_time())
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        assert_eq!(seeded().generate(50), seeded().generate(50));
    }

    #[test]
    fn test_entries_satisfy_invariants() {
        let now = base_time();
        let entries = seeded().generate(200);
        assert_eq!(entries.len(), 200);

        for entry in &entries {
            assert!(entry.token_usage.is_consistent());
            assert!(entry.metrics.is_consistent());
            assert!((1_000..=15_000).contains(&entry.duration_ms));
            assert!((1..=10).contains(&entry.user_id));
            assert!((1..=20).contains(&entry.file_id));
            assert!((1..=5).contains(&entry.tenant_id));
            assert!(KNOWN_MODELS.contains(&entry.model.as_str()));
            assert!(KNOWN_STATUSES.contains(&entry.status.as_str()));
            assert!(entry.request_id.starts_with("req-"));
            let cc = &entry.chat_completion_id;
            assert!(cc.is_empty() || cc.starts_with("cc-"));
            assert!(entry.timestamp <= now);
            assert!(entry.timestamp >= now - Duration::days(7));
        }

        assert!(entries.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn test_oversized_window_stays_in_range() {
        let config = SourceConfig {
            window_days: u32::MAX,
            ..SourceConfig::default()
        };
        let source = MockDataSource::new(&config).with_seed(3).with_clock(base_time());
        let entries = source.generate(20);
        assert_eq!(entries.len(), 20);
        assert!(entries.iter().all(|e| e.timestamp <= base_time()));
    }

    #[tokio::test]
    async fn test_filtered_fetch_applies_fields_only() {
        let source = seeded();
        let filter = FilterCriteria::new()
            .with_model("gpt-4-turbo")
            .with_search("no entry contains this text");

        let all = source.fetch_entries(100).await.unwrap();
        let filtered = source.fetch_filtered(&filter, 100).await.unwrap();

        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|e| e.model == "gpt-4-turbo"));
        assert_eq!(filtered, query::apply(&all, &filter.source_filter()));
    }
}
