//! Summary statistics over log entry collections
//!
//! Every function borrows the collection read-only. Empty collections are a
//! valid input and produce zeros rather than errors.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{DateTime, Days, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::LogEntry;

/// Metric cards shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Number of requests
    pub total_requests: usize,
    /// Distinct user ids
    pub unique_users: usize,
    /// Distinct tenant ids
    pub unique_tenants: usize,
    /// Distinct model identifiers, sorted
    pub models: Vec<String>,
    /// Mean duration in milliseconds, rounded
    pub avg_duration_ms: u64,
    /// Sum of total tokens
    pub total_tokens: u64,
    /// Percentage of successful requests, rounded
    pub success_rate: u64,
}

/// Share of requests served by one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelShare {
    /// Model identifier
    pub model: String,
    /// Requests served by the model
    pub requests: usize,
    /// Percentage of all requests (0-100)
    pub percentage: f64,
}

/// Response time and token volume for one calendar day (UTC)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPerformance {
    /// Day of the bucket
    pub date: NaiveDate,
    /// Short weekday name (e.g., "Mon")
    pub label: String,
    /// Requests made on the day
    pub requests: usize,
    /// Mean duration in milliseconds, rounded; zero for idle days
    pub avg_duration_ms: u64,
    /// Sum of total tokens
    pub total_tokens: u64,
}

/// Number of requests
pub fn total_requests(entries: &[LogEntry]) -> usize {
    entries.len()
}

/// Number of distinct `user_id` values
pub fn unique_users(entries: &[LogEntry]) -> usize {
    entries.iter().map(|e| e.user_id).collect::<HashSet<_>>().len()
}

/// Number of distinct `tenant_id` values
pub fn unique_tenants(entries: &[LogEntry]) -> usize {
    entries.iter().map(|e| e.tenant_id).collect::<HashSet<_>>().len()
}

/// Distinct model identifiers in lexical order
pub fn unique_models(entries: &[LogEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.model.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Mean `duration_ms`, rounded to the nearest integer; zero when empty
pub fn average_duration(entries: &[LogEntry]) -> u64 {
    let sum: u128 = entries.iter().map(|e| u128::from(e.duration_ms)).sum();
    rounded_mean(sum, entries.len())
}

/// Sum of `token_usage.total_tokens`, saturating at `u64::MAX`
pub fn total_tokens(entries: &[LogEntry]) -> u64 {
    entries
        .iter()
        .fold(0u64, |sum, e| sum.saturating_add(e.token_usage.total_tokens))
}

/// Percentage of successful entries, rounded; zero when empty
pub fn success_rate(entries: &[LogEntry]) -> u64 {
    let successes = entries.iter().filter(|e| e.is_success()).count();
    rounded_percentage(successes, entries.len())
}

/// All metric cards in one pass
pub fn summarize(entries: &[LogEntry]) -> DashboardSummary {
    let mut users = HashSet::new();
    let mut tenants = HashSet::new();
    let mut models = BTreeSet::new();
    let mut duration_sum = 0u128;
    let mut token_sum = 0u64;
    let mut successes = 0usize;

    for entry in entries {
        users.insert(entry.user_id);
        tenants.insert(entry.tenant_id);
        models.insert(entry.model.as_str());
        duration_sum += u128::from(entry.duration_ms);
        token_sum = token_sum.saturating_add(entry.token_usage.total_tokens);
        if entry.is_success() {
            successes += 1;
        }
    }

    DashboardSummary {
        total_requests: entries.len(),
        unique_users: users.len(),
        unique_tenants: tenants.len(),
        models: models.into_iter().map(str::to_string).collect(),
        avg_duration_ms: rounded_mean(duration_sum, entries.len()),
        total_tokens: token_sum,
        success_rate: rounded_percentage(successes, entries.len()),
    }
}

/// Requests per model, most used first
pub fn model_distribution(entries: &[LogEntry]) -> Vec<ModelShare> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        *counts.entry(entry.model.as_str()).or_default() += 1;
    }

    let total = entries.len() as f64;
    let mut shares: Vec<ModelShare> = counts
        .into_iter()
        .map(|(model, requests)| ModelShare {
            model: model.to_string(),
            requests,
            percentage: requests as f64 / total * 100.0,
        })
        .collect();

    shares.sort_by(|a, b| b.requests.cmp(&a.requests).then_with(|| a.model.cmp(&b.model)));
    shares
}

/// One bucket per day for the `days` days ending on `end`, oldest first
pub fn daily_performance(
    entries: &[LogEntry],
    end: DateTime<Utc>,
    days: usize,
) -> Vec<DailyPerformance> {
    if days == 0 {
        return Vec::new();
    }

    let last = end.date_naive();
    let first = last
        .checked_sub_days(Days::new(days as u64 - 1))
        .unwrap_or(NaiveDate::MIN);
    let days = (last - first).num_days() as usize + 1;

    // (requests, duration sum, token sum) per day offset
    let mut buckets = vec![(0usize, 0u128, 0u64); days];
    for entry in entries {
        let day = entry.timestamp.date_naive();
        if day < first || day > last {
            continue;
        }
        let idx = (day - first).num_days() as usize;
        let bucket = &mut buckets[idx];
        bucket.0 += 1;
        bucket.1 += u128::from(entry.duration_ms);
        bucket.2 = bucket.2.saturating_add(entry.token_usage.total_tokens);
    }

    buckets
        .into_iter()
        .enumerate()
        .map(|(offset, (requests, duration_sum, tokens))| {
            let date = first + Duration::days(offset as i64);
            DailyPerformance {
                date,
                label: date.format("%a").to_string(),
                requests,
                avg_duration_ms: rounded_mean(duration_sum, requests),
                total_tokens: tokens,
            }
        })
        .collect()
}

/// The first `n` entries of the collection
pub fn recent(entries: &[LogEntry], n: usize) -> &[LogEntry] {
    &entries[..n.min(entries.len())]
}

// A mean of u64 values always fits back into u64
fn rounded_mean(sum: u128, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u64
}

fn rounded_percentage(part: usize, whole: usize) -> u64 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u64
}
