//! Filter criteria applied to log entry collections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A partial set of constraints over log entries
///
/// Every field is optional; an absent field places no restriction on the
/// corresponding entry attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Exact user id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,

    /// Exact tenant id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<u64>,

    /// Exact model identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Exact status label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Inclusive lower bound on the entry timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,

    /// Inclusive upper bound on the entry timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,

    /// Case-insensitive free-text search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

impl FilterCriteria {
    /// Create criteria with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain to a user
    pub fn with_user(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Constrain to a tenant
    pub fn with_tenant(mut self, tenant_id: u64) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    /// Constrain to a model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Constrain to a status label
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the inclusive lower timestamp bound
    pub fn with_date_from(mut self, from: DateTime<Utc>) -> Self {
        self.date_from = Some(from);
        self
    }

    /// Set the inclusive upper timestamp bound
    pub fn with_date_to(mut self, to: DateTime<Utc>) -> Self {
        self.date_to = Some(to);
        self
    }

    /// Set the free-text search query
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    /// Overlay the fields present in `update`, keeping the rest
    pub fn merge(&mut self, update: FilterCriteria) {
        let FilterCriteria {
            user_id,
            tenant_id,
            model,
            status,
            date_from,
            date_to,
            search_query,
        } = update;

        if user_id.is_some() {
            self.user_id = user_id;
        }
        if tenant_id.is_some() {
            self.tenant_id = tenant_id;
        }
        if model.is_some() {
            self.model = model;
        }
        if status.is_some() {
            self.status = status;
        }
        if date_from.is_some() {
            self.date_from = date_from;
        }
        if date_to.is_some() {
            self.date_to = date_to;
        }
        if search_query.is_some() {
            self.search_query = search_query;
        }
    }

    /// Reset every field to absent
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The non-blank search query, if any
    pub fn active_search(&self) -> Option<&str> {
        self.search_query
            .as_deref()
            .filter(|query| !query.trim().is_empty())
    }

    /// Criteria handed to a data source; search never leaves the client
    pub fn source_filter(&self) -> FilterCriteria {
        FilterCriteria {
            search_query: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_replaces_only_present_fields() {
        let mut filters = FilterCriteria::new().with_user(3).with_model("gpt-4-turbo");
        filters.merge(FilterCriteria::new().with_status("error"));

        assert_eq!(filters.user_id, Some(3));
        assert_eq!(filters.model.as_deref(), Some("gpt-4-turbo"));
        assert_eq!(filters.status.as_deref(), Some("error"));

        filters.merge(FilterCriteria::new().with_model("claude-3-haiku"));
        assert_eq!(filters.model.as_deref(), Some("claude-3-haiku"));
        assert_eq!(filters.user_id, Some(3));
    }

    #[test]
    fn test_clear_resets_everything() {
        let from = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
        let mut filters = FilterCriteria::new()
            .with_tenant(2)
            .with_date_from(from)
            .with_search("hello");
        assert!(!filters.is_empty());

        filters.clear();
        assert!(filters.is_empty());
        assert_eq!(filters, FilterCriteria::default());
    }

    #[test]
    fn test_active_search_ignores_blank_queries() {
        assert_eq!(FilterCriteria::new().active_search(), None);
        assert_eq!(FilterCriteria::new().with_search("   ").active_search(), None);
        assert_eq!(
            FilterCriteria::new().with_search(" world ").active_search(),
            Some(" world ")
        );
    }

    #[test]
    fn test_source_filter_drops_search() {
        let filters = FilterCriteria::new().with_user(1).with_search("retry");
        let source = filters.source_filter();
        assert_eq!(source.user_id, Some(1));
        assert_eq!(source.search_query, None);
    }

    #[test]
    fn test_camel_case_wire_names() {
        let filters: FilterCriteria =
            serde_json::from_str(r#"{"userId": 4, "searchQuery": "abc"}"#).unwrap();
        assert_eq!(filters.user_id, Some(4));
        assert_eq!(filters.search_query.as_deref(), Some("abc"));
    }
}
