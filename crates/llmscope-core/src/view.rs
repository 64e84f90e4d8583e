//! Logs view state
//!
//! Holds everything a presentation layer needs between refreshes: the
//! fetched collection, accumulated filters, the search query and the current
//! page. Fetches are tracked by generation so that only the most recently
//! issued one may replace the collection.

use tracing::{debug, info, warn};

use crate::aggregate::{self, DashboardSummary};
use crate::error::Result;
use crate::models::{FilterCriteria, LogEntry, PageState};
use crate::pager::{self, PageWindow};
use crate::query;
use crate::source::DataSource;

/// Handle for one outstanding fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    filter: FilterCriteria,
    count: usize,
}

impl FetchTicket {
    /// Generation this ticket was issued for
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Criteria to hand to the data source
    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    /// Entries to request
    pub fn count(&self) -> usize {
        self.count
    }
}

/// State behind the logs listing and dashboard cards
#[derive(Debug, Clone)]
pub struct LogsView {
    fetched: Vec<LogEntry>,
    visible: Vec<LogEntry>,
    filters: FilterCriteria,
    page: PageState,
    count: usize,
    generation: u64,
    loading: bool,
    error: Option<String>,
}

impl LogsView {
    /// Create an empty view requesting `count` entries per fetch
    pub fn new(page_size: usize, count: usize) -> Result<Self> {
        Ok(Self {
            fetched: Vec::new(),
            visible: Vec::new(),
            filters: FilterCriteria::default(),
            page: PageState::new(page_size)?,
            count,
            generation: 0,
            loading: false,
            error: None,
        })
    }

    /// Start a fetch; any earlier outstanding ticket becomes stale
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket {
            generation: self.generation,
            filter: self.filters.source_filter(),
            count: self.count,
        }
    }

    /// Deliver the outcome of a fetch
    ///
    /// Returns `Ok(false)` when the ticket was superseded and the result was
    /// discarded. A failed fetch is recorded and returned, leaving the
    /// previous collection in place.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<LogEntry>>,
    ) -> Result<bool> {
        if ticket.generation != self.generation {
            warn!(
                ticket = ticket.generation,
                current = self.generation,
                "Discarding stale fetch result"
            );
            return Ok(false);
        }

        self.loading = false;
        match result {
            Ok(entries) => {
                info!(entries = entries.len(), generation = ticket.generation, "Fetch completed");
                self.fetched = entries;
                self.error = None;
                self.refilter();
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, generation = ticket.generation, "Fetch failed");
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetch from `source` with the current filters and install the result
    pub async fn refresh(&mut self, source: &dyn DataSource) -> Result<bool> {
        let ticket = self.begin_fetch();
        let result = if ticket.filter.is_empty() {
            source.fetch_entries(ticket.count).await
        } else {
            source.fetch_filtered(&ticket.filter, ticket.count).await
        };
        self.complete_fetch(ticket, result)
    }

    /// Merge a partial filter update into the accumulated filters
    ///
    /// Narrowing takes effect immediately; call [`LogsView::refresh`] to pull
    /// entries the previous fetch excluded.
    pub fn apply_filters(&mut self, update: FilterCriteria) {
        self.filters.merge(update);
        debug!(filters = ?self.filters, "Filters updated");
        self.refilter();
    }

    /// Drop every filter, including the search query
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.refilter();
    }

    /// Replace the free-text search query; blank clears it
    pub fn search(&mut self, query: &str) {
        self.filters.search_query = if query.trim().is_empty() {
            None
        } else {
            Some(query.to_string())
        };
        self.refilter();
    }

    /// Select a page, clamped to the available range
    pub fn go_to_page(&mut self, page: usize) {
        self.page.go_to(page);
        self.page.clamp_to(self.total_pages());
    }

    /// Entries from the last successful fetch
    pub fn fetched(&self) -> &[LogEntry] {
        &self.fetched
    }

    /// Entries passing the filters and search
    pub fn visible(&self) -> &[LogEntry] {
        &self.visible
    }

    /// Entries on the current page
    pub fn current_page(&self) -> &[LogEntry] {
        pager::current_page(&self.visible, &self.page)
    }

    /// Page selection
    pub fn page_state(&self) -> PageState {
        self.page
    }

    /// Pages in the visible collection
    pub fn total_pages(&self) -> usize {
        pager::total_pages(self.visible.len(), self.page.page_size())
    }

    /// "Showing X to Y of Z" figures for the current page
    pub fn window(&self) -> PageWindow {
        pager::window(self.visible.len(), &self.page)
    }

    /// Metric cards over the visible collection
    pub fn summary(&self) -> DashboardSummary {
        aggregate::summarize(&self.visible)
    }

    /// Accumulated filters
    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    /// Whether a fetch is outstanding
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message from the last failed fetch, cleared by the next success
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn refilter(&mut self) {
        self.visible = query::apply(&self.fetched, &self.filters);
        self.page.reset();
    }
}
