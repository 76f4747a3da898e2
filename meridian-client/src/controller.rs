//! Interactive search state machine.
//!
//! Owns query, pagination, and result state for one search surface and
//! decides when a request is due: keystrokes are debounced, page and filter
//! changes dispatch immediately with the current query, and every dispatched
//! request carries a sequence number so a slow stale response can never
//! clobber a newer one.
//!
//! The controller never performs IO. A UI event loop ticks it:
//!
//! ```ignore
//! controller.set_query(input, Instant::now());
//! if let Some(request) = controller.poll(Instant::now()) {
//!     let outcome = client.fetch(&request).await.map_err(|e| e.to_string());
//!     controller.apply(request.seq, outcome);
//! }
//! ```

use std::time::{Duration, Instant};

use crate::filters::FilterStrategy;
use crate::types::{Breakdown, SearchHit, SearchPage};

/// Quiet period after the last keystroke before a request fires.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Shortest trimmed query worth sending.
pub const MIN_QUERY_LEN: usize = 2;

pub const DEFAULT_LIMIT: u32 = 10;

/// A request the controller wants executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Dispatch counter; echo it back into [`SearchController::apply`].
    pub seq: u64,
    pub endpoint: &'static str,
    pub params: Vec<(&'static str, String)>,
}

#[derive(Debug, Clone, Copy)]
enum Pending {
    /// Fire once this deadline passes.
    Debounced(Instant),
    /// Fire on the next poll.
    Immediate,
}

pub struct SearchController<F: FilterStrategy> {
    filter: F,
    query: String,
    page: u32,
    limit: u32,
    results: Vec<SearchHit>,
    total: usize,
    total_pages: u32,
    breakdown: Option<Breakdown>,
    message: Option<String>,
    error: Option<String>,
    loading: bool,
    pending: Option<Pending>,
    /// Sequence of the most recently dispatched (or invalidated) request.
    seq: u64,
}

impl<F: FilterStrategy> SearchController<F> {
    pub fn new(filter: F) -> Self {
        Self::with_limit(filter, DEFAULT_LIMIT)
    }

    pub fn with_limit(filter: F, limit: u32) -> Self {
        Self {
            filter,
            query: String::new(),
            page: 1,
            limit,
            results: Vec::new(),
            total: 0,
            total_pages: 0,
            breakdown: None,
            message: None,
            error: None,
            loading: false,
            pending: None,
            seq: 0,
        }
    }

    /// Record a keystroke at `now`. Non-empty queries rearm the debounce
    /// timer; clearing the query resets result state without a network call
    /// and invalidates any in-flight request.
    pub fn set_query(&mut self, query: impl Into<String>, now: Instant) {
        self.query = query.into();
        self.page = 1;

        if self.query.trim().is_empty() {
            self.pending = None;
            self.loading = false;
            self.results.clear();
            self.total = 0;
            self.total_pages = 0;
            self.breakdown = None;
            self.message = None;
            self.error = None;
            self.seq += 1;
        } else {
            self.pending = Some(Pending::Debounced(now + DEBOUNCE));
        }
    }

    /// Swap the filter strategy; dispatches immediately with the current
    /// query, back on page 1.
    pub fn set_filter(&mut self, filter: F) {
        self.filter = filter;
        self.page = 1;
        self.pending = Some(Pending::Immediate);
    }

    /// Advance one page; no-op on the last page or with nothing loaded.
    pub fn next_page(&mut self) {
        if self.page < self.total_pages {
            self.page += 1;
            self.pending = Some(Pending::Immediate);
        }
    }

    /// Go back one page; no-op on page 1.
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
            self.pending = Some(Pending::Immediate);
        }
    }

    /// Clear everything back to the initial state.
    pub fn reset(&mut self) {
        self.query.clear();
        self.page = 1;
        self.results.clear();
        self.total = 0;
        self.total_pages = 0;
        self.breakdown = None;
        self.message = None;
        self.error = None;
        self.loading = false;
        self.pending = None;
        self.seq += 1;
    }

    fn trimmed_len(&self) -> usize {
        self.query.trim().chars().count()
    }

    /// Return the request due at `now`, if any.
    ///
    /// Marks the controller loading; the caller executes the request and
    /// feeds the outcome back through [`apply`](Self::apply). Queries below
    /// the minimum length never dispatch, whatever triggered them.
    pub fn poll(&mut self, now: Instant) -> Option<SearchRequest> {
        let due = match self.pending? {
            Pending::Immediate => true,
            Pending::Debounced(deadline) => now >= deadline,
        };
        if !due {
            return None;
        }

        self.pending = None;
        if self.trimmed_len() < MIN_QUERY_LEN {
            return None;
        }

        self.seq += 1;
        self.loading = true;

        let mut params: Vec<(&'static str, String)> =
            vec![("q", self.query.trim().to_string())];
        params.extend(self.filter.query_pairs());
        params.push(("page", self.page.to_string()));
        params.push(("limit", self.limit.to_string()));

        Some(SearchRequest {
            seq: self.seq,
            endpoint: self.filter.endpoint(),
            params,
        })
    }

    /// Feed a completed request's outcome back in.
    ///
    /// Outcomes whose sequence is not the latest dispatched one are
    /// discarded, so a slow superseded response cannot overwrite the state
    /// of a newer one. Failures populate `error` and clear the results.
    pub fn apply(&mut self, seq: u64, outcome: Result<SearchPage, String>) {
        if seq != self.seq {
            tracing::debug!("discarding stale search response (seq {seq}, latest {})", self.seq);
            return;
        }

        self.loading = false;
        match outcome {
            Ok(page) => {
                self.results = page.data;
                self.total = page.total;
                self.total_pages = page.total_pages;
                self.breakdown = page.breakdown;
                self.message = page.message;
                self.error = None;
            }
            Err(message) => {
                self.results.clear();
                self.total = 0;
                self.total_pages = 0;
                self.breakdown = None;
                self.message = None;
                self.error = Some(message);
            }
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn results(&self) -> &[SearchHit] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn breakdown(&self) -> Option<Breakdown> {
        self.breakdown
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }
}
