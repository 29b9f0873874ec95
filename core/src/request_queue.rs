use crate::index::SearchServer;
use crate::search::DocumentPredicate;
use crate::tokenizer::{Tokenizer, WhitespaceTokenizer};
use crate::{Document, DocumentStatus, Result, SearchError};
use std::collections::VecDeque;

/// Default window: one request per minute over a day.
pub const MINUTES_IN_DAY: usize = 1440;

/// What is kept about a past request. The results themselves are not retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOutcome {
    pub result_count: usize,
    pub is_empty: bool,
}

impl QueryOutcome {
    fn from_results(results: &[Document]) -> Self {
        Self { result_count: results.len(), is_empty: results.is_empty() }
    }
}

/// Forwards searches to a [`SearchServer`] and tracks how many of the last
/// `window` requests came back empty.
#[derive(Debug)]
pub struct RequestQueue<'a, T = WhitespaceTokenizer> {
    server: &'a SearchServer<T>,
    requests: VecDeque<QueryOutcome>,
    window: usize,
    current_time: usize,
    no_result_requests: usize,
}

impl<'a, T: Tokenizer> RequestQueue<'a, T> {
    pub fn new(server: &'a SearchServer<T>) -> Self {
        Self {
            server,
            requests: VecDeque::with_capacity(MINUTES_IN_DAY),
            window: MINUTES_IN_DAY,
            current_time: 0,
            no_result_requests: 0,
        }
    }

    pub fn with_window(server: &'a SearchServer<T>, window: usize) -> Result<Self> {
        if window == 0 {
            return Err(SearchError::InvalidArgument("request window must be at least 1".into()));
        }
        Ok(Self { requests: VecDeque::with_capacity(window), window, ..Self::new(server) })
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        self.add_find_request_with(raw_query, DocumentStatus::Actual)
    }

    pub fn add_find_request_by_status(&mut self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.add_find_request_with(raw_query, status)
    }

    /// Runs the search and records its outcome. A query that fails to parse is
    /// returned as an error and does not advance the clock.
    pub fn add_find_request_with<P: DocumentPredicate>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>> {
        let results = self.server.find_top_documents_with(raw_query, predicate)?;
        self.record(QueryOutcome::from_results(&results));
        Ok(results)
    }

    /// Requests in the current window that returned nothing.
    pub fn no_result_requests(&self) -> usize { self.no_result_requests }

    /// Outcomes currently held; never more than the window.
    pub fn len(&self) -> usize { self.requests.len() }

    pub fn is_empty(&self) -> bool { self.requests.is_empty() }

    pub fn window(&self) -> usize { self.window }

    pub fn outcomes(&self) -> impl Iterator<Item = &QueryOutcome> + '_ { self.requests.iter() }

    fn record(&mut self, outcome: QueryOutcome) {
        self.current_time += 1;
        if self.current_time > self.window {
            if let Some(evicted) = self.requests.pop_front() {
                if evicted.is_empty {
                    self.no_result_requests -= 1;
                }
                tracing::trace!(result_count = evicted.result_count, "evicted request outside window");
            }
            self.current_time -= 1;
        }
        if outcome.is_empty {
            self.no_result_requests += 1;
        }
        self.requests.push_back(outcome);
    }
}
