//! Sliding window over recent search requests.

use std::collections::VecDeque;

use crate::document::{Document, DocumentId, DocumentStatus};
use crate::error::Result;
use crate::search::SearchServer;

#[derive(Debug, Clone, Copy)]
struct RequestRecord {
    hits: usize,
}

/// Tracks how many of the most recent requests returned nothing.
///
/// The window size comes from the server's `request_window` setting. Requests
/// that fail to parse are not recorded.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    window: usize,
    requests: VecDeque<RequestRecord>,
    no_result_count: usize,
}

impl<'a> RequestQueue<'a> {
    /// Create a queue with the server's configured window.
    pub fn new(server: &'a SearchServer) -> Self {
        Self::with_window(server, server.config().request_window)
    }

    /// Create a queue with an explicit window size.
    pub fn with_window(server: &'a SearchServer, window: usize) -> Self {
        RequestQueue {
            server,
            window,
            requests: VecDeque::with_capacity(window),
            no_result_count: 0,
        }
    }

    /// Run and record [`SearchServer::find_top_documents`].
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let found = self.server.find_top_documents(raw_query)?;
        self.record(found.len());
        Ok(found)
    }

    /// Run and record [`SearchServer::find_top_documents_by_status`].
    pub fn add_find_request_by_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let found = self.server.find_top_documents_by_status(raw_query, status)?;
        self.record(found.len());
        Ok(found)
    }

    /// Run and record [`SearchServer::find_top_documents_with`].
    pub fn add_find_request_with<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let found = self.server.find_top_documents_with(raw_query, predicate)?;
        self.record(found.len());
        Ok(found)
    }

    /// Requests in the window that returned no documents.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_count
    }

    /// Requests currently in the window.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether no request has been recorded.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn record(&mut self, hits: usize) {
        if self.window == 0 {
            return;
        }
        if self.requests.len() == self.window {
            if let Some(evicted) = self.requests.pop_front() {
                if evicted.hits == 0 {
                    self.no_result_count -= 1;
                }
            }
        }
        if hits == 0 {
            self.no_result_count += 1;
        }
        self.requests.push_back(RequestRecord { hits });
    }
}
