//! Latest-query-wins delivery for interactive callers
//!
//! Overlapping searches (one per keystroke) may complete out of order. Each
//! search gets a monotonically increasing ticket; completions travel back over
//! a channel and anything that is not the most recently issued ticket is dropped.
//! The pipeline itself knows nothing about this.

use crate::catalog::CandidateFetcher;
use crate::error::SearchError;
use crate::search::{SearchEngine, SearchOutcome, SearchRequest};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Sequence number attached to one issued query
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryTicket(u64);

impl QueryTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Issues tickets and answers "is this still the latest?"
#[derive(Debug, Default)]
pub struct QuerySequencer {
    latest: AtomicU64,
}

impl QuerySequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket; it supersedes every earlier one
    pub fn issue(&self) -> QueryTicket {
        QueryTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn latest(&self) -> Option<QueryTicket> {
        match self.latest.load(Ordering::SeqCst) {
            0 => None,
            n => Some(QueryTicket(n)),
        }
    }

    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Keep `value` only if `ticket` is still the latest
    pub fn settle<T>(&self, ticket: QueryTicket, value: T) -> Option<T> {
        self.is_current(ticket).then_some(value)
    }
}

/// A delivered search: its ticket and outcome
pub type Completion = (QueryTicket, Result<SearchOutcome, SearchError>);

/// Runs searches concurrently and delivers only the latest one's result
pub struct SearchSession<F> {
    engine: Arc<SearchEngine>,
    fetcher: Arc<F>,
    sequencer: Arc<QuerySequencer>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl<F: CandidateFetcher + 'static> SearchSession<F> {
    pub fn new(engine: SearchEngine, fetcher: Arc<F>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            engine: Arc::new(engine),
            fetcher,
            sequencer: Arc::new(QuerySequencer::new()),
            tx,
            rx,
        }
    }

    /// Start a search in the background; it supersedes any search still in flight
    pub fn submit(&self, request: SearchRequest) -> QueryTicket {
        let ticket = self.sequencer.issue();
        let engine = Arc::clone(&self.engine);
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            // Run the search in its own task so a panic still yields a completion
            let search = tokio::spawn(async move { engine.search(&*fetcher, &request).await });
            let result = match search.await {
                Ok(result) => result,
                Err(e) => {
                    warn!("Search for query #{} did not finish: {}", ticket.sequence(), e);
                    Err(SearchError::Aborted(e.to_string()))
                }
            };
            // Receiver lives as long as the session
            let _ = tx.send((ticket, result));
        });

        ticket
    }

    /// Wait for the completion of the most recently submitted search.
    ///
    /// Completions of superseded searches are discarded. A search that panics
    /// completes with `SearchError::Aborted`. Waits indefinitely if nothing has
    /// been submitted.
    pub async fn next(&mut self) -> Option<Completion> {
        while let Some((ticket, result)) = self.rx.recv().await {
            match self.sequencer.settle(ticket, result) {
                Some(result) => return Some((ticket, result)),
                None => debug!("Dropping stale result for query #{}", ticket.sequence()),
            }
        }
        None
    }

    pub fn sequencer(&self) -> &QuerySequencer {
        &self.sequencer
    }
}
