//! Bounded query history, newest first

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{SecondsFormat, Utc};
use tokio::sync::RwLock;

use crate::models::{HistoryEntry, QueryOutcome};

/// Maximum number of remembered executions. Older entries are evicted in
/// insertion order, so identical timestamps cannot break the bound.
pub const HISTORY_LIMIT: usize = 50;

pub struct QueryHistory {
    /// Front of the deque is the most recent execution.
    entries: RwLock<VecDeque<HistoryEntry>>,
    next_id: AtomicU64,
}

impl QueryHistory {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(HISTORY_LIMIT)),
            next_id: AtomicU64::new(1),
        }
    }

    /// Record one executed query. Entries are built here so ids stay
    /// monotonic and ownership never leaves the log.
    pub async fn record(&self, query: &str, outcome: &QueryOutcome) {
        let entry = HistoryEntry {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            query: query.to_string(),
            success: outcome.is_success(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            execution_time: outcome.execution_time(),
            error: outcome.error_message().map(String::from),
        };

        let mut entries = self.entries.write().await;
        entries.push_front(entry);
        entries.truncate(HISTORY_LIMIT);
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Snapshot of the log, newest first.
    pub async fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.read().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for QueryHistory {
    fn default() -> Self {
        Self::new()
    }
}
