//! Query execution against the backend

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::client::ApiClient;
use crate::history::QueryHistory;
use crate::models::{QueryOutcome, QueryRequest, QueryResponse};
use crate::session::SessionStore;

/// Submits query text to the backend and records every outcome into the
/// history log. At most one execution may be outstanding at a time; the
/// in-flight flag is the explicit mutual-exclusion state, which also keeps
/// history append order identical to issue order.
pub struct QueryRunner {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
    history: Arc<QueryHistory>,
    in_flight: AtomicBool,
}

impl QueryRunner {
    pub fn new(
        api: Arc<ApiClient>,
        session: Arc<SessionStore>,
        history: Arc<QueryHistory>,
    ) -> Self {
        Self {
            api,
            session,
            history,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Execute one query. Returns `None` without touching history or the
    /// network when the trimmed text is empty or another execution is still
    /// in flight. Query-level failure is data, not an error: the backend's
    /// `success: false` responses and synthesized transport failures both
    /// come back as a `Failure` outcome.
    pub async fn execute(&self, query_text: &str) -> Option<QueryOutcome> {
        let trimmed = query_text.trim();
        if trimmed.is_empty() {
            return None;
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Query already in flight, ignoring");
            return None;
        }

        let outcome = self.run(trimmed).await;
        self.history.record(trimmed, &outcome).await;
        self.in_flight.store(false, Ordering::SeqCst);

        Some(outcome)
    }

    /// Whether an execution is currently outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    async fn run(&self, query: &str) -> QueryOutcome {
        let token = self.session.current_credential().await;
        let body = QueryRequest {
            query: query.to_string(),
        };

        let response = match self
            .api
            .post_json("/api/execute", &body, token.as_deref())
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Execute request failed: {}", e);
                return QueryOutcome::network_error();
            }
        };

        // The body is decoded regardless of HTTP status: the backend encodes
        // query-level failures as 200 responses with success: false.
        match response.json::<QueryResponse>().await {
            Ok(raw) => raw.into(),
            Err(e) => {
                tracing::debug!("Execute response not decodable: {}", e);
                QueryOutcome::network_error()
            }
        }
    }
}
