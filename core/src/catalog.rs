//! Table catalog cache

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::client::ApiClient;
use crate::gateway::forward::encode_path_segment;
use crate::models::{TableDetail, TablesResponse};
use crate::session::SessionStore;

/// Cached view of the backend's table catalog: the list of table names plus
/// at most one selected table's schema and sample rows. Fetch failures keep
/// the previous cache; an empty catalog is a valid degraded state, never an
/// error surfaced to the caller.
pub struct TableCatalog {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
    tables: RwLock<Vec<String>>,
    selected: RwLock<Option<TableDetail>>,
}

impl TableCatalog {
    pub fn new(api: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            tables: RwLock::new(Vec::new()),
            selected: RwLock::new(None),
        }
    }

    /// Refresh the table list from the backend and return the cache.
    pub async fn list_tables(&self) -> Vec<String> {
        let token = self.session.current_credential().await;

        match self.api.get("/api/tables", token.as_deref()).await {
            Ok(response) if response.status().is_success() => {
                match response.json::<TablesResponse>().await {
                    Ok(parsed) => {
                        *self.tables.write().await = parsed.tables.clone();
                        parsed.tables
                    }
                    Err(e) => {
                        tracing::debug!("Table list not decodable: {}", e);
                        self.tables.read().await.clone()
                    }
                }
            }
            Ok(response) => {
                tracing::debug!("Table list request returned {}", response.status());
                self.tables.read().await.clone()
            }
            Err(e) => {
                tracing::debug!("Table list request failed: {}", e);
                self.tables.read().await.clone()
            }
        }
    }

    /// Fetch one table's schema and sample rows, replacing the cached
    /// selection on success. On failure the previous selection stands and
    /// `None` is returned.
    pub async fn select_table(&self, name: &str) -> Option<TableDetail> {
        let token = self.session.current_credential().await;
        let path = format!("/api/tables/{}", encode_path_segment(name));

        let response = match self.api.get(&path, token.as_deref()).await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::debug!(
                    "Table detail request for {:?} returned {}",
                    name,
                    response.status()
                );
                return None;
            }
            Err(e) => {
                tracing::debug!("Table detail request for {:?} failed: {}", name, e);
                return None;
            }
        };

        match response.json::<TableDetail>().await {
            Ok(detail) => {
                *self.selected.write().await = Some(detail.clone());
                Some(detail)
            }
            Err(e) => {
                tracing::debug!("Table detail for {:?} not decodable: {}", name, e);
                None
            }
        }
    }

    /// Cached table names, without refetching.
    pub async fn tables(&self) -> Vec<String> {
        self.tables.read().await.clone()
    }

    /// Currently selected table detail, if any.
    pub async fn selected(&self) -> Option<TableDetail> {
        self.selected.read().await.clone()
    }

    /// Drop both caches. Called on logout.
    pub async fn clear(&self) {
        self.tables.write().await.clear();
        *self.selected.write().await = None;
    }
}
