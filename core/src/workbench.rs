//! Client-side composition root
//!
//! Wires the session store, table catalog, query runner, and history log
//! around one shared API client. Owns the lifecycle: restore the persisted
//! credential on construction, eagerly warm the catalog on startup, and
//! tear every dependent cache down on logout.

use std::sync::Arc;

use crate::catalog::TableCatalog;
use crate::client::ApiClient;
use crate::config::{expand_path, Config};
use crate::history::QueryHistory;
use crate::query::QueryRunner;
use crate::session::SessionStore;

pub struct Workbench {
    pub session: Arc<SessionStore>,
    pub catalog: Arc<TableCatalog>,
    pub runner: Arc<QueryRunner>,
    pub history: Arc<QueryHistory>,
}

impl Workbench {
    pub fn new(
        base_url: &str,
        request_timeout: u64,
        data_dir: &std::path::Path,
    ) -> anyhow::Result<Self> {
        let api = Arc::new(ApiClient::new(base_url, request_timeout)?);
        let session = Arc::new(SessionStore::new(api.clone(), data_dir));
        let history = Arc::new(QueryHistory::new());
        let catalog = Arc::new(TableCatalog::new(api.clone(), session.clone()));
        let runner = Arc::new(QueryRunner::new(api, session.clone(), history.clone()));

        Ok(Self {
            session,
            catalog,
            runner,
            history,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let data_dir = expand_path(&config.session.directory);
        Self::new(
            &config.backend.base_url,
            config.timeouts.request_timeout,
            &data_dir,
        )
    }

    /// Warm the catalog when a persisted credential was restored. The
    /// credential is not validated here; the first authenticated call that
    /// gets rejected is the validation point.
    pub async fn startup(&self) {
        if self.session.is_authenticated().await {
            self.catalog.list_tables().await;
        }
    }

    /// Authenticate and, on success, refresh the table catalog.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let ok = self.session.login(username, password).await;
        if ok {
            self.catalog.list_tables().await;
        }
        ok
    }

    /// The sole teardown path: clears the credential and resets every
    /// dependent cache.
    pub async fn logout(&self) {
        self.session.logout().await;
        self.catalog.clear().await;
        self.history.clear().await;
    }
}
