//! Upstream client for the backend service

use reqwest::{redirect, Client, Url};
use tokio::time::Duration;

use crate::config::default_backend_url;

use super::error::GatewayError;

/// Shared HTTP client plus the backend origin every logical path resolves
/// against. There is exactly one origin and no retry: a failed call is the
/// caller's failure to surface.
#[derive(Clone)]
pub struct UpstreamClient {
    http_client: Client,
    base_url: Url,
}

impl UpstreamClient {
    /// Build a client for the given origin, falling back to the
    /// environment-supplied default when none is configured.
    pub fn new(base_url: Option<String>) -> anyhow::Result<Self> {
        let raw = base_url
            .filter(|s| !s.is_empty())
            .unwrap_or_else(default_backend_url);
        let base_url = Url::parse(&raw)
            .map_err(|e| anyhow::anyhow!("Invalid backend URL {:?}: {}", raw, e))?;

        // No total-call timeout: a long-running query may legitimately hold
        // the connection open. Only connection establishment is bounded.
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(20))
            .pool_max_idle_per_host(16)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Resolve a logical path against the backend origin.
    pub fn resolve(&self, logical_path: &str) -> Result<Url, GatewayError> {
        if !logical_path.starts_with('/') {
            return Err(GatewayError::InvalidPath {
                path: logical_path.to_string(),
                reason: "must be origin-relative".to_string(),
            });
        }

        self.base_url
            .join(logical_path)
            .map_err(|e| GatewayError::InvalidPath {
                path: logical_path.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn client(&self) -> &Client {
        &self.http_client
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_logical_paths_against_the_origin() {
        let upstream = UpstreamClient::new(Some("http://localhost:8000".to_string())).unwrap();
        let url = upstream.resolve("/api/tables").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/tables");
    }

    #[test]
    fn relative_paths_are_rejected() {
        let upstream = UpstreamClient::new(Some("http://localhost:8000".to_string())).unwrap();
        assert!(matches!(
            upstream.resolve("api/tables"),
            Err(GatewayError::InvalidPath { .. })
        ));
    }

    #[test]
    fn invalid_origin_is_a_construction_error() {
        assert!(UpstreamClient::new(Some("not a url".to_string())).is_err());
    }

    #[test]
    fn encoded_segments_survive_resolution() {
        let upstream = UpstreamClient::new(Some("http://localhost:8000".to_string())).unwrap();
        let url = upstream.resolve("/api/tables/orders%2F2024").unwrap();
        assert_eq!(url.path(), "/api/tables/orders%2F2024");
    }
}
