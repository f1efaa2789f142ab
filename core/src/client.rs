//! HTTP client shared by the client-side components

use reqwest::{Client, Response, Url};
use serde::Serialize;
use tokio::time::Duration;

/// Typed access to the backend API: one pooled client, one base origin,
/// bearer credential attached per call.
pub struct ApiClient {
    http_client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, request_timeout: u64) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid backend URL {:?}: {}", base_url, e))?;

        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(20))
            .timeout(Duration::from_secs(request_timeout))
            .build()?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> anyhow::Result<Response> {
        let url = self.base_url.join(path)?;
        let mut request = self.http_client.get(url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
        token: Option<&str>,
    ) -> anyhow::Result<Response> {
        let url = self.base_url.join(path)?;
        let mut request = self.http_client.post(url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(ApiClient::new("not a url", 10).is_err());
        assert!(ApiClient::new("http://localhost:8000", 10).is_ok());
    }
}
