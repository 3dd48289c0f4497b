use std::time::Duration;

use veracity::constants::STATUS_HEADER;

pub struct TestClient {
    base_url: String,
    client: reqwest::Client,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("test client builds");
        Self { base_url, client }
    }

    pub async fn get_json(&self, path: &str) -> reqwest::Result<serde_json::Value> {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn health(&self) -> reqwest::Result<serde_json::Value> {
        self.get_json("/health").await
    }

    pub async fn root(&self) -> reqwest::Result<serde_json::Value> {
        self.get_json("/").await
    }

    /// Posts to `/analyze`; returns `(http status, status header, body)`.
    pub async fn analyze(
        &self,
        body: serde_json::Value,
    ) -> reqwest::Result<(u16, String, serde_json::Value)> {
        let response = self
            .client
            .post(format!("{}/analyze", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let header = response
            .headers()
            .get(STATUS_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.json().await?;

        Ok((status, header, body))
    }
}
