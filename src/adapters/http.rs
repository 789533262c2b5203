use crate::utils::error::{DigestError, Result};
use reqwest::Client;
use std::time::Duration;

/// 依序抓取搜尋頁；每次請求後固定等待，避免對網站造成負擔
pub struct HtmlFetcher {
    client: Client,
    delay: Duration,
}

impl HtmlFetcher {
    pub fn new(timeout: Duration, user_agent: &str, delay: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, delay })
    }

    pub async fn fetch(&self, url: &str) -> Result<String> {
        let result = self.fetch_page(url).await;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        result
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        tracing::debug!("Making request to: {}", url);
        let response = self.client.get(url).send().await?;
        tracing::debug!("Response status: {}", response.status());

        let status = response.status();
        if !status.is_success() {
            return Err(DigestError::HttpStatusError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
