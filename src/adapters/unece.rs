use crate::domain::ports::DirectorySource;
use crate::utils::error::{PortsError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://service.unece.org/trade/locode";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the per-country UN/LOCODE listing pages.
pub struct UneceDirectory {
    base_url: String,
    client: Client,
}

impl UneceDirectory {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent("PortsIndex/1.0")
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl DirectorySource for UneceDirectory {
    async fn fetch_country_page(&self, country_code: &str) -> Result<String> {
        let url = format!("{}/{}.htm", self.base_url, country_code.to_lowercase());
        tracing::debug!("Requesting directory page: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortsError::UpstreamStatus {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.text().await?)
    }
}
