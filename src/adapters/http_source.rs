use crate::domain::model::{ProfileDocument, ProfileSnapshot};
use crate::domain::ports::ProfileSource;
use crate::utils::error::{Result, SkillSwapError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Read-only snapshot fetched from a remote profile export.
///
/// The endpoint must answer `GET` with either a profile document or a bare
/// JSON array of users.
pub struct HttpProfileSource {
    endpoint: String,
    client: Client,
}

impl HttpProfileSource {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn snapshot(&self) -> Result<ProfileSnapshot> {
        tracing::debug!("Fetching profiles from: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        tracing::debug!("Profile source response status: {}", status);
        if !status.is_success() {
            return Err(SkillSwapError::SourceError {
                message: format!("{} responded with {}", self.endpoint, status),
            });
        }

        let body = response.bytes().await?;
        let document = ProfileDocument::from_json_slice(&body)?;
        tracing::info!(
            "📥 Fetched {} profiles from {}",
            document.users.len(),
            self.endpoint
        );
        Ok(document.snapshot())
    }
}
