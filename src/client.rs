//! Sitemorse service HTTP client.

use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::{PanelError, Result};
use crate::report::{AnalysisReport, ReportEnvelope};

/// Default request timeout. A hung service must not pin the panel on the
/// loading modal; expiry surfaces as the ordinary network failure.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Sitemorse client configuration.
#[derive(Debug, Clone)]
pub struct SitemorseClientConfig {
    /// Base URL of the audit service.
    pub service_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl SitemorseClientConfig {
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client for the audit service.
pub struct SitemorseClient {
    client: Client,
    config: SitemorseClientConfig,
}

impl SitemorseClient {
    /// Create a new client.
    pub fn new(config: SitemorseClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| self::build_error(&config.service_url, e))?;

        Ok(Self { client, config })
    }

    /// The service URL this client talks to.
    pub fn service_url(&self) -> &str {
        &self.config.service_url
    }

    /// Fetch the analysis report for one resolved URL.
    ///
    /// Query values are percent-encoded by reqwest. Connection failures,
    /// timeouts, non-success statuses and unparseable bodies all collapse
    /// into the one network error the panel knows how to show.
    pub fn fetch_report(&self, target_url: &str, token: &str) -> Result<AnalysisReport> {
        let endpoint = self.endpoint();
        debug!(service = %endpoint, target = %target_url, "requesting analysis report");

        let response = self
            .client
            .get(&endpoint)
            .query(&[("url", target_url), ("token", token)])
            .send()
            .map_err(|e| self.network_error(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.network_error(format!("service returned status {}", status.as_u16())));
        }

        let envelope: ReportEnvelope = response
            .json()
            .map_err(|e| self.network_error(format!("unreadable response body: {e}")))?;

        Ok(envelope.into())
    }

    fn endpoint(&self) -> String {
        format!("{}/", self.config.service_url)
    }

    fn network_error(&self, message: String) -> PanelError {
        PanelError::network(&self.config.service_url, message)
    }
}

fn build_error(service_url: &str, err: reqwest::Error) -> PanelError {
    PanelError::network(service_url, format!("failed to create HTTP client: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_timeout() {
        let config = SitemorseClientConfig::new("https://audit.example");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.service_url, "https://audit.example");
    }

    #[test]
    fn test_endpoint_appends_root_path() {
        let client =
            SitemorseClient::new(SitemorseClientConfig::new("https://audit.example/api")).unwrap();
        assert_eq!(client.endpoint(), "https://audit.example/api/");
    }
}
