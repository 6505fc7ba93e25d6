//! HTTP implementation of the agent service
//!
//! Talks to the gateway's `GET /health` and `POST /run_agents` endpoints
//! with reqwest.

use crate::config::ServiceConfig;
use crate::error::{DhraviqError, Result};
use crate::service::{parse_replies, AgentReply, AgentService, RunAgentsRequest};

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// reqwest-backed [`AgentService`]
///
/// No overall request timeout is set on the client; the chat controller
/// bounds each turn itself so a timeout is reported the same way for every
/// service implementation.
///
/// # Examples
///
/// ```
/// use dhraviq::config::ServiceConfig;
/// use dhraviq::service::HttpAgentService;
///
/// let service = HttpAgentService::new(&ServiceConfig::default()).unwrap();
/// assert_eq!(service.run_agents_url(), "http://localhost:8000/run_agents");
/// ```
pub struct HttpAgentService {
    client: Client,
    health_url: String,
    run_agents_url: String,
}

impl HttpAgentService {
    /// Create a new client for the configured gateway
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client cannot
    /// be built
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        url::Url::parse(&config.base_url).map_err(|e| {
            DhraviqError::Config(format!("Invalid service base URL {}: {}", config.base_url, e))
        })?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("dhraviq/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DhraviqError::Service(format!("Failed to create HTTP client: {}", e)))?;

        let base = config.base_url.trim_end_matches('/');
        let service = Self {
            client,
            health_url: format!("{}{}", base, config.health_path),
            run_agents_url: format!("{}{}", base, config.run_agents_path),
        };

        tracing::info!("Initialized agent service client: base={}", base);
        Ok(service)
    }

    pub fn health_url(&self) -> &str {
        &self.health_url
    }

    pub fn run_agents_url(&self) -> &str {
        &self.run_agents_url
    }
}

#[async_trait]
impl AgentService for HttpAgentService {
    async fn health_check(&self) -> Result<()> {
        tracing::debug!("Checking gateway health at {}", self.health_url);

        let response = self.client.get(&self.health_url).send().await.map_err(|e| {
            tracing::error!("Health check failed: {}", e);
            DhraviqError::Service(format!("Backend not available: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Health check returned {}", status);
            return Err(DhraviqError::Service(format!(
                "Backend not available: status {}",
                status.as_u16()
            ))
            .into());
        }

        Ok(())
    }

    async fn run_agents(
        &self,
        request: &RunAgentsRequest,
        bearer_token: &str,
    ) -> Result<Vec<AgentReply>> {
        tracing::debug!(
            "Sending run-agents request: user={}, agents={:?}, send_email={}",
            request.user_id,
            request.agents,
            request.send_email
        );

        let response = self
            .client
            .post(&self.run_agents_url)
            .bearer_auth(bearer_token)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Run-agents request failed: {}", e);
                DhraviqError::Service(format!("Failed to reach agent service: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Agent service returned error {}: {}", status, error_text);
            return Err(DhraviqError::Service(format!(
                "HTTP error! status: {}",
                status.as_u16()
            ))
            .into());
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse run-agents response: {}", e);
            DhraviqError::Payload(format!("body is not JSON: {}", e))
        })?;

        let replies = parse_replies(body)?;
        tracing::debug!("Received {} agent replies", replies.len());
        Ok(replies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_joined_without_double_slash() {
        let config = ServiceConfig {
            base_url: "https://api.dhraviq.com/".to_string(),
            ..Default::default()
        };
        let service = HttpAgentService::new(&config).unwrap();
        assert_eq!(service.health_url(), "https://api.dhraviq.com/health");
        assert_eq!(service.run_agents_url(), "https://api.dhraviq.com/run_agents");
    }

    #[test]
    fn test_base_path_is_kept() {
        let config = ServiceConfig {
            base_url: "https://example.com/gateway".to_string(),
            ..Default::default()
        };
        let service = HttpAgentService::new(&config).unwrap();
        assert_eq!(service.run_agents_url(), "https://example.com/gateway/run_agents");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ServiceConfig {
            base_url: "::nope::".to_string(),
            ..Default::default()
        };
        assert!(HttpAgentService::new(&config).is_err());
    }
}
