//! Test utilities for Dhraviq
//!
//! In-memory fakes of the external collaborators (identity provider,
//! agent service) plus configuration and assertion helpers shared by the
//! unit tests.

use crate::config::Config;
use crate::error::{DhraviqError, Result};
use crate::service::{AgentReply, AgentService, RunAgentsRequest};
use crate::session::{Identity, IdentityProvider, Profile, SessionStore};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Identity provider returning a fixed profile and token
pub struct StaticIdentityProvider {
    pub profile: Profile,
    pub token: Option<String>,
}

impl StaticIdentityProvider {
    pub fn with_token(token: &str) -> Self {
        Self {
            profile: Profile {
                display_name: Some("Asha".to_string()),
                email: Some("asha@example.com".to_string()),
            },
            token: Some(token.to_string()),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn profile(&self, _principal_id: &str) -> Result<Profile> {
        Ok(self.profile.clone())
    }

    async fn id_token(&self) -> Result<Option<String>> {
        Ok(self.token.clone())
    }
}

/// One scripted answer of [`ScriptedAgentService`]
pub enum Scripted {
    Replies(Vec<(&'static str, &'static str)>),
    Fail(DhraviqError),
    /// Wait before answering with the given replies
    Slow(Duration, Vec<(&'static str, &'static str)>),
}

/// Agent service that answers from a queue and records every request
#[derive(Default)]
pub struct ScriptedAgentService {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<(RunAgentsRequest, String)>>,
    healthy: Mutex<bool>,
}

impl ScriptedAgentService {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
            healthy: Mutex::new(true),
        }
    }

    pub fn set_healthy(&self, healthy: bool) {
        *self.healthy.lock().unwrap() = healthy;
    }

    /// Requests received so far with their bearer tokens
    pub fn requests(&self) -> Vec<(RunAgentsRequest, String)> {
        self.requests.lock().unwrap().clone()
    }
}

fn to_replies(pairs: Vec<(&'static str, &'static str)>) -> Vec<AgentReply> {
    pairs
        .into_iter()
        .map(|(agent, content)| AgentReply {
            agent: agent.to_string(),
            content: content.to_string(),
        })
        .collect()
}

#[async_trait]
impl AgentService for ScriptedAgentService {
    async fn health_check(&self) -> Result<()> {
        if *self.healthy.lock().unwrap() {
            Ok(())
        } else {
            Err(DhraviqError::Service("Backend not available: connection refused".into()).into())
        }
    }

    async fn run_agents(
        &self,
        request: &RunAgentsRequest,
        bearer_token: &str,
    ) -> Result<Vec<AgentReply>> {
        self.requests
            .lock()
            .unwrap()
            .push((request.clone(), bearer_token.to_string()));
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Replies(pairs)) => Ok(to_replies(pairs)),
            Some(Scripted::Fail(error)) => Err(error.into()),
            Some(Scripted::Slow(delay, pairs)) => {
                tokio::time::sleep(delay).await;
                Ok(to_replies(pairs))
            }
            None => Err(DhraviqError::Service("script exhausted".into()).into()),
        }
    }
}

/// Session store already resolved to a signed-in test identity
pub fn signed_in_session() -> Arc<SessionStore> {
    let store = SessionStore::new();
    store.publish(Some(Identity::new(
        "user-1",
        Some("Asha".to_string()),
        Some("asha@example.com".to_string()),
    )));
    Arc::new(store)
}

/// Create a test configuration with default values
pub fn test_config() -> Config {
    Config::default()
}

/// Create a test configuration YAML string
pub fn test_config_yaml() -> String {
    r#"
service:
  base_url: https://api.dhraviq.com
  timeout_seconds: 30
chat:
  max_agents: 2
  reminders_enabled: true
  default_agents:
    - goal-clarifier
progress:
  db_path: /tmp/dhraviq-test/progress.db
logging:
  json: false
"#
    .to_string()
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_error_contains_success() {
        let result: Result<()> = Err(DhraviqError::Config("test error message".to_string()).into());
        assert_error_contains(result, "test error");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        assert_error_contains(Ok(()), "error");
    }

    #[test]
    fn test_test_config_yaml() {
        let config: Config = serde_yaml::from_str(&test_config_yaml()).unwrap();
        assert!(config.chat.reminders_enabled);
        assert!(config.validate().is_ok());
        assert!(test_config().validate().is_ok());
    }

    #[tokio::test]
    async fn test_scripted_service_records_requests() {
        let service = ScriptedAgentService::new(vec![Scripted::Replies(vec![("SkillMap", "hi")])]);
        let request = RunAgentsRequest {
            user_id: "u".into(),
            question: "q".into(),
            agents: vec!["SkillMap".into()],
            email: None,
            send_email: false,
        };
        let replies = service.run_agents(&request, "tok").await.unwrap();
        assert_eq!(replies.len(), 1);
        assert_eq!(service.requests()[0].1, "tok");
        assert!(service.run_agents(&request, "tok").await.is_err());
    }
}
