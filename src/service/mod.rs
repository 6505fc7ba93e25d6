//! Remote agent-answering service
//!
//! This module defines the [`AgentService`] trait the chat controller talks
//! to, the wire types of the run-agents call, and the reqwest-backed
//! implementation in [`http`].

use crate::error::{DhraviqError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod http;

pub use http::HttpAgentService;

/// Body of the run-agents call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunAgentsRequest {
    /// Identity id of the asking user
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Trimmed question text
    pub question: String,
    /// Backend names of the selected agents
    pub agents: Vec<String>,
    /// Reminder address, only sent when reminders are enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Ask the gateway to schedule an email reminder
    pub send_email: bool,
}

/// One agent's answer, in the order the gateway listed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReply {
    /// Key of the `responses` map (a backend agent name)
    pub agent: String,
    pub content: String,
}

/// Interface to the gateway that answers as multiple agents
///
/// # Examples
///
/// ```no_run
/// use dhraviq::service::{AgentReply, AgentService, RunAgentsRequest};
/// use dhraviq::error::Result;
/// use async_trait::async_trait;
///
/// struct Echo;
///
/// #[async_trait]
/// impl AgentService for Echo {
///     async fn health_check(&self) -> Result<()> {
///         Ok(())
///     }
///
///     async fn run_agents(
///         &self,
///         request: &RunAgentsRequest,
///         _bearer_token: &str,
///     ) -> Result<Vec<AgentReply>> {
///         Ok(request
///             .agents
///             .iter()
///             .map(|a| AgentReply { agent: a.clone(), content: request.question.clone() })
///             .collect())
///     }
/// }
/// ```
#[async_trait]
pub trait AgentService: Send + Sync {
    /// Check that the gateway is reachable
    ///
    /// # Errors
    ///
    /// Returns error on a network failure or a non-success status
    async fn health_check(&self) -> Result<()>;

    /// Ask the selected agents one question
    ///
    /// `bearer_token` may be empty when the identity provider has no token;
    /// the call is still made.
    ///
    /// # Errors
    ///
    /// Returns error on a network failure, a non-success status, or a body
    /// without a `responses` object
    async fn run_agents(
        &self,
        request: &RunAgentsRequest,
        bearer_token: &str,
    ) -> Result<Vec<AgentReply>>;
}

/// Extract the per-agent answers from a run-agents response body
///
/// The body must be an object with a `responses` object. Keys keep the
/// order they had in the payload. String values are used as-is, anything
/// else is rendered as JSON text.
///
/// # Examples
///
/// ```
/// use dhraviq::service::parse_replies;
///
/// let body = serde_json::json!({
///     "status": "success",
///     "responses": { "SkillMap": "Learn SQL", "GoalClarifier": "Pick one goal" }
/// });
/// let replies = parse_replies(body).unwrap();
/// assert_eq!(replies[0].agent, "SkillMap");
/// assert_eq!(replies[1].agent, "GoalClarifier");
/// ```
pub fn parse_replies(body: Value) -> Result<Vec<AgentReply>> {
    let mut body = match body {
        Value::Object(map) => map,
        other => {
            return Err(DhraviqError::Payload(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))
            .into())
        }
    };

    if let Some(status) = body.get("status").and_then(Value::as_str) {
        tracing::debug!(status, "Run-agents status");
    }

    let responses = match body.remove("responses") {
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(DhraviqError::Payload(format!(
                "`responses` must be an object, got {}",
                json_kind(&other)
            ))
            .into())
        }
        None => {
            return Err(DhraviqError::Payload("missing `responses` field".to_string()).into())
        }
    };

    Ok(responses
        .into_iter()
        .map(|(agent, value)| {
            let content = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            AgentReply { agent, content }
        })
        .collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
