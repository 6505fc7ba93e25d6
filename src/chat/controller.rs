//! Chat session controller
//!
//! Drives one question/answer turn at a time against the agent service:
//! validate the input, commit the user's message, send the request, then
//! append either every agent's answer or a single error notice.
//!
//! State transitions of a turn:
//!
//! ```text
//! Idle -> Validating -> Sending -> AwaitingResponse -> Idle
//!             |
//!             +-> Idle (validation failure)
//! ```

use crate::agents::{catalog, AgentSelection, ToggleOutcome};
use crate::chat::message::{ChatMessage, MessageIdGenerator, Transcript};
use crate::config::Config;
use crate::error::{DhraviqError, Result};
use crate::progress::{ProgressStore, ProgressUpdate};
use crate::service::{AgentReply, AgentService, RunAgentsRequest};
use crate::session::{Identity, IdentityProvider, SessionStore};

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use ulid::Ulid;

pub const BACKEND_UNAVAILABLE: &str = "Backend service unavailable. Please try again later.";
pub const CANNOT_CONNECT: &str = "Cannot connect to server. Please try again later.";
pub const EMPTY_MESSAGE: &str = "Please enter a message";
pub const NO_AGENTS_SELECTED: &str = "Please select at least one AI agent";

/// Phase of the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    Validating,
    Sending,
    AwaitingResponse,
}

/// Why a submission was refused before anything was sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    ConnectionUnavailable,
    EmptyInput,
    NoAgentsSelected,
}

impl Rejection {
    pub fn message(&self) -> &'static str {
        match self {
            Self::ConnectionUnavailable => CANNOT_CONNECT,
            Self::EmptyInput => EMPTY_MESSAGE,
            Self::NoAgentsSelected => NO_AGENTS_SELECTED,
        }
    }
}

/// How a call to [`ChatController::submit`] ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The service answered; the number of agent messages appended
    Answered(usize),
    /// The request failed; one error message was appended
    Failed(String),
    /// Validation refused the input; one error message was appended
    Rejected(Rejection),
    /// Nobody is signed in; nothing was appended
    SignInRequired,
    /// Another turn is still in flight; nothing was appended
    Busy,
    /// The turn was abandoned while awaiting the service
    Cancelled,
}

struct Inner {
    conversation_id: Ulid,
    state: TurnState,
    transcript: Transcript,
    ids: MessageIdGenerator,
    input: String,
    selection: AgentSelection,
    connection_error: bool,
    reminders_enabled: bool,
    progress_recorded: bool,
    progress_task: Option<JoinHandle<()>>,
    in_flight: Option<CancellationToken>,
    /// Bumped for every turn that gets past validation
    turn_seq: u64,
}

impl Inner {
    fn validate(&self) -> std::result::Result<(), Rejection> {
        if self.connection_error {
            return Err(Rejection::ConnectionUnavailable);
        }
        if self.input.trim().is_empty() {
            return Err(Rejection::EmptyInput);
        }
        if self.selection.is_empty() {
            return Err(Rejection::NoAgentsSelected);
        }
        Ok(())
    }

    /// Return to idle if `turn` is still the current one
    ///
    /// A conversation reset may already have moved on to a newer turn.
    fn finish_turn(&mut self, turn: u64) {
        if self.turn_seq == turn {
            self.state = TurnState::Idle;
            self.in_flight = None;
        }
    }

    fn push_system_error(&mut self, text: &str) {
        let id = self.ids.next_id("sys");
        self.transcript.push(ChatMessage::system(id, text, true));
    }
}

/// Resets the controller when a submitted turn is dropped mid-flight
struct PendingTurn<'a> {
    controller: &'a ChatController,
    turn: u64,
    cancel: CancellationToken,
    armed: bool,
}

impl Drop for PendingTurn<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.cancel.cancel();
        self.controller.lock().finish_turn(self.turn);
        tracing::info!("Turn dropped before completion");
    }
}

/// Owns one conversation and runs its turns
///
/// The controller is shared behind an `Arc`; its state sits behind a
/// mutex that is never held across an await point.
pub struct ChatController {
    session: Arc<SessionStore>,
    identity_provider: Arc<dyn IdentityProvider>,
    service: Arc<dyn AgentService>,
    progress: Arc<dyn ProgressStore>,
    turn_timeout: Duration,
    inner: Mutex<Inner>,
}

impl ChatController {
    /// Create a controller with an empty transcript
    ///
    /// The agents listed in `chat.default_agents` start out selected.
    pub fn new(
        config: &Config,
        session: Arc<SessionStore>,
        identity_provider: Arc<dyn IdentityProvider>,
        service: Arc<dyn AgentService>,
        progress: Arc<dyn ProgressStore>,
    ) -> Self {
        let mut selection = AgentSelection::with_capacity(config.chat.max_agents);
        for id in &config.chat.default_agents {
            selection.toggle(id);
        }

        Self {
            session,
            identity_provider,
            service,
            progress,
            turn_timeout: Duration::from_secs(config.service.timeout_seconds),
            inner: Mutex::new(Inner {
                conversation_id: Ulid::new(),
                state: TurnState::Idle,
                transcript: Transcript::new(),
                ids: MessageIdGenerator::new(),
                input: String::new(),
                selection,
                connection_error: false,
                reminders_enabled: config.chat.reminders_enabled,
                progress_recorded: false,
                progress_task: None,
                in_flight: None,
                turn_seq: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> TurnState {
        self.lock().state
    }

    /// Id of the current conversation; changes with every new conversation
    pub fn conversation_id(&self) -> Ulid {
        self.lock().conversation_id
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.lock().input = text.into();
    }

    pub fn input(&self) -> String {
        self.lock().input.clone()
    }

    /// Snapshot of the transcript
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock().transcript.messages().to_vec()
    }

    /// Messages appended after the first `skip`
    pub fn messages_since(&self, skip: usize) -> Vec<ChatMessage> {
        self.lock()
            .transcript
            .messages()
            .iter()
            .skip(skip)
            .cloned()
            .collect()
    }

    pub fn transcript_len(&self) -> usize {
        self.lock().transcript.len()
    }

    pub fn transcript_json(&self) -> Result<String> {
        self.lock().transcript.to_json()
    }

    pub fn toggle_agent(&self, id: &str) -> ToggleOutcome {
        let outcome = self.lock().selection.toggle(id);
        tracing::debug!(agent = id, ?outcome, "Agent toggled");
        outcome
    }

    pub fn clear_agents(&self) {
        self.lock().selection.clear();
    }

    pub fn selected_agents(&self) -> Vec<String> {
        self.lock().selection.selected().to_vec()
    }

    pub fn agent_capacity(&self) -> usize {
        self.lock().selection.capacity()
    }

    pub fn set_reminders(&self, enabled: bool) {
        self.lock().reminders_enabled = enabled;
    }

    pub fn reminders_enabled(&self) -> bool {
        self.lock().reminders_enabled
    }

    /// The store progress and preferences are written to
    pub fn progress_store(&self) -> Arc<dyn ProgressStore> {
        Arc::clone(&self.progress)
    }

    pub fn has_connection_error(&self) -> bool {
        self.lock().connection_error
    }

    /// Probe the service once
    ///
    /// On failure the connection is flagged for the rest of this
    /// controller's life and one error message is appended. Returns whether
    /// the service answered.
    pub async fn check_connection(&self) -> bool {
        match self.service.health_check().await {
            Ok(()) => {
                tracing::debug!("Agent service is reachable");
                true
            }
            Err(e) => {
                tracing::warn!("Agent service health check failed: {:#}", e);
                let mut inner = self.lock();
                if !inner.connection_error {
                    inner.connection_error = true;
                    inner.push_system_error(BACKEND_UNAVAILABLE);
                }
                false
            }
        }
    }

    /// Replace the input buffer with `text` and submit it
    pub async fn ask(&self, text: impl Into<String>) -> TurnOutcome {
        self.set_input(text);
        self.submit().await
    }

    /// Run one turn with the current input buffer
    ///
    /// Dropping the returned future before it resolves abandons the turn:
    /// the request is cancelled and the controller goes back to idle.
    pub async fn submit(&self) -> TurnOutcome {
        let (identity, _loading) = self.session.current_identity();

        let (request, cancel, turn) = {
            let mut inner = self.lock();
            if inner.state != TurnState::Idle {
                tracing::debug!(state = ?inner.state, "Submission ignored, turn in flight");
                return TurnOutcome::Busy;
            }
            inner.state = TurnState::Validating;

            let Some(identity) = identity.as_ref() else {
                inner.state = TurnState::Idle;
                return TurnOutcome::SignInRequired;
            };

            if let Err(rejection) = inner.validate() {
                inner.push_system_error(rejection.message());
                inner.state = TurnState::Idle;
                return TurnOutcome::Rejected(rejection);
            }

            inner.state = TurnState::Sending;
            inner.turn_seq += 1;
            let input = std::mem::take(&mut inner.input);
            let id = inner.ids.next_id("user");
            inner.transcript.push(ChatMessage::user(id, input.as_str()));

            let send_email = inner.reminders_enabled;
            let email = (send_email && !identity.email.is_empty()).then(|| identity.email.clone());
            let request = RunAgentsRequest {
                user_id: identity.id.clone(),
                question: input.trim().to_string(),
                agents: inner.selection.backend_names(),
                email,
                send_email,
            };

            let cancel = CancellationToken::new();
            inner.in_flight = Some(cancel.clone());
            (request, cancel, inner.turn_seq)
        };

        let mut pending = PendingTurn {
            controller: self,
            turn,
            cancel: cancel.clone(),
            armed: true,
        };

        tracing::info!(
            user = %request.user_id,
            agents = ?request.agents,
            "Submitting question"
        );

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DhraviqError::Cancelled.into()),
            sent = tokio::time::timeout(self.turn_timeout, self.send(&request, turn)) => match sent {
                Ok(result) => result,
                Err(_) => Err(DhraviqError::Timeout {
                    seconds: self.turn_timeout.as_secs(),
                }
                .into()),
            },
        };

        pending.armed = false;
        let mut inner = self.lock();
        inner.finish_turn(turn);

        if cancel.is_cancelled() {
            tracing::info!("Turn abandoned");
            return TurnOutcome::Cancelled;
        }

        match result {
            Ok(replies) => {
                let messages = replies
                    .into_iter()
                    .map(|AgentReply { agent, content }| {
                        let id = inner.ids.next_id(&agent);
                        ChatMessage::agent(id, catalog::resolve_response_key(&agent), content)
                    })
                    .collect();
                let appended = inner.transcript.extend_turn(messages);
                tracing::info!(replies = appended, "Turn answered");

                if !inner.progress_recorded {
                    inner.progress_recorded = true;
                    if let Some(identity) = identity {
                        inner.progress_task = Some(self.spawn_progress_update(identity));
                    }
                }
                TurnOutcome::Answered(appended)
            }
            Err(e) => {
                let reason = failure_reason(&e);
                tracing::warn!("Turn failed: {:#}", e);
                inner.push_system_error(&format!("Error: {}", reason));
                TurnOutcome::Failed(reason)
            }
        }
    }

    async fn send(&self, request: &RunAgentsRequest, turn: u64) -> Result<Vec<AgentReply>> {
        let bearer = match self.identity_provider.id_token().await {
            Ok(token) => token.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Could not obtain id token: {:#}", e);
                String::new()
            }
        };

        {
            let mut inner = self.lock();
            if inner.turn_seq == turn && inner.state == TurnState::Sending {
                inner.state = TurnState::AwaitingResponse;
            }
        }

        self.service.run_agents(request, &bearer).await
    }

    fn spawn_progress_update(&self, identity: Identity) -> JoinHandle<()> {
        let store = Arc::clone(&self.progress);
        tokio::spawn(async move {
            let user_id = identity.id.clone();
            let result = tokio::task::spawn_blocking(move || {
                store.ensure_profile(&identity)?;
                store.record_progress(&identity.id, ProgressUpdate::completed_session())
            })
            .await;

            match result {
                Ok(Ok(record)) => tracing::debug!(
                    user = %user_id,
                    total_sessions = record.total_sessions,
                    "Progress updated"
                ),
                Ok(Err(e)) => tracing::warn!(user = %user_id, "Progress update failed: {:#}", e),
                Err(e) => tracing::warn!(user = %user_id, "Progress update task failed: {}", e),
            }
        })
    }

    /// Wait for a pending progress update to finish
    pub async fn flush_progress(&self) {
        let task = self.lock().progress_task.take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                tracing::warn!("Progress update task failed: {}", e);
            }
        }
    }

    /// Cancel the in-flight turn, if any
    ///
    /// The turn resolves as [`TurnOutcome::Cancelled`]; its user message
    /// stays in the transcript and nothing else is appended.
    pub fn abandon(&self) -> bool {
        match self.lock().in_flight.take() {
            Some(cancel) => {
                cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Start over: abandon any in-flight turn and clear the transcript,
    /// input and agent selection
    ///
    /// The next answered turn records progress again.
    pub fn new_conversation(&self) {
        let mut inner = self.lock();
        if let Some(cancel) = inner.in_flight.take() {
            cancel.cancel();
        }
        inner.transcript.clear();
        inner.input.clear();
        inner.selection.clear();
        inner.state = TurnState::Idle;
        inner.progress_recorded = false;
        inner.conversation_id = Ulid::new();
        tracing::info!(conversation = %inner.conversation_id, "Started a new conversation");
    }
}

/// Reason shown after `Error: ` in the transcript
fn failure_reason(error: &anyhow::Error) -> String {
    match error.downcast_ref::<DhraviqError>() {
        Some(DhraviqError::Service(message)) => message.clone(),
        Some(DhraviqError::Payload(_)) => "Invalid response format from server".to_string(),
        Some(other) => other.to_string(),
        None => error.to_string(),
    }
}
