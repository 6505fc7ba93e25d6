//! Command handlers for Dhraviq
//!
//! This module wires the library pieces together for the terminal client:
//! it resolves the session from stored credentials, applies the route guard
//! to protected commands and runs the chat loop.

use crate::agents::{catalog, ToggleOutcome};
use crate::chat::{Author, ChatController, ChatMessage, TurnOutcome};
use crate::config::Config;
use crate::error::{DhraviqError, Result};
use crate::guard::{GuardDecision, Route, RouteGuard};
use crate::progress::{MemoryProgressStore, ProgressStore, SqliteProgressStore};
use crate::service::HttpAgentService;
use crate::session::{AuthNotification, IdentityProvider, KeyringIdentityProvider, SessionStore};

use colored::Colorize;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub mod agents;
pub mod progress;
pub mod special_commands;

/// A running session store fed by the identity provider
///
/// Started once per process and shut down explicitly.
pub struct SessionHandle {
    pub store: Arc<SessionStore>,
    pub provider: Arc<dyn IdentityProvider>,
    notifications: mpsc::Sender<AuthNotification>,
    shutdown: CancellationToken,
    listener: JoinHandle<()>,
}

impl SessionHandle {
    /// Start the listener and resolve the initial sign-in state
    ///
    /// # Errors
    ///
    /// Returns error if the listener stops before the first state is published
    pub async fn start(
        provider: Arc<dyn IdentityProvider>,
        initial: AuthNotification,
    ) -> Result<Self> {
        let store = Arc::new(SessionStore::new());
        let (tx, rx) = mpsc::channel(8);
        let shutdown = CancellationToken::new();
        let listener = store.spawn_listener(Arc::clone(&provider), rx, shutdown.clone());

        let handle = Self {
            store,
            provider,
            notifications: tx,
            shutdown,
            listener,
        };
        handle.notify(initial).await?;
        Ok(handle)
    }

    /// Start from the credentials stored in the OS keyring
    ///
    /// # Errors
    ///
    /// Returns error if the keyring cannot be read
    pub async fn from_keyring() -> Result<Self> {
        let provider = KeyringIdentityProvider::load()?;
        let initial = provider.initial_notification();
        Self::start(Arc::new(provider), initial).await
    }

    /// Deliver a notification and wait until the store has handled it
    ///
    /// # Errors
    ///
    /// Returns error if the listener is no longer running
    pub async fn notify(&self, notification: AuthNotification) -> Result<()> {
        let mut changes = self.store.subscribe();
        self.notifications
            .send(notification)
            .await
            .map_err(|_| DhraviqError::Identity("Session listener stopped".to_string()))?;
        changes
            .changed()
            .await
            .map_err(|_| DhraviqError::Identity("Session store closed".to_string()))?;
        Ok(())
    }

    /// Stop the listener and wait for it to finish
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        if let Err(e) = self.listener.await {
            tracing::warn!("Session listener ended abnormally: {}", e);
        }
    }
}

/// Apply the route guard before running a protected command
///
/// # Errors
///
/// Returns an identity error naming the sign-in command when the visitor
/// is redirected
pub fn require_route(guard: &mut RouteGuard, route: &Route, store: &SessionStore) -> Result<()> {
    match guard.check(route, &store.state()) {
        GuardDecision::Allow => Ok(()),
        GuardDecision::Loading => Err(DhraviqError::Identity(
            "Session is still loading, try again".to_string(),
        )
        .into()),
        GuardDecision::Redirect { to, return_to } => {
            tracing::info!(from = %return_to, to = %to, "Sign-in required");
            Err(DhraviqError::Identity(format!(
                "Sign in to open {}: run `dhraviq login --uid <id> --email <email>`",
                return_to
            ))
            .into())
        }
    }
}

/// Open the configured progress store
///
/// Falls back to an in-memory store when the database cannot be opened;
/// progress is best effort.
pub fn open_progress_store(config: &Config) -> Arc<dyn ProgressStore> {
    let opened = match &config.progress.db_path {
        Some(path) => SqliteProgressStore::new_with_path(path),
        None => SqliteProgressStore::new(),
    };
    match opened {
        Ok(store) => {
            tracing::debug!("Progress store at {}", store.db_path().display());
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!("Progress store unavailable, keeping progress in memory: {:#}", e);
            Arc::new(MemoryProgressStore::new())
        }
    }
}

/// Check an agent id against the catalog
///
/// # Errors
///
/// Returns a config error with a suggestion when the id is unknown
pub fn validate_agent_id(id: &str) -> Result<()> {
    if catalog::find(id).is_some() {
        return Ok(());
    }
    let hint = match catalog::suggest(id) {
        Some(suggestion) => format!(" Did you mean '{}'?", suggestion),
        None => " Run `dhraviq agents` to list them.".to_string(),
    };
    Err(DhraviqError::Config(format!("Unknown agent '{}'.{}", id, hint)).into())
}

/// Render one transcript message for the terminal
pub fn render_message(message: &ChatMessage) -> String {
    let label = match (&message.author, &message.agent) {
        (Author::Agent, Some(persona)) => persona.color.paint(&message.label()).bold().to_string(),
        (Author::System, _) if message.is_error => message.label().red().bold().to_string(),
        (Author::System, _) => message.label().cyan().to_string(),
        _ => message.label().bold().to_string(),
    };
    let body = if message.author == Author::System && message.is_error {
        message.content.red().to_string()
    } else {
        message.content.clone()
    };
    format!("{}\n{}\n", label, body)
}

fn print_messages(messages: &[ChatMessage]) {
    for message in messages {
        println!("{}", render_message(message));
    }
}

/// Write the transcript as pretty JSON
///
/// # Errors
///
/// Returns error if serialization or the write fails
pub fn save_transcript(controller: &ChatController, path: &Path) -> Result<()> {
    let json = controller.transcript_json()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    tracing::info!("Transcript saved to {}", path.display());
    Ok(())
}

fn build_controller(config: &Config, session: &SessionHandle) -> Result<Arc<ChatController>> {
    let service = HttpAgentService::new(&config.service)?;
    Ok(Arc::new(ChatController::new(
        config,
        Arc::clone(&session.store),
        Arc::clone(&session.provider),
        Arc::new(service),
        open_progress_store(config),
    )))
}

fn select_agents(controller: &ChatController, agents: &[String]) -> Result<()> {
    if agents.is_empty() {
        return Ok(());
    }
    controller.clear_agents();
    for id in agents {
        validate_agent_id(id)?;
        if controller.toggle_agent(id) == ToggleOutcome::IgnoredAtCapacity {
            return Err(DhraviqError::Config(format!(
                "At most {} agents can be selected",
                controller.agent_capacity()
            ))
            .into());
        }
    }
    Ok(())
}

/// Switch email reminders and record the preference for the signed-in user
///
/// The preference is written to the controller's own progress store.
///
/// # Errors
///
/// Returns error if the store rejects the write
pub async fn set_reminders(
    controller: &ChatController,
    session: &SessionStore,
    enabled: bool,
) -> Result<()> {
    controller.set_reminders(enabled);
    let Some(identity) = session.current_identity().0 else {
        return Ok(());
    };

    let store = controller.progress_store();
    tokio::task::spawn_blocking(move || store.set_reminder_enabled(&identity.id, enabled))
        .await
        .map_err(|e| DhraviqError::Storage(format!("Reminder preference task failed: {}", e)))?
}

pub mod chat {
    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start the interactive chat loop
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration
    /// * `agents` - Agent ids to select at start (replaces `chat.default_agents`)
    /// * `reminders` - Enable email reminders regardless of configuration
    pub async fn run_chat(config: Config, agents: Vec<String>, reminders: bool) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let session = SessionHandle::from_keyring().await?;
        let mut guard = RouteGuard::new();
        require_route(&mut guard, &Route::Chat, &session.store)?;

        let controller = build_controller(&config, &session)?;
        select_agents(&controller, &agents)?;
        if reminders {
            controller.set_reminders(true);
        }

        let mut rl = DefaultEditor::new()?;
        print_welcome_banner(&session.store);

        let before = controller.transcript_len();
        controller.check_connection().await;
        print_messages(&controller.messages_since(before));

        loop {
            let prompt = format_prompt(&controller);
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    match parse_special_command(trimmed) {
                        Ok(SpecialCommand::None) => {}
                        Ok(SpecialCommand::Exit) => break,
                        Ok(command) => {
                            handle_special_command(&controller, &session, command).await;
                            continue;
                        }
                        Err(e) => {
                            eprintln!("{}\n", e.to_string().yellow());
                            continue;
                        }
                    }

                    rl.add_history_entry(trimmed)?;
                    run_turn(&controller, line).await?;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        controller.flush_progress().await;
        session.shutdown().await;
        println!("Goodbye!");
        Ok(())
    }

    /// Submit one line and print what the turn appended
    ///
    /// Ctrl-C while waiting abandons the turn.
    async fn run_turn(controller: &Arc<ChatController>, line: String) -> Result<TurnOutcome> {
        let before = controller.transcript_len();
        let mut turn = {
            let controller = Arc::clone(controller);
            tokio::spawn(async move { controller.ask(line).await })
        };

        println!("{}", "Thinking...".dimmed());
        let joined = tokio::select! {
            joined = &mut turn => joined,
            _ = tokio::signal::ctrl_c() => {
                controller.abandon();
                turn.await
            }
        };
        let outcome =
            joined.map_err(|e| DhraviqError::Service(format!("Turn task failed: {}", e)))?;

        print_messages(&controller.messages_since(before));
        match &outcome {
            TurnOutcome::SignInRequired => {
                eprintln!("{}\n", "Your session ended. Sign in again with `dhraviq login`.".yellow())
            }
            TurnOutcome::Busy => eprintln!("{}\n", "Still waiting for the previous answer.".yellow()),
            TurnOutcome::Cancelled => println!("{}\n", "Request abandoned.".dimmed()),
            _ => {}
        }
        Ok(outcome)
    }

    async fn handle_special_command(
        controller: &Arc<ChatController>,
        session: &SessionHandle,
        command: SpecialCommand,
    ) {
        match command {
            SpecialCommand::ListAgents => {
                agents::print_agents_table(&controller.selected_agents());
            }
            SpecialCommand::ToggleAgent(id) => {
                if let Err(e) = validate_agent_id(&id) {
                    eprintln!("{}\n", e.to_string().yellow());
                    return;
                }
                let name = catalog::find(&id)
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| id.clone());
                match controller.toggle_agent(&id) {
                    ToggleOutcome::Added => println!("Selected {}\n", name),
                    ToggleOutcome::Removed => println!("Deselected {}\n", name),
                    ToggleOutcome::IgnoredAtCapacity => println!(
                        "{}\n",
                        format!(
                            "You can select up to {} agents. Deselect one first.",
                            controller.agent_capacity()
                        )
                        .yellow()
                    ),
                }
            }
            SpecialCommand::ClearAgents => {
                controller.clear_agents();
                println!("Cleared agent selection\n");
            }
            SpecialCommand::NewConversation => {
                controller.flush_progress().await;
                controller.new_conversation();
                println!(
                    "Started conversation {}. Select agents with /toggle <id>.\n",
                    controller.conversation_id()
                );
            }
            SpecialCommand::SetReminders(enabled) => {
                if let Err(e) = set_reminders(controller, &session.store, enabled).await {
                    eprintln!(
                        "{}\n",
                        format!("Could not save reminder preference: {:#}", e).yellow()
                    );
                }
                println!(
                    "Email reminders {}\n",
                    if enabled { "enabled" } else { "disabled" }
                );
            }
            SpecialCommand::ShowStatus => print_status_display(controller, &session.store),
            SpecialCommand::Save(path) => match save_transcript(controller, &path) {
                Ok(()) => println!("Saved transcript to {}\n", path.display()),
                Err(e) => eprintln!("{}\n", format!("Could not save transcript: {:#}", e).red()),
            },
            SpecialCommand::Help => print_help(),
            SpecialCommand::Exit | SpecialCommand::None => {}
        }
    }

    fn format_prompt(controller: &ChatController) -> String {
        let icons: Vec<String> = controller
            .selected_agents()
            .iter()
            .map(|id| {
                catalog::find(id)
                    .map(|p| p.icon)
                    .unwrap_or_else(|| id.clone())
            })
            .collect();
        if icons.is_empty() {
            format!("{} >> ", "[no agents]".dimmed())
        } else {
            format!("[{}] >> ", icons.join(" "))
        }
    }

    fn print_welcome_banner(store: &SessionStore) {
        let name = store
            .current_identity()
            .0
            .map(|i| i.display_name)
            .unwrap_or_default();

        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║            Dhraviq Goal Coaching - Welcome!                  ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Hello {}! Pick up to two coaches with /toggle <id>.", name.bold());
        println!("Type '/agents' to list them, '/help' for commands, 'exit' to quit\n");
    }

    fn print_status_display(controller: &ChatController, store: &SessionStore) {
        let identity = store.current_identity().0;
        let agents: Vec<String> = controller
            .selected_agents()
            .iter()
            .map(|id| catalog::find(id).map(|p| p.to_string()).unwrap_or_else(|| id.clone()))
            .collect();

        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                     Dhraviq Session Status                   ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!(
            "Signed in as:      {}",
            identity
                .map(|i| format!("{} <{}>", i.display_name, i.email))
                .unwrap_or_else(|| "nobody".to_string())
        );
        println!("Conversation:      {}", controller.conversation_id());
        println!(
            "Agents:            {}",
            if agents.is_empty() {
                "none".to_string()
            } else {
                agents.join(", ")
            }
        );
        println!(
            "Reminders:         {}",
            if controller.reminders_enabled() { "on" } else { "off" }
        );
        println!(
            "Connection:        {}",
            if controller.has_connection_error() {
                "unavailable".red()
            } else {
                "ok".green()
            }
        );
        println!("Conversation Size: {} messages", controller.transcript_len());
        println!();
    }

    /// Ask one question and print the transcript
    ///
    /// # Errors
    ///
    /// Returns error when the visitor is not signed in, an agent id is
    /// unknown, or the turn does not produce answers
    pub async fn ask(
        config: Config,
        question: String,
        agents: Vec<String>,
        reminders: bool,
        save: Option<std::path::PathBuf>,
    ) -> Result<()> {
        let session = SessionHandle::from_keyring().await?;
        let mut guard = RouteGuard::new();
        require_route(&mut guard, &Route::Chat, &session.store)?;

        let controller = build_controller(&config, &session)?;
        select_agents(&controller, &agents)?;
        if reminders {
            controller.set_reminders(true);
        }

        controller.check_connection().await;
        let outcome = controller.ask(question).await;
        print_messages(&controller.messages());
        controller.flush_progress().await;

        if let Some(path) = save {
            save_transcript(&controller, &path)?;
        }
        session.shutdown().await;

        match outcome {
            TurnOutcome::Answered(_) => Ok(()),
            TurnOutcome::Failed(reason) => Err(DhraviqError::Service(reason).into()),
            TurnOutcome::Rejected(rejection) => {
                Err(DhraviqError::Config(rejection.message().to_string()).into())
            }
            TurnOutcome::SignInRequired => {
                Err(DhraviqError::Identity("Sign-in required".to_string()).into())
            }
            TurnOutcome::Busy | TurnOutcome::Cancelled => Err(DhraviqError::Cancelled.into()),
        }
    }
}

pub mod auth {
    use super::*;
    use crate::session::{CredentialStore, Identity, StoredCredentials};
    use chrono::{Duration, Utc};
    use regex::Regex;

    /// Validate login arguments and build the credentials to store
    ///
    /// # Errors
    ///
    /// Returns error for an empty uid, a malformed email or a non-positive
    /// expiry
    pub fn build_credentials(
        uid: String,
        email: String,
        name: Option<String>,
        token: Option<String>,
        expires_in: Option<i64>,
    ) -> Result<StoredCredentials> {
        if uid.trim().is_empty() {
            return Err(DhraviqError::Identity("uid must not be empty".to_string()).into());
        }

        let email_pattern = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .map_err(|e| DhraviqError::Identity(format!("Invalid email pattern: {}", e)))?;
        if !email_pattern.is_match(&email) {
            return Err(DhraviqError::Identity(format!("Invalid email address: {}", email)).into());
        }

        let expires_at = match expires_in {
            Some(seconds) if seconds <= 0 => {
                return Err(DhraviqError::Identity(
                    "--expires-in must be a positive number of seconds".to_string(),
                )
                .into())
            }
            Some(seconds) => Some(Utc::now() + Duration::seconds(seconds)),
            None => None,
        };

        Ok(StoredCredentials {
            uid: uid.trim().to_string(),
            email,
            display_name: name.filter(|n| !n.trim().is_empty()),
            id_token: token.filter(|t| !t.is_empty()),
            expires_at,
        })
    }

    /// Store credentials and create the user's progress record
    pub async fn login(
        config: Config,
        uid: String,
        email: String,
        name: Option<String>,
        token: Option<String>,
        expires_in: Option<i64>,
    ) -> Result<()> {
        let credentials = build_credentials(uid, email, name, token, expires_in)?;
        CredentialStore.save(&credentials)?;

        let identity = Identity::new(
            credentials.uid.clone(),
            credentials.display_name.clone(),
            Some(credentials.email.clone()),
        );
        let store = open_progress_store(&config);
        let profile = identity.clone();
        match tokio::task::spawn_blocking(move || store.ensure_profile(&profile)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("Could not create progress record: {:#}", e),
            Err(e) => tracing::warn!("Progress record task failed: {}", e),
        }

        println!(
            "Signed in as {} <{}>. Continue with `dhraviq chat` or `dhraviq progress`.",
            identity.display_name.bold(),
            identity.email
        );
        Ok(())
    }

    /// Remove stored credentials
    pub async fn logout() -> Result<()> {
        CredentialStore.delete()?;
        println!("Signed out.");
        Ok(())
    }

    /// Print the signed-in identity
    pub async fn whoami() -> Result<()> {
        let session = SessionHandle::from_keyring().await?;
        match session.store.current_identity().0 {
            Some(identity) => {
                println!("{} <{}>", identity.display_name.bold(), identity.email);
                println!("uid: {}", identity.id);
            }
            None => println!("Not signed in."),
        }
        session.shutdown().await;
        Ok(())
    }

}

pub mod health {
    use super::*;
    use crate::service::AgentService;

    /// Probe the agent service and report the result
    ///
    /// # Errors
    ///
    /// Returns error if the service is unreachable
    pub async fn check(config: &Config) -> Result<()> {
        let service = HttpAgentService::new(&config.service)?;
        match service.health_check().await {
            Ok(()) => {
                println!("{} {}", "✓".green(), service.health_url());
                Ok(())
            }
            Err(e) => {
                eprintln!("{} {}", "✗".red(), crate::chat::controller::BACKEND_UNAVAILABLE);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::message::ChatMessage;
    use crate::session::{Identity, Profile};
    use crate::test_utils::StaticIdentityProvider;
    use tempfile::TempDir;

    #[test]
    fn test_validate_agent_id_suggests() {
        assert!(validate_agent_id("skill-map").is_ok());
        let err = validate_agent_id("skil-map").unwrap_err();
        assert!(err.to_string().contains("Did you mean 'skill-map'?"));
    }

    #[test]
    fn test_render_error_message() {
        colored::control::set_override(false);
        let message = ChatMessage::system("sys-1".into(), "Please enter a message", true);
        let rendered = render_message(&message);
        assert!(rendered.contains("System"));
        assert!(rendered.contains("Please enter a message"));
    }

    #[test]
    fn test_require_route_redirects_signed_out() {
        let store = SessionStore::new();
        store.sign_out();
        let mut guard = RouteGuard::new();
        let err = require_route(&mut guard, &Route::Chat, &store).unwrap_err();
        assert!(err.to_string().contains("dhraviq login"));
        assert_eq!(guard.after_sign_in(), Route::Chat);

        store.publish(Some(Identity::new("u1", None, None)));
        assert!(require_route(&mut guard, &Route::Chat, &store).is_ok());
    }

    #[test]
    fn test_open_progress_store_uses_configured_path() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.progress.db_path = Some(tmp.path().join("p.db"));
        let store = open_progress_store(&config);
        store.set_reminder_enabled("u1", true).unwrap();
        assert!(tmp.path().join("p.db").exists());
    }

    #[tokio::test]
    async fn test_session_handle_resolves_initial_state() {
        let provider = Arc::new(StaticIdentityProvider {
            profile: Profile {
                display_name: Some("Ravi".into()),
                email: None,
            },
            token: None,
        });
        let session = SessionHandle::start(provider, Some("u9".into())).await.unwrap();
        let (identity, loading) = session.store.current_identity();
        assert!(!loading);
        assert_eq!(identity.unwrap().display_name, "Ravi");

        session.notify(None).await.unwrap();
        assert!(!session.store.is_authenticated());
        session.shutdown().await;
    }

    #[tokio::test]
    async fn test_set_reminders_writes_to_controller_store() {
        use crate::progress::MemoryProgressStore;
        use crate::test_utils::{signed_in_session, ScriptedAgentService};

        let progress = Arc::new(MemoryProgressStore::new());
        let session = signed_in_session();
        let controller = ChatController::new(
            &Config::default(),
            Arc::clone(&session),
            Arc::new(StaticIdentityProvider::with_token("t")),
            Arc::new(ScriptedAgentService::new(vec![])),
            progress.clone(),
        );

        set_reminders(&controller, &session, true).await.unwrap();
        assert!(controller.reminders_enabled());
        assert!(progress.load("user-1").unwrap().unwrap().reminder_enabled);

        set_reminders(&controller, &session, false).await.unwrap();
        assert!(!progress.load("user-1").unwrap().unwrap().reminder_enabled);
    }

    #[tokio::test]
    async fn test_set_reminders_signed_out_only_switches_controller() {
        use crate::progress::MemoryProgressStore;
        use crate::test_utils::ScriptedAgentService;

        let progress = Arc::new(MemoryProgressStore::new());
        let session = Arc::new(SessionStore::new());
        session.sign_out();
        let controller = ChatController::new(
            &Config::default(),
            Arc::clone(&session),
            Arc::new(StaticIdentityProvider::with_token("t")),
            Arc::new(ScriptedAgentService::new(vec![])),
            progress.clone(),
        );

        set_reminders(&controller, &session, true).await.unwrap();
        assert!(controller.reminders_enabled());
        assert!(progress.load("user-1").unwrap().is_none());
    }

    #[test]
    fn test_save_transcript_creates_parent() {
        use crate::progress::MemoryProgressStore;
        use crate::test_utils::{signed_in_session, ScriptedAgentService};

        let tmp = TempDir::new().unwrap();
        let controller = ChatController::new(
            &Config::default(),
            signed_in_session(),
            Arc::new(StaticIdentityProvider::with_token("t")),
            Arc::new(ScriptedAgentService::new(vec![])),
            Arc::new(MemoryProgressStore::new()),
        );
        let path = tmp.path().join("out/transcript.json");
        save_transcript(&controller, &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap().trim(), "[]");
    }
}
