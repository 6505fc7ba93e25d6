//! Dhraviq - multi-agent goal coaching client library
//!
//! This library provides the client side of the Dhraviq coaching service:
//! session state, agent selection, the chat session controller that talks
//! to the remote run-agents service, the route guard and per-user progress.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: Signed-in identity, its listener task and keyring credentials
//! - `agents`: Persona catalog and the bounded agent selection
//! - `chat`: Transcript, message ids and the turn controller
//! - `service`: Agent service trait and its HTTP implementation
//! - `progress`: Per-user counters (SQLite and in-memory stores)
//! - `guard`: Protected-route decisions and sign-in return targets
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli` / `commands`: Command-line interface and its handlers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use dhraviq::{ChatController, Config};
//! use dhraviq::progress::MemoryProgressStore;
//! use dhraviq::service::HttpAgentService;
//! use dhraviq::session::{KeyringIdentityProvider, SessionStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let provider = Arc::new(KeyringIdentityProvider::load()?);
//!     let session = Arc::new(SessionStore::new());
//!     session.handle_notification(provider.as_ref(), provider.initial_notification()).await;
//!
//!     let controller = ChatController::new(
//!         &config,
//!         session,
//!         provider,
//!         Arc::new(HttpAgentService::new(&config.service)?),
//!         Arc::new(MemoryProgressStore::new()),
//!     );
//!     controller.toggle_agent("goal-clarifier");
//!     controller.ask("Help me plan my week").await;
//!     Ok(())
//! }
//! ```

pub mod agents;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod guard;
pub mod progress;
pub mod service;
pub mod session;

// Re-export commonly used types
pub use chat::{ChatController, TurnOutcome};
pub use config::Config;
pub use error::{DhraviqError, Result};
pub use guard::{GuardDecision, Route, RouteGuard};
pub use session::{Identity, SessionStore};

#[cfg(test)]
pub mod test_utils;
