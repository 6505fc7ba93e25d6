//! Client-side session state
//!
//! [`SessionStore`] holds who is signed in. It starts out loading, and a
//! listener task fed by identity-change notifications resolves it: each
//! notification either names a principal, whose profile is then fetched
//! from the [`IdentityProvider`], or says nobody is signed in.
//!
//! Consumers receive the store explicitly and observe it through
//! [`SessionStore::subscribe`]; there is no global session.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub mod credentials;

pub use credentials::{CredentialStore, KeyringIdentityProvider, StoredCredentials};

/// The authenticated principal using the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub display_name: String,
    pub email: String,
}

impl Identity {
    /// Build an identity, applying the `Anonymous` / empty-email fallbacks
    pub fn new(id: impl Into<String>, display_name: Option<String>, email: Option<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "Anonymous".to_string()),
            email: email.unwrap_or_default(),
        }
    }
}

/// Profile data the identity provider returns for a principal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// Snapshot published by the session store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub identity: Option<Identity>,
    /// True until the first notification has been handled
    pub loading: bool,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

/// One identity-change notification
///
/// `Some(principal_id)` means someone is signed in; `None` means nobody is.
pub type AuthNotification = Option<String>;

/// External identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fetch display name and email for a signed-in principal
    async fn profile(&self, principal_id: &str) -> Result<Profile>;

    /// Current bearer token for the signed-in principal, if any
    async fn id_token(&self) -> Result<Option<String>>;
}

/// Holds the current identity and hands out change subscriptions
///
/// # Examples
///
/// ```
/// use dhraviq::session::{Identity, SessionStore};
///
/// let store = SessionStore::new();
/// assert_eq!(store.current_identity(), (None, true));
///
/// store.publish(Some(Identity::new("u1", None, None)));
/// let (identity, loading) = store.current_identity();
/// assert_eq!(identity.unwrap().display_name, "Anonymous");
/// assert!(!loading);
/// ```
#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<SessionState>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create a store in the loading state
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState {
            identity: None,
            loading: true,
        });
        Self { tx }
    }

    /// Current identity (if any) and whether the store is still loading
    pub fn current_identity(&self) -> (Option<Identity>, bool) {
        let state = self.tx.borrow();
        (state.identity.clone(), state.loading)
    }

    pub fn state(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_authenticated()
    }

    /// Observe every state the store publishes from now on
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    /// Resolve the store with `identity` (absent means signed out)
    pub fn publish(&self, identity: Option<Identity>) {
        match &identity {
            Some(identity) => tracing::info!(user = %identity.id, "Session signed in"),
            None => tracing::info!("Session has no identity"),
        }
        self.tx.send_replace(SessionState {
            identity,
            loading: false,
        });
    }

    pub fn sign_out(&self) {
        self.publish(None);
    }

    /// Resolve the store from one notification
    ///
    /// A failed profile lookup is logged and treated as signed out.
    pub async fn handle_notification(
        &self,
        provider: &dyn IdentityProvider,
        notification: AuthNotification,
    ) {
        let identity = match notification {
            Some(principal_id) => match provider.profile(&principal_id).await {
                Ok(profile) => Some(Identity::new(
                    principal_id,
                    profile.display_name,
                    profile.email,
                )),
                Err(e) => {
                    tracing::warn!(principal = %principal_id, "Profile lookup failed: {:#}", e);
                    None
                }
            },
            None => None,
        };
        self.publish(identity);
    }

    /// Subscribe the store to identity-change notifications
    ///
    /// The listener runs until `shutdown` is cancelled or the notification
    /// sender is dropped.
    pub fn spawn_listener(
        self: &Arc<Self>,
        provider: Arc<dyn IdentityProvider>,
        mut notifications: mpsc::Receiver<AuthNotification>,
        shutdown: CancellationToken,
    ) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            tracing::debug!("Session listener started");
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        tracing::debug!("Session listener shutting down");
                        break;
                    }
                    next = notifications.recv() => match next {
                        Some(notification) => {
                            store.handle_notification(provider.as_ref(), notification).await;
                        }
                        None => {
                            tracing::debug!("Identity notifications closed");
                            break;
                        }
                    }
                }
            }
        })
    }
}
