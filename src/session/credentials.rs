//! Sign-in credentials persisted in the OS keyring
//!
//! The terminal client has no browser sign-in flow. `dhraviq login` stores
//! the identity and id token issued by the identity provider in the OS
//! credential store, and [`KeyringIdentityProvider`] serves them back to the
//! session store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DhraviqError, Result};
use crate::session::{AuthNotification, IdentityProvider, Profile};

const KEYRING_SERVICE: &str = "dhraviq";
const KEYRING_USER: &str = "session";

/// Everything `login` records about the signed-in principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub uid: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredCredentials {
    /// Returns `true` when the id token is expired or about to expire
    ///
    /// A 60-second buffer is applied. Credentials without `expires_at` never
    /// expire.
    ///
    /// # Examples
    ///
    /// ```
    /// use dhraviq::session::StoredCredentials;
    /// use chrono::{Duration, Utc};
    ///
    /// let mut creds = StoredCredentials {
    ///     uid: "u1".to_string(),
    ///     email: "u1@example.com".to_string(),
    ///     display_name: None,
    ///     id_token: Some("tok".to_string()),
    ///     expires_at: None,
    /// };
    /// assert!(!creds.is_expired());
    ///
    /// creds.expires_at = Some(Utc::now() - Duration::seconds(1));
    /// assert!(creds.is_expired());
    /// ```
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            None => false,
            Some(expires_at) => Utc::now() >= expires_at - chrono::Duration::seconds(60),
        }
    }
}

/// Stateless accessor for the keyring entry holding the credentials
pub struct CredentialStore;

impl CredentialStore {
    fn entry() -> Result<keyring::Entry> {
        Ok(keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER).map_err(DhraviqError::Keyring)?)
    }

    /// Persist credentials, replacing any previous sign-in
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails or the keyring rejects the write
    pub fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        let json = serde_json::to_string(credentials)?;
        Self::entry()?
            .set_password(&json)
            .map_err(DhraviqError::Keyring)?;
        tracing::debug!(user = %credentials.uid, "Stored credentials in keyring");
        Ok(())
    }

    /// Load stored credentials; `None` when nobody has signed in
    ///
    /// # Errors
    ///
    /// Returns error if the keyring is unavailable or the stored value is
    /// not valid credentials JSON
    pub fn load(&self) -> Result<Option<StoredCredentials>> {
        match Self::entry()?.get_password() {
            Ok(json) => {
                let credentials = serde_json::from_str(&json).map_err(|e| {
                    DhraviqError::Identity(format!("Stored credentials are corrupt: {}", e))
                })?;
                Ok(Some(credentials))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(DhraviqError::Keyring(e).into()),
        }
    }

    /// Remove stored credentials; succeeds when none are stored
    ///
    /// # Errors
    ///
    /// Returns error if the keyring rejects the delete
    pub fn delete(&self) -> Result<()> {
        match Self::entry()?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(DhraviqError::Keyring(e).into()),
        }
    }
}

/// Identity provider serving credentials captured by `login`
pub struct KeyringIdentityProvider {
    credentials: Option<StoredCredentials>,
}

impl KeyringIdentityProvider {
    /// Load the provider from the OS keyring
    ///
    /// # Errors
    ///
    /// Returns error if the keyring cannot be read
    pub fn load() -> Result<Self> {
        Ok(Self::from_credentials(CredentialStore.load()?))
    }

    pub fn from_credentials(credentials: Option<StoredCredentials>) -> Self {
        Self { credentials }
    }

    /// The notification describing the stored sign-in state at startup
    pub fn initial_notification(&self) -> AuthNotification {
        self.credentials.as_ref().map(|c| c.uid.clone())
    }
}

#[async_trait]
impl IdentityProvider for KeyringIdentityProvider {
    async fn profile(&self, principal_id: &str) -> Result<Profile> {
        match &self.credentials {
            Some(creds) if creds.uid == principal_id => Ok(Profile {
                display_name: creds.display_name.clone(),
                email: Some(creds.email.clone()),
            }),
            _ => Err(DhraviqError::Identity(format!(
                "No stored profile for principal {}",
                principal_id
            ))
            .into()),
        }
    }

    async fn id_token(&self) -> Result<Option<String>> {
        Ok(self.credentials.as_ref().and_then(|creds| {
            if creds.is_expired() {
                tracing::warn!("Stored id token has expired, sending request without it");
                None
            } else {
                creds.id_token.clone()
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn creds() -> StoredCredentials {
        StoredCredentials {
            uid: "u1".to_string(),
            email: "asha@example.com".to_string(),
            display_name: Some("Asha".to_string()),
            id_token: Some("tok".to_string()),
            expires_at: None,
        }
    }

    #[test]
    fn test_credentials_roundtrip_json() {
        let mut original = creds();
        original.expires_at = Some(Utc::now() + Duration::hours(1));
        let json = serde_json::to_string(&original).unwrap();
        let parsed: StoredCredentials = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.uid, "u1");
        assert_eq!(
            parsed.expires_at.map(|t| t.timestamp()),
            original.expires_at.map(|t| t.timestamp())
        );
    }

    #[test]
    fn test_expiry_buffer() {
        let mut c = creds();
        c.expires_at = Some(Utc::now() + Duration::seconds(30));
        assert!(c.is_expired());
        c.expires_at = Some(Utc::now() + Duration::hours(1));
        assert!(!c.is_expired());
    }

    #[test]
    fn test_initial_notification() {
        let provider = KeyringIdentityProvider::from_credentials(Some(creds()));
        assert_eq!(provider.initial_notification(), Some("u1".to_string()));
        let provider = KeyringIdentityProvider::from_credentials(None);
        assert_eq!(provider.initial_notification(), None);
    }

    #[tokio::test]
    async fn test_profile_for_stored_principal() {
        let provider = KeyringIdentityProvider::from_credentials(Some(creds()));
        let profile = provider.profile("u1").await.unwrap();
        assert_eq!(profile.display_name.as_deref(), Some("Asha"));
        assert!(provider.profile("someone-else").await.is_err());
    }

    #[tokio::test]
    async fn test_expired_token_is_absent() {
        let mut c = creds();
        c.expires_at = Some(Utc::now() - Duration::minutes(5));
        let provider = KeyringIdentityProvider::from_credentials(Some(c));
        assert_eq!(provider.id_token().await.unwrap(), None);

        let provider = KeyringIdentityProvider::from_credentials(Some(creds()));
        assert_eq!(provider.id_token().await.unwrap(), Some("tok".to_string()));
    }
}
