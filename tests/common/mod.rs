use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use dhraviq::config::Config;
use dhraviq::error::Result;
use dhraviq::progress::{ProgressStore, SqliteProgressStore};
use dhraviq::service::HttpAgentService;
use dhraviq::session::{Identity, IdentityProvider, Profile, SessionStore};
use dhraviq::ChatController;

/// Identity provider with a fixed profile and bearer token
pub struct FixedIdentity {
    pub token: Option<String>,
}

#[async_trait]
impl IdentityProvider for FixedIdentity {
    async fn profile(&self, _principal_id: &str) -> Result<Profile> {
        Ok(Profile {
            display_name: Some("Asha".to_string()),
            email: Some("asha@example.com".to_string()),
        })
    }

    async fn id_token(&self) -> Result<Option<String>> {
        Ok(self.token.clone())
    }
}

#[allow(dead_code)]
pub fn signed_in_session() -> Arc<SessionStore> {
    let store = SessionStore::new();
    store.publish(Some(Identity::new(
        "user-42",
        Some("Asha".to_string()),
        Some("asha@example.com".to_string()),
    )));
    Arc::new(store)
}

#[allow(dead_code)]
pub fn config_for(base_url: &str) -> Config {
    let mut config = Config::default();
    config.service.base_url = base_url.to_string();
    config
}

#[allow(dead_code)]
pub fn create_temp_progress_store() -> (SqliteProgressStore, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let db_path = tmp.path().join("progress.db");
    let store =
        SqliteProgressStore::new_with_path(db_path).expect("failed to create sqlite store");
    (store, tmp)
}

/// Controller wired to the HTTP service at `config.service.base_url`
#[allow(dead_code)]
pub fn http_controller(
    config: &Config,
    session: Arc<SessionStore>,
    progress: Arc<dyn ProgressStore>,
    token: Option<&str>,
) -> Arc<ChatController> {
    let service = HttpAgentService::new(&config.service).expect("failed to build service");
    Arc::new(ChatController::new(
        config,
        session,
        Arc::new(FixedIdentity {
            token: token.map(str::to_string),
        }),
        Arc::new(service),
        progress,
    ))
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
