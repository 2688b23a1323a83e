use anyhow::Context;
use classwatch_auth::{FileStore, HttpAuthProvider, SessionStore};
use classwatch_config::{ApiConfig, StorageConfig};
use tracing::debug;

use crate::menu::default_menu;
use crate::router::{RouteTable, dashboard_routes};
use classwatch_models::MenuGroup;

/// The session store as wired for the command-line client.
pub type AppSessionStore = SessionStore<HttpAuthProvider, FileStore>;

pub struct AppState {
    pub session: AppSessionStore,
    pub routes: RouteTable,
    pub api_config: ApiConfig,
    pub storage_config: StorageConfig,
}

impl AppState {
    pub fn menu(&self) -> Vec<MenuGroup> {
        default_menu(&self.routes)
    }
}

pub fn init_app_state(
    api_config: ApiConfig,
    storage_config: StorageConfig,
) -> anyhow::Result<AppState> {
    let state_path = storage_config.state_path();
    debug!(
        api = %api_config.base_url,
        state = %state_path.display(),
        "Initializing session store"
    );

    let provider =
        HttpAuthProvider::new(api_config.clone()).context("failed to build API client")?;
    let session = SessionStore::new(provider, FileStore::new(state_path));

    Ok(AppState {
        session,
        routes: dashboard_routes(),
        api_config,
        storage_config,
    })
}
