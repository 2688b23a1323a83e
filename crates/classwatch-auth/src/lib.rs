//! # Classwatch Auth
//!
//! Session lifecycle and access decisions for the Classwatch dashboard.
//!
//! - [`store`]: The [`SessionStore`], owner of the process-wide [`Session`]
//! - [`session`]: Immutable session snapshots
//! - [`guard`]: Route access decisions ([`decide`], [`satisfies`])
//! - [`navigation`]: Menu visibility ([`filter`])
//! - [`provider`]: The [`AuthProvider`] boundary and [`ProviderError`]
//! - [`http`]: [`HttpAuthProvider`] for the remote REST API
//! - [`storage`]: The [`KeyValueStore`] persistence surface
//! - [`claims`]: Read-only token claim inspection
//!
//! # Example
//!
//! ```ignore
//! use classwatch_auth::{HttpAuthProvider, FileStore, SessionStore};
//! use classwatch_config::{ApiConfig, StorageConfig};
//! use classwatch_models::Credentials;
//!
//! let provider = HttpAuthProvider::new(ApiConfig::from_env())?;
//! let store = SessionStore::new(provider, FileStore::new(StorageConfig::from_env().state_path()));
//!
//! store.initialize().await;
//! let user = store.login(&Credentials::new("nguyen.a", "secret")).await?;
//! ```

pub mod claims;
pub mod guard;
pub mod http;
pub mod metrics;
pub mod navigation;
pub mod provider;
pub mod session;
pub mod storage;
pub mod store;

pub use guard::{Action, decide, satisfies};
pub use http::HttpAuthProvider;
pub use navigation::filter;
pub use provider::{AuthProvider, ProviderError};
pub use session::{Session, SessionStatus};
pub use storage::{AUTH_TOKEN_KEY, FileStore, KeyValueStore, MemoryStore, StoreError};
pub use store::{InitOutcome, LoginFailure, SessionStore};
