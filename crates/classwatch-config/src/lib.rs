//! # Classwatch Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`api`]: Remote API location and request timeout
//! - [`storage`]: Where the persisted session credential lives
//!
//! Call `dotenvy::dotenv()` before loading if a `.env` file should be honoured.
//!
//! # Example
//!
//! ```ignore
//! use classwatch_config::{ApiConfig, StorageConfig};
//!
//! let api_config = ApiConfig::from_env();
//! let storage_config = StorageConfig::from_env();
//! println!("talking to {}", api_config.base_url);
//! ```

pub mod api;
pub mod storage;

// Re-export commonly used types at crate root
pub use api::ApiConfig;
pub use storage::StorageConfig;
