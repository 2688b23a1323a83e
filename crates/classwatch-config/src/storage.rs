use std::env;
use std::path::PathBuf;

const STATE_DIR_NAME: &str = ".classwatch";
const DEFAULT_STATE_FILE: &str = "session.json";

#[derive(Clone, Debug)]
pub struct StorageConfig {
    /// Directory holding persisted client state.
    pub state_dir: PathBuf,
    /// File name of the key/value store inside `state_dir`.
    pub state_file: String,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let state_dir = env::var_os("CLASSWATCH_STATE_DIR")
            .map(PathBuf::from)
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(default_state_dir);

        let state_file = env::var("CLASSWATCH_STATE_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STATE_FILE.to_string());

        Self {
            state_dir,
            state_file,
        }
    }

    /// Full path of the key/value store file.
    pub fn state_path(&self) -> PathBuf {
        self.state_dir.join(&self.state_file)
    }
}

fn default_state_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(STATE_DIR_NAME)
}
