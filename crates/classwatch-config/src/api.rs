use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Base URL of the remote API, without a trailing slash.
    pub base_url: String,
    /// Upper bound for a single request to the remote API.
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let base_url = env::var("CLASSWATCH_API_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = env::var("CLASSWATCH_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self::new(base_url, Duration::from_secs(timeout_secs))
    }

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Joins `path` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ApiConfig::new("http://api.school.test/v1/", Duration::from_secs(5));
        assert_eq!(config.base_url, "http://api.school.test/v1");
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let config = ApiConfig::default();
        assert_eq!(
            config.endpoint("/auth/login"),
            "http://localhost:8000/api/v1/auth/login"
        );
        assert_eq!(
            config.endpoint("auth/me"),
            "http://localhost:8000/api/v1/auth/me"
        );
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(ApiConfig::default().timeout, Duration::from_secs(15));
    }
}
