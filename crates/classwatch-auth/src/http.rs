//! [`AuthProvider`] backed by the dashboard's remote REST API.
//!
//! | Operation | Request | Failure mapping |
//! |-----------|---------|-----------------|
//! | authenticate | `POST {base}/auth/login` with `{username, password}` | 400/401/422 → invalid credentials, 403 → account disabled |
//! | fetch_profile | `GET {base}/auth/me` with `Authorization: Bearer` | 401/403 → unauthorized, 400 → account disabled |
//!
//! Transport errors and timeouts map to [`ProviderError::Network`]; any other
//! status to [`ProviderError::UnexpectedResponse`].

use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use classwatch_config::ApiConfig;
use classwatch_models::{AuthToken, Credentials, Profile, TokenResponse};

use crate::provider::{AuthProvider, ProviderError};

const LOGIN_PATH: &str = "/auth/login";
const PROFILE_PATH: &str = "/auth/me";

#[derive(Debug, Clone)]
pub struct HttpAuthProvider {
    client: Client,
    config: ApiConfig,
}

impl HttpAuthProvider {
    /// Builds a provider whose requests are bounded by `config.timeout`.
    pub fn new(config: ApiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

impl AuthProvider for HttpAuthProvider {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken, ProviderError> {
        let url = self.config.endpoint(LOGIN_PATH);
        let response = self
            .client
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        debug!(url = %url, status = %status.as_u16(), "Login response");

        match status {
            s if s.is_success() => {
                let body: TokenResponse = decode_body(response).await?;
                if body.access_token.is_empty() {
                    return Err(ProviderError::UnexpectedResponse(
                        "login response carried an empty access token".to_string(),
                    ));
                }
                Ok(body.into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(ProviderError::InvalidCredentials)
            }
            StatusCode::FORBIDDEN => Err(ProviderError::AccountDisabled),
            other => Err(unexpected_status(other, &url)),
        }
    }

    async fn fetch_profile(&self, token: &AuthToken) -> Result<Profile, ProviderError> {
        let url = self.config.endpoint(PROFILE_PATH);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        debug!(url = %url, status = %status.as_u16(), "Profile response");

        match status {
            s if s.is_success() => decode_body(response).await,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ProviderError::Unauthorized),
            StatusCode::BAD_REQUEST => Err(ProviderError::AccountDisabled),
            other => Err(unexpected_status(other, &url)),
        }
    }
}

async fn decode_body<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ProviderError::UnexpectedResponse(format!("malformed body: {}", e)))
}

fn transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Network("request timed out".to_string())
    } else {
        ProviderError::Network(err.to_string())
    }
}

fn unexpected_status(status: StatusCode, url: &str) -> ProviderError {
    ProviderError::UnexpectedResponse(format!("{} from {}", status, url))
}
