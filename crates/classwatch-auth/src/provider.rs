//! The external authentication provider boundary.
//!
//! The session store depends on exactly two remote operations: exchanging
//! credentials for a token, and resolving a token into a profile. Anything that
//! can do both implements [`AuthProvider`]; the production implementation is
//! [`HttpAuthProvider`](crate::http::HttpAuthProvider).

use std::future::Future;
use std::sync::Arc;

use classwatch_models::{AuthToken, Credentials, Profile};

/// Failures reported by an [`AuthProvider`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The username/password pair was rejected.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The credentials are valid but the account may not sign in.
    #[error("account is disabled or suspended")]
    AccountDisabled,

    /// The token is invalid or expired.
    #[error("credential rejected by the auth provider")]
    Unauthorized,

    /// Transport-level failure, including timeouts.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered, but not in a shape we understand.
    #[error("unexpected response from the auth provider: {0}")]
    UnexpectedResponse(String),
}

/// Remote authentication operations the session store relies on.
pub trait AuthProvider: Send + Sync {
    /// Exchanges credentials for an opaque bearer token.
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<AuthToken, ProviderError>> + Send;

    /// Resolves a token into the profile of the user it belongs to.
    fn fetch_profile(
        &self,
        token: &AuthToken,
    ) -> impl Future<Output = Result<Profile, ProviderError>> + Send;
}

impl<P: AuthProvider> AuthProvider for Arc<P> {
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<AuthToken, ProviderError>> + Send {
        (**self).authenticate(credentials)
    }

    fn fetch_profile(
        &self,
        token: &AuthToken,
    ) -> impl Future<Output = Result<Profile, ProviderError>> + Send {
        (**self).fetch_profile(token)
    }
}
