#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use classwatch_auth::{AuthProvider, MemoryStore, ProviderError, Session, SessionStore};
use classwatch_core::Role;
use classwatch_models::{AccountStatus, AuthToken, Credentials, Profile, User, UserId};
use tokio::sync::Notify;

pub const PASSWORD: &str = "correct horse";

/// Test account known to the fake provider.
#[derive(Clone)]
pub struct TestAccount {
    pub username: String,
    pub password: String,
    pub profile: Profile,
}

impl TestAccount {
    pub fn token(&self) -> AuthToken {
        AuthToken::new(format!("token-{}", self.username))
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }
}

pub fn profile(id: i64, username: &str, full_name: &str, role: &str) -> Profile {
    Profile {
        user_id: UserId::new(id),
        username: username.to_string(),
        full_name: full_name.to_string(),
        email: Some(format!("{}@school.test", username)),
        role: role.to_string(),
        account_status: AccountStatus::Active,
    }
}

pub fn account(id: i64, username: &str, role: &str) -> TestAccount {
    TestAccount {
        username: username.to_string(),
        password: PASSWORD.to_string(),
        profile: profile(id, username, &format!("Test {}", username), role),
    }
}

/// In-process stand-in for the remote API.
///
/// Tokens are `token-<username>`. When a hold is installed, `authenticate`
/// parks until [`FakeProvider::release`] is called; a profile hold does the
/// same for `fetch_profile`.
#[derive(Default)]
pub struct FakeProvider {
    accounts: Vec<TestAccount>,
    network_down: AtomicBool,
    hold: Option<Arc<Notify>>,
    profile_hold: Option<Arc<Notify>>,
    pub authenticate_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new(accounts: Vec<TestAccount>) -> Self {
        Self {
            accounts,
            ..Self::default()
        }
    }

    /// One account per role, named after it.
    pub fn school() -> Self {
        Self::new(vec![
            account(1, "admin", "admin"),
            account(2, "teacher", "teacher"),
            account(3, "counselor", "counselor"),
            account(4, "student", "student"),
            account(5, "parent", "parent"),
        ])
    }

    pub fn with_hold(mut self) -> Self {
        self.hold = Some(Arc::new(Notify::new()));
        self
    }

    pub fn with_profile_hold(mut self) -> Self {
        self.profile_hold = Some(Arc::new(Notify::new()));
        self
    }

    pub fn release(&self) {
        if let Some(hold) = &self.hold {
            hold.notify_one();
        }
    }

    pub fn release_profile(&self) {
        if let Some(hold) = &self.profile_hold {
            hold.notify_one();
        }
    }

    pub fn set_network_down(&self, down: bool) {
        self.network_down.store(down, Ordering::SeqCst);
    }

    pub fn account(&self, username: &str) -> &TestAccount {
        self.accounts
            .iter()
            .find(|a| a.username == username)
            .unwrap_or_else(|| panic!("no test account {}", username))
    }

    pub fn calls(&self) -> usize {
        self.authenticate_calls.load(Ordering::SeqCst) + self.profile_calls.load(Ordering::SeqCst)
    }
}

impl AuthProvider for FakeProvider {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken, ProviderError> {
        self.authenticate_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(hold) = &self.hold {
            hold.notified().await;
        }
        if self.network_down.load(Ordering::SeqCst) {
            return Err(ProviderError::Network("connection refused".to_string()));
        }

        self.accounts
            .iter()
            .find(|a| a.username == credentials.username && a.password == credentials.password)
            .map(TestAccount::token)
            .ok_or(ProviderError::InvalidCredentials)
    }

    async fn fetch_profile(&self, token: &AuthToken) -> Result<Profile, ProviderError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(hold) = &self.profile_hold {
            hold.notified().await;
        }
        if self.network_down.load(Ordering::SeqCst) {
            return Err(ProviderError::Network("connection refused".to_string()));
        }

        self.accounts
            .iter()
            .find(|a| a.token() == *token)
            .map(|a| a.profile.clone())
            .ok_or(ProviderError::Unauthorized)
    }
}

pub type TestStore = SessionStore<Arc<FakeProvider>, Arc<MemoryStore>>;

pub fn test_store(provider: FakeProvider) -> (TestStore, Arc<FakeProvider>, Arc<MemoryStore>) {
    let provider = Arc::new(provider);
    let storage = Arc::new(MemoryStore::new());
    let store = SessionStore::new(provider.clone(), storage.clone());
    (store, provider, storage)
}

/// An authenticated session snapshot for `role`.
pub fn signed_in(role: Role) -> Session {
    Session::authenticated(
        User::new(100, format!("Test {}", role.title()), role),
        AuthToken::new("tok"),
    )
}

pub fn unauthenticated_sessions() -> Vec<Session> {
    vec![
        Session::uninitialized(),
        Session::loading(),
        Session::anonymous(),
    ]
}
