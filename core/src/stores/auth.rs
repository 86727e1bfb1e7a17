//! Authentication state container
//!
//! Tracks the signed-in user across app launches. The container starts in
//! `Loading`, resolves to `SignedIn` or `SignedOut` once storage has been
//! read, and keeps the persisted user blob in sync with every transition.
//!
//! Sign-in goes through the [`AuthProvider`] seam; the shipped provider is
//! a mock Google flow that answers after a configurable delay.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};
use wellness_companion_shared::{validation, ProfileUpdate, User};

use crate::error::{AuthError, AuthResult};
use crate::storage::{keys, KeyValueStore};

// ============================================================================
// State
// ============================================================================

/// Observable authentication state
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Storage has not been read yet
    Loading,
    SignedOut,
    SignedIn(User),
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::SignedIn(user) => Some(user),
            _ => None,
        }
    }
}

// ============================================================================
// Provider
// ============================================================================

/// Identity provider seam
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Run the provider's sign-in flow
    ///
    /// `Ok(None)` means the user backed out of the flow.
    async fn authorize(&self) -> AuthResult<Option<User>>;
}

/// Mocked Google sign-in: waits out a simulated round-trip, then returns
/// a fixed demo account
pub struct MockGoogleAuth {
    delay: Duration,
}

impl MockGoogleAuth {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    fn mock_user() -> User {
        User {
            id: "mock_user_123".to_string(),
            name: "John Wellness".to_string(),
            email: "john@wellness.com".to_string(),
            picture: Some(
                "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face"
                    .to_string(),
            ),
            access_token: Some("mock_access_token_123".to_string()),
        }
    }
}

impl Default for MockGoogleAuth {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

#[async_trait]
impl AuthProvider for MockGoogleAuth {
    async fn authorize(&self) -> AuthResult<Option<User>> {
        tokio::time::sleep(self.delay).await;
        Ok(Some(Self::mock_user()))
    }
}

// ============================================================================
// Store
// ============================================================================

/// Authentication state container
pub struct AuthStore {
    storage: Arc<dyn KeyValueStore>,
    provider: Arc<dyn AuthProvider>,
    state: RwLock<AuthState>,
}

impl AuthStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, provider: Arc<dyn AuthProvider>) -> Self {
        Self {
            storage,
            provider,
            state: RwLock::new(AuthState::Loading),
        }
    }

    /// Current state (cheap clone)
    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    /// Signed-in user, if any
    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.user().cloned()
    }

    /// Hydrate from storage: `SignedIn` when a parseable user blob exists,
    /// `SignedOut` otherwise (a corrupt blob counts as signed out)
    pub async fn load(&self) -> AuthResult<AuthState> {
        let stored = self.storage.get(keys::AUTH_USER).await?;

        let next = match stored {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => AuthState::SignedIn(user),
                Err(e) => {
                    warn!("Discarding unreadable auth blob: {e}");
                    AuthState::SignedOut
                }
            },
            None => AuthState::SignedOut,
        };

        *self.state.write().await = next.clone();
        Ok(next)
    }

    /// Run the provider flow, persist the account, and transition to
    /// `SignedIn`
    ///
    /// The state shows `Loading` while the flow is in flight. `Ok(None)`
    /// means the user cancelled; cancellation and failure both land the
    /// state back on `SignedOut` without writing anything.
    pub async fn sign_in(&self) -> AuthResult<Option<User>> {
        *self.state.write().await = AuthState::Loading;

        match self.authorize_and_persist().await {
            Ok(Some(user)) => {
                *self.state.write().await = AuthState::SignedIn(user.clone());
                info!("Signed in as {}", user.email);
                Ok(Some(user))
            }
            Ok(None) => {
                info!("Sign-in cancelled");
                *self.state.write().await = AuthState::SignedOut;
                Ok(None)
            }
            Err(e) => {
                *self.state.write().await = AuthState::SignedOut;
                Err(e)
            }
        }
    }

    async fn authorize_and_persist(&self) -> AuthResult<Option<User>> {
        let Some(user) = self.provider.authorize().await? else {
            return Ok(None);
        };
        let json = serde_json::to_string(&user)?;
        self.storage.set(keys::AUTH_USER, &json).await?;
        Ok(Some(user))
    }

    /// Clear the persisted account and transition to `SignedOut`
    pub async fn sign_out(&self) -> AuthResult<()> {
        self.storage.remove(keys::AUTH_USER).await?;
        *self.state.write().await = AuthState::SignedOut;
        info!("Signed out");
        Ok(())
    }

    /// Merge a partial profile edit into the signed-in user
    ///
    /// Returns the updated user, or `None` (without touching storage)
    /// when nobody is signed in.
    pub async fn update_profile(&self, update: ProfileUpdate) -> AuthResult<Option<User>> {
        if let Some(name) = update.name.as_deref() {
            validation::validate_display_name(name).map_err(AuthError::Validation)?;
        }
        if let Some(email) = update.email.as_deref() {
            validation::validate_email(email).map_err(AuthError::Validation)?;
        }

        let Some(mut user) = self.current_user().await else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(picture) = update.picture {
            user.picture = Some(picture);
        }

        let json = serde_json::to_string(&user)?;
        self.storage.set(keys::AUTH_USER, &json).await?;

        *self.state.write().await = AuthState::SignedIn(user.clone());
        Ok(Some(user))
    }
}
