/**
 * Session Manager
 *
 * Owns the authenticated identity and the persisted bearer credential.
 *
 * State machine:
 *
 *   Loading --restore--> Authenticated | Unauthenticated
 *   Unauthenticated --login/register--> Authenticated
 *   Authenticated --logout / rejected credential--> Unauthenticated
 *
 * `Loading` exists only between construction and the first `restore`.
 */

use crate::client::api::ApiClient;
use crate::client::credential_store::CredentialStore;
use crate::client::error::{ClientError, Result};
use crate::client::types::Credential;
use crate::shared::marketplace::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};
use crate::shared::SharedError;

/// Message shown when a login fails without backend detail
pub const LOGIN_FALLBACK: &str = "Login failed";
/// Message shown when a registration fails without backend detail
pub const REGISTER_FALLBACK: &str = "Registration failed";

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    credential: Credential,
    identity: UserProfile,
}

impl Session {
    pub fn new(credential: Credential, identity: UserProfile) -> Self {
        Self { credential, identity }
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn identity(&self) -> &UserProfile {
        &self.identity
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Startup, before the persisted credential has been checked
    Loading,
    Unauthenticated,
    Authenticated(Session),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// Login, registration, restore and logout over a credential store
pub struct SessionManager<S: CredentialStore> {
    api: ApiClient,
    store: S,
    state: SessionState,
}

impl<S: CredentialStore> SessionManager<S> {
    pub fn new(api: ApiClient, store: S) -> Self {
        Self {
            api,
            store,
            state: SessionState::Loading,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.state.session()
    }

    /// The current session, or `NotAuthenticated`
    pub fn require_session(&self) -> Result<&Session> {
        self.session().ok_or(ClientError::NotAuthenticated)
    }

    /// Resume the persisted session, if any.
    ///
    /// Never fails: a missing, unreadable or rejected credential ends in
    /// `Unauthenticated`, and a credential that did not yield an identity is
    /// removed from the store. Only the first call does any work.
    pub async fn restore(&mut self) -> &SessionState {
        if !self.state.is_loading() {
            return &self.state;
        }

        let credential = match self.store.load().await {
            Ok(Some(credential)) => credential,
            Ok(None) => {
                tracing::debug!("[SESSION] No stored credential");
                self.state = SessionState::Unauthenticated;
                return &self.state;
            }
            Err(e) => {
                tracing::warn!("[SESSION] Could not read stored credential: {}", e);
                self.state = SessionState::Unauthenticated;
                return &self.state;
            }
        };

        tracing::debug!("[SESSION] Checking stored credential {}", credential);
        match self.api.me(&credential).await {
            Ok(identity) => {
                tracing::info!("[SESSION] Restored session for {}", identity.username);
                self.state = SessionState::Authenticated(Session::new(credential, identity));
            }
            Err(e) => {
                tracing::warn!("[SESSION] Stored credential not usable, clearing it: {}", e);
                self.forget_credential().await;
                self.state = SessionState::Unauthenticated;
            }
        }

        &self.state
    }

    /// Sign in. On failure the state is left as it was.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserProfile> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(SharedError::validation("email", "Email and password are required").into());
        }

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.api.login(&request).await {
            Ok(response) => Ok(self.establish(response).await),
            Err(e) => {
                tracing::warn!("[SESSION] Login failed: {}", e);
                Err(e)
            }
        }
    }

    /// Create an account and sign in to it. On failure the state is left as it was.
    pub async fn register(&mut self, email: &str, username: &str, password: &str) -> Result<UserProfile> {
        let email = email.trim();
        let username = username.trim();
        if username.is_empty() {
            return Err(SharedError::validation("username", "Username is required").into());
        }
        if email.is_empty() || password.is_empty() {
            return Err(SharedError::validation("email", "Email and password are required").into());
        }
        if !email.contains('@') {
            return Err(SharedError::validation("email", "Please enter a valid email address").into());
        }

        let request = RegisterRequest {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        };

        match self.api.register(&request).await {
            Ok(response) => Ok(self.establish(response).await),
            Err(e) => {
                tracing::warn!("[SESSION] Registration failed: {}", e);
                Err(e)
            }
        }
    }

    /// Drop the session and the stored credential. Cannot fail.
    pub async fn logout(&mut self) {
        if let Some(session) = self.session() {
            tracing::info!("[SESSION] Logging out {}", session.identity().username);
        }
        self.forget_credential().await;
        self.state = SessionState::Unauthenticated;
    }

    /// Re-fetch the identity, e.g. after a swap moved points around.
    pub async fn refresh(&mut self) -> Result<UserProfile> {
        let credential = self.require_session()?.credential().clone();
        let result = self.api.me(&credential).await;
        let identity = self.observe(result).await?;

        if let SessionState::Authenticated(session) = &mut self.state {
            session.identity = identity.clone();
        }
        Ok(identity)
    }

    /// Pass an API result through, ending the session if the backend
    /// rejected the credential.
    pub async fn observe<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            self.note_error(e).await;
        }
        result
    }

    /// End the session if `error` means the credential was refused
    pub async fn note_error(&mut self, error: &ClientError) {
        if error.is_credential_rejected() && self.state.is_authenticated() {
            tracing::warn!("[SESSION] Credential rejected, ending session: {}", error);
            self.forget_credential().await;
            self.state = SessionState::Unauthenticated;
        }
    }

    /// `note_error` for each of several independent failures
    pub async fn note_errors<'e>(&mut self, errors: impl IntoIterator<Item = &'e ClientError>) {
        for error in errors {
            self.note_error(error).await;
        }
    }

    async fn establish(&mut self, response: AuthResponse) -> UserProfile {
        let credential = Credential::new(response.token);
        let identity = response.user;

        // An unwritable store still gives a working session for this run.
        if let Err(e) = self.store.save(&credential).await {
            tracing::warn!("[SESSION] Could not persist credential: {}", e);
        }

        tracing::info!("[SESSION] Signed in as {}", identity.username);
        self.state = SessionState::Authenticated(Session::new(credential, identity.clone()));
        identity
    }

    async fn forget_credential(&self) {
        if let Err(e) = self.store.clear().await {
            tracing::warn!("[SESSION] Could not clear stored credential: {}", e);
        }
    }
}
