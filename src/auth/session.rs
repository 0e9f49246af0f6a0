//! Session lifecycle management
//!
//! The session manager owns the in-memory authenticated-user state and is the
//! only writer of both the persisted token store and the client's
//! Authorization header. Views observe the session through snapshots and a
//! watch subscription, and receive navigation cues over a broadcast channel,
//! so nothing here depends on how the state is rendered.

use crate::api::ApiClient;
use crate::auth::models::{Credentials, LoginResponse, Registration, User};
use crate::auth::token_store::{TokenStore, TOKEN_MAX_AGE_SECS};
use crate::error::Result;
use tokio::sync::{broadcast, watch};
use tracing::error;

/// Where the view layer should take the user next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The login entry point
    Login,
    /// The signed-out landing page
    Landing,
}

/// Coarse session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Startup state, before the first restore has resolved
    Unknown,
    /// No user is signed in
    Anonymous,
    /// A user is signed in
    Authenticated,
}

/// In-memory authentication state observed by the view layer.
///
/// `is_authenticated` is derived from the presence of a user and cannot be
/// set independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<User>,
    resolved: bool,
}

impl Session {
    fn anonymous() -> Self {
        Self {
            user: None,
            resolved: true,
        }
    }

    fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            resolved: true,
        }
    }

    /// The signed-in user, if any
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether a user is signed in
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Lifecycle state of this snapshot
    pub fn state(&self) -> SessionState {
        match (&self.user, self.resolved) {
            (Some(_), _) => SessionState::Authenticated,
            (None, true) => SessionState::Anonymous,
            (None, false) => SessionState::Unknown,
        }
    }
}

/// Owns session state and the sign-in/sign-out/sign-up/restore operations
#[derive(Clone)]
pub struct SessionManager {
    client: ApiClient,
    store: TokenStore,
    session: watch::Sender<Session>,
    routes: broadcast::Sender<Route>,
}

impl SessionManager {
    /// Create a session manager in the `Unknown` startup state
    pub fn new(client: ApiClient, store: TokenStore) -> Self {
        let (session, _) = watch::channel(Session::default());
        let (routes, _) = broadcast::channel(16);
        Self {
            client,
            store,
            session,
            routes,
        }
    }

    /// The API client this session is attached to
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Current session snapshot
    pub fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }

    /// Subscribe to session changes
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }

    /// Subscribe to navigation cues
    pub fn routes(&self) -> broadcast::Receiver<Route> {
        self.routes.subscribe()
    }

    /// Attempt to restore a session from the persisted token.
    ///
    /// Must be invoked exactly once per application start, and awaited before
    /// anything that renders session state; until it resolves the session
    /// reads as `Unknown`.
    ///
    /// With no stored token the session settles `Anonymous` and the view
    /// layer is pointed at the login entry. With a token, the identity
    /// endpoint decides: success authenticates the session; failure is
    /// logged and swallowed, leaving the session `Anonymous` but the token
    /// untouched, so a transient backend outage does not log the user out.
    pub async fn restore(&self) {
        let Some(token) = self.store.read() else {
            self.session.send_replace(Session::anonymous());
            let _ = self.routes.send(Route::Login);
            return;
        };

        // The header always tracks the latest store read
        self.client.set_auth_header(&token).await;

        match self.client.get::<User>("/auth/userInfo", &[]).await {
            Ok(user) => {
                self.session.send_replace(Session::authenticated(user));
            }
            Err(e) => {
                error!("Failed to restore session: {}", e);
                self.session.send_replace(Session::anonymous());
            }
        }
    }

    /// Sign in with email and password.
    ///
    /// On success the token is persisted, the Authorization header installed,
    /// and the session authenticated, in that order. Failures propagate to
    /// the caller so the view can report bad credentials; the session is left
    /// as it was. Navigation after login is the caller's business.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<()> {
        let response: LoginResponse = self.client.post("/auth/login", credentials).await?;

        self.store.save(&response.token, TOKEN_MAX_AGE_SECS)?;
        self.client.set_auth_header(&response.token).await;
        self.session
            .send_replace(Session::authenticated(response.user));

        Ok(())
    }

    /// Sign out, clearing the persisted token and the in-memory user.
    ///
    /// Safe to call with no active session.
    pub async fn sign_out(&self) {
        self.store.clear();
        self.client.clear_auth_header().await;
        self.session.send_replace(Session::anonymous());
        let _ = self.routes.send(Route::Landing);
    }

    /// Register a new account.
    ///
    /// On success the view layer is pointed back at the login entry. Failures
    /// are logged and swallowed rather than surfaced to the caller.
    pub async fn sign_up(&self, registration: &Registration) {
        match self.client.post_unit("/auth/register", registration).await {
            Ok(()) => {
                let _ = self.routes.send(Route::Login);
            }
            Err(e) => {
                error!("Registration failed: {}", e);
            }
        }
    }
}
