//! Session context shared by every screen.
//!
//! The service owns the session; the client only remembers who it resolved
//! the cookie to. Login and logout invalidate that answer so the next screen
//! asks again.

use tracing::{debug, warn};

use crate::api::{ApiError, Credentials, SessionGateway, SignupRequest, User};

/// What the client currently knows about the viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Not asked yet, or invalidated since.
    #[default]
    Unresolved,
    /// The service reported an anonymous session.
    SignedOut,
    /// The service resolved the session to this user.
    SignedIn(User),
}

/// The viewer's identity as passed to each page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    state: SessionState,
}

impl SessionContext {
    /// Creates an unresolved context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SessionState::Unresolved,
        }
    }

    /// Creates a context already resolved to `user`.
    #[must_use]
    pub const fn signed_in(user: User) -> Self {
        Self {
            state: SessionState::SignedIn(user),
        }
    }

    /// Creates a context resolved to an anonymous session.
    #[must_use]
    pub const fn signed_out() -> Self {
        Self {
            state: SessionState::SignedOut,
        }
    }

    /// Borrows the current state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Borrows the signed-in user.
    #[must_use]
    pub const fn viewer(&self) -> Option<&User> {
        match &self.state {
            SessionState::SignedIn(user) => Some(user),
            SessionState::Unresolved | SessionState::SignedOut => None,
        }
    }

    /// Returns true once the identity has been resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self.state, SessionState::Unresolved)
    }

    /// Forgets the resolved identity so the next page resolves it again.
    pub fn invalidate(&mut self) {
        debug!("session context invalidated");
        self.state = SessionState::Unresolved;
    }

    /// Records the outcome of an identity request.
    ///
    /// A failed request is treated as signed out; the failure is logged.
    pub fn apply_identity(&mut self, result: Result<Option<User>, ApiError>) {
        self.state = match result {
            Ok(Some(user)) => SessionState::SignedIn(user),
            Ok(None) => SessionState::SignedOut,
            Err(error) => {
                warn!(error = %error, "identity request failed; treating the session as signed out");
                SessionState::SignedOut
            }
        };
    }

    /// Resolves the identity if it is not known yet and returns the viewer.
    pub async fn resolve(&mut self, gateway: &dyn SessionGateway) -> Option<&User> {
        if !self.is_resolved() {
            let result = gateway.current_user().await;
            self.apply_identity(result);
        }
        self.viewer()
    }

    /// Logs in, then re-resolves the session.
    ///
    /// # Errors
    ///
    /// Returns the gateway error when the service refuses the credentials.
    pub async fn login(
        &mut self,
        gateway: &dyn SessionGateway,
        credentials: &Credentials,
    ) -> Result<User, ApiError> {
        let user = gateway.login(credentials).await?;
        self.invalidate();
        Ok(self.resolve(gateway).await.cloned().unwrap_or(user))
    }

    /// Creates an account. The session is not signed in by signing up.
    ///
    /// # Errors
    ///
    /// Returns the gateway error, e.g. when the email is already registered.
    pub async fn signup(
        gateway: &dyn SessionGateway,
        request: &SignupRequest,
    ) -> Result<String, ApiError> {
        gateway.signup(request).await
    }

    /// Logs out, then re-resolves the session.
    ///
    /// # Errors
    ///
    /// Returns the gateway error when the logout request fails.
    pub async fn logout(&mut self, gateway: &dyn SessionGateway) -> Result<(), ApiError> {
        gateway.logout().await?;
        self.invalidate();
        self.resolve(gateway).await;
        Ok(())
    }
}
