//! Signing in, signing up and signing out.

use marquee::pages::SessionContext;
use marquee::{ApiError, Backend, MarqueeConfig};
use tracing::info;

use super::output::write_line;

/// Signs in with the configured credentials, if any.
///
/// # Errors
///
/// Returns [`ApiError::InvalidInput`] for blank credentials, or the service
/// error when the sign-in is refused.
pub async fn sign_in(
    config: &MarqueeConfig,
    backend: Backend<'_>,
    session: &mut SessionContext,
) -> Result<(), ApiError> {
    let Some(credentials) = config.credentials()? else {
        return Ok(());
    };
    let user = session.login(backend.session, &credentials).await?;
    info!(user = user.display_name(), "signed in");
    Ok(())
}

/// Creates an account.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] when email, password or nickname is
/// missing, or the service error when the account is refused.
pub async fn signup(config: &MarqueeConfig, backend: Backend<'_>) -> Result<(), ApiError> {
    let request = config.signup_request()?;
    let message = SessionContext::signup(backend.session, &request).await?;
    write_line(&message)
}

/// Ends the session.
///
/// # Errors
///
/// Returns the service error when the logout request fails.
pub async fn logout(backend: Backend<'_>, session: &mut SessionContext) -> Result<(), ApiError> {
    session.logout(backend.session).await?;
    write_line("Signed out.")
}
