//! Home lists and title search.

use std::io;

use marquee::pages::{SessionContext, load_home, search};
use marquee::{ApiError, Backend, MarqueeConfig};
use tracing::warn;

use super::output::{write_home_to, write_search_to};

/// Prints every home section; a failing section prints its error in place.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] for an unknown locale, or
/// [`ApiError::Io`] when stdout cannot be written.
pub async fn home(
    config: &MarqueeConfig,
    backend: Backend<'_>,
    session: &mut SessionContext,
) -> Result<(), ApiError> {
    let locale = config.locale()?;
    let signed_in = session.resolve(backend.session).await.is_some();
    let bundle = load_home(backend, signed_in).await;
    if bundle.all_failed() {
        warn!("every home section failed to load");
    }
    let mut stdout = io::stdout().lock();
    write_home_to(&mut stdout, &bundle, locale)
}

/// Prints the results of a title search.
///
/// # Errors
///
/// Returns [`ApiError::InvalidInput`] for a blank query, or the search error.
pub async fn run_search(
    config: &MarqueeConfig,
    backend: Backend<'_>,
    session: &mut SessionContext,
) -> Result<(), ApiError> {
    let locale = config.locale()?;
    let query = config.require_query()?;
    let signed_in = session.resolve(backend.session).await.is_some();
    let results = search(backend, &query, signed_in).await?;
    let mut stdout = io::stdout().lock();
    write_search_to(&mut stdout, &results, locale)
}
