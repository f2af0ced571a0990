//! Profiles, following and avatar upload.

use std::io;

use camino::Utf8PathBuf;
use marquee::api::{User, UserId};
use marquee::pages::{
    FollowAction, ProfileContent, ProfilePage, SessionContext, follow_and_refetch, load_profile,
    read_avatar, upload_and_refetch,
};
use marquee::{ApiError, Backend, MarqueeConfig};
use tracing::info;

use super::output::{report_notices, write_line, write_profile_to};

async fn open_page(
    backend: Backend<'_>,
    session: &mut SessionContext,
    user_id: UserId,
    config: &MarqueeConfig,
) -> Result<(ProfilePage, Option<User>), ApiError> {
    let viewer = session.resolve(backend.session).await.cloned();
    let bundle = load_profile(backend, user_id, viewer.as_ref()).await;
    let page = ProfilePage::open_in(bundle, viewer.clone(), config.locale()?);
    if let ProfileContent::NotFound(error) = page.content() {
        return Err(error.clone());
    }
    Ok((page, viewer))
}

fn print(page: &ProfilePage, config: &MarqueeConfig) -> Result<(), ApiError> {
    let locale = config.locale()?;
    report_notices(page.notices())?;
    let mut stdout = io::stdout().lock();
    write_profile_to(&mut stdout, page, locale)
}

/// Prints a user's profile with every panel.
///
/// # Errors
///
/// Returns the identity request's error when the user cannot be shown.
pub async fn show(
    config: &MarqueeConfig,
    backend: Backend<'_>,
    session: &mut SessionContext,
) -> Result<(), ApiError> {
    let (page, _) = open_page(backend, session, config.require_user_id()?, config).await?;
    print(&page, config)
}

/// Follows or unfollows the configured user, then prints the refetched
/// profile.
///
/// Asking for the state the viewer is already in sends nothing.
///
/// # Errors
///
/// Returns [`ApiError::InvalidInput`] when signed out or on the viewer's own
/// profile, or the follow request's error.
pub async fn follow(
    config: &MarqueeConfig,
    backend: Backend<'_>,
    session: &mut SessionContext,
) -> Result<(), ApiError> {
    let user_id = config.require_user_id()?;
    let (mut page, viewer) = open_page(backend, session, user_id, config).await?;
    let wanted = if config.follow {
        FollowAction::Follow
    } else {
        FollowAction::Unfollow
    };
    if page.plan_follow()? != wanted {
        return write_line(match wanted {
            FollowAction::Follow => "Already following.",
            FollowAction::Unfollow => "Not following.",
        });
    }

    page.apply_optimistic_follow(wanted);
    let outcome = follow_and_refetch(backend, user_id, wanted, viewer.as_ref()).await;
    let result = outcome.result.clone();
    page.apply_follow(outcome);
    result?;
    info!(user = %user_id, action = ?wanted, "follow state changed");
    print(&page, config)
}

/// Uploads the configured image as the viewer's avatar.
///
/// The profile is the configured user's, defaulting to the viewer's own.
///
/// # Errors
///
/// Returns [`ApiError::InvalidInput`] when the viewer does not own the
/// profile or the file is not an image, [`ApiError::Io`] when it cannot be
/// read, or the upload error.
pub async fn upload_avatar(
    config: &MarqueeConfig,
    backend: Backend<'_>,
    session: &mut SessionContext,
) -> Result<(), ApiError> {
    let path = Utf8PathBuf::from(config.avatar.as_deref().unwrap_or_default().trim());
    let viewer_id = session
        .resolve(backend.session)
        .await
        .and_then(|viewer| viewer.id);
    let user_id = match (config.user_id, viewer_id) {
        (Some(_), _) => config.require_user_id()?,
        (None, Some(own)) => own,
        (None, None) => return Err(marquee::pages::DraftError::SignedOut.into()),
    };
    let (mut page, viewer) = open_page(backend, session, user_id, config).await?;

    page.begin_avatar(path.clone())?;
    page.apply_avatar_read(&path, Ok(read_avatar(&path).await?));
    let upload = page.plan_upload()?;
    let bundle = upload_and_refetch(backend, user_id, &upload, viewer.as_ref()).await?;
    page.apply_upload(Ok(bundle));
    print(&page, config)
}
