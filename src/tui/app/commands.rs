//! Async commands that talk to the service.
//!
//! Each command reads the stored service context, runs one page load or
//! mutation and answers with a result message. Loads start from a clone of
//! the app's session and hand the resolved session back, so the identity is
//! asked for at most once per change.

use std::any::Any;
use std::time::Instant;

use bubbletea_rs::Cmd;
use camino::Utf8PathBuf;
use tracing::warn;

use crate::api::{AvatarUpload, Credentials, MovieId, ReviewId, SearchQuery, User, UserId};
use crate::pages::detail::{delete_review, submit_review};
use crate::pages::{
    Answer, FollowAction, SessionContext, SubmissionPlan, follow_and_refetch, load_detail,
    load_home, load_profile, read_avatar, search, upload_and_refetch,
};
use crate::tui::messages::AppMsg;
use crate::tui::{TuiContext, tui_context};

use super::Route;

fn message(msg: AppMsg) -> Option<Box<dyn Any + Send>> {
    Some(Box::new(msg) as Box<dyn Any + Send>)
}

fn service() -> Option<&'static TuiContext> {
    let context = tui_context();
    if context.is_none() {
        warn!("service context not configured; request dropped");
    }
    context
}

/// Emits [`AppMsg::Initialized`] to trigger the first load.
pub(super) fn initialized() -> Cmd {
    Box::pin(async { message(AppMsg::Initialized) })
}

/// Loads the home lists and the viewer's ratings.
pub(super) fn home(session: SessionContext) -> Cmd {
    Box::pin(async move {
        let backend = service()?.backend();
        let started = Instant::now();
        let mut resolved = session;
        let signed_in = resolved.resolve(backend.session).await.is_some();
        let bundle = load_home(backend, signed_in).await;
        message(AppMsg::HomeLoaded {
            bundle: Box::new(bundle),
            session: resolved,
            elapsed: started.elapsed(),
        })
    })
}

/// Runs a title search.
pub(super) fn search_movies(route: Route, query: SearchQuery, session: SessionContext) -> Cmd {
    Box::pin(async move {
        let backend = service()?.backend();
        let started = Instant::now();
        let mut resolved = session;
        let signed_in = resolved.resolve(backend.session).await.is_some();
        let result = search(backend, &query, signed_in).await;
        message(AppMsg::SearchLoaded {
            route,
            result: Box::new(result),
            session: resolved,
            elapsed: started.elapsed(),
        })
    })
}

/// Loads identity, movie and reviews for the detail screen.
pub(super) fn detail(movie: MovieId) -> Cmd {
    Box::pin(async move {
        let backend = service()?.backend();
        let started = Instant::now();
        let bundle = load_detail(backend, movie).await;
        message(AppMsg::DetailLoaded {
            bundle: Box::new(bundle),
            elapsed: started.elapsed(),
        })
    })
}

/// Loads every profile resource.
pub(super) fn profile(user: UserId, session: SessionContext) -> Cmd {
    Box::pin(async move {
        let backend = service()?.backend();
        let started = Instant::now();
        let mut resolved = session;
        let viewer = resolved.resolve(backend.session).await.cloned();
        let bundle = load_profile(backend, user, viewer.as_ref()).await;
        message(AppMsg::ProfileLoaded {
            bundle: Box::new(bundle),
            session: resolved,
            elapsed: started.elapsed(),
        })
    })
}

/// Creates or updates the viewer's review, then refetches the list.
pub(super) fn submit(movie: MovieId, plan: SubmissionPlan) -> Cmd {
    Box::pin(async move {
        let backend = service()?.backend();
        let result = submit_review(backend.reviews, movie, &plan).await;
        message(AppMsg::ReviewSubmitted {
            movie,
            result: Box::new(result),
        })
    })
}

/// Deletes a review the user already confirmed, then refetches the list.
pub(super) fn delete(movie: MovieId, review: ReviewId) -> Cmd {
    Box::pin(async move {
        let backend = service()?.backend();
        let result = delete_review(backend.reviews, movie, review, &Answer(true)).await;
        message(AppMsg::ReviewDeleted {
            movie,
            result: Box::new(result),
        })
    })
}

/// Follows or unfollows, then refetches the profile.
pub(super) fn follow(user: UserId, action: FollowAction, viewer: Option<User>) -> Cmd {
    Box::pin(async move {
        let backend = service()?.backend();
        let outcome = follow_and_refetch(backend, user, action, viewer.as_ref()).await;
        message(AppMsg::FollowCompleted {
            user,
            outcome: Box::new(outcome),
        })
    })
}

/// Reads an avatar image from disk.
pub(super) fn read_avatar_file(user: UserId, path: Utf8PathBuf) -> Cmd {
    Box::pin(async move {
        let result = read_avatar(&path).await;
        message(AppMsg::AvatarRead {
            user,
            path,
            result: Box::new(result),
        })
    })
}

/// Uploads an avatar, then refetches the profile.
pub(super) fn upload_avatar(user: UserId, upload: AvatarUpload, viewer: Option<User>) -> Cmd {
    Box::pin(async move {
        let backend = service()?.backend();
        let result = upload_and_refetch(backend, user, &upload, viewer.as_ref()).await;
        message(AppMsg::AvatarUploaded {
            user,
            result: Box::new(result),
        })
    })
}

/// Signs in and resolves the new session.
pub(super) fn login(session: SessionContext, credentials: Credentials) -> Cmd {
    Box::pin(async move {
        let backend = service()?.backend();
        let mut resolved = session;
        let result = resolved.login(backend.session, &credentials).await;
        message(AppMsg::LoginCompleted {
            session: resolved,
            result,
        })
    })
}

/// Signs out and resolves the anonymous session.
pub(super) fn logout(session: SessionContext) -> Cmd {
    Box::pin(async move {
        let backend = service()?.backend();
        let mut resolved = session;
        let result = resolved.logout(backend.session).await;
        message(AppMsg::LogoutCompleted {
            session: resolved,
            result,
        })
    })
}
