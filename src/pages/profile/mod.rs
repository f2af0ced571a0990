//! Profile screen: identity, follow graph, rated movies and calendar.
//!
//! The whole bundle is refetched after every mutating action. Follow and
//! unfollow update the counts optimistically first; the refetched bundle
//! always replaces them.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::avatar::{AvatarDraft, AvatarPreview};
use super::error::DraftError;
use super::loadable::Loadable;
use super::notice::Notice;
use crate::api::{
    ApiError, AvatarUpload, Backend, CalendarDay, CalendarIndex, FollowCounts, Review, User,
    UserId,
};
use crate::i18n::{Locale, Text, text};

/// Raw results of the parallel profile requests.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileBundle {
    /// Profile that was requested.
    pub user_id: UserId,
    /// Identity of the profile owner.
    pub user: Result<User, ApiError>,
    /// Follower and followee totals.
    pub counts: Loadable<FollowCounts>,
    /// Whether the viewer follows the owner.
    pub is_following: Loadable<bool>,
    /// Users following the owner.
    pub followers: Loadable<Vec<User>>,
    /// Users the owner follows.
    pub following: Loadable<Vec<User>>,
    /// Movies the owner rated.
    pub ratings: Loadable<Vec<Review>>,
    /// Ratings calendar.
    pub calendar: Loadable<CalendarIndex>,
}

/// Loads every profile resource in parallel.
///
/// The follow-state request is skipped for anonymous viewers and for the
/// owner looking at their own profile.
pub async fn load_profile(
    backend: Backend<'_>,
    user_id: UserId,
    viewer: Option<&User>,
) -> ProfileBundle {
    let needs_follow_state = viewer.is_some_and(|account| account.id != Some(user_id));
    let follow_state = async {
        if needs_follow_state {
            backend.social.is_following(user_id).await
        } else {
            Ok(false)
        }
    };
    let (user, counts, is_following, followers, following, ratings, calendar) = tokio::join!(
        backend.profiles.user(user_id),
        backend.social.follow_counts(user_id),
        follow_state,
        backend.social.followers(user_id),
        backend.social.following(user_id),
        backend.profiles.user_reviews(user_id),
        backend.profiles.ratings_calendar(user_id),
    );
    ProfileBundle {
        user_id,
        user,
        counts: Loadable::from_result(counts),
        is_following: Loadable::from_result(is_following),
        followers: Loadable::from_result(followers),
        following: Loadable::from_result(following),
        ratings: Loadable::from_result(ratings),
        calendar: Loadable::from_result(calendar),
    }
}

/// Follow or unfollow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowAction {
    /// Start following.
    Follow,
    /// Stop following.
    Unfollow,
}

/// Result of a follow action followed by a full refetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowOutcome {
    /// What was attempted.
    pub action: FollowAction,
    /// Result of the follow or unfollow request.
    pub result: Result<(), ApiError>,
    /// The refetched profile.
    pub bundle: ProfileBundle,
}

/// Sends a follow or unfollow, then refetches the bundle whatever happened.
pub async fn follow_and_refetch(
    backend: Backend<'_>,
    user_id: UserId,
    action: FollowAction,
    viewer: Option<&User>,
) -> FollowOutcome {
    let result = match action {
        FollowAction::Follow => backend.social.follow(user_id).await,
        FollowAction::Unfollow => backend.social.unfollow(user_id).await,
    };
    if let Err(error) = &result {
        warn!(user = %user_id, ?action, error = %error, "follow action failed");
    }
    let bundle = load_profile(backend, user_id, viewer).await;
    FollowOutcome {
        action,
        result,
        bundle,
    }
}

/// Uploads an avatar, then refetches the bundle.
///
/// # Errors
///
/// Returns the upload error; no refetch happens in that case.
pub async fn upload_and_refetch(
    backend: Backend<'_>,
    user_id: UserId,
    upload: &AvatarUpload,
    viewer: Option<&User>,
) -> Result<ProfileBundle, ApiError> {
    backend.profiles.upload_avatar(user_id, upload).await?;
    info!(user = %user_id, "avatar uploaded");
    Ok(load_profile(backend, user_id, viewer).await)
}

/// Secondary panel selection; exactly one is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfilePanel {
    /// No secondary panel.
    #[default]
    Hidden,
    /// Follower list.
    Followers,
    /// Followee list.
    Following,
    /// Rated movies.
    Ratings,
    /// Ratings calendar.
    Calendar,
}

/// Loaded profile resources.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileData {
    /// Profile owner.
    pub user: User,
    /// Follower and followee totals.
    pub counts: Loadable<FollowCounts>,
    /// Whether the viewer follows the owner.
    pub is_following: Loadable<bool>,
    /// Users following the owner.
    pub followers: Loadable<Vec<User>>,
    /// Users the owner follows.
    pub following: Loadable<Vec<User>>,
    /// Movies the owner rated.
    pub ratings: Loadable<Vec<Review>>,
    /// Ratings calendar.
    pub calendar: Loadable<CalendarIndex>,
}

/// Profile content, or the reason there is none.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileContent {
    /// The owner could not be loaded.
    NotFound(ApiError),
    /// The loaded resources.
    Ready(Box<ProfileData>),
}

impl ProfileContent {
    fn from_bundle(bundle: ProfileBundle) -> Self {
        match bundle.user {
            Err(error) => {
                warn!(user = %bundle.user_id, error = %error, "profile owner unavailable");
                Self::NotFound(error)
            }
            Ok(user) => Self::Ready(Box::new(ProfileData {
                user,
                counts: bundle.counts,
                is_following: bundle.is_following,
                followers: bundle.followers,
                following: bundle.following,
                ratings: bundle.ratings,
                calendar: bundle.calendar,
            })),
        }
    }
}

/// State of an open profile screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePage {
    user_id: UserId,
    viewer: Option<User>,
    content: ProfileContent,
    panel: ProfilePanel,
    selected_date: Option<NaiveDate>,
    avatar: AvatarPreview,
    notices: Vec<Notice>,
    locale: Locale,
}

impl ProfilePage {
    /// Builds the page from a finished load.
    #[must_use]
    pub fn open(bundle: ProfileBundle, viewer: Option<User>) -> Self {
        Self::open_in(bundle, viewer, Locale::default())
    }

    /// Like [`ProfilePage::open`], with notices written in `locale`.
    #[must_use]
    pub fn open_in(bundle: ProfileBundle, viewer: Option<User>, locale: Locale) -> Self {
        let user_id = bundle.user_id;
        let content = ProfileContent::from_bundle(bundle);
        let mut page = Self {
            user_id,
            viewer,
            content,
            panel: ProfilePanel::Hidden,
            selected_date: None,
            avatar: AvatarPreview::Empty,
            notices: Vec::new(),
            locale,
        };
        page.selected_date = page.calendar().and_then(CalendarIndex::latest_date);
        page
    }

    /// Replaces the content with a refetched bundle, keeping view choices.
    pub fn refresh(&mut self, bundle: ProfileBundle) {
        self.content = ProfileContent::from_bundle(bundle);
        if self.selected_date.is_none() {
            self.selected_date = self.calendar().and_then(CalendarIndex::latest_date);
        }
    }

    /// Profile owner's identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Signed-in viewer, if any.
    #[must_use]
    pub const fn viewer(&self) -> Option<&User> {
        self.viewer.as_ref()
    }

    /// Borrows the content.
    #[must_use]
    pub const fn content(&self) -> &ProfileContent {
        &self.content
    }

    /// Borrows the loaded resources.
    #[must_use]
    pub fn data(&self) -> Option<&ProfileData> {
        match &self.content {
            ProfileContent::Ready(data) => Some(&**data),
            ProfileContent::NotFound(_) => None,
        }
    }

    /// Follow totals, when loaded.
    #[must_use]
    pub fn counts(&self) -> Option<FollowCounts> {
        self.data()?.counts.loaded().copied()
    }

    /// Whether the viewer follows the owner.
    #[must_use]
    pub fn is_following(&self) -> bool {
        self.data()
            .and_then(|data| data.is_following.loaded().copied())
            .unwrap_or(false)
    }

    /// Returns true when the viewer owns this profile.
    #[must_use]
    pub fn is_owner(&self) -> bool {
        let Some(viewer) = self.viewer.as_ref() else {
            return false;
        };
        if viewer.id == Some(self.user_id) {
            return true;
        }
        self.data()
            .is_some_and(|data| viewer.is_same_account(&data.user))
    }

    /// Active secondary panel.
    #[must_use]
    pub const fn panel(&self) -> ProfilePanel {
        self.panel
    }

    /// Selects `panel`, or closes it when it is already active.
    pub fn toggle_panel(&mut self, panel: ProfilePanel) {
        self.panel = if self.panel == panel {
            ProfilePanel::Hidden
        } else {
            panel
        };
    }

    /// Checks that the viewer may follow or unfollow this profile.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::SignedOut`] for anonymous viewers,
    /// [`DraftError::SelfFollow`] on the viewer's own profile and
    /// [`DraftError::NotLoaded`] when the owner did not load.
    pub fn plan_follow(&self) -> Result<FollowAction, DraftError> {
        if self.viewer.is_none() {
            return Err(DraftError::SignedOut);
        }
        if self.data().is_none() {
            return Err(DraftError::NotLoaded);
        }
        if self.is_owner() {
            return Err(DraftError::SelfFollow);
        }
        Ok(if self.is_following() {
            FollowAction::Unfollow
        } else {
            FollowAction::Follow
        })
    }

    /// Adjusts the counts and flag before the request completes.
    pub fn apply_optimistic_follow(&mut self, action: FollowAction) {
        let ProfileContent::Ready(data) = &mut self.content else {
            return;
        };
        if let Loadable::Loaded(counts) = &mut data.counts {
            counts.followers = match action {
                FollowAction::Follow => counts.followers.saturating_add(1),
                FollowAction::Unfollow => counts.followers.saturating_sub(1),
            };
        }
        data.is_following = Loadable::Loaded(action == FollowAction::Follow);
    }

    /// Applies the refetched bundle, notifying when the action failed.
    pub fn apply_follow(&mut self, outcome: FollowOutcome) {
        if let Err(error) = &outcome.result {
            let label = match outcome.action {
                FollowAction::Follow => Text::FollowFailed,
                FollowAction::Unfollow => Text::UnfollowFailed,
            };
            self.notices
                .push(Notice::failure(text(self.locale, label), error));
        }
        self.refresh(outcome.bundle);
    }

    /// Selected calendar date.
    #[must_use]
    pub const fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// Selects a calendar date.
    pub const fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
    }

    /// Borrows the calendar index, when loaded.
    #[must_use]
    pub fn calendar(&self) -> Option<&CalendarIndex> {
        self.data()?.calendar.loaded()
    }

    /// Reviews written on the selected date; empty when none.
    #[must_use]
    pub fn reviews_on_selected(&self) -> &[Review] {
        match (self.calendar(), self.selected_date) {
            (Some(calendar), Some(date)) => calendar.reviews_on(date),
            _ => &[],
        }
    }

    /// Month view around the selected date.
    #[must_use]
    pub fn month_view(&self, year: i32, month: u32) -> Vec<CalendarDay> {
        self.calendar()
            .map(|calendar| calendar.month(year, month))
            .unwrap_or_default()
    }

    /// Avatar selection state.
    #[must_use]
    pub const fn avatar(&self) -> &AvatarPreview {
        &self.avatar
    }

    /// Starts an avatar selection for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::NotProfileOwner`] unless the viewer owns the
    /// profile.
    pub fn begin_avatar(&mut self, path: camino::Utf8PathBuf) -> Result<(), DraftError> {
        if !self.is_owner() {
            return Err(DraftError::NotProfileOwner);
        }
        self.avatar = AvatarPreview::Reading(path);
        Ok(())
    }

    /// Applies a finished read of `path`.
    ///
    /// Only the read for the file currently being read is applied; a read
    /// for a file the owner has since replaced or cleared is dropped.
    pub fn apply_avatar_read(
        &mut self,
        path: &camino::Utf8Path,
        result: Result<AvatarDraft, ApiError>,
    ) {
        let still_reading =
            matches!(&self.avatar, AvatarPreview::Reading(pending) if pending.as_path() == path);
        if !still_reading {
            debug!(path = %path, "dropping avatar read for a file no longer selected");
            return;
        }
        self.avatar = match result {
            Ok(draft) => AvatarPreview::Ready(draft),
            Err(error) => AvatarPreview::Failed {
                path: path.to_owned(),
                message: error.to_string(),
            },
        };
    }

    /// Clears the avatar selection.
    pub fn clear_avatar(&mut self) {
        self.avatar = AvatarPreview::Empty;
    }

    /// Returns the payload to upload.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::NotProfileOwner`] for other viewers and
    /// [`DraftError::NoAvatarSelected`] when no image is ready.
    pub fn plan_upload(&self) -> Result<AvatarUpload, DraftError> {
        if !self.is_owner() {
            return Err(DraftError::NotProfileOwner);
        }
        self.avatar
            .draft()
            .map(|draft| draft.upload().clone())
            .ok_or(DraftError::NoAvatarSelected)
    }

    /// Applies the outcome of [`upload_and_refetch`].
    pub fn apply_upload(&mut self, result: Result<ProfileBundle, ApiError>) {
        match result {
            Ok(bundle) => {
                self.avatar = AvatarPreview::Empty;
                self.notices
                    .push(Notice::info(text(self.locale, Text::AvatarUpdated)));
                self.refresh(bundle);
            }
            Err(error) => {
                warn!(user = %self.user_id, error = %error, "avatar upload failed");
                self.notices.push(Notice::failure(
                    text(self.locale, Text::AvatarUploadFailed),
                    &error,
                ));
            }
        }
    }

    /// Adds a notice, e.g. for a locally refused action.
    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Pending notices, oldest first.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Removes and returns the oldest notice.
    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        if self.notices.is_empty() {
            None
        } else {
            Some(self.notices.remove(0))
        }
    }
}
