//! Message types for the TUI update loop.
//!
//! Messages represent user actions, async command results and system
//! events. Result messages carry the route they were requested for, so a
//! response that arrives after the user navigated away can be dropped.

use std::time::Duration;

use camino::Utf8PathBuf;

use crate::api::{ApiError, MovieId, User, UserId};
use crate::pages::detail::Refetch;
use crate::pages::{
    AvatarDraft, DeleteOutcome, DetailBundle, FollowOutcome, HomeBundle, ProfileBundle,
    ProfilePanel, SearchResults, SessionContext,
};

use super::app::Route;

/// Messages for the terminal client.
#[derive(Debug, Clone)]
pub enum AppMsg {
    // Navigation
    /// Move the cursor up one item.
    CursorUp,
    /// Move the cursor down one item.
    CursorDown,
    /// Open the item under the cursor.
    Select,
    /// Switch to the next home section.
    NextSection,
    /// Return to the previous screen.
    Back,

    // Routing
    /// Open the search screen with the query field focused.
    OpenSearch,
    /// Open the signed-in viewer's profile.
    OpenMyProfile,
    /// Open the sign-in form.
    OpenLogin,
    /// End the session.
    Logout,
    /// Load the current screen again.
    Reload,

    // Text entry
    /// A printable character was typed.
    InputChar(char),
    /// Delete the last typed character.
    InputBackspace,
    /// Submit the focused text field.
    InputSubmit,
    /// Leave the focused text field.
    InputCancel,
    /// Move to the next text field.
    InputNextField,

    // Movie detail
    /// Open the edit form for the viewer's review.
    BeginEdit,
    /// Ask to delete the viewer's review.
    RequestDelete,
    /// Answer the delete confirmation.
    ConfirmDelete(bool),
    /// Move the star hover one step left.
    StarLeft,
    /// Move the star hover one step right.
    StarRight,
    /// Choose a whole-star rating directly.
    StarSelect(u8),
    /// Commit the hovered rating.
    StarCommit,
    /// Switch between the rating and text fields.
    FocusNext,
    /// Send the review form.
    SubmitReview,

    // Profile
    /// Show or hide a secondary panel.
    TogglePanel(ProfilePanel),
    /// Follow or unfollow the profile owner.
    FollowToggle,
    /// Open the avatar path prompt.
    BeginAvatar,
    /// Upload the selected avatar image.
    UploadAvatar,
    /// Discard the selected avatar image.
    ClearAvatar,
    /// Select the previous calendar day.
    PreviousDay,
    /// Select the next calendar day.
    NextDay,
    /// Move the calendar back one month.
    PreviousMonth,
    /// Move the calendar forward one month.
    NextMonth,

    // Results
    /// The home lists finished loading.
    HomeLoaded {
        /// Loaded sections and ratings.
        bundle: Box<HomeBundle>,
        /// Session as resolved by the load.
        session: SessionContext,
        /// Time the load took.
        elapsed: Duration,
    },
    /// A search finished.
    SearchLoaded {
        /// Route the search was issued for.
        route: Route,
        /// Results, or the failure.
        result: Box<Result<SearchResults, ApiError>>,
        /// Session as resolved by the search.
        session: SessionContext,
        /// Time the search took.
        elapsed: Duration,
    },
    /// The detail resources finished loading.
    DetailLoaded {
        /// Raw results of the parallel requests.
        bundle: Box<DetailBundle>,
        /// Time the load took.
        elapsed: Duration,
    },
    /// The profile resources finished loading.
    ProfileLoaded {
        /// Raw results of the parallel requests.
        bundle: Box<ProfileBundle>,
        /// Session as resolved by the load.
        session: SessionContext,
        /// Time the load took.
        elapsed: Duration,
    },
    /// A review create or update finished.
    ReviewSubmitted {
        /// Reviewed movie.
        movie: MovieId,
        /// Refetched list, or the save failure.
        result: Box<Result<Refetch, ApiError>>,
    },
    /// A review delete finished.
    ReviewDeleted {
        /// Reviewed movie.
        movie: MovieId,
        /// Outcome, or the delete failure.
        result: Box<Result<DeleteOutcome, ApiError>>,
    },
    /// A follow or unfollow finished and the profile was refetched.
    FollowCompleted {
        /// Profile owner.
        user: UserId,
        /// Action result and refetched bundle.
        outcome: Box<FollowOutcome>,
    },
    /// An avatar file was read.
    AvatarRead {
        /// Profile owner.
        user: UserId,
        /// File the read was issued for.
        path: Utf8PathBuf,
        /// Prepared upload, or the read failure.
        result: Box<Result<AvatarDraft, ApiError>>,
    },
    /// An avatar upload finished.
    AvatarUploaded {
        /// Profile owner.
        user: UserId,
        /// Refetched profile, or the upload failure.
        result: Box<Result<ProfileBundle, ApiError>>,
    },
    /// A sign-in attempt finished.
    LoginCompleted {
        /// Session after the attempt.
        session: SessionContext,
        /// Signed-in user, or the failure.
        result: Result<User, ApiError>,
    },
    /// A sign-out attempt finished.
    LogoutCompleted {
        /// Session after the attempt.
        session: SessionContext,
        /// Failure, if any.
        result: Result<(), ApiError>,
    },

    // Application lifecycle
    /// Startup message that triggers the first load.
    Initialized,
    /// Remove the oldest notice.
    DismissNotice,
    /// Quit the application.
    Quit,
    /// Toggle the help overlay.
    ToggleHelp,
    /// Terminal window was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

impl AppMsg {
    /// Returns true for cursor and screen navigation messages.
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::CursorUp | Self::CursorDown | Self::Select | Self::NextSection | Self::Back
        )
    }

    /// Returns true for messages that change the route or session.
    #[must_use]
    pub const fn is_routing(&self) -> bool {
        matches!(
            self,
            Self::OpenSearch | Self::OpenMyProfile | Self::OpenLogin | Self::Logout | Self::Reload
        )
    }

    /// Returns true for text entry messages.
    #[must_use]
    pub const fn is_text_entry(&self) -> bool {
        matches!(
            self,
            Self::InputChar(_)
                | Self::InputBackspace
                | Self::InputSubmit
                | Self::InputCancel
                | Self::InputNextField
        )
    }

    /// Returns true for movie detail actions.
    #[must_use]
    pub const fn is_detail(&self) -> bool {
        matches!(
            self,
            Self::BeginEdit
                | Self::RequestDelete
                | Self::ConfirmDelete(_)
                | Self::StarLeft
                | Self::StarRight
                | Self::StarSelect(_)
                | Self::StarCommit
                | Self::FocusNext
                | Self::SubmitReview
        )
    }

    /// Returns true for profile actions.
    #[must_use]
    pub const fn is_profile(&self) -> bool {
        matches!(
            self,
            Self::TogglePanel(_)
                | Self::FollowToggle
                | Self::BeginAvatar
                | Self::UploadAvatar
                | Self::ClearAvatar
                | Self::PreviousDay
                | Self::NextDay
                | Self::PreviousMonth
                | Self::NextMonth
        )
    }

    /// Returns true for async command results.
    #[must_use]
    pub const fn is_result(&self) -> bool {
        matches!(
            self,
            Self::HomeLoaded { .. }
                | Self::SearchLoaded { .. }
                | Self::DetailLoaded { .. }
                | Self::ProfileLoaded { .. }
                | Self::ReviewSubmitted { .. }
                | Self::ReviewDeleted { .. }
                | Self::FollowCompleted { .. }
                | Self::AvatarRead { .. }
                | Self::AvatarUploaded { .. }
                | Self::LoginCompleted { .. }
                | Self::LogoutCompleted { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::AppMsg;
    use crate::pages::ProfilePanel;

    #[rstest]
    #[case::navigation(AppMsg::Select, true, false)]
    #[case::star(AppMsg::StarLeft, false, true)]
    #[case::quit(AppMsg::Quit, false, false)]
    fn categories_do_not_overlap(
        #[case] msg: AppMsg,
        #[case] navigation: bool,
        #[case] detail: bool,
    ) {
        assert_eq!(msg.is_navigation(), navigation);
        assert_eq!(msg.is_detail(), detail);
        assert!(!msg.is_result());
    }

    #[test]
    fn panel_toggle_is_a_profile_action() {
        assert!(AppMsg::TogglePanel(ProfilePanel::Calendar).is_profile());
        assert!(!AppMsg::InputChar('x').is_profile());
        assert!(AppMsg::InputChar('x').is_text_entry());
    }
}
