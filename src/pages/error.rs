//! Local checks that stop an action before any request is sent.

use thiserror::Error;

use crate::api::ApiError;

/// Reasons a page action was refused locally.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DraftError {
    /// A review was submitted without choosing a rating.
    #[error("please choose a rating before submitting")]
    MissingRating,
    /// The action needs a signed-in viewer.
    #[error("sign in to continue")]
    SignedOut,
    /// The viewer tried to follow or unfollow their own profile.
    #[error("you cannot follow your own profile")]
    SelfFollow,
    /// The viewer tried to change another user's avatar.
    #[error("only the profile owner can change the avatar")]
    NotProfileOwner,
    /// No avatar image has been read yet.
    #[error("choose an image file first")]
    NoAvatarSelected,
    /// The page content is not loaded, so there is nothing to act on.
    #[error("the page has not finished loading")]
    NotLoaded,
    /// There is no existing review to edit or delete.
    #[error("you have not reviewed this movie")]
    NoReview,
}

impl From<DraftError> for ApiError {
    fn from(error: DraftError) -> Self {
        Self::InvalidInput {
            message: error.to_string(),
        }
    }
}
