//! Movie detail screen: aggregation, the viewer's review and its form.
//!
//! The page loads identity, movie and reviews in parallel. The viewer's own
//! review is never fetched on its own; it is found in the review list by
//! owner email every time it is needed, so it can never drift from the list.
//! Every mutation is followed by a refetch of the whole list.

use tracing::{info, warn};

use super::error::DraftError;
use super::notice::Notice;
use super::session::SessionContext;
use crate::api::{
    ApiError, Backend, MovieDetail, MovieId, Rating, Review, ReviewGateway, ReviewId,
    ReviewRequest, User,
};
use crate::i18n::{Locale, Text, text};

/// Prompt shown before a review is deleted.
pub const DELETE_PROMPT: &str = "Delete your review of this movie?";

/// Raw results of the three parallel detail requests.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailBundle {
    /// Movie that was requested.
    pub movie_id: MovieId,
    /// Result of the identity request.
    pub identity: Result<Option<User>, ApiError>,
    /// Result of the movie request.
    pub movie: Result<MovieDetail, ApiError>,
    /// Result of the review list request.
    pub reviews: Result<Vec<Review>, ApiError>,
}

/// Issues the identity, movie and review requests in parallel.
pub async fn load_detail(backend: Backend<'_>, movie_id: MovieId) -> DetailBundle {
    let (identity, movie, reviews) = tokio::join!(
        backend.session.current_user(),
        backend.movies.movie_detail(movie_id),
        backend.reviews.movie_reviews(movie_id),
    );
    DetailBundle {
        movie_id,
        identity,
        movie,
        reviews,
    }
}

/// Finds the review written by `viewer`, matching on owner email.
#[must_use]
pub fn find_my_review<'a>(reviews: &'a [Review], viewer: Option<&User>) -> Option<&'a Review> {
    let viewer_account = viewer?;
    reviews
        .iter()
        .find(|review| review.is_written_by(viewer_account))
}

/// Rating and text being composed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    rating: Option<Rating>,
    content: String,
}

impl ReviewDraft {
    /// Starts a draft from an existing review.
    #[must_use]
    pub fn from_review(review: &Review) -> Self {
        Self {
            rating: Rating::from_score(review.rating).ok(),
            content: review.content.clone().unwrap_or_default(),
        }
    }

    /// Selected rating.
    #[must_use]
    pub const fn rating(&self) -> Option<Rating> {
        self.rating
    }

    /// Review text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Selects a rating.
    pub const fn set_rating(&mut self, rating: Rating) {
        self.rating = Some(rating);
    }

    /// Replaces the review text.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Appends one typed character.
    pub fn push_char(&mut self, character: char) {
        self.content.push(character);
    }

    /// Removes the last character.
    pub fn pop_char(&mut self) {
        self.content.pop();
    }

    /// Clears rating and text.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn to_request(&self) -> Result<ReviewRequest, DraftError> {
        let rating = self.rating.ok_or(DraftError::MissingRating)?;
        Ok(ReviewRequest {
            rating,
            content: self.content.trim().to_owned(),
        })
    }
}

/// The request a submission will issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionPlan {
    /// The viewer has no review yet.
    Create {
        /// Movie to review.
        movie: MovieId,
        /// Review body.
        request: ReviewRequest,
    },
    /// The viewer already reviewed the movie.
    Update {
        /// The viewer's review.
        review: ReviewId,
        /// Replacement body.
        request: ReviewRequest,
    },
}

impl SubmissionPlan {
    /// Borrows the request body.
    #[must_use]
    pub const fn request(&self) -> &ReviewRequest {
        match self {
            Self::Create { request, .. } | Self::Update { request, .. } => request,
        }
    }
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    /// Returns true when the user agreed to `prompt`.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// A confirmation answered ahead of time, e.g. by a modal keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer(pub bool);

impl Confirm for Answer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Refetched review list after a mutation.
pub type Refetch = Result<Vec<Review>, ApiError>;

/// Result of a delete attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The user declined; nothing was sent.
    Declined,
    /// The review was deleted and the list refetched.
    Deleted(Refetch),
}

/// Sends a planned submission and refetches the movie's reviews.
///
/// # Errors
///
/// Returns the create or update error. A failing refetch is reported inside
/// the returned [`Refetch`].
pub async fn submit_review(
    reviews: &dyn ReviewGateway,
    movie: MovieId,
    plan: &SubmissionPlan,
) -> Result<Refetch, ApiError> {
    match plan {
        SubmissionPlan::Create { movie: target, request } => {
            reviews.create_review(*target, request).await?;
        }
        SubmissionPlan::Update { review, request } => {
            reviews.update_review(*review, request).await?;
        }
    }
    info!(movie = %movie, "review saved");
    Ok(reviews.movie_reviews(movie).await)
}

/// Deletes `review` once `confirm` agrees, then refetches the movie's reviews.
///
/// # Errors
///
/// Returns the delete error. A failing refetch is reported inside
/// [`DeleteOutcome::Deleted`].
pub async fn delete_review(
    reviews: &dyn ReviewGateway,
    movie: MovieId,
    review: ReviewId,
    confirm: &(dyn Confirm + Sync),
) -> Result<DeleteOutcome, ApiError> {
    if !confirm.confirm(DELETE_PROMPT) {
        return Ok(DeleteOutcome::Declined);
    }
    reviews.delete_review(review).await?;
    info!(movie = %movie, review = %review, "review deleted");
    Ok(DeleteOutcome::Deleted(reviews.movie_reviews(movie).await))
}

/// What the review panel shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReviewPanel<'a> {
    /// Signed out: no panel.
    Hidden,
    /// The viewer's review with edit and delete affordances.
    Mine(&'a Review),
    /// The create form, or the edit form when `editing` is set.
    Form {
        /// Review being edited, if any.
        editing: Option<&'a Review>,
        /// Draft being composed.
        draft: &'a ReviewDraft,
    },
}

/// Loaded page content.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailContent {
    /// The movie could not be loaded.
    NotFound(ApiError),
    /// The movie and its reviews.
    Ready {
        /// Movie payload.
        movie: Box<MovieDetail>,
        /// All reviews of the movie.
        reviews: Vec<Review>,
    },
}

/// State of an open detail screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPage {
    movie_id: MovieId,
    viewer: Option<User>,
    content: DetailContent,
    draft: ReviewDraft,
    editing: bool,
    notices: Vec<Notice>,
    locale: Locale,
}

impl DetailPage {
    /// Builds the page from a finished load and records the identity.
    ///
    /// A failed movie request yields the not-found state whatever happened to
    /// the reviews. A failed review request alone yields the movie with an
    /// empty list and a warning.
    pub fn open(bundle: DetailBundle, session: &mut SessionContext) -> Self {
        Self::open_in(bundle, session, Locale::default())
    }

    /// Like [`DetailPage::open`], with notices written in `locale`.
    pub fn open_in(bundle: DetailBundle, session: &mut SessionContext, locale: Locale) -> Self {
        let DetailBundle {
            movie_id,
            identity,
            movie,
            reviews,
        } = bundle;
        session.apply_identity(identity);
        let mut notices = Vec::new();
        let content = match movie {
            Err(error) => {
                warn!(movie = %movie_id, error = %error, "movie detail unavailable");
                DetailContent::NotFound(error)
            }
            Ok(detail) => {
                let loaded_reviews = reviews.unwrap_or_else(|error| {
                    warn!(movie = %movie_id, error = %error, "reviews unavailable; showing none");
                    notices.push(Notice::warning(format!(
                        "{}: {error}",
                        text(locale, Text::ReviewsUnavailable)
                    )));
                    Vec::new()
                });
                DetailContent::Ready {
                    movie: Box::new(detail),
                    reviews: loaded_reviews,
                }
            }
        };
        Self {
            movie_id,
            viewer: session.viewer().cloned(),
            content,
            draft: ReviewDraft::default(),
            editing: false,
            notices,
            locale,
        }
    }

    /// Movie shown on this page.
    #[must_use]
    pub const fn movie_id(&self) -> MovieId {
        self.movie_id
    }

    /// Signed-in viewer, if any.
    #[must_use]
    pub const fn viewer(&self) -> Option<&User> {
        self.viewer.as_ref()
    }

    /// Borrows the loaded content.
    #[must_use]
    pub const fn content(&self) -> &DetailContent {
        &self.content
    }

    /// Borrows the movie when it loaded.
    #[must_use]
    pub fn movie(&self) -> Option<&MovieDetail> {
        match &self.content {
            DetailContent::Ready { movie, .. } => Some(&**movie),
            DetailContent::NotFound(_) => None,
        }
    }

    /// All reviews of the movie.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        match &self.content {
            DetailContent::Ready { reviews, .. } => reviews.as_slice(),
            DetailContent::NotFound(_) => &[],
        }
    }

    /// The viewer's review, derived from the list.
    #[must_use]
    pub fn my_review(&self) -> Option<&Review> {
        find_my_review(self.reviews(), self.viewer.as_ref())
    }

    /// Reviews by everyone except the viewer.
    #[must_use]
    pub fn other_reviews(&self) -> Vec<&Review> {
        let mine = self.my_review().map(|review| review.id);
        self.reviews()
            .iter()
            .filter(|review| Some(review.id) != mine)
            .collect()
    }

    /// Score for the headline stars: the viewer's rating, else the average.
    #[must_use]
    pub fn headline_score(&self) -> Option<f64> {
        let movie = self.movie()?;
        Some(
            self.my_review()
                .map_or_else(|| movie.summary.average_stars(), |review| review.rating),
        )
    }

    /// Decides what the review panel shows.
    #[must_use]
    pub fn review_panel(&self) -> ReviewPanel<'_> {
        if self.viewer.is_none() || self.movie().is_none() {
            return ReviewPanel::Hidden;
        }
        match self.my_review() {
            Some(review) if self.editing => ReviewPanel::Form {
                editing: Some(review),
                draft: &self.draft,
            },
            Some(review) => ReviewPanel::Mine(review),
            None => ReviewPanel::Form {
                editing: None,
                draft: &self.draft,
            },
        }
    }

    /// Returns true while the viewer edits an existing review.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    /// Opens the edit form pre-filled from the viewer's review.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::NoReview`] when the viewer has no review.
    pub fn begin_edit(&mut self) -> Result<(), DraftError> {
        let draft = self
            .my_review()
            .map(ReviewDraft::from_review)
            .ok_or(DraftError::NoReview)?;
        self.draft = draft;
        self.editing = true;
        Ok(())
    }

    /// Leaves the edit form without saving.
    pub fn cancel_edit(&mut self) {
        self.editing = false;
        self.draft.reset();
    }

    /// Borrows the draft.
    #[must_use]
    pub const fn draft(&self) -> &ReviewDraft {
        &self.draft
    }

    /// Mutably borrows the draft.
    pub const fn draft_mut(&mut self) -> &mut ReviewDraft {
        &mut self.draft
    }

    /// Chooses create or update for the current draft.
    ///
    /// # Errors
    ///
    /// Returns a [`DraftError`] when signed out, when the movie is missing, or
    /// when no rating was chosen. Nothing is sent in those cases.
    pub fn plan_submission(&self) -> Result<SubmissionPlan, DraftError> {
        if self.viewer.is_none() {
            return Err(DraftError::SignedOut);
        }
        if self.movie().is_none() {
            return Err(DraftError::NotLoaded);
        }
        let request = self.draft.to_request()?;
        Ok(match self.my_review() {
            Some(review) => SubmissionPlan::Update {
                review: review.id,
                request,
            },
            None => SubmissionPlan::Create {
                movie: self.movie_id,
                request,
            },
        })
    }

    /// Returns the review a delete would remove.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::NoReview`] when the viewer has no review.
    pub fn plan_deletion(&self) -> Result<ReviewId, DraftError> {
        self.my_review()
            .map(|review| review.id)
            .ok_or(DraftError::NoReview)
    }

    /// Applies the outcome of [`submit_review`].
    pub fn apply_submission(&mut self, result: Result<Refetch, ApiError>) {
        match result {
            Ok(refetch) => {
                self.editing = false;
                self.draft.reset();
                self.notices
                    .push(Notice::info(text(self.locale, Text::ReviewSaved)));
                self.apply_reviews(refetch);
            }
            Err(error) => {
                warn!(movie = %self.movie_id, error = %error, "saving review failed");
                self.notices.push(Notice::failure(
                    text(self.locale, Text::SaveReviewFailed),
                    &error,
                ));
            }
        }
    }

    /// Applies the outcome of [`delete_review`].
    pub fn apply_deletion(&mut self, result: Result<DeleteOutcome, ApiError>) {
        match result {
            Ok(DeleteOutcome::Declined) => {}
            Ok(DeleteOutcome::Deleted(refetch)) => {
                self.editing = false;
                self.draft.reset();
                self.notices
                    .push(Notice::info(text(self.locale, Text::ReviewDeleted)));
                self.apply_reviews(refetch);
            }
            Err(error) => {
                warn!(movie = %self.movie_id, error = %error, "deleting review failed");
                self.notices.push(Notice::failure(
                    text(self.locale, Text::DeleteReviewFailed),
                    &error,
                ));
            }
        }
    }

    /// Replaces the review list with a refetched one.
    ///
    /// A failed refetch keeps the previous list and adds a warning.
    pub fn apply_reviews(&mut self, result: Refetch) {
        match (result, &mut self.content) {
            (Ok(fresh), DetailContent::Ready { reviews, .. }) => *reviews = fresh,
            (Ok(_), DetailContent::NotFound(_)) => {}
            (Err(error), _) => {
                warn!(movie = %self.movie_id, error = %error, "review refetch failed");
                self.notices.push(Notice::warning(format!(
                    "{}: {error}",
                    text(self.locale, Text::ReviewsNotRefreshed)
                )));
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
