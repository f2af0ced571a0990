//! Movie detail and review changes.

use std::io::{self, BufRead, Write};

use marquee::pages::detail::{delete_review, submit_review};
use marquee::pages::{
    Answer, Confirm, DeleteOutcome, DetailContent, DetailPage, SessionContext, SubmissionPlan,
    load_detail,
};
use marquee::{ApiError, Backend, MarqueeConfig};
use tracing::{debug, info};

use super::output::{report_notices, write_detail_to, write_line};

/// Asks on stderr and reads the answer from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let mut stderr = io::stderr().lock();
        if write!(stderr, "{prompt} [y/N] ").is_err() || stderr.flush().is_err() {
            return false;
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => is_yes(&line),
            Err(error) => {
                debug!(error = %error, "could not read the confirmation");
                false
            }
        }
    }
}

/// Returns true for `y` or `yes` in any case.
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

async fn open_page(
    backend: Backend<'_>,
    session: &mut SessionContext,
    config: &MarqueeConfig,
) -> Result<DetailPage, ApiError> {
    let movie = config.require_movie_id()?;
    let bundle = load_detail(backend, movie).await;
    let page = DetailPage::open_in(bundle, session, config.locale()?);
    if let DetailContent::NotFound(error) = page.content() {
        return Err(error.clone());
    }
    Ok(page)
}

/// Prints a movie's detail screen.
///
/// # Errors
///
/// Returns the movie request's error when the movie cannot be shown.
pub async fn show(
    config: &MarqueeConfig,
    backend: Backend<'_>,
    session: &mut SessionContext,
) -> Result<(), ApiError> {
    let locale = config.locale()?;
    let page = open_page(backend, session, config).await?;
    report_notices(page.notices())?;
    let mut stdout = io::stdout().lock();
    write_detail_to(&mut stdout, &page, locale)
}

/// Creates, updates or deletes the viewer's review, then prints the movie.
///
/// # Errors
///
/// Returns [`ApiError::InvalidInput`] when the change is refused locally
/// (signed out, no rating, no review to delete), or the service error.
pub async fn mutate(
    config: &MarqueeConfig,
    backend: Backend<'_>,
    session: &mut SessionContext,
) -> Result<(), ApiError> {
    let locale = config.locale()?;
    let mut page = open_page(backend, session, config).await?;

    if config.delete_review {
        let review = page.plan_deletion()?;
        let outcome = if config.yes {
            delete_review(backend.reviews, page.movie_id(), review, &Answer(true)).await?
        } else {
            delete_review(backend.reviews, page.movie_id(), review, &StdinConfirm).await?
        };
        if outcome == DeleteOutcome::Declined {
            info!(review = %review, "deletion declined");
            return write_line("Review kept.");
        }
        page.apply_deletion(Ok(outcome));
    } else {
        if page.my_review().is_some() {
            page.begin_edit()?;
        }
        if let Some(rating) = config.review_rating()? {
            page.draft_mut().set_rating(rating);
        }
        if let Some(content) = config.review.as_deref() {
            page.draft_mut().set_content(content);
        }
        let plan = page.plan_submission()?;
        let verb = match plan {
            SubmissionPlan::Create { .. } => "created",
            SubmissionPlan::Update { .. } => "updated",
        };
        let refetch = submit_review(backend.reviews, page.movie_id(), &plan).await?;
        info!(movie = %page.movie_id(), "review {verb}");
        page.apply_submission(Ok(refetch));
    }

    report_notices(page.notices())?;
    let mut stdout = io::stdout().lock();
    write_detail_to(&mut stdout, &page, locale)
}
