//! Movie detail screen rendering.
//!
//! Renders the movie header, credits, overview and gallery summary, then the
//! viewer's review panel and everyone else's reviews.

use crate::api::{MovieDetail, Review};
use crate::i18n::{Locale, Text, text};
use crate::pages::{DetailContent, DetailPage, ReviewDraft, ReviewPanel};

use super::review_list::{ReviewHeading, ReviewListComponent, ReviewListViewContext};
use super::star_rating::{StarInput, StarRating};
use super::text_layout::{truncate_to_height, truncate_to_width, wrap_to_width};

/// Lines of overview shown before truncation.
const OVERVIEW_LINES: usize = 4;

/// Which field of the review form receives keystrokes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormFocus {
    /// Left/right move the star hover, Enter commits.
    #[default]
    Rating,
    /// Characters edit the review text.
    Content,
}

/// Context for rendering the detail screen.
#[derive(Debug, Clone, Copy)]
pub struct DetailViewContext<'a> {
    /// Page state.
    pub page: &'a DetailPage,
    /// Star picker state for the form.
    pub stars: &'a StarInput,
    /// Focused form field.
    pub focus: FormFocus,
    /// Display language.
    pub locale: Locale,
    /// Maximum line width in columns.
    pub max_width: usize,
    /// Maximum number of lines (0 = unlimited).
    pub max_height: usize,
}

/// Component for the detail screen body.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailViewComponent;

impl DetailViewComponent {
    /// Renders the screen body.
    #[must_use]
    pub fn view(ctx: &DetailViewContext<'_>) -> String {
        let DetailContent::Ready { movie, .. } = ctx.page.content() else {
            return format!("  {}\n", text(ctx.locale, Text::MovieNotFound));
        };

        let mut output = Self::render_movie(movie, ctx);
        output.push_str(&Self::render_panel(ctx));
        output.push_str(&Self::render_other_reviews(ctx));
        truncate_to_height(&mut output, ctx.max_height);
        output
    }

    fn render_movie(movie: &MovieDetail, ctx: &DetailViewContext<'_>) -> String {
        let width = ctx.max_width;
        let mut output = String::new();

        let mut header = movie.summary.title.clone();
        if let Some(year) = movie.summary.release_year() {
            header.push_str(&format!(" ({year})"));
        }
        if let Some(runtime) = movie.runtime {
            header.push_str(&format!(" · {runtime} min"));
        }
        if !movie.genres.is_empty() {
            header.push_str(&format!(" · {}", movie.genres.join(", ")));
        }
        output.push_str(&truncate_to_width(&header, width));
        output.push('\n');

        let score = ctx.page.headline_score().unwrap_or_default();
        let label = if ctx.page.my_review().is_some() {
            text(ctx.locale, Text::RatedByYou)
        } else {
            text(ctx.locale, Text::Average)
        };
        output.push_str(&format!(
            "{} {label}\n",
            StarRating::new(score, 2).render_with_score()
        ));

        if let Some(director) = movie.director() {
            let line = format!("{}: {}", text(ctx.locale, Text::Director), director.name);
            output.push_str(&truncate_to_width(&line, width));
            output.push('\n');
        }
        let cast = movie
            .leading_cast()
            .iter()
            .map(|member| {
                member.character.as_deref().map_or_else(
                    || member.name.clone(),
                    |character| format!("{} ({character})", member.name),
                )
            })
            .collect::<Vec<_>>();
        if !cast.is_empty() {
            let line = format!("{}: {}", text(ctx.locale, Text::Cast), cast.join(", "));
            output.push_str(&truncate_to_width(&line, width));
            output.push('\n');
        }

        if let Some(overview) = movie.overview.as_deref().filter(|body| !body.trim().is_empty()) {
            output.push_str(&format!("{}:\n", text(ctx.locale, Text::Overview)));
            let mut wrapped = wrap_to_width(overview, width.saturating_sub(2))
                .into_iter()
                .map(|line| format!("  {line}\n"))
                .collect::<String>();
            truncate_to_height(&mut wrapped, OVERVIEW_LINES);
            output.push_str(&wrapped);
        }

        let stills = movie.gallery().len();
        if stills > 0 {
            output.push_str(&format!("{}: {stills}\n", text(ctx.locale, Text::Stills)));
        }
        output.push_str(&"─".repeat(width.min(60)));
        output.push('\n');
        output
    }

    fn render_panel(ctx: &DetailViewContext<'_>) -> String {
        match ctx.page.review_panel() {
            ReviewPanel::Hidden => String::new(),
            ReviewPanel::Mine(review) => Self::render_mine(review, ctx),
            ReviewPanel::Form { editing, draft } => Self::render_form(editing.is_some(), draft, ctx),
        }
    }

    fn render_mine(review: &Review, ctx: &DetailViewContext<'_>) -> String {
        let mut output = format!(
            "[{}] {}\n",
            text(ctx.locale, Text::MyReview),
            StarRating::new(review.rating, 1).render_with_score()
        );
        if let Some(body) = review.text() {
            output.push_str(&format!(
                "  {}\n",
                truncate_to_width(body, ctx.max_width.saturating_sub(2))
            ));
        }
        output.push_str("  e:edit  d:delete\n");
        output
    }

    fn render_form(editing: bool, draft: &ReviewDraft, ctx: &DetailViewContext<'_>) -> String {
        let heading = if editing {
            text(ctx.locale, Text::EditReview)
        } else {
            text(ctx.locale, Text::RateThisMovie)
        };
        let marker = |focus| if ctx.focus == focus { ">" } else { " " };
        let content = if draft.content().is_empty() {
            text(ctx.locale, Text::ReviewPlaceholder).to_owned()
        } else {
            draft.content().to_owned()
        };
        let cursor = if ctx.focus == FormFocus::Content { "_" } else { "" };
        format!(
            "[{heading}]\n{} {}\n{} {}{cursor}\n",
            marker(FormFocus::Rating),
            ctx.stars.render(1),
            marker(FormFocus::Content),
            truncate_to_width(&content, ctx.max_width.saturating_sub(3)),
        )
    }

    fn render_other_reviews(ctx: &DetailViewContext<'_>) -> String {
        let others = ctx.page.other_reviews();
        let mut output = format!("{} ({})\n", text(ctx.locale, Text::OtherReviews), others.len());
        output.push_str(&ReviewListComponent::view(&ReviewListViewContext {
            reviews: &others,
            heading: ReviewHeading::Author,
            locale: ctx.locale,
            empty: Text::NoOtherReviews,
            max_width: ctx.max_width,
            max_height: 0,
        }));
        output
    }
}
