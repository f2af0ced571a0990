//! Movie cards and the scrollable card list used by home and search.
//!
//! A card shows the title, release year and a star widget. The widget shows
//! the viewer's own rating when there is one and the vote average otherwise,
//! with a label saying which.

use crate::api::MovieSummary;
use crate::i18n::{Locale, Text, text};
use crate::pages::{CardScore, RatingLookup};

use super::star_rating::StarRating;
use super::text_layout::truncate_to_width;

/// Lines one card occupies.
pub const CARD_HEIGHT: usize = 2;

/// Context for rendering a single card.
#[derive(Debug, Clone, Copy)]
pub struct MovieCardViewContext<'a> {
    /// Movie to render.
    pub movie: &'a MovieSummary,
    /// Viewer rating or average.
    pub score: CardScore,
    /// Display language.
    pub locale: Locale,
    /// Whether the cursor is on this card.
    pub selected: bool,
    /// Maximum line width in columns.
    pub max_width: usize,
}

/// Renders one movie card.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovieCardComponent;

impl MovieCardComponent {
    /// Renders the card as [`CARD_HEIGHT`] newline-terminated lines.
    #[must_use]
    pub fn view(ctx: &MovieCardViewContext<'_>) -> String {
        let prefix = if ctx.selected { "> " } else { "  " };
        let title = ctx.movie.release_year().map_or_else(
            || ctx.movie.title.clone(),
            |year| format!("{} ({year})", ctx.movie.title),
        );
        let label = if ctx.score.is_own_rating() {
            text(ctx.locale, Text::RatedByYou)
        } else {
            text(ctx.locale, Text::Average)
        };
        let stars = StarRating::new(ctx.score.stars(), 1).render_with_score();
        let content_width = ctx.max_width.saturating_sub(prefix.len());

        format!(
            "{prefix}{}\n  {}\n",
            truncate_to_width(&title, content_width),
            truncate_to_width(&format!("{stars} {label}"), content_width),
        )
    }
}

/// Context for rendering a list of cards with a cursor.
#[derive(Debug, Clone, Copy)]
pub struct MovieListViewContext<'a> {
    /// Movies in display order.
    pub movies: &'a [MovieSummary],
    /// Viewer ratings for the overlay.
    pub ratings: &'a RatingLookup,
    /// Display language.
    pub locale: Locale,
    /// Selected card, if the list has focus.
    pub cursor: Option<usize>,
    /// First card shown.
    pub scroll_offset: usize,
    /// Maximum number of lines to use.
    pub max_height: usize,
    /// Maximum line width in columns.
    pub max_width: usize,
    /// Message rendered when there are no movies.
    pub empty: Text,
}

/// Renders a vertical list of movie cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovieListComponent;

impl MovieListComponent {
    /// Number of whole cards that fit in `max_height` lines.
    #[must_use]
    pub fn visible_cards(max_height: usize) -> usize {
        max_height.checked_div(CARD_HEIGHT).unwrap_or(0).max(1)
    }

    /// Renders the visible window of cards, or the empty-state message.
    #[must_use]
    pub fn view(ctx: &MovieListViewContext<'_>) -> String {
        if ctx.movies.is_empty() {
            return format!("  {}\n", text(ctx.locale, ctx.empty));
        }

        ctx.movies
            .iter()
            .enumerate()
            .skip(ctx.scroll_offset)
            .take(Self::visible_cards(ctx.max_height))
            .map(|(index, movie)| {
                MovieCardComponent::view(&MovieCardViewContext {
                    movie,
                    score: ctx.ratings.card_score(movie),
                    locale: ctx.locale,
                    selected: ctx.cursor == Some(index),
                    max_width: ctx.max_width,
                })
            })
            .collect()
    }
}
