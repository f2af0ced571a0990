//! Review list component for the detail and profile screens.
//!
//! Each review renders as a header line (author or movie title, stars and
//! score) followed by its text when it has any.

use crate::api::Review;
use crate::i18n::{Locale, Text, text};

use super::star_rating::StarRating;
use super::text_layout::{truncate_to_height, truncate_to_width};

/// What the header line names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewHeading {
    /// The author, for a movie's review list.
    Author,
    /// The movie title, for a user's rated movies.
    Movie,
}

/// Context for rendering a list of reviews.
#[derive(Debug, Clone, Copy)]
pub struct ReviewListViewContext<'a> {
    /// Reviews in display order.
    pub reviews: &'a [&'a Review],
    /// What each header names.
    pub heading: ReviewHeading,
    /// Display language.
    pub locale: Locale,
    /// Message rendered when the list is empty.
    pub empty: Text,
    /// Maximum line width in columns.
    pub max_width: usize,
    /// Maximum number of lines (0 = unlimited).
    pub max_height: usize,
}

/// Component for rendering reviews.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewListComponent;

impl ReviewListComponent {
    /// Renders the reviews, or the empty-state message.
    #[must_use]
    pub fn view(ctx: &ReviewListViewContext<'_>) -> String {
        if ctx.reviews.is_empty() {
            return format!("  {}\n", text(ctx.locale, ctx.empty));
        }

        let mut output = String::new();
        for review in ctx.reviews {
            output.push_str(&Self::format_review(review, ctx));
        }
        truncate_to_height(&mut output, ctx.max_height);
        output
    }

    fn format_review(review: &Review, ctx: &ReviewListViewContext<'_>) -> String {
        let name = match ctx.heading {
            ReviewHeading::Author => review.author_name(),
            ReviewHeading::Movie => review.movie_title.as_deref().unwrap_or("?"),
        };
        let stars = StarRating::new(review.rating, 1).render_with_score();
        let header = truncate_to_width(&format!("[{name}] {stars}"), ctx.max_width);
        review.text().map_or_else(
            || format!("  {header}\n"),
            |body| {
                let first_line = body.lines().next().unwrap_or_default();
                let width = ctx.max_width.saturating_sub(4);
                format!("  {header}\n    {}\n", truncate_to_width(first_line, width))
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ReviewHeading, ReviewListComponent, ReviewListViewContext};
    use crate::api::models::test_support::{movie_review, review};
    use crate::api::{MovieId, Review};
    use crate::i18n::{Locale, Text};

    fn render(reviews: &[&Review], heading: ReviewHeading, locale: Locale) -> String {
        ReviewListComponent::view(&ReviewListViewContext {
            reviews,
            heading,
            locale,
            empty: Text::NoOtherReviews,
            max_width: 60,
            max_height: 0,
        })
    }

    #[test]
    fn author_reviews_show_name_stars_and_text() {
        let movie = MovieId::new(42).expect("valid movie id");
        let written = movie_review(3, movie, "kim@example.com", 3.5, "Great ending");

        let output = render(&[&written], ReviewHeading::Author, Locale::English);

        assert_eq!(output, "  [kim] ★★★★☆ 3.5\n    Great ending\n");
    }

    #[test]
    fn rating_only_review_has_no_body_line() {
        let rated = review(4, "lee@example.com", 2.0);

        let output = render(&[&rated], ReviewHeading::Author, Locale::English);

        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn movie_heading_uses_title() {
        let rated = Review {
            movie_title: Some("Arrival".to_owned()),
            ..review(5, "lee@example.com", 5.0)
        };

        let output = render(&[&rated], ReviewHeading::Movie, Locale::English);

        assert!(output.starts_with("  [Arrival]"));
    }

    #[rstest]
    #[case(Locale::English, "  No other reviews yet.\n")]
    #[case(Locale::Korean, "  작성된 다른 리뷰가 없습니다.\n")]
    fn empty_list_is_not_an_error(#[case] locale: Locale, #[case] expected: &str) {
        assert_eq!(render(&[], ReviewHeading::Author, locale), expected);
    }
}
