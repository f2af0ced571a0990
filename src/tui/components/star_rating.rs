//! Star rating widgets.
//!
//! [`StarRating`] is a pure function of a score and a size: five background
//! stars with a foreground overlay whose width is the clamped score's share
//! of five. [`StarInput`] adds a transient hover value on top of a committed
//! whole-star selection for the review form.

use crate::api::{MAX_STARS, Rating};

/// Glyph drawn for covered columns.
pub const FILLED_STAR: char = '★';
/// Glyph drawn for uncovered columns.
pub const EMPTY_STAR: char = '☆';

/// Read-only star display for a continuous 0–5 score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarRating {
    score: f64,
    size: u16,
}

impl StarRating {
    /// Creates a widget; sizes below one column per star are raised to one.
    #[must_use]
    pub fn new(score: f64, size: u16) -> Self {
        Self {
            score,
            size: size.max(1),
        }
    }

    /// Score as given, before clamping.
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Columns per star.
    #[must_use]
    pub const fn size(&self) -> u16 {
        self.size
    }

    /// Share of the widget covered by the overlay, in `0.0..=1.0`.
    ///
    /// Non-finite scores render as empty.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "fill is the clamped score's share of the maximum"
    )]
    pub fn fill_ratio(&self) -> f64 {
        if !self.score.is_finite() {
            return 0.0;
        }
        let max = f64::from(MAX_STARS);
        self.score.clamp(0.0, max) / max
    }

    /// Overlay width as a percentage of the full widget.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "percentage of a ratio")]
    pub fn fill_percent(&self) -> f64 {
        self.fill_ratio() * 100.0
    }

    /// Total width in terminal columns.
    #[must_use]
    pub fn width(&self) -> u32 {
        u32::from(MAX_STARS).saturating_mul(u32::from(self.size))
    }

    /// Number of leading columns covered by the overlay.
    #[must_use]
    pub fn filled_columns(&self) -> usize {
        (0..self.width())
            .filter(|column| self.covers(*column))
            .count()
    }

    /// Renders the widget on one line without a trailing newline.
    #[must_use]
    pub fn render(&self) -> String {
        (0..self.width())
            .map(|column| {
                if self.covers(column) {
                    FILLED_STAR
                } else {
                    EMPTY_STAR
                }
            })
            .collect()
    }

    /// A column counts as covered when the overlay reaches its midpoint.
    #[expect(
        clippy::float_arithmetic,
        reason = "overlay width is proportional to the fill ratio"
    )]
    fn covers(&self, column: u32) -> bool {
        f64::from(column) + 0.5 <= self.fill_ratio() * f64::from(self.width())
    }

    /// Renders the widget followed by the score to one decimal place.
    #[must_use]
    pub fn render_with_score(&self) -> String {
        let shown = if self.score.is_finite() {
            self.score.clamp(0.0, f64::from(MAX_STARS))
        } else {
            0.0
        };
        format!("{} {shown:.1}", self.render())
    }
}

/// Interactive star picker with hover preview.
///
/// Hovering previews a whole-star value without changing the committed
/// rating; only [`StarInput::commit`] or [`StarInput::select`] do that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarInput {
    committed: Option<Rating>,
    hover: Option<u8>,
}

impl StarInput {
    /// Starts from an existing rating, such as the viewer's current review.
    #[must_use]
    pub const fn new(committed: Option<Rating>) -> Self {
        Self {
            committed,
            hover: None,
        }
    }

    /// Committed rating, if any.
    #[must_use]
    pub const fn committed(&self) -> Option<Rating> {
        self.committed
    }

    /// Transient hover value, if any.
    #[must_use]
    pub const fn hover(&self) -> Option<u8> {
        self.hover
    }

    /// Previews `stars`, clamped to `1..=5`.
    pub fn hover_at(&mut self, stars: u8) {
        self.hover = Some(stars.clamp(1, MAX_STARS));
    }

    /// Moves the hover one star to the right, starting from the committed
    /// value when nothing is hovered.
    pub fn hover_next(&mut self) {
        let next = self.hover_origin(whole_stars_below).saturating_add(1);
        self.hover_at(next);
    }

    /// Moves the hover one star to the left.
    pub fn hover_previous(&mut self) {
        let previous = self.hover_origin(whole_stars_above).saturating_sub(1);
        self.hover_at(previous);
    }

    /// Drops the hover preview.
    pub const fn clear_hover(&mut self) {
        self.hover = None;
    }

    /// Commits the hovered value and returns the new rating.
    pub fn commit(&mut self) -> Option<Rating> {
        let stars = self.hover.take()?;
        self.select(stars)
    }

    /// Commits `stars` directly, clamped to `1..=5`.
    pub fn select(&mut self, stars: u8) -> Option<Rating> {
        let rating = Rating::from_stars(stars.clamp(1, MAX_STARS)).ok()?;
        self.committed = Some(rating);
        self.hover = None;
        Some(rating)
    }

    /// Score the widget should display: the hover preview, else the
    /// committed rating, else zero.
    #[must_use]
    pub fn displayed_score(&self) -> f64 {
        self.hover.map_or_else(
            || self.committed.map_or(0.0, Rating::stars),
            f64::from,
        )
    }

    /// Renders the picker at `size` columns per star.
    #[must_use]
    pub fn render(&self, size: u16) -> String {
        StarRating::new(self.displayed_score(), size).render_with_score()
    }

    /// Whole star to step from. A half-star rating sits between two whole
    /// stars, so `whole` picks the one behind the direction of travel.
    fn hover_origin(&self, whole: fn(Rating) -> u8) -> u8 {
        self.hover.unwrap_or_else(|| self.committed.map_or(0, whole))
    }
}

const fn whole_stars_below(rating: Rating) -> u8 {
    rating.half_steps() >> 1
}

const fn whole_stars_above(rating: Rating) -> u8 {
    rating.half_steps().div_ceil(2)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{StarInput, StarRating};
    use crate::api::Rating;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(2.5, 50.0)]
    #[case(4.0, 80.0)]
    #[case(5.0, 100.0)]
    #[case(-1.0, 0.0)]
    #[case(7.5, 100.0)]
    #[case(f64::NAN, 0.0)]
    #[expect(clippy::float_arithmetic, reason = "tolerance comparison")]
    fn fill_tracks_clamped_score(#[case] score: f64, #[case] expected_percent: f64) {
        let widget = StarRating::new(score, 1);
        assert!((widget.fill_percent() - expected_percent).abs() < 1e-9);
    }

    #[rstest]
    #[case(4.0, 1, "★★★★☆")]
    #[case(3.8, 1, "★★★★☆")]
    #[case(2.5, 2, "★★★★★☆☆☆☆☆")]
    #[case(0.0, 1, "☆☆☆☆☆")]
    fn overlay_covers_leading_columns(
        #[case] score: f64,
        #[case] size: u16,
        #[case] expected: &str,
    ) {
        assert_eq!(StarRating::new(score, size).render(), expected);
    }

    #[test]
    fn zero_size_renders_one_column_per_star() {
        assert_eq!(StarRating::new(5.0, 0).width(), 5);
    }

    #[test]
    fn hover_previews_without_committing() {
        let mut input = StarInput::default();
        input.hover_at(3);

        assert_eq!(input.committed(), None);
        assert_eq!(input.render(1), "★★★☆☆ 3.0");

        input.clear_hover();
        assert_eq!(input.render(1), "☆☆☆☆☆ 0.0");
    }

    #[test]
    fn commit_keeps_hovered_value() {
        let mut input = StarInput::default();
        input.hover_next();
        input.hover_next();

        let committed = input.commit();

        assert_eq!(committed, Rating::from_stars(2).ok());
        assert_eq!(input.hover(), None);
    }

    #[test]
    fn hover_starts_from_existing_rating() {
        let existing = Rating::from_score(3.5).expect("half-star rating");
        let mut input = StarInput::new(Some(existing));

        input.hover_next();

        assert_eq!(input.hover(), Some(4));
        assert_eq!(input.committed(), Some(existing));
    }

    #[rstest]
    #[case(3.5, 3)]
    #[case(4.0, 3)]
    #[case(0.5, 1)]
    fn hover_left_from_existing_rating(#[case] score: f64, #[case] expected: u8) {
        let existing = Rating::from_score(score).expect("valid rating");
        let mut input = StarInput::new(Some(existing));

        input.hover_previous();

        assert_eq!(input.hover(), Some(expected));
    }

    #[rstest]
    #[case(0, 1)]
    #[case(9, 5)]
    fn selection_is_clamped(#[case] stars: u8, #[case] expected: u8) {
        let mut input = StarInput::default();
        assert_eq!(input.select(stars), Rating::from_stars(expected).ok());
    }
}
