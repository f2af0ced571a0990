//! Validated star ratings for review submissions.
//!
//! Ratings are stored as half-star steps so equality and range checks stay
//! exact. On the wire they are sent as floating-point star values.

use serde::{Serialize, Serializer};
use thiserror::Error;

use super::error::ApiError;

/// Upper bound of the star scale.
pub const MAX_STARS: u8 = 5;

const MIN_HALF_STEPS: u8 = 1;
const MAX_HALF_STEPS: u8 = MAX_STARS * 2;
const HALF_STEP_TOLERANCE: f64 = 1e-9;

/// Errors raised while validating a rating value.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum RatingError {
    /// The value was NaN or infinite.
    #[error("rating must be a finite number")]
    NotFinite,
    /// The value lies outside 0.5–5.0.
    #[error("rating {value} is outside the range 0.5 to 5.0")]
    OutOfRange {
        /// Rejected value.
        value: f64,
    },
    /// The value is not a multiple of 0.5.
    #[error("rating {value} must be a multiple of 0.5")]
    NotHalfStep {
        /// Rejected value.
        value: f64,
    },
}

impl From<RatingError> for ApiError {
    fn from(error: RatingError) -> Self {
        Self::InvalidInput {
            message: error.to_string(),
        }
    }
}

/// A rating between 0.5 and 5.0 stars in half-star steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    /// Builds a rating from a whole number of stars (1–5).
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] when `stars` is zero or above five.
    pub fn from_stars(stars: u8) -> Result<Self, RatingError> {
        if stars == 0 || stars > MAX_STARS {
            return Err(RatingError::OutOfRange {
                value: f64::from(stars),
            });
        }
        Ok(Self(stars * 2))
    }

    /// Builds a rating from a star value such as `3.5`.
    ///
    /// # Errors
    ///
    /// Returns a [`RatingError`] when the value is not finite, not a multiple
    /// of 0.5, or outside 0.5–5.0.
    #[expect(
        clippy::float_arithmetic,
        reason = "converting a star value to half steps needs a multiply"
    )]
    pub fn from_score(value: f64) -> Result<Self, RatingError> {
        if !value.is_finite() {
            return Err(RatingError::NotFinite);
        }
        let doubled = value * 2.0;
        let rounded = doubled.round();
        if (doubled - rounded).abs() > HALF_STEP_TOLERANCE {
            return Err(RatingError::NotHalfStep { value });
        }
        if rounded < f64::from(MIN_HALF_STEPS) || rounded > f64::from(MAX_HALF_STEPS) {
            return Err(RatingError::OutOfRange { value });
        }
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "rounded is a whole number checked to lie within 1..=10"
        )]
        let steps = rounded as u8;
        Ok(Self(steps))
    }

    /// Returns the rating in stars, e.g. `3.5`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "half steps convert back to stars with a divide"
    )]
    pub fn stars(self) -> f64 {
        f64::from(self.0) / 2.0
    }

    /// Returns the rating in half-star steps (1–10).
    #[must_use]
    pub const fn half_steps(self) -> u8 {
        self.0
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.stars())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Rating, RatingError};

    #[rstest]
    #[case(0.5, 1)]
    #[case(3.5, 7)]
    #[case(5.0, 10)]
    fn accepts_half_step_scores(#[case] value: f64, #[case] steps: u8) {
        let rating = Rating::from_score(value).expect("score should be accepted");
        assert_eq!(rating.half_steps(), steps);
    }

    #[rstest]
    #[case(0.0)]
    #[case(5.5)]
    #[case(-1.0)]
    fn rejects_out_of_range_scores(#[case] value: f64) {
        assert_eq!(
            Rating::from_score(value),
            Err(RatingError::OutOfRange { value })
        );
    }

    #[test]
    fn rejects_values_between_half_steps() {
        assert_eq!(
            Rating::from_score(3.7),
            Err(RatingError::NotHalfStep { value: 3.7 })
        );
    }

    #[test]
    fn rejects_nan() {
        assert_eq!(Rating::from_score(f64::NAN), Err(RatingError::NotFinite));
    }

    #[test]
    fn whole_stars_convert_to_half_steps() {
        let rating = Rating::from_stars(4).expect("four stars is valid");
        assert_eq!(rating.half_steps(), 8);
        assert_eq!(Rating::from_score(rating.stars()), Ok(rating));
        assert!(Rating::from_stars(0).is_err(), "zero stars is not a rating");
        assert!(Rating::from_stars(6).is_err(), "six stars is out of range");
    }

    #[test]
    fn serialises_as_star_value() {
        let rating = Rating::from_score(2.5).expect("valid score");
        let json = serde_json::to_string(&rating).expect("rating should serialise");
        assert_eq!(json, "2.5");
    }
}
