//! Date-keyed index of a user's reviews for the ratings calendar.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use super::Review;

/// One day of a month view and how many reviews were written on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    /// Calendar date.
    pub date: NaiveDate,
    /// Reviews authored on that date.
    pub count: usize,
}

/// Reviews grouped by the day they were written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarIndex {
    days: BTreeMap<NaiveDate, Vec<Review>>,
}

impl CalendarIndex {
    /// Builds the index from `YYYY-MM-DD` keyed entries.
    ///
    /// Keys that are not valid dates are skipped with a warning. Entries that
    /// share a date after parsing are merged.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<Review>)>,
    {
        let mut days: BTreeMap<NaiveDate, Vec<Review>> = BTreeMap::new();
        for (key, reviews) in entries {
            let Ok(date) = NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d") else {
                warn!(key = %key, "skipping calendar entry with an unparseable date");
                continue;
            };
            days.entry(date).or_default().extend(reviews);
        }
        Self { days }
    }

    /// Builds the index from reviews that carry their own creation date.
    ///
    /// Reviews without a date are left out.
    pub fn from_reviews<'a, I>(reviews: I) -> Self
    where
        I: IntoIterator<Item = &'a Review>,
    {
        let mut days: BTreeMap<NaiveDate, Vec<Review>> = BTreeMap::new();
        for review in reviews {
            if let Some(date) = review.created_on {
                days.entry(date).or_default().push(review.clone());
            }
        }
        Self { days }
    }

    /// Returns the reviews written on `date`, or an empty slice.
    #[must_use]
    pub fn reviews_on(&self, date: NaiveDate) -> &[Review] {
        self.days.get(&date).map_or(&[], Vec::as_slice)
    }

    /// Iterates over the dates that have at least one review, oldest first.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days
            .iter()
            .filter(|(_, reviews)| !reviews.is_empty())
            .map(|(date, _)| *date)
    }

    /// Returns the most recent date with a review.
    #[must_use]
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.dates().last()
    }

    /// Returns true when no day has a review.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates().next().is_none()
    }

    /// Total number of indexed reviews.
    #[must_use]
    pub fn total_reviews(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Lists every day of the given month with its review count.
    ///
    /// Returns an empty list when `year`/`month` do not name a real month.
    #[must_use]
    pub fn month(&self, year: i32, month: u32) -> Vec<CalendarDay> {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return Vec::new();
        };
        first
            .iter_days()
            .take_while(|date| date.month() == month && date.year() == year)
            .map(|date| CalendarDay {
                date,
                count: self.reviews_on(date).len(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    use super::CalendarIndex;
    use crate::api::models::test_support::review;

    fn day(year: i32, month: u32, date: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, date).expect("valid test date")
    }

    #[fixture]
    fn index() -> CalendarIndex {
        CalendarIndex::from_entries(vec![
            ("2024-05-01".to_owned(), vec![review(1, "a@example.com", 4.0)]),
            (
                "2024-05-03".to_owned(),
                vec![
                    review(2, "a@example.com", 3.0),
                    review(3, "a@example.com", 5.0),
                ],
            ),
            ("not-a-date".to_owned(), vec![review(4, "a@example.com", 1.0)]),
        ])
    }

    #[rstest]
    fn looks_up_reviews_by_date(index: CalendarIndex) {
        assert_eq!(index.reviews_on(day(2024, 5, 3)).len(), 2);
        assert!(index.reviews_on(day(2024, 5, 2)).is_empty());
    }

    #[rstest]
    fn skips_unparseable_keys(index: CalendarIndex) {
        assert_eq!(index.total_reviews(), 3);
        assert_eq!(index.latest_date(), Some(day(2024, 5, 3)));
    }

    #[rstest]
    #[case(2024, 2, 29)]
    #[case(2023, 2, 28)]
    #[case(2024, 5, 31)]
    fn month_view_covers_every_day(
        index: CalendarIndex,
        #[case] year: i32,
        #[case] month: u32,
        #[case] days: usize,
    ) {
        assert_eq!(index.month(year, month).len(), days);
    }

    #[rstest]
    fn month_view_counts_reviews(index: CalendarIndex) {
        let counts: Vec<usize> = index
            .month(2024, 5)
            .iter()
            .take(3)
            .map(|entry| entry.count)
            .collect();
        assert_eq!(counts, vec![1, 0, 2]);
        assert!(index.month(2024, 13).is_empty());
    }

    #[test]
    fn indexes_dated_reviews() {
        let mut dated = review(9, "a@example.com", 2.5);
        dated.created_on = Some(day(2024, 1, 9));
        let undated = review(10, "a@example.com", 2.5);
        let index = CalendarIndex::from_reviews([&dated, &undated]);
        assert_eq!(index.total_reviews(), 1);
        assert!(!index.is_empty());
    }
}
