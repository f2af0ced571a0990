//! User-facing strings in English and Korean.

use crate::api::{ApiError, MovieListKind};

/// Display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    /// English.
    #[default]
    English,
    /// Korean.
    Korean,
}

impl Locale {
    /// Parses `en` or `ko` (case-insensitive, region suffix ignored).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] for any other language.
    pub fn parse(text: &str) -> Result<Self, ApiError> {
        let language = text
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Ok(Self::English),
            "ko" => Ok(Self::Korean),
            _ => Err(ApiError::Configuration {
                message: format!("unsupported locale '{}' (expected en or ko)", text.trim()),
            }),
        }
    }
}

/// Keys for every translated string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    /// Shown while a screen loads.
    Loading,
    /// Search matched nothing.
    NoResults,
    /// A list section has no movies.
    NoMovies,
    /// The movie could not be loaded.
    MovieNotFound,
    /// The profile owner could not be loaded.
    UserNotFound,
    /// No reviews by other users.
    NoOtherReviews,
    /// Empty follower list.
    NoFollowers,
    /// Empty followee list.
    NoFollowing,
    /// The owner rated nothing.
    NoRatings,
    /// No reviews on the selected day.
    NoReviewsOnDay,
    /// Card framing for the viewer's own rating.
    RatedByYou,
    /// Card framing for the vote average.
    Average,
    /// Heading of the viewer's review panel.
    MyReview,
    /// Prompt of the create form.
    RateThisMovie,
    /// Heading of the edit form.
    EditReview,
    /// Heading of the other reviews list.
    OtherReviews,
    /// Director label.
    Director,
    /// Cast label.
    Cast,
    /// Overview label.
    Overview,
    /// Gallery label.
    Stills,
    /// Followers label.
    Followers,
    /// Following label.
    Following,
    /// Follow button.
    Follow,
    /// Unfollow button.
    Unfollow,
    /// Delete confirmation prompt.
    ConfirmDelete,
    /// Submission without rating.
    ChooseRating,
    /// Placeholder for the review text.
    ReviewPlaceholder,
    /// Ratings panel heading.
    Ratings,
    /// Calendar panel heading.
    Calendar,
    /// Every home list failed.
    MovieListsUnavailable,
    /// Prefix of the review load warning.
    ReviewsUnavailable,
    /// Prefix of the review refetch warning.
    ReviewsNotRefreshed,
    /// A review was created or updated.
    ReviewSaved,
    /// Failed create or update.
    SaveReviewFailed,
    /// A review was deleted.
    ReviewDeleted,
    /// Failed delete.
    DeleteReviewFailed,
    /// Failed follow.
    FollowFailed,
    /// Failed unfollow.
    UnfollowFailed,
    /// The avatar upload went through.
    AvatarUpdated,
    /// Failed avatar upload.
    AvatarUploadFailed,
    /// Failed title search.
    SearchFailed,
    /// Failed sign-in.
    SignInFailed,
    /// Sign-out went through.
    SignedOut,
    /// Failed sign-out.
    SignOutFailed,
    /// Sign-out without a session.
    NotSignedIn,
    /// A change was requested while the previous one is still in flight.
    ChangePending,
}

/// Looks up the string for `key` in `locale`.
#[must_use]
pub const fn text(locale: Locale, key: Text) -> &'static str {
    match locale {
        Locale::English => english(key),
        Locale::Korean => korean(key),
    }
}

const fn english(key: Text) -> &'static str {
    match key {
        Text::Loading => "Loading...",
        Text::NoResults => "No results found.",
        Text::NoMovies => "No movies to show.",
        Text::MovieNotFound => "Movie not found.",
        Text::UserNotFound => "User not found.",
        Text::NoOtherReviews => "No other reviews yet.",
        Text::NoFollowers => "No followers yet.",
        Text::NoFollowing => "Not following anyone yet.",
        Text::NoRatings => "No rated movies yet.",
        Text::NoReviewsOnDay => "No reviews on this day.",
        Text::RatedByYou => "Rated",
        Text::Average => "Average",
        Text::MyReview => "My review",
        Text::RateThisMovie => "Rate this movie",
        Text::EditReview => "Edit review",
        Text::OtherReviews => "Reviews",
        Text::Director => "Director",
        Text::Cast => "Cast",
        Text::Overview => "Overview",
        Text::Stills => "Stills",
        Text::Followers => "Followers",
        Text::Following => "Following",
        Text::Follow => "Follow",
        Text::Unfollow => "Unfollow",
        Text::ConfirmDelete => "Really delete this review?",
        Text::ChooseRating => "Please choose a rating.",
        Text::ReviewPlaceholder => "Leave a one-line review (optional)",
        Text::Ratings => "Rated movies",
        Text::Calendar => "Ratings calendar",
        Text::MovieListsUnavailable => "Movie lists could not be loaded.",
        Text::ReviewsUnavailable => "Reviews could not be loaded",
        Text::ReviewsNotRefreshed => "Reviews could not be refreshed",
        Text::ReviewSaved => "Review saved.",
        Text::SaveReviewFailed => "Saving the review failed",
        Text::ReviewDeleted => "Review deleted.",
        Text::DeleteReviewFailed => "Deleting the review failed",
        Text::FollowFailed => "Following failed",
        Text::UnfollowFailed => "Unfollowing failed",
        Text::AvatarUpdated => "Avatar updated.",
        Text::AvatarUploadFailed => "Uploading the avatar failed",
        Text::SearchFailed => "Search failed",
        Text::SignInFailed => "Signing in failed",
        Text::SignedOut => "Signed out.",
        Text::SignOutFailed => "Signing out failed",
        Text::NotSignedIn => "You are not signed in.",
        Text::ChangePending => "Still saving the previous change.",
    }
}

const fn korean(key: Text) -> &'static str {
    match key {
        Text::Loading => "로딩 중...",
        Text::NoResults => "검색 결과가 없습니다.",
        Text::NoMovies => "표시할 영화가 없습니다.",
        Text::MovieNotFound => "영화 정보를 찾을 수 없습니다.",
        Text::UserNotFound => "사용자를 찾을 수 없습니다.",
        Text::NoOtherReviews => "작성된 다른 리뷰가 없습니다.",
        Text::NoFollowers => "팔로워가 없습니다.",
        Text::NoFollowing => "팔로잉한 사용자가 없습니다.",
        Text::NoRatings => "평가한 영화가 없습니다.",
        Text::NoReviewsOnDay => "이 날 작성한 리뷰가 없습니다.",
        Text::RatedByYou => "평가함",
        Text::Average => "평균",
        Text::MyReview => "내 평가",
        Text::RateThisMovie => "이 영화를 평가해보세요",
        Text::EditReview => "평가 수정",
        Text::OtherReviews => "리뷰 목록",
        Text::Director => "감독",
        Text::Cast => "출연",
        Text::Overview => "줄거리",
        Text::Stills => "주요 장면",
        Text::Followers => "팔로워",
        Text::Following => "팔로잉",
        Text::Follow => "팔로우",
        Text::Unfollow => "언팔로우",
        Text::ConfirmDelete => "정말로 이 리뷰를 삭제하시겠습니까?",
        Text::ChooseRating => "평점을 입력해주세요.",
        Text::ReviewPlaceholder => "한줄평을 남겨보세요 (선택)",
        Text::Ratings => "내가 남긴 평점",
        Text::Calendar => "평점 캘린더",
        Text::MovieListsUnavailable => "영화 목록을 불러오지 못했습니다.",
        Text::ReviewsUnavailable => "리뷰를 불러오지 못했습니다",
        Text::ReviewsNotRefreshed => "리뷰를 새로 불러오지 못했습니다",
        Text::ReviewSaved => "리뷰가 저장되었습니다.",
        Text::SaveReviewFailed => "리뷰 저장에 실패했습니다",
        Text::ReviewDeleted => "리뷰가 삭제되었습니다.",
        Text::DeleteReviewFailed => "리뷰 삭제에 실패했습니다",
        Text::FollowFailed => "팔로우에 실패했습니다",
        Text::UnfollowFailed => "언팔로우에 실패했습니다",
        Text::AvatarUpdated => "프로필 사진이 변경되었습니다.",
        Text::AvatarUploadFailed => "프로필 사진 업로드에 실패했습니다",
        Text::SearchFailed => "검색에 실패했습니다",
        Text::SignInFailed => "로그인에 실패했습니다",
        Text::SignedOut => "로그아웃되었습니다.",
        Text::SignOutFailed => "로그아웃에 실패했습니다",
        Text::NotSignedIn => "로그인되어 있지 않습니다.",
        Text::ChangePending => "이전 요청을 처리하는 중입니다.",
    }
}

/// Confirmation shown after signing in as `name`.
#[must_use]
pub fn signed_in(locale: Locale, name: &str) -> String {
    match locale {
        Locale::English => format!("Signed in as {name}."),
        Locale::Korean => format!("{name}님으로 로그인했습니다."),
    }
}

/// Heading for a home screen section.
#[must_use]
pub const fn list_heading(locale: Locale, kind: MovieListKind) -> &'static str {
    match (locale, kind) {
        (Locale::English, MovieListKind::NowPlaying) => "Now playing",
        (Locale::English, MovieListKind::Popular) => "Popular",
        (Locale::English, MovieListKind::BoxOffice) => "Box office",
        (Locale::English, MovieListKind::Upcoming) => "Coming soon",
        (Locale::Korean, MovieListKind::NowPlaying) => "현재 상영작",
        (Locale::Korean, MovieListKind::Popular) => "인기 영화",
        (Locale::Korean, MovieListKind::BoxOffice) => "박스오피스 순위",
        (Locale::Korean, MovieListKind::Upcoming) => "개봉 예정작",
    }
}
