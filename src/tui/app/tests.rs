//! Tests for the terminal client's application model.

use std::time::Duration;

use bubbletea_rs::Model;
use rstest::{fixture, rstest};
use unicode_width::UnicodeWidthStr;

use super::*;
use crate::api::models::test_support::{movie, movie_detail, movie_review, review, user};
use crate::api::{CalendarIndex, FollowCounts, Rating, User};
use crate::pages::{
    DetailBundle, FollowAction, FollowOutcome, HOME_SECTIONS, ListingSection, ProfileBundle,
    RatingLookup, ReviewPanel,
};
use crate::tui::input::InputContext;

const VIEWER_EMAIL: &str = "me@example.com";

fn movie_42() -> MovieId {
    MovieId::new(42).expect("valid movie id")
}

fn owner_id() -> UserId {
    UserId::new(5).expect("valid user id")
}

#[fixture]
fn viewer() -> User {
    user(1, VIEWER_EMAIL)
}

fn home_bundle() -> HomeBundle {
    let sections = HOME_SECTIONS
        .iter()
        .map(|kind| ListingSection {
            kind: *kind,
            movies: Loadable::Loaded(vec![
                movie(42, "Arrival", 7.6),
                movie(43, "Heat", 8.0),
                movie(44, "Alien", 8.4),
            ]),
        })
        .collect();
    HomeBundle {
        sections,
        ratings: RatingLookup::default(),
    }
}

fn detail_bundle(identity: Option<User>, with_my_review: bool) -> DetailBundle {
    let mut reviews = vec![movie_review(8, movie_42(), "other@example.com", 2.0, "meh")];
    if with_my_review {
        reviews.push(movie_review(7, movie_42(), VIEWER_EMAIL, 4.0, "ok"));
    }
    DetailBundle {
        movie_id: movie_42(),
        identity: Ok(identity),
        movie: Ok(movie_detail(42, "Arrival", 7.6)),
        reviews: Ok(reviews),
    }
}

fn profile_bundle(followers: u64) -> ProfileBundle {
    ProfileBundle {
        user_id: owner_id(),
        user: Ok(user(5, "owner@example.com")),
        counts: Loadable::Loaded(FollowCounts {
            followers,
            following: 0,
        }),
        is_following: Loadable::Loaded(false),
        followers: Loadable::Loaded(vec![user(11, "kim@example.com"), user(12, "lee@example.com")]),
        following: Loadable::Loaded(Vec::new()),
        ratings: Loadable::Loaded(vec![review(1, "owner@example.com", 4.0)]),
        calendar: Loadable::Loaded(CalendarIndex::from_entries(vec![(
            "2024-05-01".to_owned(),
            vec![review(1, "owner@example.com", 4.0)],
        )])),
    }
}

fn app_on_home() -> MarqueeApp {
    let mut app = MarqueeApp::new(Locale::English);
    app.handle_message(&AppMsg::HomeLoaded {
        bundle: Box::new(home_bundle()),
        session: SessionContext::signed_out(),
        elapsed: Duration::from_millis(5),
    });
    app
}

fn app_on_detail(identity: Option<User>, with_my_review: bool) -> MarqueeApp {
    let mut app = app_on_home();
    app.navigate(Route::Movie(movie_42()));
    app.handle_message(&AppMsg::DetailLoaded {
        bundle: Box::new(detail_bundle(identity, with_my_review)),
        elapsed: Duration::from_millis(5),
    });
    app
}

fn app_on_profile(viewer: User) -> MarqueeApp {
    let mut app = app_on_home();
    app.navigate(Route::Profile(owner_id()));
    app.handle_message(&AppMsg::ProfileLoaded {
        bundle: Box::new(profile_bundle(3)),
        session: SessionContext::signed_in(viewer),
        elapsed: Duration::from_millis(5),
    });
    app
}

#[rstest]
fn new_app_starts_on_home_and_loads_on_init() {
    let mut app = MarqueeApp::new(Locale::English);

    assert_eq!(app.route(), Route::Home);
    assert!(app.handle_message(&AppMsg::Initialized).is_some());
    assert!(app.is_loading());
}

#[rstest]
fn cursor_stays_inside_the_section() {
    let mut app = app_on_home();

    assert!(!app.is_loading());
    app.handle_message(&AppMsg::CursorDown);
    app.handle_message(&AppMsg::CursorDown);
    app.handle_message(&AppMsg::CursorDown);
    assert_eq!(app.cursor.position, 2);

    app.handle_message(&AppMsg::CursorUp);
    assert_eq!(app.cursor.position, 1);

    app.handle_message(&AppMsg::NextSection);
    assert_eq!(app.home_section, 1);
    assert_eq!(app.cursor.position, 0);
}

#[rstest]
fn select_opens_the_movie_and_back_returns_home() {
    let mut app = app_on_home();
    app.handle_message(&AppMsg::CursorDown);

    assert!(app.handle_message(&AppMsg::Select).is_some());
    assert_eq!(
        app.route(),
        Route::Movie(MovieId::new(43).expect("valid movie id"))
    );

    assert!(app.handle_message(&AppMsg::Back).is_some());
    assert_eq!(app.route(), Route::Home);
    assert!(app.handle_message(&AppMsg::Back).is_none());
}

#[rstest]
fn results_for_a_left_route_are_dropped(viewer: User) {
    let mut app = app_on_home();
    app.navigate(Route::Movie(movie_42()));
    app.handle_message(&AppMsg::Back);

    app.handle_message(&AppMsg::DetailLoaded {
        bundle: Box::new(detail_bundle(Some(viewer), true)),
        elapsed: Duration::from_millis(5),
    });

    assert_eq!(app.route(), Route::Home);
    assert!(app.detail_page().is_none());
}

#[rstest]
fn existing_review_offers_edit_with_prefilled_stars(viewer: User) {
    let mut app = app_on_detail(Some(viewer), true);

    let page = app.detail_page().expect("detail should be open");
    assert!(matches!(page.review_panel(), ReviewPanel::Mine(_)));
    assert_eq!(app.input_context(), InputContext::Detail);

    app.handle_message(&AppMsg::BeginEdit);

    assert!(app.form_open());
    assert_eq!(
        app.stars.committed().map(Rating::stars),
        Some(4.0)
    );
    assert_eq!(
        app.input_context(),
        InputContext::DetailForm(FormFocus::Rating)
    );
}

#[rstest]
fn submitting_without_a_rating_asks_for_one(viewer: User) {
    let mut app = app_on_detail(Some(viewer), false);
    assert!(app.form_open());

    let cmd = app.handle_message(&AppMsg::SubmitReview);

    assert!(cmd.is_none());
    assert_eq!(
        app.current_notice().map(|notice| notice.message.as_str()),
        Some("Please choose a rating.")
    );
}

#[rstest]
fn star_selection_then_submit_sends_the_review(viewer: User) {
    let mut app = app_on_detail(Some(viewer), false);

    app.handle_message(&AppMsg::StarSelect(3));
    app.handle_message(&AppMsg::FocusNext);
    app.handle_message(&AppMsg::InputChar('g'));
    app.handle_message(&AppMsg::InputChar('o'));

    let page = app.detail_page().expect("detail should be open");
    assert_eq!(page.draft().content(), "go");
    assert!(app.handle_message(&AppMsg::InputSubmit).is_some());
    assert!(app.is_loading());
}

#[rstest]
fn repeated_submit_sends_one_review(viewer: User) {
    let mut app = app_on_detail(Some(viewer), false);
    app.handle_message(&AppMsg::StarSelect(3));

    assert!(app.handle_message(&AppMsg::SubmitReview).is_some());
    assert!(app.handle_message(&AppMsg::SubmitReview).is_none());
    assert!(app.is_loading());

    app.handle_message(&AppMsg::ReviewSubmitted {
        movie: movie_42(),
        result: Box::new(Err(ApiError::Network {
            message: "offline".to_owned(),
        })),
    });

    assert!(!app.is_loading());
    assert!(app.handle_message(&AppMsg::SubmitReview).is_some());
}

#[rstest]
fn delete_waits_for_a_pending_submit(viewer: User) {
    let mut app = app_on_detail(Some(viewer), true);
    app.handle_message(&AppMsg::BeginEdit);
    assert!(app.handle_message(&AppMsg::SubmitReview).is_some());

    app.handle_message(&AppMsg::RequestDelete);
    assert!(app.handle_message(&AppMsg::ConfirmDelete(true)).is_none());
}

#[rstest]
fn failed_save_notice_uses_the_display_language(viewer: User) {
    let mut app = MarqueeApp::new(Locale::Korean);
    app.navigate(Route::Movie(movie_42()));
    app.handle_message(&AppMsg::DetailLoaded {
        bundle: Box::new(detail_bundle(Some(viewer), false)),
        elapsed: Duration::from_millis(5),
    });
    app.handle_message(&AppMsg::StarSelect(3));
    app.handle_message(&AppMsg::SubmitReview);

    app.handle_message(&AppMsg::ReviewSubmitted {
        movie: movie_42(),
        result: Box::new(Err(ApiError::Network {
            message: "offline".to_owned(),
        })),
    });

    let message = app
        .current_notice()
        .map(|notice| notice.message.clone())
        .unwrap_or_default();
    assert!(
        message.starts_with("리뷰 저장에 실패했습니다"),
        "unexpected notice {message:?}"
    );
}

#[rstest]
fn declined_delete_sends_nothing(viewer: User) {
    let mut app = app_on_detail(Some(viewer), true);

    app.handle_message(&AppMsg::RequestDelete);
    assert_eq!(app.input_context(), InputContext::Confirm);

    assert!(app.handle_message(&AppMsg::ConfirmDelete(false)).is_none());
    assert!(!app.confirm_delete);
    assert!(matches!(
        app.detail_page().map(DetailPage::review_panel),
        Some(ReviewPanel::Mine(_))
    ));
}

#[rstest]
fn confirmed_delete_sends_the_request(viewer: User) {
    let mut app = app_on_detail(Some(viewer), true);

    app.handle_message(&AppMsg::RequestDelete);
    let cmd = app.handle_message(&AppMsg::ConfirmDelete(true));

    assert!(cmd.is_some());
    assert!(app.is_loading());
}

#[rstest]
fn delete_without_a_review_raises_a_notice(viewer: User) {
    let mut app = app_on_detail(Some(viewer), false);

    app.handle_message(&AppMsg::RequestDelete);

    assert!(!app.confirm_delete);
    assert!(app.current_notice().is_some());
}

#[rstest]
fn follow_applies_the_optimistic_count() {
    let mut app = app_on_profile(user(9, "visitor@example.com"));

    let cmd = app.handle_message(&AppMsg::FollowToggle);

    assert!(cmd.is_some());
    let page = app.profile_page().expect("profile should be open");
    assert!(page.is_following());
    assert_eq!(page.counts().map(|counts| counts.followers), Some(4));
}

#[rstest]
fn refetched_follow_counts_replace_the_optimistic_ones() {
    let mut app = app_on_profile(user(9, "visitor@example.com"));
    app.handle_message(&AppMsg::FollowToggle);

    let mut refetched = profile_bundle(7);
    refetched.is_following = Loadable::Loaded(true);
    app.handle_message(&AppMsg::FollowCompleted {
        user: owner_id(),
        outcome: Box::new(FollowOutcome {
            action: FollowAction::Follow,
            result: Ok(()),
            bundle: refetched,
        }),
    });

    let page = app.profile_page().expect("profile should be open");
    assert_eq!(page.counts().map(|counts| counts.followers), Some(7));
}

#[rstest]
fn second_follow_toggle_waits_for_the_first() {
    let mut app = app_on_profile(user(9, "visitor@example.com"));

    assert!(app.handle_message(&AppMsg::FollowToggle).is_some());
    assert!(app.handle_message(&AppMsg::FollowToggle).is_none());

    let page = app.profile_page().expect("profile should be open");
    assert!(page.is_following());
    assert_eq!(page.counts().map(|counts| counts.followers), Some(4));
    assert_eq!(
        app.current_notice().map(|notice| notice.message.as_str()),
        Some(crate::i18n::text(
            Locale::English,
            crate::i18n::Text::ChangePending
        ))
    );
}

#[rstest]
fn follow_toggle_is_accepted_again_after_the_refetch() {
    let mut app = app_on_profile(user(9, "visitor@example.com"));
    app.handle_message(&AppMsg::FollowToggle);

    let mut refetched = profile_bundle(4);
    refetched.is_following = Loadable::Loaded(true);
    app.handle_message(&AppMsg::FollowCompleted {
        user: owner_id(),
        outcome: Box::new(FollowOutcome {
            action: FollowAction::Follow,
            result: Ok(()),
            bundle: refetched,
        }),
    });

    assert!(app.handle_message(&AppMsg::FollowToggle).is_some());
    let page = app.profile_page().expect("profile should be open");
    assert!(!page.is_following());
    assert_eq!(page.counts().map(|counts| counts.followers), Some(3));
}

#[rstest]
fn failed_follow_still_releases_the_toggle() {
    let mut app = app_on_profile(user(9, "visitor@example.com"));
    app.handle_message(&AppMsg::FollowToggle);

    app.handle_message(&AppMsg::FollowCompleted {
        user: owner_id(),
        outcome: Box::new(FollowOutcome {
            action: FollowAction::Follow,
            result: Err(ApiError::Network {
                message: "offline".to_owned(),
            }),
            bundle: profile_bundle(3),
        }),
    });

    assert!(app.handle_message(&AppMsg::FollowToggle).is_some());
}

#[rstest]
fn followers_panel_selects_a_user() {
    let mut app = app_on_profile(user(9, "visitor@example.com"));

    app.handle_message(&AppMsg::TogglePanel(crate::pages::ProfilePanel::Followers));
    app.handle_message(&AppMsg::CursorDown);
    assert!(app.handle_message(&AppMsg::Select).is_some());

    assert_eq!(
        app.route(),
        Route::Profile(UserId::new(12).expect("valid user id"))
    );
    assert!(app.profile_page().is_none());
}

#[rstest]
fn visitor_cannot_begin_an_avatar_upload() {
    let mut app = app_on_profile(user(9, "visitor@example.com"));

    app.handle_message(&AppMsg::BeginAvatar);

    assert!(app.avatar_input.is_none());
    assert!(app.current_notice().is_some());
}

#[rstest]
fn my_profile_needs_a_signed_in_viewer() {
    let mut app = app_on_home();

    assert!(app.handle_message(&AppMsg::OpenMyProfile).is_none());
    assert_eq!(app.route(), Route::Home);
    assert!(app.current_notice().is_some());
}

#[rstest]
fn login_form_collects_both_fields(viewer: User) {
    let mut app = app_on_home();
    assert!(app.handle_message(&AppMsg::OpenLogin).is_none());
    assert_eq!(app.input_context(), InputContext::TextEntry);

    for character in "me@example.com".chars() {
        app.handle_message(&AppMsg::InputChar(character));
    }
    assert!(app.handle_message(&AppMsg::InputSubmit).is_none());
    for character in "secret".chars() {
        app.handle_message(&AppMsg::InputChar(character));
    }
    assert!(app.view().contains("Password: ******"));
    assert!(app.handle_message(&AppMsg::InputSubmit).is_some());

    let cmd = app.handle_message(&AppMsg::LoginCompleted {
        session: SessionContext::signed_in(viewer.clone()),
        result: Ok(viewer),
    });

    assert!(cmd.is_some());
    assert_eq!(app.route(), Route::Home);
    assert_eq!(
        app.current_notice().map(|notice| notice.message.as_str()),
        Some("Signed in as me.")
    );
}

#[rstest]
fn failed_login_clears_the_password() {
    let mut app = app_on_home();
    app.handle_message(&AppMsg::OpenLogin);
    app.login.email = "me@example.com".to_owned();
    app.login.password = "wrong".to_owned();
    app.login.field = LoginField::Password;

    app.handle_message(&AppMsg::LoginCompleted {
        session: SessionContext::signed_out(),
        result: Err(ApiError::Unauthenticated {
            message: "bad credentials".to_owned(),
        }),
    });

    assert_eq!(app.route(), Route::Login);
    assert!(app.login.password.is_empty());
    assert!(app.current_notice().is_some());
}

#[rstest]
fn search_editing_captures_quit_key() {
    let mut app = app_on_home();
    app.handle_message(&AppMsg::OpenSearch);

    assert_eq!(app.input_context(), InputContext::TextEntry);
    app.handle_message(&AppMsg::InputChar('q'));
    assert_eq!(app.search.input, "q");
}

#[rstest]
fn blank_search_is_rejected() {
    let mut app = app_on_home();
    app.handle_message(&AppMsg::OpenSearch);

    assert!(app.handle_message(&AppMsg::InputSubmit).is_none());
    assert!(app.current_notice().is_some());
    assert!(app.search.editing);
}

#[rstest]
fn empty_search_results_show_the_empty_message() {
    let mut app = app_on_home();
    app.handle_message(&AppMsg::OpenSearch);
    for character in "matrix".chars() {
        app.handle_message(&AppMsg::InputChar(character));
    }
    assert!(app.handle_message(&AppMsg::InputSubmit).is_some());

    let query = crate::api::SearchQuery::new("matrix").expect("valid query");
    app.handle_message(&AppMsg::SearchLoaded {
        route: Route::Search,
        result: Box::new(Ok(crate::pages::SearchResults {
            query,
            movies: Vec::new(),
            ratings: RatingLookup::default(),
        })),
        session: SessionContext::signed_out(),
        elapsed: Duration::from_millis(5),
    });

    assert!(!app.is_loading());
    assert!(app.view().contains(crate::i18n::text(
        Locale::English,
        crate::i18n::Text::NoResults
    )));
}

#[rstest]
fn notices_are_dismissed_in_order() {
    let mut app = app_on_home();
    app.push_notice(Notice::info("first"));
    app.push_notice(Notice::info("second"));

    app.handle_message(&AppMsg::DismissNotice);

    assert_eq!(
        app.current_notice().map(|notice| notice.message.as_str()),
        Some("second")
    );
}

#[rstest]
#[case(80, 24)]
#[case(40, 10)]
#[case(1, 1)]
fn view_fills_the_terminal_exactly(#[case] width: u16, #[case] height: u16) {
    let mut app = app_on_home();
    app.handle_message(&AppMsg::WindowResized { width, height });

    let frame = app.view();
    let lines: Vec<&str> = frame.lines().collect();

    assert_eq!(lines.len(), usize::from(height));
    let expected = usize::from(width).saturating_sub(1).max(1);
    assert!(lines.iter().all(|line| line.width() == expected));
}

#[rstest]
fn help_overlay_closes_on_any_key() {
    let mut app = app_on_home();
    app.handle_message(&AppMsg::ToggleHelp);
    assert!(app.view().contains("Keyboard Shortcuts"));

    let key = bubbletea_rs::event::KeyMsg {
        key: crossterm::event::KeyCode::Char('x'),
        modifiers: crossterm::event::KeyModifiers::NONE,
    };
    app.update(Box::new(key));

    assert!(!app.show_help);
}
