//! Applying finished loads and mutations.
//!
//! Loads for a route the user has since left are dropped; the session they
//! resolved is still adopted.

use std::time::Duration;

use bubbletea_rs::Cmd;
use camino::Utf8Path;
use tracing::debug;

use super::{MarqueeApp, Route};
use crate::api::{ApiError, User};
use crate::i18n::{Text, signed_in, text};
use crate::pages::detail::Refetch;
use crate::pages::{
    AvatarDraft, DeleteOutcome, DetailBundle, DetailPage, FollowOutcome, HomeBundle, Loadable,
    Notice, ProfileBundle, ProfilePage, SearchResults, SessionContext,
};
use crate::telemetry::TelemetryEvent;
use crate::tui::components::{FormFocus, StarInput};
use crate::tui::messages::AppMsg;
use crate::tui::record_telemetry;

fn count_failures(failed: &[bool]) -> u32 {
    u32::try_from(failed.iter().filter(|flag| **flag).count()).unwrap_or(u32::MAX)
}

fn record_page(page: &str, elapsed: Duration, failed: &[bool]) {
    record_telemetry(TelemetryEvent::page_loaded(
        page,
        elapsed,
        count_failures(failed),
    ));
}

impl MarqueeApp {
    /// Dispatches async command results.
    pub(super) fn handle_result_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::HomeLoaded {
                bundle,
                session,
                elapsed,
            } => {
                self.apply_home(bundle, session, *elapsed);
                None
            }
            AppMsg::SearchLoaded {
                route,
                result,
                session,
                elapsed,
            } => {
                self.apply_search(*route, result, session, *elapsed);
                None
            }
            AppMsg::DetailLoaded { bundle, elapsed } => {
                self.apply_detail(bundle, *elapsed);
                None
            }
            AppMsg::ProfileLoaded {
                bundle,
                session,
                elapsed,
            } => {
                self.apply_profile(bundle, session, *elapsed);
                None
            }
            AppMsg::ReviewSubmitted { movie, result } => {
                self.apply_review_submitted(Route::Movie(*movie), result);
                None
            }
            AppMsg::ReviewDeleted { movie, result } => {
                self.apply_review_deleted(Route::Movie(*movie), result);
                None
            }
            AppMsg::FollowCompleted { user, outcome } => {
                self.apply_follow(Route::Profile(*user), outcome);
                None
            }
            AppMsg::AvatarRead { user, path, result } => {
                self.apply_avatar_read(Route::Profile(*user), path, result);
                None
            }
            AppMsg::AvatarUploaded { user, result } => {
                self.apply_avatar_uploaded(Route::Profile(*user), result);
                None
            }
            AppMsg::LoginCompleted { session, result } => self.apply_login(session, result),
            AppMsg::LogoutCompleted { session, result } => self.apply_logout(session, result),
            _ => {
                debug_assert!(false, "non-result message routed to result handlers");
                None
            }
        }
    }

    /// Returns true when a result for `route` still belongs on screen.
    fn is_current(&self, route: Route) -> bool {
        let current = self.route == route;
        if !current {
            debug!(?route, current = ?self.route, "dropping result for a route no longer shown");
        }
        current
    }

    fn apply_home(&mut self, bundle: &HomeBundle, session: &SessionContext, elapsed: Duration) {
        self.session = session.clone();
        if !self.is_current(Route::Home) {
            return;
        }
        let failed: Vec<bool> = bundle
            .sections
            .iter()
            .map(|section| section.movies.error().is_some())
            .collect();
        record_page("home", elapsed, &failed);
        if bundle.all_failed() {
            self.push_notice(Notice::warning(text(
                self.locale(),
                Text::MovieListsUnavailable,
            )));
        }
        self.home = Loadable::Loaded(bundle.clone());
        self.loading = false;
        self.clamp_scroll();
    }

    fn apply_search(
        &mut self,
        route: Route,
        result: &Result<SearchResults, ApiError>,
        session: &SessionContext,
        elapsed: Duration,
    ) {
        self.session = session.clone();
        if !self.is_current(route) {
            return;
        }
        record_page("search", elapsed, &[result.is_err()]);
        if let Err(error) = result {
            self.push_failure(Text::SearchFailed, error);
        }
        self.search.results = Some(Loadable::from_result(result.clone()));
        self.loading = false;
        self.clamp_scroll();
    }

    fn apply_detail(&mut self, bundle: &DetailBundle, elapsed: Duration) {
        if !self.is_current(Route::Movie(bundle.movie_id)) {
            return;
        }
        record_page(
            "detail",
            elapsed,
            &[
                bundle.identity.is_err(),
                bundle.movie.is_err(),
                bundle.reviews.is_err(),
            ],
        );
        let locale = self.locale();
        let page = DetailPage::open_in(bundle.clone(), &mut self.session, locale);
        self.stars = StarInput::default();
        self.focus = FormFocus::Rating;
        self.confirm_delete = false;
        self.detail = Some(page);
        self.loading = false;
    }

    fn apply_profile(
        &mut self,
        bundle: &ProfileBundle,
        session: &SessionContext,
        elapsed: Duration,
    ) {
        self.session = session.clone();
        if !self.is_current(Route::Profile(bundle.user_id)) {
            return;
        }
        record_page(
            "profile",
            elapsed,
            &[
                bundle.user.is_err(),
                bundle.counts.error().is_some(),
                bundle.is_following.error().is_some(),
                bundle.followers.error().is_some(),
                bundle.following.error().is_some(),
                bundle.ratings.error().is_some(),
                bundle.calendar.error().is_some(),
            ],
        );
        let viewer_unchanged = self
            .profile
            .as_ref()
            .is_some_and(|page| page.viewer() == self.session.viewer());
        match self.profile.as_mut() {
            Some(page) if viewer_unchanged && page.user_id() == bundle.user_id => {
                page.refresh(bundle.clone());
            }
            _ => {
                let viewer = self.session.viewer().cloned();
                self.profile = Some(ProfilePage::open_in(bundle.clone(), viewer, self.locale()));
            }
        }
        self.loading = false;
        self.clamp_scroll();
    }

    fn apply_review_submitted(&mut self, route: Route, result: &Result<Refetch, ApiError>) {
        self.loading = false;
        self.mutation_pending = false;
        if let Err(error) = result {
            record_telemetry(TelemetryEvent::action_failed("save review", error));
        }
        if !self.is_current(route) {
            return;
        }
        if let Some(page) = self.detail.as_mut() {
            page.apply_submission(result.clone());
            if !page.is_editing() && result.is_ok() {
                self.stars = StarInput::default();
                self.focus = FormFocus::Rating;
            }
        }
    }

    fn apply_review_deleted(&mut self, route: Route, result: &Result<DeleteOutcome, ApiError>) {
        self.loading = false;
        self.mutation_pending = false;
        if let Err(error) = result {
            record_telemetry(TelemetryEvent::action_failed("delete review", error));
        }
        if !self.is_current(route) {
            return;
        }
        if let Some(page) = self.detail.as_mut() {
            page.apply_deletion(result.clone());
            self.stars = StarInput::default();
            self.focus = FormFocus::Rating;
        }
    }

    fn apply_follow(&mut self, route: Route, outcome: &FollowOutcome) {
        self.mutation_pending = false;
        if let Err(error) = &outcome.result {
            record_telemetry(TelemetryEvent::action_failed("follow", error));
        }
        if !self.is_current(route) {
            return;
        }
        if let Some(page) = self.profile.as_mut() {
            page.apply_follow(outcome.clone());
        }
        self.clamp_scroll();
    }

    fn apply_avatar_read(
        &mut self,
        route: Route,
        path: &Utf8Path,
        result: &Result<AvatarDraft, ApiError>,
    ) {
        if !self.is_current(route) {
            return;
        }
        if let Some(page) = self.profile.as_mut() {
            page.apply_avatar_read(path, result.clone());
        }
    }

    fn apply_avatar_uploaded(&mut self, route: Route, result: &Result<ProfileBundle, ApiError>) {
        self.loading = false;
        self.mutation_pending = false;
        if let Err(error) = result {
            record_telemetry(TelemetryEvent::action_failed("upload avatar", error));
        }
        if !self.is_current(route) {
            return;
        }
        if let Some(page) = self.profile.as_mut() {
            page.apply_upload(result.clone());
        }
    }

    fn apply_login(
        &mut self,
        session: &SessionContext,
        result: &Result<User, ApiError>,
    ) -> Option<Cmd> {
        self.session = session.clone();
        self.loading = false;
        match result {
            Ok(user) => {
                self.push_notice(Notice::info(signed_in(
                    self.locale(),
                    user.display_name(),
                )));
                self.login = super::LoginForm::default();
                if self.route == Route::Login {
                    self.handle_message(&AppMsg::Back)
                        .or_else(|| self.navigate(Route::Home))
                } else {
                    self.load_current_route()
                }
            }
            Err(error) => {
                self.login.password.clear();
                self.push_failure(Text::SignInFailed, error);
                None
            }
        }
    }

    fn apply_logout(
        &mut self,
        session: &SessionContext,
        result: &Result<(), ApiError>,
    ) -> Option<Cmd> {
        self.session = session.clone();
        self.loading = false;
        match result {
            Ok(()) => {
                self.push_notice(Notice::info(text(self.locale(), Text::SignedOut)));
                self.load_current_route()
            }
            Err(error) => {
                self.push_failure(Text::SignOutFailed, error);
                None
            }
        }
    }
}
