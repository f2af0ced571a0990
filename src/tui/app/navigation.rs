//! Routes, history and list cursors.
//!
//! Opening a screen pushes the previous route onto the history and issues
//! the screen's load; Back pops it and loads that screen again, so revisited
//! screens always show fresh data.

use bubbletea_rs::Cmd;
use tracing::debug;

use super::{ListCursor, MarqueeApp, Route, commands};
use crate::api::MovieSummary;
use crate::i18n::{Text, text};
use crate::pages::{DraftError, HOME_SECTIONS, Loadable, Notice, ProfilePanel};
use crate::tui::components::{FormFocus, MovieListComponent, StarInput};
use crate::tui::messages::AppMsg;

/// Rows used by the header and status bar.
pub(super) const CHROME_HEIGHT: usize = 2;

/// Rows above the movie list on the home and search screens.
pub(super) const LIST_HEADER_HEIGHT: usize = 2;

impl MarqueeApp {
    /// Dispatches cursor and back messages.
    pub(super) fn handle_navigation_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::CursorUp => {
                self.move_cursor_up();
                None
            }
            AppMsg::CursorDown => {
                self.move_cursor_down();
                None
            }
            AppMsg::Select => self.select_under_cursor(),
            AppMsg::NextSection => {
                self.next_section();
                None
            }
            AppMsg::Back => self.go_back(),
            _ => {
                debug_assert!(false, "non-navigation message routed to navigation");
                None
            }
        }
    }

    /// Dispatches route and session messages.
    pub(super) fn handle_routing_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::OpenSearch => self.open_search(),
            AppMsg::OpenMyProfile => self.open_my_profile(),
            AppMsg::OpenLogin => self.navigate(Route::Login),
            AppMsg::Logout => self.start_logout(),
            AppMsg::Reload => self.load_current_route(),
            _ => {
                debug_assert!(false, "non-routing message routed to routing");
                None
            }
        }
    }

    /// Shows `route`, remembering the current one for Back.
    pub(crate) fn navigate(&mut self, route: Route) -> Option<Cmd> {
        if route != self.route {
            self.history.push(self.route);
        }
        self.enter(route)
    }

    /// Returns to the previous screen, or closes the open form or modal.
    fn go_back(&mut self) -> Option<Cmd> {
        if self.confirm_delete {
            self.confirm_delete = false;
            return None;
        }
        let on_detail = matches!(self.route, Route::Movie(_));
        if let Some(page) = self.detail.as_mut().filter(|page| on_detail && page.is_editing()) {
            page.cancel_edit();
            self.stars = StarInput::default();
            self.focus = FormFocus::Rating;
            return None;
        }
        let previous = self.history.pop()?;
        self.enter(previous)
    }

    fn enter(&mut self, route: Route) -> Option<Cmd> {
        debug!(?route, "entering route");
        self.route = route;
        self.cursor = ListCursor::default();
        self.confirm_delete = false;
        self.avatar_input = None;
        self.focus = FormFocus::Rating;
        self.stars = StarInput::default();
        match route {
            Route::Movie(_) => self.detail = None,
            Route::Profile(_) => self.profile = None,
            Route::Home | Route::Search | Route::Login => {}
        }
        self.load_current_route()
    }

    /// Issues the load for the current route.
    pub(super) fn load_current_route(&mut self) -> Option<Cmd> {
        let session = self.session.clone();
        let cmd = match self.route {
            Route::Home => Some(commands::home(session)),
            Route::Search => self.search_command(),
            Route::Movie(movie) => Some(commands::detail(movie)),
            Route::Profile(user) => Some(commands::profile(user, session)),
            Route::Login => None,
        };
        self.loading = cmd.is_some();
        cmd
    }

    fn open_search(&mut self) -> Option<Cmd> {
        if self.route == Route::Search {
            self.search.editing = true;
            return None;
        }
        self.search.editing = true;
        self.navigate(Route::Search)
    }

    fn open_my_profile(&mut self) -> Option<Cmd> {
        let Some(user) = self.session.viewer().and_then(|viewer| viewer.id) else {
            self.push_notice(Notice::warning(DraftError::SignedOut.to_string()));
            return None;
        };
        self.navigate(Route::Profile(user))
    }

    fn start_logout(&mut self) -> Option<Cmd> {
        if self.session.viewer().is_none() && self.session.is_resolved() {
            self.push_notice(Notice::info(text(self.locale(), Text::NotSignedIn)));
            return None;
        }
        self.loading = true;
        Some(commands::logout(self.session.clone()))
    }

    /// Movies in the active home section or search result list.
    pub(super) fn visible_movies(&self) -> &[MovieSummary] {
        match self.route {
            Route::Home => self
                .home
                .loaded()
                .and_then(|bundle| bundle.section(*HOME_SECTIONS.get(self.home_section)?))
                .and_then(|section| section.movies.loaded())
                .map(Vec::as_slice)
                .unwrap_or_default(),
            Route::Search => self
                .search
                .results
                .as_ref()
                .and_then(Loadable::loaded)
                .map(|results| results.movies.as_slice())
                .unwrap_or_default(),
            Route::Movie(_) | Route::Profile(_) | Route::Login => &[],
        }
    }

    /// Number of rows the cursor can move over on the current screen.
    fn list_len(&self) -> usize {
        match self.route {
            Route::Home | Route::Search => self.visible_movies().len(),
            Route::Profile(_) => self.profile_users().map_or(0, <[_]>::len),
            Route::Movie(_) | Route::Login => 0,
        }
    }

    /// Users listed by the open follower or followee panel.
    pub(super) fn profile_users(&self) -> Option<&[crate::api::User]> {
        let page = self.profile.as_ref()?;
        let data = page.data()?;
        let list = match page.panel() {
            ProfilePanel::Followers => &data.followers,
            ProfilePanel::Following => &data.following,
            ProfilePanel::Hidden | ProfilePanel::Ratings | ProfilePanel::Calendar => {
                return None;
            }
        };
        list.loaded().map(Vec::as_slice)
    }

    /// Cards that fit in the list area.
    pub(super) fn visible_cards(&self) -> usize {
        MovieListComponent::visible_cards(self.list_height())
    }

    /// Lines available to the movie list.
    pub(super) fn list_height(&self) -> usize {
        self.body_height().saturating_sub(LIST_HEADER_HEIGHT)
    }

    /// Lines between the header and the status bar.
    pub(super) fn body_height(&self) -> usize {
        usize::from(self.height).saturating_sub(CHROME_HEIGHT)
    }

    fn move_cursor_up(&mut self) {
        self.cursor.position = self.cursor.position.saturating_sub(1);
        self.clamp_scroll();
    }

    fn move_cursor_down(&mut self) {
        let last = self.list_len().saturating_sub(1);
        self.cursor.position = self.cursor.position.saturating_add(1).min(last);
        self.clamp_scroll();
    }

    /// Keeps the cursor inside the list and the list window around it.
    pub(super) fn clamp_scroll(&mut self) {
        let last = self.list_len().saturating_sub(1);
        self.cursor.position = self.cursor.position.min(last);
        let visible = self.visible_cards();
        if self.cursor.position < self.cursor.scroll_offset {
            self.cursor.scroll_offset = self.cursor.position;
        } else if self.cursor.position >= self.cursor.scroll_offset.saturating_add(visible) {
            self.cursor.scroll_offset = self
                .cursor
                .position
                .saturating_add(1)
                .saturating_sub(visible);
        }
    }

    fn next_section(&mut self) {
        if self.route != Route::Home {
            return;
        }
        self.home_section = self
            .home_section
            .saturating_add(1)
            .checked_rem(HOME_SECTIONS.len())
            .unwrap_or(0);
        self.cursor = ListCursor::default();
    }

    fn select_under_cursor(&mut self) -> Option<Cmd> {
        match self.route {
            Route::Home | Route::Search => {
                let movie = self.visible_movies().get(self.cursor.position)?.id;
                self.navigate(Route::Movie(movie))
            }
            Route::Profile(_) => {
                let user = self
                    .profile_users()?
                    .get(self.cursor.position)
                    .and_then(|user| user.id)?;
                self.navigate(Route::Profile(user))
            }
            Route::Movie(_) | Route::Login => None,
        }
    }
}
