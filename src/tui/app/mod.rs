//! Main TUI application model implementing the MVU pattern.
//!
//! The model owns the route, the resolved session and the state of every
//! screen. Async commands load pages through the stored service context and
//! answer with result messages that the model applies in one step.
//!
//! # Module Structure
//!
//! - `commands`: Async commands that talk to the service
//! - `navigation`: Routes, history and list cursors
//! - `text_input`: Search, sign-in and avatar path fields
//! - `detail_handlers`: Review form, edit and delete on the detail screen
//! - `profile_handlers`: Panels, follow, avatar and calendar actions
//! - `result_handlers`: Applying finished loads and mutations
//! - `rendering`: View rendering for each screen
//! - `model_impl`: The `bubbletea_rs::Model` implementation

use bubbletea_rs::Cmd;
use tracing::debug;

use crate::api::{ApiError, MovieId, UserId};
use crate::i18n::{Locale, Text, text};
use crate::pages::{
    DetailPage, HomeBundle, Loadable, Notice, ProfilePage, SearchResults, SessionContext,
};

use super::components::{FormFocus, StarInput};
use super::messages::AppMsg;

mod commands;
mod detail_handlers;
mod model_impl;
mod navigation;
mod profile_handlers;
mod rendering;
mod result_handlers;
mod text_input;

/// Screen the app shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Home lists.
    Home,
    /// Title search.
    Search,
    /// One movie's detail screen.
    Movie(MovieId),
    /// One user's profile.
    Profile(UserId),
    /// Sign-in form.
    Login,
}

/// State of the search screen.
#[derive(Debug, Clone, Default)]
pub(crate) struct SearchState {
    /// Query being typed.
    pub(crate) input: String,
    /// Whether keystrokes go to the query field.
    pub(crate) editing: bool,
    /// Results of the last submitted query, if any.
    pub(crate) results: Option<Loadable<SearchResults>>,
}

/// Field of the sign-in form receiving keystrokes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum LoginField {
    #[default]
    Email,
    Password,
}

/// State of the sign-in form.
#[derive(Debug, Clone, Default)]
pub(crate) struct LoginForm {
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) field: LoginField,
}

/// Highlighted row and scroll position of the active list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ListCursor {
    pub(crate) position: usize,
    pub(crate) scroll_offset: usize,
}

/// Main application model for the terminal client.
#[derive(Debug)]
pub struct MarqueeApp {
    pub(crate) route: Route,
    history: Vec<Route>,
    pub(crate) session: SessionContext,
    locale: Locale,
    pub(crate) home: Loadable<HomeBundle>,
    pub(crate) home_section: usize,
    pub(crate) search: SearchState,
    pub(crate) detail: Option<DetailPage>,
    pub(crate) stars: StarInput,
    pub(crate) focus: FormFocus,
    pub(crate) confirm_delete: bool,
    pub(crate) profile: Option<ProfilePage>,
    pub(crate) avatar_input: Option<String>,
    pub(crate) login: LoginForm,
    pub(crate) cursor: ListCursor,
    notices: Vec<Notice>,
    pub(crate) loading: bool,
    /// Set while a review, follow or avatar change is in flight.
    pub(crate) mutation_pending: bool,
    width: u16,
    height: u16,
    pub(crate) show_help: bool,
}

impl MarqueeApp {
    /// Creates an app on the home screen with nothing loaded.
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self::with_dimensions(locale, 80, 24)
    }

    /// Creates an app sized for a terminal of `width` by `height`.
    #[must_use]
    pub const fn with_dimensions(locale: Locale, width: u16, height: u16) -> Self {
        Self {
            route: Route::Home,
            history: Vec::new(),
            session: SessionContext::new(),
            locale,
            home: Loadable::Pending,
            home_section: 0,
            search: SearchState {
                input: String::new(),
                editing: false,
                results: None,
            },
            detail: None,
            stars: StarInput::new(None),
            focus: FormFocus::Rating,
            confirm_delete: false,
            profile: None,
            avatar_input: None,
            login: LoginForm {
                email: String::new(),
                password: String::new(),
                field: LoginField::Email,
            },
            cursor: ListCursor {
                position: 0,
                scroll_offset: 0,
            },
            notices: Vec::new(),
            loading: false,
            mutation_pending: false,
            width,
            height,
            show_help: false,
        }
    }

    /// Screen currently shown.
    #[must_use]
    pub const fn route(&self) -> Route {
        self.route
    }

    /// Session as last resolved.
    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Display language.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Open detail page, when the detail screen has loaded.
    #[must_use]
    pub const fn detail_page(&self) -> Option<&DetailPage> {
        self.detail.as_ref()
    }

    /// Open profile page, when the profile screen has loaded.
    #[must_use]
    pub const fn profile_page(&self) -> Option<&ProfilePage> {
        self.profile.as_ref()
    }

    /// Returns true while a request for the current screen is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Oldest notice for the current screen, app-level notices first.
    #[must_use]
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.first().or_else(|| match self.route {
            Route::Movie(_) => self.detail.as_ref()?.notices().first(),
            Route::Profile(_) => self.profile.as_ref()?.notices().first(),
            Route::Home | Route::Search | Route::Login => None,
        })
    }

    /// Adds an app-level notice.
    pub(crate) fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Adds a notice describing a failed action and records it.
    pub(crate) fn push_failure(&mut self, action: Text, error: &ApiError) {
        crate::tui::record_telemetry(crate::telemetry::TelemetryEvent::action_failed(
            text(Locale::English, action),
            error,
        ));
        self.push_notice(Notice::failure(text(self.locale, action), error));
    }

    /// Claims the single mutation slot, refusing while another change is in
    /// flight.
    pub(crate) fn begin_mutation(&mut self) -> bool {
        if self.mutation_pending {
            debug!("change refused while another is in flight");
            self.push_notice(Notice::warning(text(self.locale, Text::ChangePending)));
            return false;
        }
        self.mutation_pending = true;
        true
    }

    fn dismiss_notice(&mut self) {
        if !self.notices.is_empty() {
            self.notices.remove(0);
            return;
        }
        match self.route {
            Route::Movie(_) => {
                if let Some(page) = self.detail.as_mut() {
                    page.dismiss_notice();
                }
            }
            Route::Profile(_) => {
                if let Some(page) = self.profile.as_mut() {
                    page.dismiss_notice();
                }
            }
            Route::Home | Route::Search | Route::Login => {}
        }
    }

    /// Handles a message and updates state accordingly.
    ///
    /// Delegates to a handler per message category to keep each one small.
    pub fn handle_message(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if msg.is_result() {
            return self.handle_result_msg(msg);
        }
        if msg.is_navigation() {
            return self.handle_navigation_msg(msg);
        }
        if msg.is_routing() {
            return self.handle_routing_msg(msg);
        }
        if msg.is_text_entry() {
            return self.handle_text_entry_msg(msg);
        }
        if msg.is_detail() {
            return self.handle_detail_msg(msg);
        }
        if msg.is_profile() {
            return self.handle_profile_msg(msg);
        }
        self.handle_lifecycle_msg(msg)
    }

    /// Dispatches lifecycle and window messages to their handlers.
    fn handle_lifecycle_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::Initialized => self.load_current_route(),
            AppMsg::Quit => Some(bubbletea_rs::quit()),
            AppMsg::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            AppMsg::DismissNotice => {
                self.dismiss_notice();
                None
            }
            AppMsg::WindowResized { width, height } => {
                self.width = *width;
                self.height = *height;
                self.clamp_scroll();
                None
            }
            _ => {
                debug_assert!(
                    false,
                    "non-lifecycle message routed to handle_lifecycle_msg"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests;
