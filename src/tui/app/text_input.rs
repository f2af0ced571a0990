//! Text fields: search query, sign-in form, avatar path and review text.

use bubbletea_rs::Cmd;
use camino::Utf8PathBuf;

use super::{LoginField, MarqueeApp, Route, commands};
use crate::api::{Credentials, SearchQuery};
use crate::pages::{Loadable, Notice, ReviewPanel};
use crate::tui::components::FormFocus;
use crate::tui::messages::AppMsg;

/// Field that receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TextTarget {
    Search,
    Login,
    AvatarPath,
    ReviewContent,
}

impl MarqueeApp {
    /// Returns the field capturing keystrokes, if any.
    pub(super) fn text_target(&self) -> Option<TextTarget> {
        if self.avatar_input.is_some() {
            return Some(TextTarget::AvatarPath);
        }
        match self.route {
            Route::Login => Some(TextTarget::Login),
            Route::Search if self.search.editing => Some(TextTarget::Search),
            Route::Movie(_) if self.focus == FormFocus::Content && self.form_open() => {
                Some(TextTarget::ReviewContent)
            }
            Route::Home | Route::Search | Route::Movie(_) | Route::Profile(_) => None,
        }
    }

    /// Returns true when the detail screen shows the review form.
    pub(super) fn form_open(&self) -> bool {
        self.detail
            .as_ref()
            .is_some_and(|page| matches!(page.review_panel(), ReviewPanel::Form { .. }))
    }

    /// Dispatches text entry messages to the focused field.
    pub(super) fn handle_text_entry_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        let target = self.text_target()?;
        match msg {
            AppMsg::InputChar(character) => {
                self.type_char(target, *character);
                None
            }
            AppMsg::InputBackspace => {
                self.erase_char(target);
                None
            }
            AppMsg::InputSubmit => self.submit_text(target),
            AppMsg::InputNextField => {
                self.next_text_field(target);
                None
            }
            AppMsg::InputCancel => self.cancel_text(target),
            _ => {
                debug_assert!(false, "non-text message routed to text entry");
                None
            }
        }
    }

    fn type_char(&mut self, target: TextTarget, character: char) {
        match target {
            TextTarget::Search => self.search.input.push(character),
            TextTarget::Login => self.login_field_mut().push(character),
            TextTarget::AvatarPath => {
                if let Some(path) = self.avatar_input.as_mut() {
                    path.push(character);
                }
            }
            TextTarget::ReviewContent => {
                if let Some(page) = self.detail.as_mut() {
                    page.draft_mut().push_char(character);
                }
            }
        }
    }

    fn erase_char(&mut self, target: TextTarget) {
        match target {
            TextTarget::Search => {
                self.search.input.pop();
            }
            TextTarget::Login => {
                self.login_field_mut().pop();
            }
            TextTarget::AvatarPath => {
                if let Some(path) = self.avatar_input.as_mut() {
                    path.pop();
                }
            }
            TextTarget::ReviewContent => {
                if let Some(page) = self.detail.as_mut() {
                    page.draft_mut().pop_char();
                }
            }
        }
    }

    const fn login_field_mut(&mut self) -> &mut String {
        match self.login.field {
            LoginField::Email => &mut self.login.email,
            LoginField::Password => &mut self.login.password,
        }
    }

    fn submit_text(&mut self, target: TextTarget) -> Option<Cmd> {
        match target {
            TextTarget::Search => self.submit_search(),
            TextTarget::Login => self.submit_login(),
            TextTarget::AvatarPath => self.submit_avatar_path(),
            TextTarget::ReviewContent => self.submit_review(),
        }
    }

    fn next_text_field(&mut self, target: TextTarget) {
        match target {
            TextTarget::Login => {
                self.login.field = match self.login.field {
                    LoginField::Email => LoginField::Password,
                    LoginField::Password => LoginField::Email,
                };
            }
            TextTarget::ReviewContent => self.focus = FormFocus::Rating,
            TextTarget::Search | TextTarget::AvatarPath => {}
        }
    }

    fn cancel_text(&mut self, target: TextTarget) -> Option<Cmd> {
        match target {
            TextTarget::Search => {
                self.search.editing = false;
                if self.search.results.is_none() {
                    return self.handle_message(&AppMsg::Back);
                }
                None
            }
            TextTarget::AvatarPath => {
                self.avatar_input = None;
                None
            }
            TextTarget::Login | TextTarget::ReviewContent => self.handle_message(&AppMsg::Back),
        }
    }

    /// Builds the search command for the typed query, if it is not blank.
    pub(super) fn search_command(&mut self) -> Option<Cmd> {
        let query = SearchQuery::new(&self.search.input).ok()?;
        self.search.results = Some(Loadable::Pending);
        Some(commands::search_movies(
            self.route,
            query,
            self.session.clone(),
        ))
    }

    fn submit_search(&mut self) -> Option<Cmd> {
        if let Err(error) = SearchQuery::new(&self.search.input) {
            self.push_notice(Notice::warning(error.to_string()));
            return None;
        }
        self.search.editing = false;
        self.cursor = super::ListCursor::default();
        let cmd = self.search_command();
        self.loading = cmd.is_some();
        cmd
    }

    fn submit_login(&mut self) -> Option<Cmd> {
        if self.login.field == LoginField::Email {
            self.login.field = LoginField::Password;
            return None;
        }
        match Credentials::new(&self.login.email, &self.login.password) {
            Ok(credentials) => {
                self.loading = true;
                Some(commands::login(self.session.clone(), credentials))
            }
            Err(error) => {
                self.push_notice(Notice::warning(error.to_string()));
                None
            }
        }
    }

    fn submit_avatar_path(&mut self) -> Option<Cmd> {
        let typed = self.avatar_input.take()?;
        let path = Utf8PathBuf::from(typed.trim());
        if path.as_str().is_empty() {
            return None;
        }
        let page = self.profile.as_mut()?;
        if let Err(error) = page.begin_avatar(path.clone()) {
            page.push_notice(Notice::warning(error.to_string()));
            return None;
        }
        Some(commands::read_avatar_file(page.user_id(), path))
    }
}
