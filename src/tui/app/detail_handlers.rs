//! Review form, edit and delete actions on the detail screen.

use bubbletea_rs::Cmd;
use tracing::debug;

use super::{MarqueeApp, Route, commands};
use crate::i18n::{Text, text};
use crate::pages::{DetailPage, DraftError, Notice};
use crate::tui::components::{FormFocus, StarInput};
use crate::tui::messages::AppMsg;

impl MarqueeApp {
    /// Dispatches detail screen actions.
    pub(super) fn handle_detail_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if !matches!(self.route, Route::Movie(_)) || self.detail.is_none() {
            return None;
        }
        match msg {
            AppMsg::BeginEdit => {
                self.begin_edit();
                None
            }
            AppMsg::RequestDelete => {
                self.request_delete();
                None
            }
            AppMsg::ConfirmDelete(answer) => self.answer_delete(*answer),
            AppMsg::StarLeft => {
                self.stars.hover_previous();
                None
            }
            AppMsg::StarRight => {
                self.stars.hover_next();
                None
            }
            AppMsg::StarSelect(stars) => {
                let chosen = self.stars.select(*stars);
                self.apply_star_choice(chosen);
                None
            }
            AppMsg::StarCommit => {
                let chosen = self.stars.commit();
                self.apply_star_choice(chosen);
                None
            }
            AppMsg::FocusNext => {
                self.focus = match self.focus {
                    FormFocus::Rating => FormFocus::Content,
                    FormFocus::Content => FormFocus::Rating,
                };
                None
            }
            AppMsg::SubmitReview => self.submit_review(),
            _ => {
                debug_assert!(false, "non-detail message routed to detail handlers");
                None
            }
        }
    }

    fn page_mut(&mut self) -> Option<&mut DetailPage> {
        self.detail.as_mut()
    }

    fn begin_edit(&mut self) {
        let Some(page) = self.page_mut() else {
            return;
        };
        match page.begin_edit() {
            Ok(()) => {
                let rating = page.draft().rating();
                self.stars = StarInput::new(rating);
                self.focus = FormFocus::Rating;
            }
            Err(error) => page.push_notice(Notice::warning(error.to_string())),
        }
    }

    fn request_delete(&mut self) {
        let Some(page) = self.page_mut() else {
            return;
        };
        match page.plan_deletion() {
            Ok(_) => self.confirm_delete = true,
            Err(error) => page.push_notice(Notice::warning(error.to_string())),
        }
    }

    fn answer_delete(&mut self, confirmed: bool) -> Option<Cmd> {
        if !self.confirm_delete {
            return None;
        }
        self.confirm_delete = false;
        if !confirmed {
            debug!("review deletion declined");
            return None;
        }
        let (movie, review) = {
            let page = self.detail.as_ref()?;
            (page.movie_id(), page.plan_deletion().ok()?)
        };
        if !self.begin_mutation() {
            return None;
        }
        self.loading = true;
        Some(commands::delete(movie, review))
    }

    fn apply_star_choice(&mut self, chosen: Option<crate::api::Rating>) {
        if let (Some(rating), Some(page)) = (chosen, self.detail.as_mut()) {
            page.draft_mut().set_rating(rating);
        }
    }

    /// Validates the form and sends the create or update.
    pub(super) fn submit_review(&mut self) -> Option<Cmd> {
        let locale = self.locale();
        let page = self.detail.as_mut()?;
        let movie = page.movie_id();
        let plan = match page.plan_submission() {
            Ok(plan) => plan,
            Err(DraftError::MissingRating) => {
                page.push_notice(Notice::warning(text(locale, Text::ChooseRating)));
                return None;
            }
            Err(error) => {
                page.push_notice(Notice::warning(error.to_string()));
                return None;
            }
        };
        if !self.begin_mutation() {
            return None;
        }
        self.loading = true;
        Some(commands::submit(movie, plan))
    }
}
