//! Panels, follow, avatar and calendar actions on the profile screen.

use bubbletea_rs::Cmd;
use chrono::{Months, NaiveDate};

use super::{ListCursor, MarqueeApp, Route, commands};
use crate::pages::{DraftError, Notice, ProfilePanel};
use crate::tui::messages::AppMsg;

impl MarqueeApp {
    /// Dispatches profile actions.
    pub(super) fn handle_profile_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if !matches!(self.route, Route::Profile(_)) || self.profile.is_none() {
            return None;
        }
        match msg {
            AppMsg::TogglePanel(panel) => {
                if let Some(page) = self.profile.as_mut() {
                    page.toggle_panel(*panel);
                }
                self.cursor = ListCursor::default();
                None
            }
            AppMsg::FollowToggle => self.toggle_follow(),
            AppMsg::BeginAvatar => {
                self.begin_avatar();
                None
            }
            AppMsg::UploadAvatar => self.upload_avatar(),
            AppMsg::ClearAvatar => {
                if let Some(page) = self.profile.as_mut() {
                    page.clear_avatar();
                }
                None
            }
            AppMsg::PreviousDay => {
                self.shift_date(|date| date.pred_opt());
                None
            }
            AppMsg::NextDay => {
                self.shift_date(|date| date.succ_opt());
                None
            }
            AppMsg::PreviousMonth => {
                self.shift_date(|date| date.checked_sub_months(Months::new(1)));
                None
            }
            AppMsg::NextMonth => {
                self.shift_date(|date| date.checked_add_months(Months::new(1)));
                None
            }
            _ => {
                debug_assert!(false, "non-profile message routed to profile handlers");
                None
            }
        }
    }

    fn toggle_follow(&mut self) -> Option<Cmd> {
        let planned = self.profile.as_ref()?.plan_follow();
        let action = match planned {
            Ok(action) => action,
            Err(error) => {
                self.push_page_warning(&error);
                return None;
            }
        };
        if !self.begin_mutation() {
            return None;
        }
        let viewer = self.session.viewer().cloned();
        let page = self.profile.as_mut()?;
        page.apply_optimistic_follow(action);
        Some(commands::follow(page.user_id(), action, viewer))
    }

    fn push_page_warning(&mut self, error: &DraftError) {
        if let Some(page) = self.profile.as_mut() {
            page.push_notice(Notice::warning(error.to_string()));
        }
    }

    fn begin_avatar(&mut self) {
        let Some(page) = self.profile.as_mut() else {
            return;
        };
        if page.is_owner() {
            self.avatar_input = Some(String::new());
        } else {
            page.push_notice(Notice::warning(DraftError::NotProfileOwner.to_string()));
        }
    }

    fn upload_avatar(&mut self) -> Option<Cmd> {
        let page = self.profile.as_ref()?;
        let user = page.user_id();
        let upload = match page.plan_upload() {
            Ok(upload) => upload,
            Err(error) => {
                self.push_page_warning(&error);
                return None;
            }
        };
        if !self.begin_mutation() {
            return None;
        }
        self.loading = true;
        let viewer = self.session.viewer().cloned();
        Some(commands::upload_avatar(user, upload, viewer))
    }

    /// Moves the calendar selection; only meaningful on the calendar panel.
    fn shift_date(&mut self, shift: impl FnOnce(NaiveDate) -> Option<NaiveDate>) {
        let Some(page) = self.profile.as_mut() else {
            return;
        };
        if page.panel() != ProfilePanel::Calendar {
            return;
        }
        if let Some(next) = page.selected_date().and_then(shift) {
            page.select_date(next);
        }
    }
}
