//! bubbletea-rs `Model` implementation: key routing and frame layout.
//!
//! A frame is the header line, the route body clipped or padded to the
//! terminal, and the status bar.

use std::any::Any;

use bubbletea_rs::{Cmd, Model};

use super::text_input::TextTarget;
use super::{MarqueeApp, Route, commands};
use crate::tui::components::text_layout::fit_to_width;
use crate::tui::input::{InputContext, map_key_to_message_with_context};
use crate::tui::messages::AppMsg;

impl Model for MarqueeApp {
    fn init() -> (Self, Option<Cmd>) {
        let model = Self::new(crate::tui::context_locale());
        // The first route load is issued when `AppMsg::Initialized` arrives.
        (model, Some(commands::initialized()))
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        if let Some(app_msg) = msg.downcast_ref::<AppMsg>() {
            return self.handle_message(app_msg);
        }

        if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
            if self.show_help {
                return self.handle_message(&AppMsg::ToggleHelp);
            }
            let mapped = map_key_to_message_with_context(key_msg, self.input_context())?;
            return self.handle_message(&mapped);
        }

        if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
            return self.handle_message(&AppMsg::WindowResized {
                width: size_msg.width,
                height: size_msg.height,
            });
        }

        None
    }

    fn view(&self) -> String {
        if self.show_help {
            return self.normalise_viewport(&self.render_help_overlay());
        }

        let body_height = self.body_height();
        let mut body: Vec<String> = self
            .render_body()
            .lines()
            .take(body_height)
            .map(str::to_owned)
            .collect();
        body.resize(body_height, String::new());

        let mut output = self.render_header();
        for line in body {
            output.push_str(&line);
            output.push('\n');
        }
        output.push_str(&self.render_status_bar());

        self.normalise_viewport(&output)
    }
}

impl MarqueeApp {
    /// Returns the current input context for context-aware key mapping.
    pub(super) fn input_context(&self) -> InputContext {
        if self.confirm_delete {
            return InputContext::Confirm;
        }
        match self.text_target() {
            Some(TextTarget::Search | TextTarget::Login | TextTarget::AvatarPath) => {
                return InputContext::TextEntry;
            }
            Some(TextTarget::ReviewContent) | None => {}
        }
        match self.route {
            Route::Home | Route::Search => InputContext::Browse,
            Route::Movie(_) if self.form_open() => InputContext::DetailForm(self.focus),
            Route::Movie(_) => InputContext::Detail,
            Route::Profile(_) => InputContext::Profile,
            Route::Login => InputContext::TextEntry,
        }
    }

    /// Normalises the rendered frame to terminal dimensions.
    ///
    /// Rows are padded to clear cells left over from a wider previous frame
    /// and clamped one column short of the terminal width to avoid autowrap.
    pub(super) fn normalise_viewport(&self, output: &str) -> String {
        let width = usize::from(self.width.max(1));
        let safe_width = width.saturating_sub(1).max(1);
        let height = usize::from(self.height.max(1));

        let mut lines: Vec<String> = output
            .lines()
            .map(|line| fit_to_width(line, safe_width))
            .collect();
        lines.truncate(height);
        lines.resize(height, " ".repeat(safe_width));

        let mut normalised = lines.join("\n");
        normalised.push('\n');
        normalised
    }
}
