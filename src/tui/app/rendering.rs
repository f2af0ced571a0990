//! Rendering logic for the terminal client.
//!
//! These are pure query methods that read state without modification. Each
//! screen renders its body into the rows between the header and the status
//! bar.

use super::{LoginField, MarqueeApp, Route};
use crate::i18n::{Text, list_heading, text};
use crate::pages::{HOME_SECTIONS, Loadable, NoticeLevel, RatingLookup};
use crate::tui::components::text_layout::truncate_to_width;
use crate::tui::components::{
    DetailViewComponent, DetailViewContext, MovieListComponent, MovieListViewContext,
    ProfileViewComponent, ProfileViewContext,
};
use crate::tui::input::InputContext;

const HELP_TEXT: &str = r"
=== Keyboard Shortcuts ===

Browsing:
  j, Down    Move cursor down
  k, Up      Move cursor up
  Enter      Open the highlighted movie or user
  Tab        Next home section
  /          Search by title
  p          My profile
  i          Sign in
  o          Sign out
  r          Reload this screen
  c          Dismiss the notice
  Esc        Back
  ?          Toggle this help
  q          Quit

Movie detail:
  e          Edit my review
  d          Delete my review
  h/l, ←/→   Move the star preview
  1-5        Choose whole stars
  Enter      Commit the previewed stars
  Tab        Switch between stars and text
  s          Save the review

Profile:
  1-4        Followers / Following / Rated / Calendar
  f          Follow or unfollow
  a          Choose an avatar image
  u          Upload the chosen image
  x          Discard the chosen image
  h/l        Previous / next calendar day
  [ / ]      Previous / next month

Press any key to close this help.
";

impl MarqueeApp {
    /// Renders the header line.
    pub(super) fn render_header(&self) -> String {
        let screen = match self.route {
            Route::Home => "Home",
            Route::Search => "Search",
            Route::Movie(_) => "Movie",
            Route::Profile(_) => "Profile",
            Route::Login => "Sign in",
        };
        let viewer = self
            .session
            .viewer()
            .map_or_else(|| "signed out".to_owned(), |user| user.display_name().to_owned());
        let loading = if self.loading {
            format!(" [{}]", text(self.locale(), Text::Loading))
        } else {
            String::new()
        };
        format!("Marquee · {screen} · {viewer}{loading}\n")
    }

    /// Renders the current screen's body.
    pub(super) fn render_body(&self) -> String {
        match self.route {
            Route::Home => self.render_home(),
            Route::Search => self.render_search(),
            Route::Movie(_) => self.render_detail(),
            Route::Profile(_) => self.render_profile(),
            Route::Login => self.render_login(),
        }
    }

    fn terminal_width(&self) -> usize {
        usize::from(self.width).max(1)
    }

    fn loading_line(&self) -> String {
        format!("  {}\n", text(self.locale(), Text::Loading))
    }

    fn render_home(&self) -> String {
        let locale = self.locale();
        let tabs = HOME_SECTIONS
            .iter()
            .enumerate()
            .map(|(index, kind)| {
                let heading = list_heading(locale, *kind);
                if index == self.home_section {
                    format!("[{heading}]")
                } else {
                    format!(" {heading} ")
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let mut output = format!("{tabs}\n\n");

        let Some(bundle) = self.home.loaded() else {
            output.push_str(&self.loading_line());
            return output;
        };
        let section = HOME_SECTIONS
            .get(self.home_section)
            .and_then(|kind| bundle.section(*kind));
        match section.map(|found| &found.movies) {
            Some(Loadable::Failed(error)) => {
                output.push_str(&truncate_to_width(
                    &format!("  ({error})"),
                    self.terminal_width(),
                ));
                output.push('\n');
            }
            Some(Loadable::Pending) | None => output.push_str(&self.loading_line()),
            Some(Loadable::Loaded(_)) => {
                output.push_str(&self.render_movie_list(&bundle.ratings, Text::NoMovies));
            }
        }
        output
    }

    fn render_search(&self) -> String {
        let cursor = if self.search.editing { "_" } else { "" };
        let mut output = format!("/ {}{cursor}\n\n", self.search.input);
        match &self.search.results {
            None => {}
            Some(Loadable::Pending) => output.push_str(&self.loading_line()),
            Some(Loadable::Failed(error)) => {
                output.push_str(&truncate_to_width(
                    &format!("  ({error})"),
                    self.terminal_width(),
                ));
                output.push('\n');
            }
            Some(Loadable::Loaded(results)) => {
                output.push_str(&self.render_movie_list(&results.ratings, Text::NoResults));
            }
        }
        output
    }

    fn render_movie_list(&self, ratings: &RatingLookup, empty: Text) -> String {
        MovieListComponent::view(&MovieListViewContext {
            movies: self.visible_movies(),
            ratings,
            locale: self.locale(),
            cursor: Some(self.cursor.position),
            scroll_offset: self.cursor.scroll_offset,
            max_height: self.list_height(),
            max_width: self.terminal_width(),
            empty,
        })
    }

    fn render_detail(&self) -> String {
        let Some(page) = self.detail.as_ref() else {
            return self.loading_line();
        };
        let mut output = DetailViewComponent::view(&DetailViewContext {
            page,
            stars: &self.stars,
            focus: self.focus,
            locale: self.locale(),
            max_width: self.terminal_width(),
            max_height: self.body_height(),
        });
        if self.confirm_delete {
            output = format!(
                "{}  [y/n]\n{output}",
                text(self.locale(), Text::ConfirmDelete)
            );
        }
        output
    }

    fn render_profile(&self) -> String {
        let Some(page) = self.profile.as_ref() else {
            return self.loading_line();
        };
        let cursor = self.profile_users().map(|_| self.cursor.position);
        ProfileViewComponent::view(&ProfileViewContext {
            page,
            avatar_input: self.avatar_input.as_deref(),
            cursor,
            locale: self.locale(),
            max_width: self.terminal_width(),
            max_height: self.body_height(),
        })
    }

    fn render_login(&self) -> String {
        let marker = |field| if self.login.field == field { ">" } else { " " };
        let masked = "*".repeat(self.login.password.chars().count());
        format!(
            "Sign in\n\n{} Email:    {}\n{} Password: {masked}\n\n  Enter:next/submit  Tab:switch  Esc:back\n",
            marker(LoginField::Email),
            self.login.email,
            marker(LoginField::Password),
        )
    }

    /// Renders the status bar with the oldest notice or the key hints.
    pub(super) fn render_status_bar(&self) -> String {
        if let Some(notice) = self.current_notice() {
            let label = match notice.level {
                NoticeLevel::Info => "",
                NoticeLevel::Warning => "Warning: ",
                NoticeLevel::Error => "Error: ",
            };
            return format!("{label}{}  (c:dismiss)\n", notice.message);
        }
        let hints = match self.input_context() {
            InputContext::Browse => "j/k:move  Enter:open  Tab:section  /:search  p:profile  ?:help  q:quit",
            InputContext::Detail => "e:edit  d:delete  Esc:back  ?:help  q:quit",
            InputContext::DetailForm(_) => {
                "←/→:stars  Enter:commit  Tab:text  s:save  Esc:back  ?:help"
            }
            InputContext::Profile => {
                "1-4:panels  f:follow  a:avatar  j/k:move  Esc:back  ?:help  q:quit"
            }
            InputContext::TextEntry => "Enter:submit  Esc:cancel",
            InputContext::Confirm => "y:delete  n:keep",
        };
        format!("{hints}\n")
    }

    /// Renders the help overlay.
    pub(super) fn render_help_overlay(&self) -> String {
        if !self.show_help {
            return String::new();
        }
        HELP_TEXT.to_owned()
    }
}
