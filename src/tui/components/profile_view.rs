//! Profile screen rendering: header, follow counts and the active panel.

use chrono::{Datelike, NaiveDate};

use crate::api::{CalendarDay, Review, User};
use crate::i18n::{Locale, Text, text};
use crate::pages::{AvatarPreview, Loadable, ProfileData, ProfilePage, ProfilePanel};

use super::review_list::{ReviewHeading, ReviewListComponent, ReviewListViewContext};
use super::text_layout::{truncate_to_height, truncate_to_width};

/// Context for rendering the profile screen.
#[derive(Debug, Clone, Copy)]
pub struct ProfileViewContext<'a> {
    /// Page state.
    pub page: &'a ProfilePage,
    /// Avatar path being typed, when the path prompt is open.
    pub avatar_input: Option<&'a str>,
    /// Highlighted row of the follower or followee list.
    pub cursor: Option<usize>,
    /// Display language.
    pub locale: Locale,
    /// Maximum line width in columns.
    pub max_width: usize,
    /// Maximum number of lines (0 = unlimited).
    pub max_height: usize,
}

/// Component for the profile screen body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileViewComponent;

impl ProfileViewComponent {
    /// Renders the screen body.
    #[must_use]
    pub fn view(ctx: &ProfileViewContext<'_>) -> String {
        let Some(data) = ctx.page.data() else {
            return format!("  {}\n", text(ctx.locale, Text::UserNotFound));
        };

        let mut output = Self::render_header(data, ctx);
        output.push_str(&Self::render_panel(data, ctx));
        truncate_to_height(&mut output, ctx.max_height);
        output
    }

    /// Renders only the active panel, or nothing when the owner is missing.
    #[must_use]
    pub fn view_panel(ctx: &ProfileViewContext<'_>) -> String {
        ctx.page
            .data()
            .map_or_else(String::new, |data| Self::render_panel(data, ctx))
    }

    fn render_header(data: &ProfileData, ctx: &ProfileViewContext<'_>) -> String {
        let locale = ctx.locale;
        let mut output = truncate_to_width(
            &format!("{} <{}>", data.user.display_name(), data.user.email),
            ctx.max_width,
        );
        output.push('\n');
        if let Some(avatar) = data.user.avatar_path.as_deref() {
            output.push_str(&truncate_to_width(&format!("  avatar: {avatar}"), ctx.max_width));
            output.push('\n');
        }

        let counts = match &data.counts {
            Loadable::Loaded(counts) => format!(
                "{} {}  ·  {} {}",
                text(locale, Text::Followers),
                counts.followers,
                text(locale, Text::Following),
                counts.following
            ),
            Loadable::Pending => text(locale, Text::Loading).to_owned(),
            Loadable::Failed(error) => format!("({error})"),
        };
        output.push_str(&counts);
        if ctx.page.viewer().is_some() && !ctx.page.is_owner() {
            let button = if ctx.page.is_following() {
                text(locale, Text::Unfollow)
            } else {
                text(locale, Text::Follow)
            };
            output.push_str(&format!("  [{button}]"));
        }
        output.push('\n');

        if ctx.page.is_owner() {
            output.push_str(&Self::render_avatar(ctx));
        }
        output.push_str(&"─".repeat(ctx.max_width.min(60)));
        output.push('\n');
        output
    }

    fn render_avatar(ctx: &ProfileViewContext<'_>) -> String {
        if let Some(typed) = ctx.avatar_input {
            return format!("  image path: {typed}_\n");
        }
        match ctx.page.avatar() {
            AvatarPreview::Empty => String::new(),
            AvatarPreview::Reading(path) => format!("  reading {path}...\n"),
            AvatarPreview::Ready(draft) => format!(
                "  {} ({}, {} bytes)  u:upload  x:clear\n",
                draft.path(),
                draft.mime_type(),
                draft.len()
            ),
            AvatarPreview::Failed { path, message } => {
                truncate_to_width(&format!("  {path}: {message}"), ctx.max_width) + "\n"
            }
        }
    }

    fn render_panel(data: &ProfileData, ctx: &ProfileViewContext<'_>) -> String {
        let locale = ctx.locale;
        match ctx.page.panel() {
            ProfilePanel::Hidden => String::new(),
            ProfilePanel::Followers => format!(
                "{}\n{}",
                text(locale, Text::Followers),
                render_users(&data.followers, Text::NoFollowers, ctx)
            ),
            ProfilePanel::Following => format!(
                "{}\n{}",
                text(locale, Text::Following),
                render_users(&data.following, Text::NoFollowing, ctx)
            ),
            ProfilePanel::Ratings => {
                let body = match &data.ratings {
                    Loadable::Loaded(reviews) => {
                        let rated: Vec<&Review> = reviews.iter().collect();
                        ReviewListComponent::view(&ReviewListViewContext {
                            reviews: &rated,
                            heading: ReviewHeading::Movie,
                            locale,
                            empty: Text::NoRatings,
                            max_width: ctx.max_width,
                            max_height: 0,
                        })
                    }
                    other => render_unavailable(other, ctx),
                };
                format!("{}\n{body}", text(locale, Text::Ratings))
            }
            ProfilePanel::Calendar => Self::render_calendar(data, ctx),
        }
    }

    fn render_calendar(data: &ProfileData, ctx: &ProfileViewContext<'_>) -> String {
        let locale = ctx.locale;
        let mut output = format!("{}\n", text(locale, Text::Calendar));
        if data.calendar.loaded().is_none() {
            output.push_str(&render_unavailable(&data.calendar, ctx));
            return output;
        }
        let Some(selected) = ctx.page.selected_date() else {
            output.push_str(&format!("  {}\n", text(locale, Text::NoRatings)));
            return output;
        };

        let days = ctx.page.month_view(selected.year(), selected.month());
        output.push_str(&format!("  {}\n", selected.format("%Y-%m")));
        output.push_str(&render_month(&days, selected));

        let reviews: Vec<&Review> = ctx.page.reviews_on_selected().iter().collect();
        output.push_str(&format!("{}\n", selected.format("%Y-%m-%d")));
        output.push_str(&ReviewListComponent::view(&ReviewListViewContext {
            reviews: &reviews,
            heading: ReviewHeading::Movie,
            locale,
            empty: Text::NoReviewsOnDay,
            max_width: ctx.max_width,
            max_height: 0,
        }));
        output
    }
}

fn render_users(list: &Loadable<Vec<User>>, empty: Text, ctx: &ProfileViewContext<'_>) -> String {
    match list {
        Loadable::Loaded(users) if users.is_empty() => {
            format!("  {}\n", text(ctx.locale, empty))
        }
        Loadable::Loaded(users) => users
            .iter()
            .enumerate()
            .map(|(index, user)| {
                let marker = if ctx.cursor == Some(index) { '>' } else { ' ' };
                format!(
                    "{marker} {}\n",
                    truncate_to_width(user.display_name(), ctx.max_width.saturating_sub(2))
                )
            })
            .collect(),
        other => render_unavailable(other, ctx),
    }
}

fn render_unavailable<T>(resource: &Loadable<T>, ctx: &ProfileViewContext<'_>) -> String {
    match resource {
        Loadable::Failed(error) => truncate_to_width(&format!("  ({error})"), ctx.max_width) + "\n",
        Loadable::Pending | Loadable::Loaded(_) => {
            format!("  {}\n", text(ctx.locale, Text::Loading))
        }
    }
}

/// Lays a month out in Monday-first weeks. Days with reviews carry a `*`
/// and the selected day is bracketed.
fn render_month(days: &[CalendarDay], selected: NaiveDate) -> String {
    let Some(first) = days.first() else {
        return String::new();
    };
    let mut cells: Vec<String> = std::iter::repeat_n(
        "    ".to_owned(),
        usize::try_from(first.date.weekday().num_days_from_monday()).unwrap_or(0),
    )
    .collect();
    cells.extend(days.iter().map(|day| {
        let mark = if day.count > 0 { '*' } else { ' ' };
        if day.date == selected {
            format!("[{:>2}]", day.date.day())
        } else {
            format!(" {:>2}{mark}", day.date.day())
        }
    }));

    cells
        .chunks(7)
        .map(|week| format!("  {}\n", week.concat()))
        .collect()
}
