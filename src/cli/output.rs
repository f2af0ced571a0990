//! Output formatting utilities for CLI operations.
//!
//! Screens are printed with the same components the terminal UI draws, at a
//! fixed width and without a height limit. Page notices go to a separate
//! writer so stdout only carries the screen.

use std::io::{self, Write};

use marquee::ApiError;
use marquee::api::MovieSummary;
use marquee::i18n::{Locale, Text, list_heading, text};
use marquee::pages::{
    DetailPage, HomeBundle, Loadable, Notice, ProfilePage, ProfilePanel, RatingLookup,
    SearchResults,
};
use marquee::tui::components::{
    CARD_HEIGHT, DetailViewComponent, DetailViewContext, FormFocus, MovieListComponent,
    MovieListViewContext, ProfileViewComponent, ProfileViewContext, StarInput,
};

/// Column width used for printed screens.
pub const PRINT_WIDTH: usize = 80;

/// Panels printed below the profile header, in order.
const PROFILE_PANELS: [ProfilePanel; 4] = [
    ProfilePanel::Followers,
    ProfilePanel::Following,
    ProfilePanel::Ratings,
    ProfilePanel::Calendar,
];

/// Maps a write failure to an [`ApiError::Io`].
pub fn io_error(error: &io::Error) -> ApiError {
    ApiError::Io {
        message: error.to_string(),
    }
}

fn write_block<W: Write>(writer: &mut W, block: &str) -> Result<(), ApiError> {
    writer
        .write_all(block.as_bytes())
        .map_err(|error| io_error(&error))
}

fn movie_list(
    movies: &[MovieSummary],
    ratings: &RatingLookup,
    locale: Locale,
    empty: Text,
) -> String {
    MovieListComponent::view(&MovieListViewContext {
        movies,
        ratings,
        locale,
        cursor: None,
        scroll_offset: 0,
        max_height: movies.len().saturating_mul(CARD_HEIGHT),
        max_width: PRINT_WIDTH,
        empty,
    })
}

/// Writes every home section to the given writer.
pub fn write_home_to<W: Write>(
    writer: &mut W,
    bundle: &HomeBundle,
    locale: Locale,
) -> Result<(), ApiError> {
    for section in &bundle.sections {
        writeln!(writer, "== {} ==", list_heading(locale, section.kind))
            .map_err(|e| io_error(&e))?;
        let body = match &section.movies {
            Loadable::Loaded(movies) => {
                movie_list(movies, &bundle.ratings, locale, Text::NoMovies)
            }
            Loadable::Failed(error) => format!("  ({error})\n"),
            Loadable::Pending => format!("  {}\n", text(locale, Text::Loading)),
        };
        write_block(writer, &body)?;
        writeln!(writer).map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes search results to the given writer.
pub fn write_search_to<W: Write>(
    writer: &mut W,
    results: &SearchResults,
    locale: Locale,
) -> Result<(), ApiError> {
    writeln!(writer, "Results for \"{}\":", results.query.as_str()).map_err(|e| io_error(&e))?;
    write_block(
        writer,
        &movie_list(&results.movies, &results.ratings, locale, Text::NoResults),
    )
}

/// Writes the movie detail screen to the given writer.
pub fn write_detail_to<W: Write>(
    writer: &mut W,
    page: &DetailPage,
    locale: Locale,
) -> Result<(), ApiError> {
    let stars = StarInput::new(page.draft().rating());
    write_block(
        writer,
        &DetailViewComponent::view(&DetailViewContext {
            page,
            stars: &stars,
            focus: FormFocus::Rating,
            locale,
            max_width: PRINT_WIDTH,
            max_height: 0,
        }),
    )
}

const fn profile_context(page: &ProfilePage, locale: Locale) -> ProfileViewContext<'_> {
    ProfileViewContext {
        page,
        avatar_input: None,
        cursor: None,
        locale,
        max_width: PRINT_WIDTH,
        max_height: 0,
    }
}

/// Writes the profile header followed by each secondary panel.
pub fn write_profile_to<W: Write>(
    writer: &mut W,
    page: &ProfilePage,
    locale: Locale,
) -> Result<(), ApiError> {
    write_block(
        writer,
        &ProfileViewComponent::view(&profile_context(page, locale)),
    )?;
    if page.data().is_none() {
        return Ok(());
    }
    for panel in PROFILE_PANELS {
        let mut shown = page.clone();
        shown.toggle_panel(panel);
        writeln!(writer).map_err(|e| io_error(&e))?;
        write_block(
            writer,
            &ProfileViewComponent::view_panel(&profile_context(&shown, locale)),
        )?;
    }
    Ok(())
}

/// Writes page notices, one per line.
pub fn write_notices_to<W: Write>(writer: &mut W, notices: &[Notice]) -> Result<(), ApiError> {
    for notice in notices {
        writeln!(writer, "{}", notice.message).map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes page notices to stderr.
pub fn report_notices(notices: &[Notice]) -> Result<(), ApiError> {
    let mut stderr = io::stderr().lock();
    write_notices_to(&mut stderr, notices)
}

/// Writes a one-line confirmation to the given writer.
pub fn write_line_to<W: Write>(writer: &mut W, line: &str) -> Result<(), ApiError> {
    writeln!(writer, "{line}").map_err(|e| io_error(&e))
}

/// Writes a one-line confirmation to stdout.
pub fn write_line(line: &str) -> Result<(), ApiError> {
    let mut stdout = io::stdout().lock();
    write_line_to(&mut stdout, line)
}
