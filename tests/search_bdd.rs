//! Behavioural tests for title search and its card rendering.

mod support;

use marquee::api::{Backend, HttpGateway, SearchQuery};
use marquee::i18n::{Locale, Text};
use marquee::pages::{SearchResults, search};
use marquee::tui::components::{CARD_HEIGHT, MovieListComponent, MovieListViewContext};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::json;
use support::runtime::{SharedRuntime, ensure_runtime_and_server};
use support::{StepError, gateway_for, mount, mount_identity};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RENDER_WIDTH: usize = 80;

#[derive(ScenarioState, Default)]
struct SearchState {
    runtime: Slot<SharedRuntime>,
    server: Slot<MockServer>,
    signed_in: Slot<bool>,
    results: Slot<SearchResults>,
    refused: Slot<bool>,
}

#[fixture]
fn search_state() -> SearchState {
    SearchState::default()
}

fn runtime(search_state: &SearchState) -> Result<SharedRuntime, StepError> {
    Ok(ensure_runtime_and_server(
        &search_state.runtime,
        &search_state.server,
    )?)
}

fn render(search_state: &SearchState) -> Result<String, StepError> {
    search_state
        .results
        .with_ref(|results| {
            MovieListComponent::view(&MovieListViewContext {
                movies: &results.movies,
                ratings: &results.ratings,
                locale: Locale::English,
                cursor: None,
                scroll_offset: 0,
                max_height: results.movies.len().max(1) * CARD_HEIGHT,
                max_width: RENDER_WIDTH,
                empty: Text::NoResults,
            })
        })
        .ok_or_else(|| "no search results".into())
}

fn card_label(output: &str, title: &str) -> Option<String> {
    let mut lines = output.lines();
    lines.find(|line| line.contains(title))?;
    lines.next().map(str::to_owned)
}

fn mount_search(
    search_state: &SearchState,
    query: &str,
    body: serde_json::Value,
) -> Result<(), StepError> {
    let shared_runtime = runtime(search_state)?;
    mount(
        &shared_runtime,
        &search_state.server,
        Mock::given(method("GET"))
            .and(path("/api/movies/search"))
            .and(query_param("query", query))
            .respond_with(ResponseTemplate::new(200).set_body_json(body)),
    )
}

#[given("a signed-out visitor")]
fn seed_visitor(search_state: &SearchState) -> Result<(), StepError> {
    let shared_runtime = runtime(search_state)?;
    mount_identity(&shared_runtime, &search_state.server, None)?;
    search_state.signed_in.set(false);
    Ok(())
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("a signed-in viewer {email} who rated movie {movie:u64}")]
fn seed_viewer(search_state: &SearchState, email: String, movie: u64) -> Result<(), StepError> {
    let shared_runtime = runtime(search_state)?;
    let address = email.trim_matches('"');
    mount_identity(&shared_runtime, &search_state.server, Some(address))?;
    mount(
        &shared_runtime,
        &search_state.server,
        Mock::given(method("GET"))
            .and(path("/api/reviews/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "reviewId": 1,
                "email": address,
                "movieId": movie,
                "rating": 4.5,
                "content": ""
            }]))),
    )?;
    search_state.signed_in.set(true);
    Ok(())
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("the service finds no movies for {query}")]
fn seed_no_matches(search_state: &SearchState, query: String) -> Result<(), StepError> {
    mount_search(search_state, query.trim_matches('"'), json!({ "results": [] }))
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("the service finds movies {first:u64} and {second:u64} for {query}")]
fn seed_matches(
    search_state: &SearchState,
    first: u64,
    second: u64,
    query: String,
) -> Result<(), StepError> {
    mount_search(
        search_state,
        query.trim_matches('"'),
        json!([
            { "id": first, "title": "Arrival", "release_date": "2016-11-11", "vote_average": 7.6 },
            { "id": second, "title": "Heat", "release_date": "1995-12-15", "vote_average": 8.0 }
        ]),
    )
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[when("the visitor searches for {query}")]
fn run_search(search_state: &SearchState, query: String) -> Result<(), StepError> {
    let Ok(parsed) = SearchQuery::new(query.trim_matches('"')) else {
        search_state.refused.set(true);
        return Ok(());
    };
    let shared_runtime = runtime(search_state)?;
    let gateway: HttpGateway = gateway_for(&search_state.server)?;
    let signed_in = search_state.signed_in.get().unwrap_or(false);
    let results = shared_runtime.block_on(search(
        Backend::from_gateway(&gateway),
        &parsed,
        signed_in,
    ))?;
    search_state.results.set(results);
    Ok(())
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the results show the message {expected}")]
fn assert_rendered_text(search_state: &SearchState, expected: String) -> Result<(), StepError> {
    let output = render(search_state)?;
    let wanted = expected.trim_matches('"');
    if output.contains(wanted) {
        Ok(())
    } else {
        Err(format!("expected {wanted:?} in {output:?}").into())
    }
}

#[then("the results render {count:u64} movie cards")]
fn assert_card_count(search_state: &SearchState, count: u64) -> Result<(), StepError> {
    let output = render(search_state)?;
    let cards = output
        .lines()
        .filter(|line| line.contains('★') || line.contains('☆'))
        .count();
    if u64::try_from(cards)? == count {
        Ok(())
    } else {
        Err(format!("expected {count} cards, rendered {cards}: {output:?}").into())
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the card for {title} is labelled {label}")]
fn assert_card_label(
    search_state: &SearchState,
    title: String,
    label: String,
) -> Result<(), StepError> {
    let output = render(search_state)?;
    let wanted_title = title.trim_matches('"');
    let wanted_label = label.trim_matches('"');
    let line = card_label(&output, wanted_title)
        .ok_or_else(|| format!("no card for {wanted_title} in {output:?}"))?;
    if line.trim_end().ends_with(wanted_label) {
        Ok(())
    } else {
        Err(format!("expected {wanted_label:?} on {line:?}").into())
    }
}

#[then("the search is refused")]
fn assert_refused(search_state: &SearchState) -> Result<(), StepError> {
    if search_state.refused.get().unwrap_or(false) && search_state.results.get().is_none() {
        Ok(())
    } else {
        Err("expected the blank query to be refused".into())
    }
}

#[scenario(path = "tests/features/search.feature", index = 0)]
fn empty_search_shows_message(search_state: SearchState) {
    let _ = search_state;
}

#[scenario(path = "tests/features/search.feature", index = 1)]
fn signed_in_search_overlays_ratings(search_state: SearchState) {
    let _ = search_state;
}

#[scenario(path = "tests/features/search.feature", index = 2)]
fn blank_query_is_refused(search_state: SearchState) {
    let _ = search_state;
}
