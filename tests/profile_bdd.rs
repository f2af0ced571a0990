//! Behavioural tests for the profile screen and the follow flow.

mod support;

use marquee::api::{Backend, HttpGateway, UserId};
use marquee::i18n::Locale;
use marquee::pages::{
    DraftError, FollowAction, ProfilePage, ProfilePanel, SessionContext, follow_and_refetch,
    load_profile,
};
use marquee::tui::components::{ProfileViewComponent, ProfileViewContext};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::json;
use support::runtime::{SharedRuntime, ensure_runtime_and_server};
use support::{StepError, gateway_for, mount, mount_identity};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RENDER_WIDTH: usize = 80;

#[derive(ScenarioState, Default)]
struct ProfileState {
    runtime: Slot<SharedRuntime>,
    server: Slot<MockServer>,
    gateway: Slot<HttpGateway>,
    page: Slot<ProfilePage>,
    optimistic_followers: Slot<u64>,
}

#[fixture]
fn profile_state() -> ProfileState {
    ProfileState::default()
}

fn runtime(profile_state: &ProfileState) -> Result<SharedRuntime, StepError> {
    Ok(ensure_runtime_and_server(
        &profile_state.runtime,
        &profile_state.server,
    )?)
}

fn get_json(
    profile_state: &ProfileState,
    route: String,
    body: serde_json::Value,
) -> Result<(), StepError> {
    let shared_runtime = runtime(profile_state)?;
    mount(
        &shared_runtime,
        &profile_state.server,
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body)),
    )
}

fn follower_count(profile_state: &ProfileState) -> Result<u64, StepError> {
    profile_state
        .page
        .with_ref(|page| page.counts().map(|counts| counts.followers))
        .ok_or("profile not loaded")?
        .ok_or_else(|| "follow counts not loaded".into())
}

fn render_panel(profile_state: &ProfileState, panel: ProfilePanel) -> Result<String, StepError> {
    profile_state
        .page
        .with_mut(|page| {
            page.toggle_panel(panel);
            ProfileViewComponent::view(&ProfileViewContext {
                page,
                avatar_input: None,
                cursor: None,
                locale: Locale::English,
                max_width: RENDER_WIDTH,
                max_height: 0,
            })
        })
        .ok_or_else(|| "profile not loaded".into())
}

fn assert_panel_text(
    profile_state: &ProfileState,
    panel: ProfilePanel,
    expected: &str,
) -> Result<(), StepError> {
    let output = render_panel(profile_state, panel)?;
    let wanted = expected.trim_matches('"');
    if output.contains(wanted) {
        Ok(())
    } else {
        Err(format!("expected {wanted:?} in {output:?}").into())
    }
}

#[given("a signed-out visitor")]
fn seed_visitor(profile_state: &ProfileState) -> Result<(), StepError> {
    let shared_runtime = runtime(profile_state)?;
    mount_identity(&shared_runtime, &profile_state.server, None)
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("a signed-in viewer {email}")]
fn seed_viewer(profile_state: &ProfileState, email: String) -> Result<(), StepError> {
    let shared_runtime = runtime(profile_state)?;
    mount_identity(
        &shared_runtime,
        &profile_state.server,
        Some(email.trim_matches('"')),
    )
}

#[given("user {user:u64} has {followers:u64} followers")]
fn seed_profile(profile_state: &ProfileState, user: u64, followers: u64) -> Result<(), StepError> {
    let shared_runtime = runtime(profile_state)?;
    get_json(
        profile_state,
        format!("/api/user/{user}"),
        json!({ "id": user, "email": "other@example.com", "nickname": "other" }),
    )?;
    mount(
        &shared_runtime,
        &profile_state.server,
        Mock::given(method("GET"))
            .and(path(format!("/api/users/{user}/follow-counts")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "followerCount": followers,
                "followingCount": 0
            })))
            .up_to_n_times(1)
            .with_priority(1),
    )?;
    mount(
        &shared_runtime,
        &profile_state.server,
        Mock::given(method("GET"))
            .and(path(format!("/api/users/{user}/is-following")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "isFollowing": false })))
            .up_to_n_times(1)
            .with_priority(1),
    )?;
    mount(
        &shared_runtime,
        &profile_state.server,
        Mock::given(method("POST"))
            .and(path(format!("/api/follow/{user}")))
            .respond_with(ResponseTemplate::new(200)),
    )?;
    get_json(profile_state, format!("/api/users/{user}/followers"), json!([]))?;
    get_json(profile_state, format!("/api/users/{user}/following"), json!([]))?;
    get_json(profile_state, format!("/api/user/{user}/reviews"), json!([]))?;
    get_json(
        profile_state,
        format!("/api/user/{user}/ratings-calendar"),
        json!({}),
    )
}

#[given("the service reports {followers:u64} followers for user {user:u64} after a follow")]
fn seed_refetched_counts(
    profile_state: &ProfileState,
    followers: u64,
    user: u64,
) -> Result<(), StepError> {
    get_json(
        profile_state,
        format!("/api/users/{user}/follow-counts"),
        json!({ "followerCount": followers, "followingCount": 0 }),
    )?;
    get_json(
        profile_state,
        format!("/api/users/{user}/is-following"),
        json!({ "isFollowing": true }),
    )
}

#[when("the profile of user {user:u64} loads")]
fn load_screen(profile_state: &ProfileState, user: u64) -> Result<(), StepError> {
    let shared_runtime = runtime(profile_state)?;
    let gateway = gateway_for(&profile_state.server)?;
    let user_id = UserId::new(user)?;
    let page = shared_runtime.block_on(async {
        let backend = Backend::from_gateway(&gateway);
        let mut session = SessionContext::new();
        let viewer = session.resolve(backend.session).await.cloned();
        let bundle = load_profile(backend, user_id, viewer.as_ref()).await;
        ProfilePage::open(bundle, viewer)
    });
    profile_state.gateway.set(gateway);
    profile_state.page.set(page);
    Ok(())
}

#[when("the viewer follows user {user:u64}")]
fn follow(profile_state: &ProfileState, user: u64) -> Result<(), StepError> {
    let shared_runtime = runtime(profile_state)?;
    let user_id = UserId::new(user)?;
    let mut page = profile_state.page.take().ok_or("profile not loaded")?;
    let action = page.plan_follow()?;
    page.apply_optimistic_follow(action);
    profile_state.page.set(page.clone());
    profile_state
        .optimistic_followers
        .set(follower_count(profile_state)?);

    let viewer = page.viewer().cloned();
    let outcome = profile_state
        .gateway
        .with_ref(|gateway| {
            shared_runtime.block_on(follow_and_refetch(
                Backend::from_gateway(gateway),
                user_id,
                action,
                viewer.as_ref(),
            ))
        })
        .ok_or("gateway not built")?;
    outcome.result.clone()?;
    page.apply_follow(outcome);
    profile_state.page.set(page);
    Ok(())
}

#[then("the follower count is {expected:u64}")]
fn assert_follower_count(profile_state: &ProfileState, expected: u64) -> Result<(), StepError> {
    let actual = follower_count(profile_state)?;
    if actual == expected {
        Ok(())
    } else {
        Err(format!("expected {expected} followers, found {actual}").into())
    }
}

#[then("the optimistic follower count was {expected:u64}")]
fn assert_optimistic_count(profile_state: &ProfileState, expected: u64) -> Result<(), StepError> {
    let actual = profile_state
        .optimistic_followers
        .get()
        .ok_or("no follow was attempted")?;
    if actual == expected {
        Ok(())
    } else {
        Err(format!("expected an optimistic {expected}, found {actual}").into())
    }
}

#[then("the viewer follows the profile")]
fn assert_following(profile_state: &ProfileState) -> Result<(), StepError> {
    let following = profile_state
        .page
        .with_ref(|page| {
            page.is_following() && page.plan_follow() == Ok(FollowAction::Unfollow)
        })
        .ok_or("profile not loaded")?;
    if following {
        Ok(())
    } else {
        Err("expected the viewer to follow the profile".into())
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the followers panel reads {expected}")]
fn assert_followers_panel(profile_state: &ProfileState, expected: String) -> Result<(), StepError> {
    assert_panel_text(profile_state, ProfilePanel::Followers, &expected)
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the following panel reads {expected}")]
fn assert_following_panel(profile_state: &ProfileState, expected: String) -> Result<(), StepError> {
    assert_panel_text(profile_state, ProfilePanel::Following, &expected)
}

#[then("following is refused because the visitor is signed out")]
fn assert_follow_refused(profile_state: &ProfileState) -> Result<(), StepError> {
    let plan = profile_state
        .page
        .with_ref(ProfilePage::plan_follow)
        .ok_or("profile not loaded")?;
    if plan == Err(DraftError::SignedOut) {
        Ok(())
    } else {
        Err(format!("expected a signed-out refusal, found {plan:?}").into())
    }
}

#[scenario(path = "tests/features/profile.feature", index = 0)]
fn no_followers_shows_zero_counts(profile_state: ProfileState) {
    let _ = profile_state;
}

#[scenario(path = "tests/features/profile.feature", index = 1)]
fn refetch_replaces_optimistic_count(profile_state: ProfileState) {
    let _ = profile_state;
}

#[scenario(path = "tests/features/profile.feature", index = 2)]
fn signed_out_visitor_cannot_follow(profile_state: ProfileState) {
    let _ = profile_state;
}
