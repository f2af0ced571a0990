//! Page-level aggregation and view state.
//!
//! Each screen loads its resources in parallel through the gateways, waits
//! for all of them, and then applies the results in one step. The types here
//! are UI-agnostic; the CLI and the terminal UI both render from them.

pub mod avatar;
pub mod detail;
pub mod error;
pub mod listing;
pub mod loadable;
pub mod notice;
pub mod profile;
pub mod search;
pub mod session;

pub use avatar::{AvatarDraft, AvatarPreview, read_avatar};
pub use detail::{
    Answer, Confirm, DeleteOutcome, DetailBundle, DetailContent, DetailPage, ReviewDraft,
    ReviewPanel, SubmissionPlan, find_my_review, load_detail,
};
pub use error::DraftError;
pub use listing::{
    CardScore, HOME_SECTIONS, HomeBundle, ListingSection, RatingLookup, load_home,
};
pub use loadable::Loadable;
pub use notice::{Notice, NoticeLevel};
pub use profile::{
    FollowAction, FollowOutcome, ProfileBundle, ProfileContent, ProfileData, ProfilePage,
    ProfilePanel, follow_and_refetch, load_profile, upload_and_refetch,
};
pub use search::{SearchResults, search};
pub use session::{SessionContext, SessionState};
