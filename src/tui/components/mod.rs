//! UI components for the terminal client.
//!
//! Components are stateless renderers in the bubbletea-rs Model-View style:
//! each takes a borrowed view context and returns the lines to draw. The
//! star widgets are the exception and carry the form's hover state.

mod detail_view;
mod movie_card;
mod profile_view;
mod review_list;
mod star_rating;
pub(crate) mod text_layout;

pub use detail_view::{DetailViewComponent, DetailViewContext, FormFocus};
pub use movie_card::{
    CARD_HEIGHT, MovieCardComponent, MovieCardViewContext, MovieListComponent,
    MovieListViewContext,
};
pub use profile_view::{ProfileViewComponent, ProfileViewContext};
pub use review_list::{ReviewHeading, ReviewListComponent, ReviewListViewContext};
pub use star_rating::{EMPTY_STAR, FILLED_STAR, StarInput, StarRating};
