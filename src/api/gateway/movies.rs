//! Movie catalogue endpoints over HTTP.

use async_trait::async_trait;

use crate::api::error::ApiError;
use crate::api::ids::{MovieId, SearchQuery};
use crate::api::models::wire::{ApiMovieDetail, ApiMovieList};
use crate::api::models::{MovieDetail, MovieListKind, MovieSummary};

use super::MovieGateway;
use super::http_gateway::HttpGateway;
use super::http_utils::decode_json;

#[async_trait]
impl MovieGateway for HttpGateway {
    async fn movie_list(&self, kind: MovieListKind) -> Result<Vec<MovieSummary>, ApiError> {
        let path = format!("api/movies/{}", kind.route());
        self.get_json::<ApiMovieList>("load movie list", kind.route(), &path)
            .await
            .map(ApiMovieList::into_movies)
    }

    async fn search_movies(&self, query: &SearchQuery) -> Result<Vec<MovieSummary>, ApiError> {
        let mut url = self.endpoint("api/movies/search")?;
        url.query_pairs_mut().append_pair("query", query.as_str());
        let response = self.send("search movies", self.get(url)).await?;
        decode_json::<ApiMovieList>("search movies", "search results", response)
            .await
            .map(ApiMovieList::into_movies)
    }

    async fn movie_detail(&self, movie: MovieId) -> Result<MovieDetail, ApiError> {
        let resource = format!("movie {movie}");
        let path = self.options().detail_route.path(movie);
        let payload = self
            .get_json::<ApiMovieDetail>("load movie", &resource, &path)
            .await?;
        payload
            .into_detail()
            .ok_or(ApiError::NotFound { resource })
    }
}
