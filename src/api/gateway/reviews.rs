//! Review endpoints over HTTP.

use async_trait::async_trait;

use crate::api::error::ApiError;
use crate::api::ids::{MovieId, ReviewId};
use crate::api::models::wire::{ApiReview, into_reviews};
use crate::api::models::{Review, ReviewRequest};

use super::http_gateway::HttpGateway;
use super::{ReviewGateway, ReviewRoute};

#[async_trait]
impl ReviewGateway for HttpGateway {
    async fn movie_reviews(&self, movie: MovieId) -> Result<Vec<Review>, ApiError> {
        let path = format!("api/movies/{movie}/reviews");
        self.get_json::<Vec<ApiReview>>("load reviews", &format!("reviews of movie {movie}"), &path)
            .await
            .map(into_reviews)
    }

    async fn my_reviews(&self) -> Result<Vec<Review>, ApiError> {
        self.get_json::<Vec<ApiReview>>("load my reviews", "your reviews", "api/reviews/me")
            .await
            .map(into_reviews)
    }

    async fn create_review(
        &self,
        movie: MovieId,
        request: &ReviewRequest,
    ) -> Result<(), ApiError> {
        let url = match self.review_route() {
            ReviewRoute::Query => {
                let mut query_url = self.endpoint("api/reviews")?;
                query_url
                    .query_pairs_mut()
                    .append_pair("tmdbId", &movie.to_string());
                query_url
            }
            ReviewRoute::Nested => self.endpoint(&format!("api/movies/{movie}/reviews"))?,
        };
        self.send_expecting_success(
            "create review",
            &format!("movie {movie}"),
            self.post(url).json(request),
        )
        .await
    }

    async fn update_review(
        &self,
        review: ReviewId,
        request: &ReviewRequest,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("api/reviews/{review}"))?;
        self.send_expecting_success(
            "update review",
            &format!("review {review}"),
            self.put(url).json(request),
        )
        .await
    }

    async fn delete_review(&self, review: ReviewId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("api/reviews/{review}"))?;
        self.send_expecting_success("delete review", &format!("review {review}"), self.delete(url))
            .await
    }
}
