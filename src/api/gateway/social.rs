//! Follow graph endpoints over HTTP.

use async_trait::async_trait;

use crate::api::error::ApiError;
use crate::api::ids::UserId;
use crate::api::models::wire::{ApiFollowCounts, ApiFollowState, ApiUser};
use crate::api::models::{FollowCounts, User};

use super::SocialGateway;
use super::http_gateway::HttpGateway;

impl HttpGateway {
    async fn follow_list(&self, user: UserId, direction: &str) -> Result<Vec<User>, ApiError> {
        let path = format!("api/users/{user}/{direction}");
        let users = self
            .get_json::<Vec<ApiUser>>(
                "load follow list",
                &format!("{direction} of user {user}"),
                &path,
            )
            .await?;
        Ok(users.into_iter().map(User::from).collect())
    }
}

#[async_trait]
impl SocialGateway for HttpGateway {
    async fn follow_counts(&self, user: UserId) -> Result<FollowCounts, ApiError> {
        let path = format!("api/users/{user}/follow-counts");
        self.get_json::<ApiFollowCounts>("load follow counts", &format!("user {user}"), &path)
            .await
            .map(FollowCounts::from)
    }

    async fn is_following(&self, user: UserId) -> Result<bool, ApiError> {
        let path = format!("api/users/{user}/is-following");
        self.get_json::<ApiFollowState>("load follow state", &format!("user {user}"), &path)
            .await
            .map(|state| state.is_following())
    }

    async fn followers(&self, user: UserId) -> Result<Vec<User>, ApiError> {
        self.follow_list(user, "followers").await
    }

    async fn following(&self, user: UserId) -> Result<Vec<User>, ApiError> {
        self.follow_list(user, "following").await
    }

    async fn follow(&self, user: UserId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("api/follow/{user}"))?;
        self.send_expecting_success("follow", &format!("user {user}"), self.post(url))
            .await
    }

    async fn unfollow(&self, user: UserId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("api/unfollow/{user}"))?;
        self.send_expecting_success("unfollow", &format!("user {user}"), self.delete(url))
            .await
    }
}
