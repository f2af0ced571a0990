//! Profile endpoints over HTTP.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::api::error::ApiError;
use crate::api::ids::UserId;
use crate::api::models::wire::{ApiCalendar, ApiReview, ApiUser, into_reviews};
use crate::api::models::{AvatarUpload, CalendarIndex, Review, User};

use super::ProfileGateway;
use super::http_gateway::HttpGateway;

/// Multipart field the service reads the avatar from.
const AVATAR_FIELD: &str = "file";

#[async_trait]
impl ProfileGateway for HttpGateway {
    async fn user(&self, user: UserId) -> Result<User, ApiError> {
        let path = format!("api/user/{user}");
        self.get_json::<ApiUser>("load user", &format!("user {user}"), &path)
            .await
            .map(User::from)
    }

    async fn user_reviews(&self, user: UserId) -> Result<Vec<Review>, ApiError> {
        let path = format!("api/user/{user}/reviews");
        self.get_json::<Vec<ApiReview>>(
            "load rated movies",
            &format!("reviews of user {user}"),
            &path,
        )
        .await
        .map(into_reviews)
    }

    async fn ratings_calendar(&self, user: UserId) -> Result<CalendarIndex, ApiError> {
        let path = format!("api/user/{user}/ratings-calendar");
        let calendar = self
            .get_json::<ApiCalendar>(
                "load ratings calendar",
                &format!("calendar of user {user}"),
                &path,
            )
            .await?;
        Ok(CalendarIndex::from_entries(
            calendar
                .into_iter()
                .map(|(day, reviews)| (day, into_reviews(reviews))),
        ))
    }

    async fn upload_avatar(&self, user: UserId, upload: &AvatarUpload) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("api/user/{user}/profile-image"))?;
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime_type)
            .map_err(|error| ApiError::InvalidInput {
                message: format!("unsupported image type '{}': {error}", upload.mime_type),
            })?;
        let form = Form::new().part(AVATAR_FIELD, part);
        self.send_expecting_success(
            "upload avatar",
            &format!("user {user}"),
            self.post(url).multipart(form),
        )
        .await
    }
}
