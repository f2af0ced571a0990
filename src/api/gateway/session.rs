//! Session endpoints over HTTP.

use async_trait::async_trait;
use http::StatusCode;

use crate::api::error::ApiError;
use crate::api::ids::{Credentials, SignupRequest};
use crate::api::models::User;
use crate::api::models::wire::ApiUser;

use super::http_gateway::HttpGateway;
use super::http_utils::{decode_json, extract_service_message, read_success_body};
use super::SessionGateway;

const LOGIN_REFUSED: &str = "email or password is incorrect";

#[async_trait]
impl SessionGateway for HttpGateway {
    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        match self
            .get_json::<ApiUser>("resolve session", "current user", "api/me")
            .await
        {
            Ok(user) => Ok(Some(user.into())),
            Err(ApiError::Unauthenticated { .. }) => Ok(None),
            Err(error) => Err(error),
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        let url = self.endpoint("api/user/login")?;
        let response = self
            .send("log in", self.post(url).json(credentials))
            .await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Rejected {
                status: StatusCode::UNAUTHORIZED.as_u16(),
                message: extract_service_message(&body).unwrap_or_else(|| LOGIN_REFUSED.to_owned()),
            });
        }
        decode_json::<ApiUser>("log in", "account", response)
            .await
            .map(User::from)
    }

    async fn signup(&self, request: &SignupRequest) -> Result<String, ApiError> {
        let url = self.endpoint("api/user/signup")?;
        let response = self.send("sign up", self.post(url).json(request)).await?;
        let body = read_success_body("sign up", "account", response).await?;
        Ok(extract_service_message(&body)
            .unwrap_or_else(|| format!("signed up as {}", request.credentials().email())))
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let url = self.endpoint("logout")?;
        self.send_expecting_success("log out", "session", self.post(url))
            .await
    }
}
