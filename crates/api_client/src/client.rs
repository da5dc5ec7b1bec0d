//! Typed wrappers for every backend endpoint.

use std::sync::Arc;

use core_types::{DashboardStats, Feedback, FeedbackWithDetails, User};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};
use web_types::{
    ApiErrorBody, CreateFeedbackRequest, CreateUserRequest, LoginRequest, LoginResponse,
    UpdateFeedbackRequest, UpdateUserRequest,
};

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::session::SessionStore;

const LOGIN_PATH: &str = "/auth/login";

/// Client for the feedback tracker API.
///
/// Every request except login carries the stored bearer token. A 401 on any
/// other request clears the stored session before the error is returned.
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    http: reqwest::Client,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a new ApiClient with the given config and session store.
    pub fn new(config: ClientConfig, session: Arc<dyn SessionStore>) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            session,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// User saved by the last successful sign-in, if the session is still held.
    pub fn stored_user(&self) -> Option<User> {
        let session = self.session.load();
        session.token.and(session.user)
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.load().token.is_some()
    }

    // --- session ---

    /// Log in, store the token, then fetch and store the user.
    ///
    /// Nothing stays stored if any step fails.
    ///
    /// Any failure other than an unreachable server is reported as
    /// [`ApiError::InvalidCredentials`], including a 401 from the profile
    /// fetch that follows a successful login.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<User> {
        let err = match self.try_sign_in(username, password).await {
            Ok(user) => return Ok(user),
            Err(e) => e,
        };

        if let Err(e) = self.session.clear() {
            warn!(error = %e, "failed to clear session after unsuccessful sign-in");
        }
        match err {
            ApiError::Network(_) => Err(err),
            other => {
                debug!(error = %other, "sign-in failed");
                Err(ApiError::InvalidCredentials)
            }
        }
    }

    async fn try_sign_in(&self, username: &str, password: &str) -> Result<User> {
        let login = self
            .login(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await?;

        self.session.save_token(&login.access_token)?;
        let user = self.users_me().await?;
        self.session.save_user(&user)?;

        info!(username = %user.username, role = %user.role, "signed in");
        Ok(user)
    }

    /// Tell the backend, then drop the stored session whatever it answered.
    pub async fn sign_out(&self) -> Result<()> {
        if self.is_signed_in()
            && let Err(e) = self.logout().await
        {
            debug!(error = %e, "logout request failed, clearing session anyway");
        }
        self.session.clear()?;
        info!("signed out");
        Ok(())
    }

    // --- auth ---

    /// POST /auth/login
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.fetch_with(Method::POST, LOGIN_PATH, request).await
    }

    /// GET /auth/me
    pub async fn current_user(&self) -> Result<User> {
        self.fetch(Method::GET, "/auth/me").await
    }

    /// POST /auth/logout
    pub async fn logout(&self) -> Result<()> {
        let path = "/auth/logout";
        self.send(path, self.request(Method::POST, path)).await?;
        Ok(())
    }

    // --- users ---

    /// POST /users/
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User> {
        self.fetch_with(Method::POST, "/users/", request).await
    }

    /// GET /users/me
    pub async fn users_me(&self) -> Result<User> {
        self.fetch(Method::GET, "/users/me").await
    }

    /// GET /users/my-team
    pub async fn my_team(&self) -> Result<Vec<User>> {
        self.fetch(Method::GET, "/users/my-team").await
    }

    /// GET /users/{id}
    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        self.fetch(Method::GET, &format!("/users/{user_id}")).await
    }

    /// PUT /users/{id}
    pub async fn update_user(&self, user_id: i64, request: &UpdateUserRequest) -> Result<User> {
        self.fetch_with(Method::PUT, &format!("/users/{user_id}"), request)
            .await
    }

    /// POST /users/{id}/toggle-status
    pub async fn toggle_user_status(&self, user_id: i64) -> Result<User> {
        self.fetch(Method::POST, &format!("/users/{user_id}/toggle-status"))
            .await
    }

    /// GET /users/team-stats/{managerId}. The payload shape is backend-defined.
    pub async fn team_stats(&self, manager_id: i64) -> Result<Value> {
        self.fetch(Method::GET, &format!("/users/team-stats/{manager_id}"))
            .await
    }

    // --- feedback ---

    /// POST /feedback/
    pub async fn create_feedback(&self, request: &CreateFeedbackRequest) -> Result<Feedback> {
        self.fetch_with(Method::POST, "/feedback/", request).await
    }

    /// GET /feedback/my-received
    pub async fn my_received_feedback(&self) -> Result<Vec<FeedbackWithDetails>> {
        self.fetch(Method::GET, "/feedback/my-received").await
    }

    /// GET /feedback/team-member/{employeeId}
    pub async fn team_member_feedback(&self, employee_id: i64) -> Result<Vec<FeedbackWithDetails>> {
        self.fetch(Method::GET, &format!("/feedback/team-member/{employee_id}"))
            .await
    }

    /// GET /feedback/my-given
    pub async fn my_given_feedback(&self) -> Result<Vec<FeedbackWithDetails>> {
        self.fetch(Method::GET, "/feedback/my-given").await
    }

    /// PUT /feedback/{id}
    pub async fn update_feedback(
        &self,
        feedback_id: i64,
        request: &UpdateFeedbackRequest,
    ) -> Result<Feedback> {
        self.fetch_with(Method::PUT, &format!("/feedback/{feedback_id}"), request)
            .await
    }

    /// POST /feedback/{id}/acknowledge
    pub async fn acknowledge_feedback(&self, feedback_id: i64) -> Result<Feedback> {
        self.fetch(Method::POST, &format!("/feedback/{feedback_id}/acknowledge"))
            .await
    }

    // --- dashboard ---

    /// GET /dashboard/stats
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.fetch(Method::GET, "/dashboard/stats").await
    }

    /// GET /dashboard/team-overview. The payload shape is backend-defined.
    pub async fn team_overview(&self) -> Result<Value> {
        self.fetch(Method::GET, "/dashboard/team-overview").await
    }

    // --- plumbing ---

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "api request");
        let builder = self.http.request(method, self.config.endpoint(path));

        if path.starts_with(LOGIN_PATH) {
            return builder;
        }
        match self.session.load().token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, method: Method, path: &str) -> Result<T> {
        let response = self.send(path, self.request(method, path)).await?;
        response.json::<T>().await.map_err(ApiError::Decode)
    }

    async fn fetch_with<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(path, self.request(method, path).json(body))
            .await?;
        response.json::<T>().await.map_err(ApiError::Decode)
    }

    async fn send(&self, path: &str, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(ApiError::Network)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message());

        if status == StatusCode::UNAUTHORIZED {
            if path.starts_with(LOGIN_PATH) {
                return Err(ApiError::InvalidCredentials);
            }
            warn!(path, "request rejected with 401, clearing stored session");
            if let Err(e) = self.session.clear() {
                warn!(error = %e, "failed to clear stored session");
            }
            return Err(ApiError::Unauthorized);
        }

        debug!(path, status = status.as_u16(), ?detail, "request rejected");
        Err(ApiError::from_status(status.as_u16(), detail))
    }
}
