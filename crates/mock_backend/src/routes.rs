//! API route handlers.

use axum::extract::{FromRequestParts, Path, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::{Json, Router, routing::get, routing::post};
use core_types::{DashboardStats, Feedback, FeedbackWithDetails, User};
use serde_json::Value;
use web_types::{
    CreateFeedbackRequest, CreateUserRequest, LoginRequest, LoginResponse, UpdateFeedbackRequest,
    UpdateUserRequest,
};

use crate::error::{BackendError, Result};
use crate::state::AppState;

/// The authenticated caller, resolved from the bearer token.
pub struct Caller {
    pub user: User,
    pub token: String,
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(BackendError::Unauthorized)?
            .to_string();

        let user = state.authenticate(&token).await?;
        Ok(Caller { user, token })
    }
}

/// Routes of the backend contract.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
        .route("/users/", post(create_user))
        .route("/users/me", get(me))
        .route("/users/my-team", get(my_team))
        .route("/users/{id}", get(get_user).put(update_user))
        .route("/users/{id}/toggle-status", post(toggle_status))
        .route("/users/team-stats/{manager_id}", get(team_stats))
        .route("/feedback/", post(create_feedback))
        .route("/feedback/my-received", get(my_received))
        .route("/feedback/my-given", get(my_given))
        .route("/feedback/team-member/{employee_id}", get(member_feedback))
        .route("/feedback/{id}", axum::routing::put(update_feedback))
        .route("/feedback/{id}/acknowledge", post(acknowledge))
        .route("/dashboard/stats", get(stats))
        .route("/dashboard/team-overview", get(team_overview))
}

/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let access_token = state.login(&req.username, &req.password).await?;
    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// GET /auth/me, GET /users/me
async fn me(caller: Caller) -> Json<User> {
    Json(caller.user)
}

/// POST /auth/logout
async fn logout(State(state): State<AppState>, caller: Caller) -> StatusCode {
    state.revoke(&caller.token).await;
    StatusCode::NO_CONTENT
}

/// POST /users/
async fn create_user(
    State(state): State<AppState>,
    caller: Caller,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<User>> {
    state.create_user(&caller.user, req).await.map(Json)
}

/// GET /users/my-team
async fn my_team(State(state): State<AppState>, caller: Caller) -> Result<Json<Vec<User>>> {
    state.my_team(&caller.user).await.map(Json)
}

/// GET /users/{id}
async fn get_user(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
) -> Result<Json<User>> {
    state.get_user(&caller.user, id).await.map(Json)
}

/// PUT /users/{id}
async fn update_user(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>> {
    state.update_user(&caller.user, id, req).await.map(Json)
}

/// POST /users/{id}/toggle-status
async fn toggle_status(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
) -> Result<Json<User>> {
    state.toggle_status(&caller.user, id).await.map(Json)
}

/// GET /users/team-stats/{manager_id}
async fn team_stats(
    State(state): State<AppState>,
    caller: Caller,
    Path(manager_id): Path<i64>,
) -> Result<Json<Value>> {
    state.team_stats(&caller.user, manager_id).await.map(Json)
}

/// POST /feedback/
async fn create_feedback(
    State(state): State<AppState>,
    caller: Caller,
    Json(req): Json<CreateFeedbackRequest>,
) -> Result<Json<Feedback>> {
    state.create_feedback(&caller.user, req).await.map(Json)
}

/// GET /feedback/my-received
async fn my_received(
    State(state): State<AppState>,
    caller: Caller,
) -> Json<Vec<FeedbackWithDetails>> {
    Json(state.received_feedback(&caller.user).await)
}

/// GET /feedback/my-given
async fn my_given(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<FeedbackWithDetails>>> {
    state.given_feedback(&caller.user).await.map(Json)
}

/// GET /feedback/team-member/{employee_id}
async fn member_feedback(
    State(state): State<AppState>,
    caller: Caller,
    Path(employee_id): Path<i64>,
) -> Result<Json<Vec<FeedbackWithDetails>>> {
    state.member_feedback(&caller.user, employee_id).await.map(Json)
}

/// PUT /feedback/{id}
async fn update_feedback(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
    Json(req): Json<UpdateFeedbackRequest>,
) -> Result<Json<Feedback>> {
    state.update_feedback(&caller.user, id, req).await.map(Json)
}

/// POST /feedback/{id}/acknowledge
async fn acknowledge(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
) -> Result<Json<Feedback>> {
    state.acknowledge(&caller.user, id).await.map(Json)
}

/// GET /dashboard/stats
async fn stats(State(state): State<AppState>, caller: Caller) -> Json<DashboardStats> {
    Json(state.stats(&caller.user).await)
}

/// GET /dashboard/team-overview
async fn team_overview(State(state): State<AppState>, caller: Caller) -> Result<Json<Value>> {
    state.team_overview(&caller.user).await.map(Json)
}
