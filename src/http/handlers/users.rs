//! `/api/v1/users` handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::http::{ApiError, AppState, AuthenticatedCaller, Backend, extract::json_payload};
use crate::user::domain::{User, UserId, Username};

/// Prefix of every user resource location.
pub const USERS_PATH: &str = "/api/v1/users";

/// Public projection of a user.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    /// The user identifier.
    pub id: UserId,
    /// The username.
    pub username: Username,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().clone(),
        }
    }
}

/// `GET /api/v1/users`
pub async fn list_users<B: Backend>(
    State(state): State<AppState<B>>,
    _caller: AuthenticatedCaller,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// `POST /api/v1/users`
pub async fn register_user<B: Backend>(
    State(state): State<AppState<B>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = json_payload(body)?;
    let user = state.users.register(&payload).await?;
    let location = format!("{USERS_PATH}/{}", user.username());
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(json!({}))))
}

/// `GET /api/v1/users/:username`
pub async fn get_user<B: Backend>(
    State(state): State<AppState<B>>,
    _caller: AuthenticatedCaller,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.find_by_username(&username).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// `PUT /api/v1/users/:username`
pub async fn update_user<B: Backend>(
    State(state): State<AppState<B>>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Path(username): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let payload = json_payload(body)?;
    state
        .users
        .update(caller.user_id, &username, &payload)
        .await?;
    Ok(Json(json!({})))
}
