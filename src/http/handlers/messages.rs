//! `/api/v1/messages` handlers.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::http::{ApiError, AppState, AuthenticatedCaller, Backend, extract::json_payload};
use crate::message::domain::MessageView;

/// Prefix of every message resource location.
pub const MESSAGES_PATH: &str = "/api/v1/messages";

/// Query string accepted by the list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Restrict to messages the caller sent to this user.
    pub to: Option<String>,
}

/// `GET /api/v1/messages[?to=<userId>]`
pub async fn list_messages<B: Backend>(
    State(state): State<AppState<B>>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<MessageView>>, ApiError> {
    let messages = state
        .messaging
        .list_messages(caller.user_id, params.to.as_deref())
        .await?;
    Ok(Json(messages))
}

/// `POST /api/v1/messages`
pub async fn create_message<B: Backend>(
    State(state): State<AppState<B>>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = json_payload(body)?;
    let message = state
        .messaging
        .post_message(caller.user_id, &payload)
        .await?;
    let location = format!("{MESSAGES_PATH}/{}", message.id());
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(json!({}))))
}

/// `GET /api/v1/messages/:message_id`
pub async fn get_message<B: Backend>(
    State(state): State<AppState<B>>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Path(message_id): Path<String>,
) -> Result<Json<MessageView>, ApiError> {
    let message = state
        .messaging
        .get_message(caller.user_id, &message_id)
        .await?;
    Ok(Json(message))
}
