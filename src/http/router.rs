//! Route table.

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{
    messages::{MESSAGES_PATH, create_message, get_message, list_messages},
    users::{USERS_PATH, get_user, list_users, register_user, update_user},
};
use super::{AppState, Backend};

/// Builds the `/api/v1` router over `state`.
pub fn router<B: Backend>(state: AppState<B>, cors: CorsLayer) -> Router {
    Router::new()
        .route(
            MESSAGES_PATH,
            get(list_messages::<B>).post(create_message::<B>),
        )
        .route(
            &format!("{MESSAGES_PATH}/:message_id"),
            get(get_message::<B>),
        )
        .route(USERS_PATH, get(list_users::<B>).post(register_user::<B>))
        .route(
            &format!("{USERS_PATH}/:username"),
            get(get_user::<B>).put(update_user::<B>),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
