//! Translation of service errors into HTTP responses.
//!
//! Every error body has the shape `{ "message": "..." }`. Infrastructure
//! faults are logged here and reported to clients without detail.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::auth::AuthFailure;
use crate::message::services::MessagingError;
use crate::payload::{ErrorBody, FieldError};
use crate::user::services::UserServiceError;

/// Challenge sent with every authentication failure.
pub const BASIC_CHALLENGE: &str = "Basic realm=\"sup\"";

/// An error ready to be rendered as an HTTP response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request carried no valid credentials.
    #[error("unauthenticated: {0}")]
    Unauthenticated(AuthFailure),

    /// The payload failed validation.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// The addressed resource does not exist.
    #[error("{0}")]
    NotFound(&'static str),

    /// The caller may not access the addressed resource.
    #[error("not authorized")]
    NotAuthorized,

    /// A path or query identifier was malformed.
    #[error("Invalid '{field}' value: '{value}'")]
    InvalidIdentifier {
        /// The parameter name.
        field: &'static str,
        /// The rejected raw value.
        value: String,
    },

    /// The request body could not be read as JSON.
    #[error("{0}")]
    BadRequest(String),

    /// An infrastructure fault.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn internal(err: &impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }

    /// Returns the response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated(_) | Self::NotAuthorized => StatusCode::UNAUTHORIZED,
            Self::Field(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidIdentifier { .. } | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the client-facing message.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Unauthenticated(_) => "Unauthorized".to_owned(),
            Self::Field(error) => error.rendering().body.message,
            Self::NotAuthorized => "Not Authorized".to_owned(),
            Self::Internal(_) => "Internal server error".to_owned(),
            Self::NotFound(_) | Self::InvalidIdentifier { .. } | Self::BadRequest(_) => {
                self.to_string()
            }
        }
    }

    fn log(&self) {
        match self {
            Self::Internal(detail) => tracing::error!(error = %detail, "request failed"),
            Self::Unauthenticated(reason) => {
                tracing::debug!(reason = %reason, "authentication rejected");
            }
            _ => {}
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        let body = Json(ErrorBody::new(self.client_message()));
        let mut response = (status, body).into_response();
        if matches!(self, Self::Unauthenticated(_)) {
            response.headers_mut().insert(
                WWW_AUTHENTICATE,
                HeaderValue::from_static(BASIC_CHALLENGE),
            );
        }
        response
    }
}

impl From<AuthFailure> for ApiError {
    fn from(failure: AuthFailure) -> Self {
        if failure.is_rejection() {
            Self::Unauthenticated(failure)
        } else {
            Self::internal(&failure)
        }
    }
}

impl From<MessagingError> for ApiError {
    fn from(err: MessagingError) -> Self {
        match err {
            MessagingError::Field(error) => Self::Field(error),
            MessagingError::NotFound(_) => Self::NotFound("Message not found"),
            MessagingError::Unauthorized { .. } => Self::NotAuthorized,
            MessagingError::InvalidIdentifier { field, value } => {
                Self::InvalidIdentifier { field, value }
            }
            MessagingError::Store(_) | MessagingError::Directory(_) => Self::internal(&err),
        }
    }
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::Field(error) => Self::Field(error),
            UserServiceError::NotFound(_) => Self::NotFound("User not found"),
            UserServiceError::Unauthorized { .. } => Self::NotAuthorized,
            UserServiceError::Directory(_) | UserServiceError::Hashing(_) => Self::internal(&err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
