//! Request extractors.

use axum::{
    Json, async_trait,
    extract::{FromRequestParts, rejection::JsonRejection},
    http::{header::AUTHORIZATION, request::Parts},
};
use serde_json::{Map, Value};

use super::{ApiError, AppState, Backend};
use crate::auth::{AuthFailure, Credentials, Identity};

/// The authenticated caller of a request.
///
/// Extraction fails with `401 Unauthorized` before the handler runs when the
/// `Authorization` header is missing, malformed or wrong.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller(pub Identity);

#[async_trait]
impl<B: Backend> FromRequestParts<AppState<B>> for AuthenticatedCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<B>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthFailure::MissingCredentials)?;
        let value = header
            .to_str()
            .map_err(|_| AuthFailure::MalformedCredentials)?;
        let credentials = Credentials::from_basic_header(value)?;
        let identity = state.authenticator.authenticate(&credentials).await?;
        Ok(Self(identity))
    }
}

/// Unwraps a JSON body, treating a request without a JSON content type as an
/// empty object so that field validation reports what is missing.
///
/// # Errors
///
/// Returns [`ApiError::BadRequest`] for unparseable JSON.
pub fn json_payload(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(Value::Object(Map::new())),
        Err(rejection) => Err(rejection.into()),
    }
}
