//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::ValidationError;

/// Extract and validate a positive numeric id from the path
pub struct ValidId(pub i64);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Undecodable segments (e.g. invalid UTF-8) get the same rejection as bad numbers
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(invalid_id()))?;

        parse_id(&id).map(Self).map_err(ApiError::from)
    }
}

fn invalid_id() -> ValidationError {
    ValidationError::InvalidFormat {
        field: "id",
        reason: "must be a positive integer",
    }
}

fn parse_id(raw: &str) -> Result<i64, ValidationError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(invalid_id()),
    }
}
