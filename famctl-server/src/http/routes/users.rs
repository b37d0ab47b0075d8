//! User account endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::UserRepo;
use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::http::server::AppState;
use crate::models::{
    optional_text, Email, Name, NewUser, Profile, UserAccount, UserUpdate, ValidationError,
};

/// Create user request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    /// Credential digest from the authentication service, stored as-is.
    pub password: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = ApiError;

    fn try_from(req: CreateUserRequest) -> Result<Self, Self::Error> {
        if req.password.is_empty() {
            return Err(ValidationError::Empty { field: "password" }.into());
        }
        Ok(Self {
            firstname: Name::new("firstname", &req.firstname)?,
            lastname: Name::new("lastname", &req.lastname)?,
            email: Email::new(&req.email)?,
            password: req.password,
            phone_number: optional_text(req.phone_number),
            address: optional_text(req.address),
            gender: optional_text(req.gender),
        })
    }
}

/// Update user request (profile fields only)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
}

impl UpdateUserRequest {
    fn into_update(self, id: i64) -> Result<UserUpdate, ApiError> {
        Ok(UserUpdate {
            id,
            firstname: Name::new("firstname", &self.firstname)?,
            lastname: Name::new("lastname", &self.lastname)?,
            email: Email::new(&self.email)?,
            phone_number: optional_text(self.phone_number),
            address: optional_text(self.address),
            gender: optional_text(self.gender),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub email: String,
}

/// POST /users - create an account
async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let user = NewUser::try_from(req)?;
    let id = UserRepo::new(&state.pool).create(&user).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET /users/lookup?email= - find an account by email
async fn lookup_user(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LookupParams>,
) -> Result<Json<UserAccount>, ApiError> {
    let email = Email::new(&params.email)?;
    let account = UserRepo::new(&state.pool)
        .find_by_email(email.as_str())
        .await?
        .ok_or_else(|| ApiError::not_found("user", email.as_str()))?;
    Ok(Json(account))
}

/// GET /users/{id} - full account (password excluded)
async fn get_user(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<UserAccount>, ApiError> {
    let account = UserRepo::new(&state.pool)
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("user", id))?;
    Ok(Json(account))
}

/// GET /users/{id}/profile - profile fields
async fn get_profile(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Profile>, ApiError> {
    let profile = UserRepo::new(&state.pool).read_profile(id).await?;
    Ok(Json(profile))
}

/// PUT /users/{id} - replace profile fields
async fn update_user(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    Json(req): Json<UpdateUserRequest>,
) -> Result<StatusCode, ApiError> {
    let update = req.into_update(id)?;
    match UserRepo::new(&state.pool).update(&update).await? {
        0 => Err(ApiError::not_found("user", id)),
        _ => Ok(StatusCode::NO_CONTENT),
    }
}

/// DELETE /users/{id} - remove an account and its family
async fn delete_user(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    match UserRepo::new(&state.pool).delete(id).await? {
        0 => Err(ApiError::not_found("user", id)),
        _ => Ok(StatusCode::NO_CONTENT),
    }
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/lookup", get(lookup_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/{id}/profile", get(get_profile))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::http::routes::test_support::offline_router;

    fn create_request() -> CreateUserRequest {
        CreateUserRequest {
            firstname: " Ada ".into(),
            lastname: "Byron".into(),
            email: "Ada@Example.com".into(),
            password: "digest".into(),
            phone_number: Some("  ".into()),
            address: Some("1 Main St".into()),
            gender: None,
        }
    }

    #[test]
    fn create_request_is_normalized() {
        let user = NewUser::try_from(create_request()).unwrap();
        assert_eq!(user.firstname.as_str(), "Ada");
        assert_eq!(user.email.as_str(), "ada@example.com");
        assert!(user.phone_number.is_none());
        assert_eq!(user.address.as_deref(), Some("1 Main St"));
    }

    #[test]
    fn empty_password_rejected() {
        let mut req = create_request();
        req.password.clear();
        assert!(matches!(
            NewUser::try_from(req),
            Err(ApiError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn invalid_email_is_400_before_touching_database() {
        let body = json!({
            "firstname": "Ada",
            "lastname": "Byron",
            "email": "not-an-email",
            "password": "digest"
        });

        let response = offline_router()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/users")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["error"], "validation_error");
    }

    #[tokio::test]
    async fn negative_profile_id_is_400() {
        let response = offline_router()
            .oneshot(
                Request::builder()
                    .uri("/users/-1/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
