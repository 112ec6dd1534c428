//! Mapping of domain errors onto HTTP responses.

use api_shared::AuthError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use recipes_core::RecipeError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Recipe(#[from] RecipeError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Recipe(RecipeError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "recipe not found")
            }
            ApiError::Recipe(RecipeError::AlreadyExists(_)) => {
                (StatusCode::CONFLICT, "recipe already exists")
            }
            ApiError::Recipe(RecipeError::InvalidInput(_)) => {
                (StatusCode::BAD_REQUEST, "invalid recipe")
            }
            ApiError::Recipe(
                RecipeError::Malformed { .. }
                | RecipeError::DirectoryRead { .. }
                | RecipeError::WriteFailure { .. },
            ) => (StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
            ApiError::Auth(AuthError::Unauthorized) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::Auth(AuthError::InvalidHash(_)) | ApiError::Join(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "invalid request"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!("request failed: {:?}", self);
        } else {
            tracing::debug!("request rejected: {}", self);
        }

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_recipe_errors_map_to_statuses() {
        assert_eq!(
            status_of(RecipeError::NotFound {
                slug: "x".into(),
                source: None
            }
            .into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(RecipeError::AlreadyExists("x".into()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(RecipeError::InvalidInput("x".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(
                RecipeError::WriteFailure {
                    path: "x.json".into(),
                    source: std::io::Error::other("disk full"),
                }
                .into()
            ),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_and_request_errors_map_to_statuses() {
        assert_eq!(status_of(AuthError::Unauthorized.into()), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(ApiError::BadRequest("bad json".into())),
            StatusCode::BAD_REQUEST
        );
    }
}
