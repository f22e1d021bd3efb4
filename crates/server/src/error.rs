use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::engine::SuggestError;

/// Errors surfaced by HTTP handlers, rendered as `{"error": message}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Suggest(#[from] SuggestError),

    /// An engine call panicked on the blocking pool
    #[error("internal error")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Suggest(SuggestError::MissingRestaurant) => StatusCode::BAD_REQUEST,
            ApiError::Suggest(SuggestError::UnknownRestaurant(_))
            | ApiError::Suggest(SuggestError::ItemNotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Suggest(SuggestError::DataUnavailable(_)) | ApiError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::DataLoadError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (SuggestError::MissingRestaurant, StatusCode::BAD_REQUEST),
            (SuggestError::UnknownRestaurant("X".into()), StatusCode::NOT_FOUND),
            (
                SuggestError::ItemNotFound {
                    restaurant: "X".into(),
                    name: "Y".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                SuggestError::DataUnavailable(DataLoadError::FileNotFound { path: "x.json".into() }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[tokio::test]
    async fn test_panicked_engine_call_is_internal_error() {
        let join_error = tokio::task::spawn_blocking(|| panic!("engine bug"))
            .await
            .unwrap_err();

        let err = ApiError::from(join_error);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "internal error");
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = ApiError::from(SuggestError::DataUnavailable(DataLoadError::FileNotFound {
            path: "/srv/secret/fastfood_items.json".into(),
        }));
        assert_eq!(err.to_string(), "data unavailable");
    }
}
