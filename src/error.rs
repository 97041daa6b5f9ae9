// Errors returned by registry operations and HTTP handlers

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActivityError {
    #[error("Activity not found")]
    NotFound { activity: String },

    #[error("Student is already signed up")]
    AlreadySignedUp { email: String, activity: String },

    #[error("Student is not registered for this activity")]
    NotRegistered { email: String, activity: String },

    #[error("Query parameter 'email' is required")]
    MissingEmail,
}

impl ActivityError {
    pub fn not_found(activity: &str) -> Self {
        ActivityError::NotFound {
            activity: activity.to_string(),
        }
    }
}

#[cfg(feature = "server")]
mod response {
    use axum::{
        http::StatusCode,
        response::{IntoResponse, Json, Response},
    };
    use serde::Serialize;

    use super::ActivityError;

    /// Error body: `{"detail": "..."}`
    #[derive(Serialize)]
    struct ErrorResponse {
        detail: String,
    }

    impl ActivityError {
        pub fn status(&self) -> StatusCode {
            match self {
                ActivityError::NotFound { .. } => StatusCode::NOT_FOUND,
                ActivityError::AlreadySignedUp { .. } | ActivityError::NotRegistered { .. } => {
                    StatusCode::BAD_REQUEST
                }
                ActivityError::MissingEmail => StatusCode::UNPROCESSABLE_ENTITY,
            }
        }
    }

    impl IntoResponse for ActivityError {
        fn into_response(self) -> Response {
            let body = ErrorResponse {
                detail: self.to_string(),
            };

            (self.status(), Json(body)).into_response()
        }
    }
}
