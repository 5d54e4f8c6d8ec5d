use axum::http::StatusCode;
use thiserror::Error;

/// Failure talking to the habit backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Outcome of a rejected form submission.
///
/// Everything except `Api` is raised before any request is sent.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("A habit with that name already exists.")]
    DuplicateName,

    #[error("That habit name is already used by another habit.")]
    NameTaken,

    #[error("Frequency goal must be one of the listed options.")]
    UnknownFrequency,

    #[error("Select a habit before saving.")]
    NoHabitSelected,

    #[error("Date must be a calendar day (YYYY-MM-DD).")]
    InvalidDate,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl FormError {
    pub fn is_validation(&self) -> bool {
        !matches!(self, FormError::Api(_))
    }

    /// Inline text for the form. Backend failures collapse to `generic`.
    pub fn user_message(&self, generic: &str) -> String {
        match self {
            FormError::Api(_) => generic.to_string(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        if self.is_validation() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::BAD_GATEWAY
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn bad_gateway(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: err.to_string(),
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        Self::bad_gateway(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
