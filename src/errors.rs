use axum::http::StatusCode;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("no week labelled '{label}'")]
    NotFound { label: String },

    #[error("dataset is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("dataset contains no weeks")]
    Empty,

    #[error("week label '{label}' appears more than once")]
    DuplicateLabel { label: String },

    #[error("week '{label}' starts on {start} after it ends on {end}")]
    InvertedRange {
        label: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("week '{label}' starts on {start}, expected {expected} (the day after the previous week)")]
    NonContiguous {
        label: String,
        start: NaiveDate,
        expected: NaiveDate,
    },

    #[error("week '{label}' is missing metric '{metric}'")]
    MissingMetric { label: String, metric: &'static str },

    #[error("week '{label}' has invalid value {value} for metric '{metric}'")]
    InvalidValue {
        label: String,
        metric: &'static str,
        value: f64,
    },
}

impl TableError {
    pub fn not_found(label: impl Into<String>) -> Self {
        Self::NotFound {
            label: label.into(),
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

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<TableError> for AppError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::NotFound { .. } => Self::not_found(err.to_string()),
            other => Self::internal(other),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
