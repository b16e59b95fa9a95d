use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub data: T,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> ApiResult<T> {
        Ok(Self {
            success: true,
            message: None,
            count: None,
            data,
            status: StatusCode::OK,
        })
    }

    pub fn with_message(status: StatusCode, message: impl Into<String>, data: T) -> ApiResult<T> {
        Ok(Self {
            success: true,
            message: Some(message.into()),
            count: None,
            data,
            status,
        })
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    pub fn list(data: Vec<T>) -> ApiResult<Vec<T>> {
        let count = data.len();
        Ok(Self {
            success: true,
            message: None,
            count: Some(count),
            data,
            status: StatusCode::OK,
        })
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Internal failures keep the generic message on the wire; the store
        // detail rides in the `error` field and the log.
        let (message, detail) = match self {
            Self::Internal(detail) => {
                tracing::error!("internal error: {detail}");
                ("Server error".to_string(), Some(detail))
            }
            other => (other.message().to_string(), None),
        };
        let body = Json(ErrorBody {
            success: false,
            message,
            error: detail,
        });
        (status, body).into_response()
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}
