//! JSON extractor that reports rejections in the API error format

use axum::{
    extract::{rejection::JsonRejection as AxumJsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Wrapper around `axum::Json` whose rejections are `400` API errors
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Rejected request body
#[derive(Debug)]
pub struct JsonRejection {
    message: String,
}

impl IntoResponse for JsonRejection {
    fn into_response(self) -> Response {
        ApiError::bad_request(self.message)
            .with_code("invalid_json")
            .into_response()
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => Err(JsonRejection {
                message: rejection_message(&rejection),
            }),
        }
    }
}

fn rejection_message(rejection: &AxumJsonRejection) -> String {
    match rejection {
        AxumJsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        AxumJsonRejection::JsonSyntaxError(err) => {
            format!("Invalid JSON syntax: {}", err.body_text())
        }
        AxumJsonRejection::MissingJsonContentType(_) => {
            "Missing Content-Type header. Expected 'application/json'.".to_string()
        }
        AxumJsonRejection::BytesRejection(err) => {
            format!("Failed to read request body: {}", err.body_text())
        }
        _ => "Invalid JSON request".to_string(),
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}
