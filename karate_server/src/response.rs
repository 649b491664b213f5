use axum::response::{IntoResponse, Response};
use hyper::StatusCode;
use karate_entities::queries::QueryError;
use serde::{Deserialize, Serialize};
use tracing::error;

#[derive(Debug, Clone)]
pub struct APIError {
    pub message: String,
    pub code: StatusCode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct APIErrorResponse {
    message: String,
}

impl APIError {
    pub fn new(message: String) -> Self {
        APIError {
            message,
            code: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for APIError {
    fn from(err: anyhow::Error) -> Self {
        error!("Error while handling request {}", err.to_string());
        APIError {
            message: err.to_string(),
            code: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryError> for APIError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::AmbiguousActivePeriod { .. } => {
                error!("Error while handling request {}", err);
                APIError {
                    message: err.to_string(),
                    code: StatusCode::CONFLICT,
                }
            }
            QueryError::Db(err) => handle_error(err),
        }
    }
}

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let mut res = serde_json::to_string(&APIErrorResponse {
            message: self.message.clone(),
        })
        .unwrap()
        .into_response();
        *res.status_mut() = self.code;
        res
    }
}

impl From<(StatusCode, &str)> for APIError {
    fn from((code, message): (StatusCode, &str)) -> Self {
        error!("Error while handling request {}", message);
        APIError {
            message: message.to_string(),
            code,
        }
    }
}

impl From<(StatusCode, String)> for APIError {
    fn from((code, message): (StatusCode, String)) -> Self {
        error!("Error while handling request {}", message);
        APIError { message, code }
    }
}

pub fn handle_error<E>(err: E) -> APIError
where
    E: std::error::Error,
{
    error!("Error while handling request {}", err);
    APIError::new(err.to_string())
}

pub fn handle_error_dyn(err: Box<dyn std::error::Error>) -> APIError {
    error!("Error while handling request {}", err);
    APIError::new(err.to_string())
}
