/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::input::InputError;
use common::types::BaseResponse;
use sea_orm::DbErr;
use std::fmt;
use upgrader::{StoreError, UpgradeError};

#[derive(Debug)]
pub enum WebError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    UnprocessableEntity(String),
    BadGateway(String),
    InternalServerError(String),
    Database(DbErr),
    InputValidation(InputError),
    JsonParsing(JsonRejection),
    QueryParsing(QueryRejection),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            WebError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            WebError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            WebError::UnprocessableEntity(msg) => write!(f, "Unprocessable Entity: {}", msg),
            WebError::BadGateway(msg) => write!(f, "Bad Gateway: {}", msg),
            WebError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            WebError::Database(err) => write!(f, "Database error: {}", err),
            WebError::InputValidation(err) => write!(f, "Input validation error: {}", err),
            WebError::JsonParsing(err) => write!(f, "JSON parsing error: {}", err),
            WebError::QueryParsing(err) => write!(f, "Query parsing error: {}", err),
        }
    }
}

impl std::error::Error for WebError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WebError::Database(err) => Some(err),
            WebError::InputValidation(err) => Some(err),
            WebError::JsonParsing(err) => Some(err),
            WebError::QueryParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbErr> for WebError {
    fn from(err: DbErr) -> Self {
        WebError::Database(err)
    }
}

impl From<InputError> for WebError {
    fn from(err: InputError) -> Self {
        WebError::InputValidation(err)
    }
}

impl From<JsonRejection> for WebError {
    fn from(err: JsonRejection) -> Self {
        WebError::JsonParsing(err)
    }
}

impl From<QueryRejection> for WebError {
    fn from(err: QueryRejection) -> Self {
        WebError::QueryParsing(err)
    }
}

impl From<UpgradeError> for WebError {
    fn from(err: UpgradeError) -> Self {
        match err {
            UpgradeError::LastRecordUnfinished
            | UpgradeError::RecordCanNotDeploy(_)
            | UpgradeError::RecordCanNotRollback
            | UpgradeError::RecordCanNotUpgrade(_) => WebError::Conflict(err.to_string()),
            UpgradeError::RecordNotFound(_) | UpgradeError::SnapshotMissing(_) | UpgradeError::NotFound(_) => {
                WebError::NotFound(err.to_string())
            }
            UpgradeError::Template(_) | UpgradeError::Render { .. } => WebError::UnprocessableEntity(err.to_string()),
            UpgradeError::Submission(_) => WebError::BadGateway(err.to_string()),
            UpgradeError::Store(StoreError::Database(err)) => WebError::Database(err),
            UpgradeError::Store(err) => WebError::InternalServerError(err.to_string()),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            WebError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            WebError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            WebError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            WebError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            WebError::BadGateway(msg) => {
                tracing::warn!("Region rejected request: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
            WebError::InternalServerError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            WebError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            WebError::InputValidation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            WebError::JsonParsing(err) => (StatusCode::BAD_REQUEST, format!("Invalid JSON: {}", err)),
            WebError::QueryParsing(err) => (StatusCode::BAD_REQUEST, format!("Invalid query: {}", err)),
        };

        let body = Json(BaseResponse {
            error: true,
            message: error_message,
        });

        (status, body).into_response()
    }
}

pub type WebResult<T> = Result<T, WebError>;

impl WebError {
    pub fn not_found(resource: &str) -> Self {
        WebError::NotFound(format!("{} not found", resource))
    }
}
