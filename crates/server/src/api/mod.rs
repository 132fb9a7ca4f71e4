mod boundaries;
mod zones;

pub use boundaries::*;
pub use zones::*;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;
use zonekit::zone;

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    Zone(zone::Error),
    /// Body, path or query could not be decoded.
    BadRequest(String),
    NoZoneAt,
}

impl From<zone::Error> for ApiError {
    fn from(value: zone::Error) -> Self {
        Self::Zone(value)
    }
}

impl From<zonekit::geometry::Error> for ApiError {
    fn from(value: zonekit::geometry::Error) -> Self {
        Self::Zone(value.into())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Zone(zone::Error::DuplicateName(_)) => StatusCode::CONFLICT,
            ApiError::Zone(zone::Error::NotFound(_)) | ApiError::NoZoneAt => StatusCode::NOT_FOUND,
            ApiError::Zone(zone::Error::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Zone(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::Zone(err @ zone::Error::Store(_)) => ErrorBody {
                code: err.code(),
                message: "Internal server error".into(),
            },
            ApiError::Zone(err) => ErrorBody {
                code: err.code(),
                message: err.to_string(),
            },
            ApiError::BadRequest(message) => ErrorBody {
                code: "INVALID_DATA",
                message: message.clone(),
            },
            ApiError::NoZoneAt => ErrorBody {
                code: "ZONE_NOT_FOUND",
                message: "No active zone covers this point".into(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.body();
        if let ApiError::Zone(err) = &self
            && status.is_server_error()
        {
            error!("Request failed: {err}");
        }
        (status, Json(body)).into_response()
    }
}
