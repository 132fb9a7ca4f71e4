use axum::{
    Json,
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};
use zonekit::prelude::*;

use crate::{api::ApiError, dto::BoundaryDto};

/// Same checks the zone endpoints run, without storing anything.
pub async fn validate_boundary(
    payload: Result<Json<GeoJsonPolygon>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(polygon) = payload.map_err(|err| ApiError::BadRequest(err.body_text()))?;
    let boundary = validate_polygon(&polygon)?;
    Ok(Json(BoundaryDto::from(&boundary)).into_response())
}
