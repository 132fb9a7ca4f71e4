use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use zonekit::prelude::*;

use crate::{
    api::ApiError,
    dto::{LocateQuery, OverlapRequest, ZoneDto},
    state::AppState,
};

fn zone_id(path: Result<Path<ZoneId>, PathRejection>) -> Result<ZoneId, ApiError> {
    let Path(id) = path.map_err(|err| ApiError::BadRequest(err.body_text()))?;
    Ok(id)
}

pub async fn create_zone(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ZoneInput>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(input) = payload.map_err(|err| ApiError::BadRequest(err.body_text()))?;
    let zone = state.zones.create(&input)?;
    Ok((StatusCode::CREATED, Json(ZoneDto::from(&zone))).into_response())
}

pub async fn list_zones(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let zones: Vec<_> = state.zones.zones()?.iter().map(ZoneDto::from).collect();
    Ok(Json(zones).into_response())
}

pub async fn get_zone(
    State(state): State<Arc<AppState>>,
    path: Result<Path<ZoneId>, PathRejection>,
) -> Result<Response, ApiError> {
    let zone = state.zones.zone(zone_id(path)?)?;
    Ok(Json(ZoneDto::from(&zone)).into_response())
}

pub async fn update_zone(
    State(state): State<Arc<AppState>>,
    path: Result<Path<ZoneId>, PathRejection>,
    payload: Result<Json<ZonePatch>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = zone_id(path)?;
    let Json(patch) = payload.map_err(|err| ApiError::BadRequest(err.body_text()))?;
    let zone = state.zones.update(id, &patch)?;
    Ok(Json(ZoneDto::from(&zone)).into_response())
}

pub async fn delete_zone(
    State(state): State<Arc<AppState>>,
    path: Result<Path<ZoneId>, PathRejection>,
) -> Result<Response, ApiError> {
    state.zones.delete(zone_id(path)?)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn locate_zone(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LocateQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|err| ApiError::BadRequest(err.body_text()))?;
    let zone = state
        .zones
        .locate(&Coordinate::from(&query))?
        .ok_or(ApiError::NoZoneAt)?;
    Ok(Json(ZoneDto::from(&zone)).into_response())
}

pub async fn overlapping_zones(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OverlapRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|err| ApiError::BadRequest(err.body_text()))?;
    let zones: Vec<_> = state
        .zones
        .overlapping(&request.boundary, request.exclude_id)?
        .iter()
        .map(ZoneDto::from)
        .collect();
    Ok(Json(zones).into_response())
}

pub async fn aggregates(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    Ok(Json(state.zones.aggregates()?).into_response())
}
