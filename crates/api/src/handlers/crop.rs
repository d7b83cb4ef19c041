//! Handlers for the `/crops` resource.
//!
//! Crop names are unique per harvest. The check is left to the
//! `uq_crops_harvest_id_name` constraint so it holds under concurrent
//! writes; the violation surfaces as a 409 through [`AppError`].

use agro_core::error::CoreError;
use agro_core::types::DbId;
use agro_core::validation::ValidationReport;
use agro_db::models::crop::{CreateCrop, UpdateCrop};
use agro_db::repositories::CropRepo;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::extract_json;
use crate::handlers::harvest::ensure_harvest_exists;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/crops
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateCrop>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = extract_json(body)?;
    let mut report = ValidationReport::new();
    report.merge_validator(input.validate());
    report.finish()?;

    ensure_harvest_exists(&state, input.harvest_id).await?;

    let crop = CropRepo::create(&state.pool, &input).await?;

    tracing::info!(
        crop_id = crop.id,
        harvest_id = crop.harvest_id,
        name = %crop.name,
        "Crop created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: crop })))
}

/// GET /api/v1/crops
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let crops = CropRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: crops }))
}

/// GET /api/v1/crops/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let crop = CropRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Crop", id }))?;
    Ok(Json(DataResponse { data: crop }))
}

/// PUT /api/v1/crops/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Result<Json<UpdateCrop>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = extract_json(body)?;
    let mut report = ValidationReport::new();
    report.merge_validator(input.validate());
    report.finish()?;

    if let Some(harvest_id) = input.harvest_id {
        ensure_harvest_exists(&state, harvest_id).await?;
    }

    let crop = CropRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Crop", id }))?;

    tracing::info!(crop_id = id, "Crop updated");

    Ok(Json(DataResponse { data: crop }))
}

/// DELETE /api/v1/crops/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = CropRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(crop_id = id, "Crop deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Crop", id }))
    }
}
