//! Handlers for the `/harvests` resource.

use agro_core::error::CoreError;
use agro_core::types::DbId;
use agro_core::validation::ValidationReport;
use agro_db::models::harvest::{CreateHarvest, UpdateHarvest};
use agro_db::repositories::{CropRepo, HarvestRepo};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::extract_json;
use crate::handlers::farm::ensure_farm_exists;
use crate::response::DataResponse;
use crate::state::AppState;

pub(crate) async fn ensure_harvest_exists(state: &AppState, id: DbId) -> AppResult<()> {
    HarvestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Harvest",
            id,
        }))?;
    Ok(())
}

/// POST /api/v1/harvests
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateHarvest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = extract_json(body)?;
    let mut report = ValidationReport::new();
    report.merge_validator(input.validate());
    report.finish()?;

    ensure_farm_exists(&state, input.farm_id).await?;

    let harvest = HarvestRepo::create(&state.pool, &input).await?;

    tracing::info!(
        harvest_id = harvest.id,
        farm_id = harvest.farm_id,
        year = harvest.year,
        "Harvest created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: harvest })))
}

/// GET /api/v1/harvests
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let harvests = HarvestRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: harvests }))
}

/// GET /api/v1/harvests/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let harvest = HarvestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Harvest",
            id,
        }))?;
    Ok(Json(DataResponse { data: harvest }))
}

/// PUT /api/v1/harvests/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Result<Json<UpdateHarvest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = extract_json(body)?;
    let mut report = ValidationReport::new();
    report.merge_validator(input.validate());
    report.finish()?;

    if let Some(farm_id) = input.farm_id {
        ensure_farm_exists(&state, farm_id).await?;
    }

    let harvest = HarvestRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Harvest",
            id,
        }))?;

    tracing::info!(harvest_id = id, "Harvest updated");

    Ok(Json(DataResponse { data: harvest }))
}

/// DELETE /api/v1/harvests/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = HarvestRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(harvest_id = id, "Harvest deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Harvest",
            id,
        }))
    }
}

/// GET /api/v1/harvests/{id}/crops
pub async fn list_crops(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_harvest_exists(&state, id).await?;
    let crops = CropRepo::list_by_harvest(&state.pool, id).await?;
    Ok(Json(DataResponse { data: crops }))
}
