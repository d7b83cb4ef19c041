//! Handlers for the `/farms` resource.
//!
//! Farm writes run the land allocation rules (positive areas, sub-areas
//! within the declared total, known state code) before touching the
//! database. Partial updates only check the fields they carry; the
//! `ck_farms_area_sum` constraint guards the merged row.

use agro_core::error::CoreError;
use agro_core::types::DbId;
use agro_core::validation::ValidationReport;
use agro_db::models::farm::{CreateFarm, UpdateFarm};
use agro_db::repositories::{FarmRepo, HarvestRepo};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::extract_json;
use crate::handlers::producer::ensure_producer_exists;
use crate::response::DataResponse;
use crate::state::AppState;

/// Validate a create payload and return it with the state in canonical form.
fn validate_create(input: CreateFarm) -> Result<CreateFarm, CoreError> {
    let mut report = ValidationReport::new();
    report.merge_validator(input.validate());

    let allocation = input.land_allocation();
    report.check_land_allocation(&allocation);
    report.finish()?;

    let state = allocation
        .state_code()
        .map(|code| code.as_str().to_string())
        .unwrap_or(input.state.clone());

    Ok(CreateFarm { state, ..input })
}

/// Validate the fields present in an update payload.
fn validate_update(input: UpdateFarm) -> Result<UpdateFarm, CoreError> {
    let mut report = ValidationReport::new();
    report.merge_validator(input.validate());

    let allocation = input.land_allocation();
    report.check_land_allocation(&allocation);
    report.finish()?;

    let state = allocation
        .state_code()
        .map(|code| code.as_str().to_string());

    Ok(UpdateFarm { state, ..input })
}

pub(crate) async fn ensure_farm_exists(state: &AppState, id: DbId) -> AppResult<()> {
    FarmRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Farm", id }))?;
    Ok(())
}

/// POST /api/v1/farms
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateFarm>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = extract_json(body)?;
    let input = validate_create(input).inspect_err(|err| {
        tracing::debug!(error = %err, "Farm create rejected");
    })?;
    ensure_producer_exists(&state, input.producer_id).await?;

    let farm = FarmRepo::create(&state.pool, &input).await?;

    tracing::info!(
        farm_id = farm.id,
        producer_id = farm.producer_id,
        state = %farm.state,
        total_area = farm.total_area,
        "Farm created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: farm })))
}

/// GET /api/v1/farms
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let farms = FarmRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: farms }))
}

/// GET /api/v1/farms/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let farm = FarmRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Farm", id }))?;
    Ok(Json(DataResponse { data: farm }))
}

/// PUT /api/v1/farms/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Result<Json<UpdateFarm>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = extract_json(body)?;
    let input = validate_update(input).inspect_err(|err| {
        tracing::debug!(farm_id = id, error = %err, "Farm update rejected");
    })?;
    if let Some(producer_id) = input.producer_id {
        ensure_producer_exists(&state, producer_id).await?;
    }

    let farm = FarmRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Farm", id }))?;

    tracing::info!(farm_id = id, "Farm updated");

    Ok(Json(DataResponse { data: farm }))
}

/// DELETE /api/v1/farms/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = FarmRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(farm_id = id, "Farm deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Farm", id }))
    }
}

/// GET /api/v1/farms/{id}/harvests
pub async fn list_harvests(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_farm_exists(&state, id).await?;
    let harvests = HarvestRepo::list_by_farm(&state.pool, id).await?;
    Ok(Json(DataResponse { data: harvests }))
}
