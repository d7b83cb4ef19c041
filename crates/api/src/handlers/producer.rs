//! Handlers for the `/producers` resource.

use agro_core::error::CoreError;
use agro_core::types::DbId;
use agro_core::validation::ValidationReport;
use agro_db::models::producer::{CreateProducer, UpdateProducer};
use agro_db::repositories::{FarmRepo, ProducerRepo};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::extract_json;
use crate::response::DataResponse;
use crate::state::AppState;

/// Validate a create payload and return it with the document normalized.
fn validate_create(input: CreateProducer) -> Result<CreateProducer, CoreError> {
    let mut report = ValidationReport::new();
    report.merge_validator(input.validate());

    let Some(tax_id) = report.check_tax_id("document", &input.document) else {
        return Err(report.into_error());
    };
    report.finish()?;

    Ok(CreateProducer {
        document: tax_id.into_normalized(),
        ..input
    })
}

/// Validate an update payload; a present document is normalized.
fn validate_update(input: UpdateProducer) -> Result<UpdateProducer, CoreError> {
    let mut report = ValidationReport::new();
    report.merge_validator(input.validate());

    let document = input
        .document
        .as_deref()
        .and_then(|raw| report.check_tax_id("document", raw));
    report.finish()?;

    Ok(UpdateProducer {
        document: document.map(|d| d.into_normalized()),
        ..input
    })
}

pub(crate) async fn ensure_producer_exists(state: &AppState, id: DbId) -> AppResult<()> {
    ProducerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Producer",
            id,
        }))?;
    Ok(())
}

/// POST /api/v1/producers
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateProducer>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = extract_json(body)?;
    let input = validate_create(input).inspect_err(|err| {
        tracing::debug!(error = %err, "Producer create rejected");
    })?;

    let producer = ProducerRepo::create(&state.pool, &input).await?;

    tracing::info!(producer_id = producer.id, "Producer created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: producer })))
}

/// GET /api/v1/producers
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let producers = ProducerRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: producers }))
}

/// GET /api/v1/producers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let producer = ProducerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Producer",
            id,
        }))?;
    Ok(Json(DataResponse { data: producer }))
}

/// PUT /api/v1/producers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Result<Json<UpdateProducer>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = extract_json(body)?;
    let input = validate_update(input).inspect_err(|err| {
        tracing::debug!(producer_id = id, error = %err, "Producer update rejected");
    })?;

    let producer = ProducerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Producer",
            id,
        }))?;

    tracing::info!(producer_id = id, "Producer updated");

    Ok(Json(DataResponse { data: producer }))
}

/// DELETE /api/v1/producers/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = ProducerRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(producer_id = id, "Producer deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Producer",
            id,
        }))
    }
}

/// GET /api/v1/producers/{id}/farms
pub async fn list_farms(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_producer_exists(&state, id).await?;
    let farms = FarmRepo::list_by_producer(&state.pool, id).await?;
    Ok(Json(DataResponse { data: farms }))
}
