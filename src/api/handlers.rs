use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::domain::model::Planet;
use crate::utils::validation::validate_non_empty_field;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

const INVALID_PLANET_JSON: &str = "Planet JSON is invalid";

#[derive(Debug, Deserialize)]
pub struct PlanetQuery {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        started_at: state.started_at,
    })
}

/// `GET /planets` 列出全部；帶 `?name=` 時改為依名稱查詢單筆
pub async fn list_planets(
    State(state): State<AppState>,
    Query(query): Query<PlanetQuery>,
) -> ApiResult<Response> {
    let ctx = state.request_context();

    if let Some(name) = query.name {
        let planet = state.retriever.retrieve_by_name(&ctx, &name).await?;
        return Ok(Json(planet).into_response());
    }

    let planets = state.retriever.retrieve_all(&ctx).await?;
    tracing::debug!("Listing {} planets", planets.len());
    Ok(Json(planets).into_response())
}

pub async fn get_planet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Planet>> {
    let ctx = state.request_context();
    let planet = state.retriever.retrieve_by_id(&ctx, &id).await?;
    Ok(Json(planet))
}

pub async fn create_planet(
    State(state): State<AppState>,
    body: Result<Json<Planet>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Planet>)> {
    let Json(planet) = body.map_err(|e| {
        tracing::debug!("Rejected planet body: {}", e);
        ApiError::BadRequest(INVALID_PLANET_JSON.to_string())
    })?;
    validate_non_empty_field("name", &planet.name)?;

    let ctx = state.request_context();
    let created = state.repository.create(&ctx, planet).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// 路徑上的 id 優先於 body；不存在時會建立 (upsert)
pub async fn update_planet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Planet>, JsonRejection>,
) -> ApiResult<Json<Planet>> {
    let Json(mut planet) = body.map_err(|e| {
        tracing::debug!("Rejected planet body: {}", e);
        ApiError::BadRequest(INVALID_PLANET_JSON.to_string())
    })?;
    validate_non_empty_field("name", &planet.name)?;
    planet.id = id;

    let ctx = state.request_context();
    let saved = state.repository.update(&ctx, planet).await?;
    Ok(Json(saved))
}

pub async fn delete_planet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let ctx = state.request_context();
    state.repository.delete(&ctx, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
