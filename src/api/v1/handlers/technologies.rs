/*
 * Responsibility
 * - /technologies 系 CRUD handler
 * - Path の id は内部 ID (数値) をそのまま受ける。public_id はレスポンス側でのみ使う
 * - PATCH は部分更新: validation → repo の COALESCE 更新
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::v1::dto::technologies::{TechnologyResponse, UpdateTechnologyRequest},
    error::AppError,
    repos::tech_repo,
    state::AppState,
};

fn row_to_response(
    state: &AppState,
    row: tech_repo::TechRow,
) -> Result<TechnologyResponse, AppError> {
    let public_id = state.id_codec.encode(row.tech_id)?;

    Ok(TechnologyResponse {
        id: row.tech_id,
        public_id,
        name: row.name,
        description: row.description,
        icons: row.icons,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

pub async fn list_technologies(
    State(state): State<AppState>,
) -> Result<Json<Vec<TechnologyResponse>>, AppError> {
    let rows = tech_repo::list(&state.db).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

pub async fn get_technology(
    State(state): State<AppState>,
    Path(tech_id): Path<i64>,
) -> Result<Json<TechnologyResponse>, AppError> {
    let row = tech_repo::get(&state.db, tech_id)
        .await?
        .ok_or(AppError::not_found("technology"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn update_technology(
    State(state): State<AppState>,
    Path(tech_id): Path<i64>,
    Json(req): Json<UpdateTechnologyRequest>,
) -> Result<Json<TechnologyResponse>, AppError> {
    let errors = req.validate();
    if !errors.is_empty() {
        return Err(errors.into());
    }

    let row = tech_repo::update(
        &state.db,
        tech_id,
        req.name.as_deref(),
        req.description.as_deref(),
        req.icons.as_deref(),
    )
    .await?
    .ok_or(AppError::not_found("technology"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn delete_technology(
    State(state): State<AppState>,
    Path(tech_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = tech_repo::delete(&state.db, tech_id).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("technology"))
    }
}
