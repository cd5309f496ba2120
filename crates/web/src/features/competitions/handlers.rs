use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    document::parse_id,
    dto::{
        common::ListQuery,
        competition::{CompetitionList, CompetitionRequest, CompetitionResponse},
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::{JsonBody, QueryPairs};

use super::services;

#[utoipa::path(
    get,
    path = "/competitions",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of competitions with their clubs", body = CompetitionList),
        (status = 400, description = "Invalid list parameters")
    ),
    tag = "competitions"
)]
pub async fn list_competitions(
    State(db): State<Database>,
    query: QueryPairs,
) -> Result<Response, WebError> {
    let params = query.list_params()?;
    let competitions = services::list_competitions(db.store(), &params).await?;

    Ok(Json(competitions).into_response())
}

#[utoipa::path(
    get,
    path = "/competitions/all",
    responses(
        (status = 200, description = "Every competition, newest first", body = CompetitionList)
    ),
    tag = "competitions"
)]
pub async fn list_all_competitions(State(db): State<Database>) -> Result<Response, WebError> {
    let competitions = services::list_all_competitions(db.store()).await?;

    Ok(Json(competitions).into_response())
}

#[utoipa::path(
    get,
    path = "/competitions/{id}",
    params(
        ("id" = String, Path, description = "Competition id")
    ),
    responses(
        (status = 200, description = "Competition found", body = CompetitionResponse),
        (status = 400, description = "Invalid competition id"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn get_competition(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "competition")?;
    let competition = services::get_competition(db.store(), id).await?;

    Ok(Json(competition).into_response())
}

#[utoipa::path(
    post,
    path = "/competitions",
    request_body = CompetitionRequest,
    responses(
        (status = 201, description = "Competition created successfully", body = CompetitionResponse),
        (status = 400, description = "Validation error or fewer than two existing clubs")
    ),
    tag = "competitions"
)]
pub async fn create_competition(
    State(db): State<Database>,
    JsonBody(req): JsonBody<CompetitionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let competition = services::create_competition(db.store(), req).await?;

    Ok((StatusCode::CREATED, Json(competition)).into_response())
}

#[utoipa::path(
    patch,
    path = "/competitions/{id}",
    params(
        ("id" = String, Path, description = "Competition id")
    ),
    request_body = CompetitionRequest,
    responses(
        (status = 200, description = "Competition replaced successfully", body = CompetitionResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn update_competition(
    State(db): State<Database>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<CompetitionRequest>,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "competition")?;
    req.validate()?;

    let competition = services::update_competition(db.store(), id, req).await?;

    Ok(Json(competition).into_response())
}

#[utoipa::path(
    delete,
    path = "/competitions/{id}",
    params(
        ("id" = String, Path, description = "Competition id"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Competition deleted; refreshed page", body = CompetitionList),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn delete_competition(
    State(db): State<Database>,
    Path(id): Path<String>,
    query: QueryPairs,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "competition")?;
    let params = query.list_params()?;

    let competitions = services::delete_competition(db.store(), id, &params).await?;

    Ok(Json(competitions).into_response())
}
