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
        club::{ClubList, ClubRequest, ClubResponse},
        common::{ListQuery, SearchQuery},
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::{JsonBody, QueryPairs, QueryParams};

use super::services;

#[utoipa::path(
    get,
    path = "/clubs",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of clubs", body = ClubList),
        (status = 400, description = "Invalid list parameters")
    ),
    tag = "clubs"
)]
pub async fn list_clubs(
    State(db): State<Database>,
    query: QueryPairs,
) -> Result<Response, WebError> {
    let params = query.list_params()?;
    let clubs = services::list_clubs(db.store(), &params).await?;

    Ok(Json(clubs).into_response())
}

#[utoipa::path(
    get,
    path = "/clubs/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Clubs whose name contains the value", body = Vec<ClubResponse>)
    ),
    tag = "clubs"
)]
pub async fn search_clubs(
    State(db): State<Database>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> Result<Response, WebError> {
    let clubs = services::search_clubs(db.store(), &query.value).await?;

    Ok(Json(clubs).into_response())
}

#[utoipa::path(
    get,
    path = "/clubs/{id}",
    params(
        ("id" = String, Path, description = "Club id")
    ),
    responses(
        (status = 200, description = "Club found", body = ClubResponse),
        (status = 400, description = "Invalid club id"),
        (status = 404, description = "Club not found")
    ),
    tag = "clubs"
)]
pub async fn get_club(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "club")?;
    let club = services::get_club(db.store(), id).await?;

    Ok(Json(club).into_response())
}

#[utoipa::path(
    post,
    path = "/clubs",
    request_body = ClubRequest,
    responses(
        (status = 201, description = "Club created successfully", body = ClubResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "clubs"
)]
pub async fn create_club(
    State(db): State<Database>,
    JsonBody(req): JsonBody<ClubRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let club = services::create_club(db.store(), req).await?;

    Ok((StatusCode::CREATED, Json(club)).into_response())
}

#[utoipa::path(
    patch,
    path = "/clubs/{id}",
    params(
        ("id" = String, Path, description = "Club id")
    ),
    request_body = ClubRequest,
    responses(
        (status = 200, description = "Club replaced successfully", body = ClubResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Club not found")
    ),
    tag = "clubs"
)]
pub async fn update_club(
    State(db): State<Database>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<ClubRequest>,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "club")?;
    req.validate()?;

    let club = services::update_club(db.store(), id, req).await?;

    Ok(Json(club).into_response())
}

#[utoipa::path(
    delete,
    path = "/clubs/{id}",
    params(
        ("id" = String, Path, description = "Club id")
    ),
    responses(
        (status = 204, description = "Club deleted successfully"),
        (status = 404, description = "Club not found")
    ),
    tag = "clubs"
)]
pub async fn delete_club(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "club")?;
    services::delete_club(db.store(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
