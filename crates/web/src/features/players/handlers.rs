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
        common::{ListQuery, SearchQuery},
        player::{PlayerList, PlayerRequest, PlayerResponse},
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::{JsonBody, QueryPairs, QueryParams};

use super::services;

#[utoipa::path(
    get,
    path = "/players",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of players with their club", body = PlayerList),
        (status = 400, description = "Invalid list parameters")
    ),
    tag = "players"
)]
pub async fn list_players(
    State(db): State<Database>,
    query: QueryPairs,
) -> Result<Response, WebError> {
    let params = query.list_params()?;
    let players = services::list_players(db.store(), &params).await?;

    Ok(Json(players).into_response())
}

#[utoipa::path(
    get,
    path = "/players/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Players whose name contains the value", body = Vec<PlayerResponse>)
    ),
    tag = "players"
)]
pub async fn search_players(
    State(db): State<Database>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> Result<Response, WebError> {
    let players = services::search_players(db.store(), &query.value).await?;

    Ok(Json(players).into_response())
}

#[utoipa::path(
    get,
    path = "/players/{id}",
    params(
        ("id" = String, Path, description = "Player id")
    ),
    responses(
        (status = 200, description = "Player found; club is null when deleted", body = PlayerResponse),
        (status = 400, description = "Invalid player id"),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn get_player(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "player")?;
    let player = services::get_player(db.store(), id).await?;

    Ok(Json(player).into_response())
}

#[utoipa::path(
    post,
    path = "/players",
    request_body = PlayerRequest,
    responses(
        (status = 201, description = "Player created successfully", body = PlayerResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "players"
)]
pub async fn create_player(
    State(db): State<Database>,
    JsonBody(req): JsonBody<PlayerRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let player = services::create_player(db.store(), req).await?;

    Ok((StatusCode::CREATED, Json(player)).into_response())
}

#[utoipa::path(
    patch,
    path = "/players/{id}",
    params(
        ("id" = String, Path, description = "Player id")
    ),
    request_body = PlayerRequest,
    responses(
        (status = 200, description = "Player replaced successfully", body = PlayerResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn update_player(
    State(db): State<Database>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<PlayerRequest>,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "player")?;
    req.validate()?;

    let player = services::update_player(db.store(), id, req).await?;

    Ok(Json(player).into_response())
}

#[utoipa::path(
    delete,
    path = "/players/{id}",
    params(
        ("id" = String, Path, description = "Player id"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Player deleted; refreshed page", body = PlayerList),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn delete_player(
    State(db): State<Database>,
    Path(id): Path<String>,
    query: QueryPairs,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "player")?;
    let params = query.list_params()?;

    let players = services::delete_player(db.store(), id, &params).await?;

    Ok(Json(players).into_response())
}
