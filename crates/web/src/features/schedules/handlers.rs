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
        schedule::{
            ClubSchedule, ClubScheduleQuery, LeagueScheduleQuery, RecentMatches,
            RecentMatchesQuery, ScheduleList, ScheduleRequest, ScheduleResponse,
        },
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::{JsonBody, QueryPairs, QueryParams};

use super::services;

#[utoipa::path(
    get,
    path = "/schedules",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of schedules with competition and clubs", body = ScheduleList),
        (status = 400, description = "Invalid list parameters")
    ),
    tag = "schedules"
)]
pub async fn list_schedules(
    State(db): State<Database>,
    query: QueryPairs,
) -> Result<Response, WebError> {
    let params = query.list_params()?;
    let schedules = services::list_schedules(db.store(), &params).await?;

    Ok(Json(schedules).into_response())
}

#[utoipa::path(
    get,
    path = "/schedules/league",
    params(LeagueScheduleQuery),
    responses(
        (status = 200, description = "Schedule of the competition for the season", body = ScheduleResponse),
        (status = 400, description = "Invalid competition id"),
        (status = 404, description = "Schedule not found")
    ),
    tag = "schedules"
)]
pub async fn get_league_schedule(
    State(db): State<Database>,
    QueryParams(query): QueryParams<LeagueScheduleQuery>,
) -> Result<Response, WebError> {
    let schedule =
        services::get_league_schedule(db.store(), &query.season, &query.league_id).await?;

    Ok(Json(schedule).into_response())
}

#[utoipa::path(
    get,
    path = "/schedules/club",
    params(ClubScheduleQuery),
    responses(
        (status = 200, description = "Games of the club per competition", body = Vec<ClubSchedule>),
        (status = 400, description = "Invalid club id")
    ),
    tag = "schedules"
)]
pub async fn get_club_schedule(
    State(db): State<Database>,
    QueryParams(query): QueryParams<ClubScheduleQuery>,
) -> Result<Response, WebError> {
    let schedules = services::get_club_schedule(db.store(), &query.season, &query.club_id).await?;

    Ok(Json(schedules).into_response())
}

#[utoipa::path(
    get,
    path = "/schedules/recent",
    params(RecentMatchesQuery),
    responses(
        (status = 200, description = "Nearest matchweek of every schedule in the season", body = Vec<RecentMatches>)
    ),
    tag = "schedules"
)]
pub async fn get_recent_matches(
    State(db): State<Database>,
    QueryParams(query): QueryParams<RecentMatchesQuery>,
) -> Result<Response, WebError> {
    let matches = services::get_recent_matches(db.store(), &query.season).await?;

    Ok(Json(matches).into_response())
}

#[utoipa::path(
    get,
    path = "/schedules/{id}",
    params(
        ("id" = String, Path, description = "Schedule id")
    ),
    responses(
        (status = 200, description = "Schedule found", body = ScheduleResponse),
        (status = 400, description = "Invalid schedule id"),
        (status = 404, description = "Schedule not found")
    ),
    tag = "schedules"
)]
pub async fn get_schedule(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "schedule")?;
    let schedule = services::get_schedule(db.store(), id).await?;

    Ok(Json(schedule).into_response())
}

#[utoipa::path(
    post,
    path = "/schedules",
    request_body = ScheduleRequest,
    responses(
        (status = 201, description = "Schedule created successfully", body = ScheduleResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Competition not found")
    ),
    tag = "schedules"
)]
pub async fn create_schedule(
    State(db): State<Database>,
    JsonBody(req): JsonBody<ScheduleRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let schedule = services::create_schedule(db.store(), req).await?;

    Ok((StatusCode::CREATED, Json(schedule)).into_response())
}

#[utoipa::path(
    patch,
    path = "/schedules/{id}",
    params(
        ("id" = String, Path, description = "Schedule id")
    ),
    request_body = ScheduleRequest,
    responses(
        (status = 200, description = "Schedule replaced successfully", body = ScheduleResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Schedule or competition not found")
    ),
    tag = "schedules"
)]
pub async fn update_schedule(
    State(db): State<Database>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<ScheduleRequest>,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "schedule")?;
    req.validate()?;

    let schedule = services::update_schedule(db.store(), id, req).await?;

    Ok(Json(schedule).into_response())
}

#[utoipa::path(
    delete,
    path = "/schedules/{id}",
    params(
        ("id" = String, Path, description = "Schedule id"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Schedule deleted; refreshed page", body = ScheduleList),
        (status = 404, description = "Schedule not found")
    ),
    tag = "schedules"
)]
pub async fn delete_schedule(
    State(db): State<Database>,
    Path(id): Path<String>,
    query: QueryPairs,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "schedule")?;
    let params = query.list_params()?;

    let schedules = services::delete_schedule(db.store(), id, &params).await?;

    Ok(Json(schedules).into_response())
}
