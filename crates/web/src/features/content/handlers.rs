use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    document::parse_id,
    dto::content::{ContentSectionRequest, ContentSectionResponse},
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::JsonBody;

use super::services;

#[utoipa::path(
    get,
    path = "/content",
    responses(
        (status = 200, description = "Every content section with its materials", body = Vec<ContentSectionResponse>)
    ),
    tag = "content"
)]
pub async fn list_sections(State(db): State<Database>) -> Result<Response, WebError> {
    let sections = services::list_sections(db.store()).await?;

    Ok(Json(sections).into_response())
}

#[utoipa::path(
    get,
    path = "/content/{id}",
    params(
        ("id" = String, Path, description = "Content section id")
    ),
    responses(
        (status = 200, description = "Content section found", body = ContentSectionResponse),
        (status = 400, description = "Invalid content section id"),
        (status = 404, description = "Content section not found")
    ),
    tag = "content"
)]
pub async fn get_section(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "content section")?;
    let section = services::get_section(db.store(), id).await?;

    Ok(Json(section).into_response())
}

#[utoipa::path(
    post,
    path = "/content",
    request_body = ContentSectionRequest,
    responses(
        (status = 201, description = "Content section created successfully", body = ContentSectionResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "content"
)]
pub async fn create_section(
    State(db): State<Database>,
    JsonBody(req): JsonBody<ContentSectionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let section = services::create_section(db.store(), req).await?;

    Ok((StatusCode::CREATED, Json(section)).into_response())
}

#[utoipa::path(
    patch,
    path = "/content/{id}",
    params(
        ("id" = String, Path, description = "Content section id")
    ),
    request_body = ContentSectionRequest,
    responses(
        (status = 200, description = "Content section replaced successfully", body = ContentSectionResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Content section not found")
    ),
    tag = "content"
)]
pub async fn update_section(
    State(db): State<Database>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<ContentSectionRequest>,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "content section")?;
    req.validate()?;

    let section = services::update_section(db.store(), id, req).await?;

    Ok(Json(section).into_response())
}

#[utoipa::path(
    delete,
    path = "/content/{id}",
    params(
        ("id" = String, Path, description = "Content section id")
    ),
    responses(
        (status = 204, description = "Content section deleted successfully"),
        (status = 404, description = "Content section not found")
    ),
    tag = "content"
)]
pub async fn delete_section(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "content section")?;
    services::delete_section(db.store(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
