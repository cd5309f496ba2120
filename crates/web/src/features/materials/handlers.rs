use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    document::parse_id,
    dto::{
        common::ListQuery,
        material::{
            LikeResponse, MaterialList, MaterialRequest, MaterialResponse, MaterialSearchQuery,
            NewCommentRequest, RecentMaterialsQuery, SecondaryMaterials, SecondaryMaterialsQuery,
        },
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::{JsonBody, QueryPairs, QueryParams};
use crate::middleware::auth::CurrentUser;

use super::services;

#[utoipa::path(
    get,
    path = "/materials",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of materials, likes as counts", body = MaterialList),
        (status = 400, description = "Invalid list parameters")
    ),
    tag = "materials"
)]
pub async fn list_materials(
    State(db): State<Database>,
    query: QueryPairs,
) -> Result<Response, WebError> {
    let params = query.list_params()?;
    let materials = services::list_materials(db.store(), &params).await?;

    Ok(Json(materials).into_response())
}

#[utoipa::path(
    get,
    path = "/materials/main",
    responses(
        (status = 200, description = "The main material", body = MaterialResponse),
        (status = 404, description = "No material is flagged as main")
    ),
    tag = "materials"
)]
pub async fn get_main_material(State(db): State<Database>) -> Result<Response, WebError> {
    let material = services::get_main_material(db.store()).await?;

    Ok(Json(material).into_response())
}

#[utoipa::path(
    get,
    path = "/materials/recent",
    params(RecentMaterialsQuery),
    responses(
        (status = 200, description = "Newest materials of the requested types", body = Vec<MaterialResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "materials"
)]
pub async fn get_recent_materials(
    State(db): State<Database>,
    QueryPairs(pairs): QueryPairs,
) -> Result<Response, WebError> {
    let query = RecentMaterialsQuery::from_pairs(pairs)?;
    let materials = services::get_recent_materials(db.store(), &query).await?;

    Ok(Json(materials).into_response())
}

#[utoipa::path(
    get,
    path = "/materials/secondary",
    params(SecondaryMaterialsQuery),
    responses(
        (status = 200, description = "Top materials, newest posts and materials per league", body = SecondaryMaterials),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "materials"
)]
pub async fn get_secondary_materials(
    State(db): State<Database>,
    QueryParams(query): QueryParams<SecondaryMaterialsQuery>,
) -> Result<Response, WebError> {
    let materials = services::get_secondary_materials(
        db.store(),
        query.top_materials_num,
        query.posts_num,
    )
    .await?;

    Ok(Json(materials).into_response())
}

#[utoipa::path(
    get,
    path = "/materials/search",
    params(MaterialSearchQuery),
    responses(
        (status = 200, description = "Materials whose title or a label contains the value", body = Vec<MaterialResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "materials"
)]
pub async fn search_materials(
    State(db): State<Database>,
    QueryPairs(pairs): QueryPairs,
) -> Result<Response, WebError> {
    let query = MaterialSearchQuery::from_pairs(pairs)?;
    let materials = services::search_materials(db.store(), &query).await?;

    Ok(Json(materials).into_response())
}

#[utoipa::path(
    get,
    path = "/materials/{id}",
    params(
        ("id" = String, Path, description = "Material id")
    ),
    responses(
        (status = 200, description = "Material found, likes as user ids", body = MaterialResponse),
        (status = 400, description = "Invalid material id"),
        (status = 404, description = "Material not found")
    ),
    tag = "materials"
)]
pub async fn get_material(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "material")?;
    let material = services::get_material(db.store(), id).await?;

    Ok(Json(material).into_response())
}

#[utoipa::path(
    post,
    path = "/materials",
    request_body = MaterialRequest,
    responses(
        (status = 201, description = "Material created successfully", body = MaterialResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Author not found")
    ),
    tag = "materials"
)]
pub async fn create_material(
    State(db): State<Database>,
    JsonBody(req): JsonBody<MaterialRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let material = services::create_material(db.store(), req).await?;

    Ok((StatusCode::CREATED, Json(material)).into_response())
}

#[utoipa::path(
    patch,
    path = "/materials/{id}",
    params(
        ("id" = String, Path, description = "Material id")
    ),
    request_body = MaterialRequest,
    responses(
        (status = 200, description = "Material replaced successfully", body = MaterialResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Material or author not found")
    ),
    tag = "materials"
)]
pub async fn update_material(
    State(db): State<Database>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<MaterialRequest>,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "material")?;
    req.validate()?;

    let material = services::update_material(db.store(), id, req).await?;

    Ok(Json(material).into_response())
}

#[utoipa::path(
    delete,
    path = "/materials/{id}",
    params(
        ("id" = String, Path, description = "Material id"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Material deleted; refreshed page", body = MaterialList),
        (status = 404, description = "Material not found")
    ),
    tag = "materials"
)]
pub async fn delete_material(
    State(db): State<Database>,
    Path(id): Path<String>,
    query: QueryPairs,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "material")?;
    let params = query.list_params()?;

    let materials = services::delete_material(db.store(), id, &params).await?;

    Ok(Json(materials).into_response())
}

#[utoipa::path(
    post,
    path = "/materials/{id}/likes",
    params(
        ("id" = String, Path, description = "Material id")
    ),
    responses(
        (status = 200, description = "Like toggled", body = LikeResponse),
        (status = 401, description = "User not authenticated"),
        (status = 404, description = "Material not found")
    ),
    tag = "materials"
)]
pub async fn toggle_like(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "material")?;
    let likes = services::toggle_like(db.store(), id, user.id).await?;

    Ok(Json(likes).into_response())
}

#[utoipa::path(
    post,
    path = "/materials/{id}/comments",
    params(
        ("id" = String, Path, description = "Material id")
    ),
    request_body = NewCommentRequest,
    responses(
        (status = 201, description = "Comment added", body = MaterialResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "User not authenticated"),
        (status = 404, description = "Material not found")
    ),
    tag = "materials"
)]
pub async fn add_comment(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<NewCommentRequest>,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "material")?;
    req.validate()?;

    let material = services::add_comment(db.store(), id, user.id, req.message).await?;

    Ok((StatusCode::CREATED, Json(material)).into_response())
}
