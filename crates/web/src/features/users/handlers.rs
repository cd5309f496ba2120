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
        user::{ByRoleQuery, LoginRequest, SignUpRequest, UpdateUserRequest, UserList, UserResponse},
    },
};
use tower_sessions::Session;
use validator::Validate;

use crate::error::WebError;
use crate::extract::{JsonBody, QueryPairs, QueryParams};
use crate::middleware::auth::CurrentUser;
use crate::session;

use super::services;

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "The signed-in user, email included", body = UserResponse),
        (status = 401, description = "User not authenticated")
    ),
    tag = "users"
)]
pub async fn get_authenticated_user(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response, WebError> {
    let profile = services::get_profile(db.store(), user.id).await?;

    Ok(Json(profile).into_response())
}

#[utoipa::path(
    get,
    path = "/users/all",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of users", body = UserList),
        (status = 400, description = "Invalid list parameters")
    ),
    tag = "users"
)]
pub async fn list_users(
    State(db): State<Database>,
    query: QueryPairs,
) -> Result<Response, WebError> {
    let params = query.list_params()?;
    let users = services::list_users(db.store(), &params).await?;

    Ok(Json(users).into_response())
}

#[utoipa::path(
    get,
    path = "/users/by-role",
    params(ByRoleQuery),
    responses(
        (status = 200, description = "Users of the role", body = Vec<UserResponse>),
        (status = 400, description = "Missing or unknown role")
    ),
    tag = "users"
)]
pub async fn list_users_by_role(
    State(db): State<Database>,
    QueryParams(query): QueryParams<ByRoleQuery>,
) -> Result<Response, WebError> {
    let users = services::list_users_by_role(db.store(), query.role).await?;

    Ok(Json(users).into_response())
}

#[utoipa::path(
    get,
    path = "/users/locations",
    responses(
        (status = 200, description = "Distinct user locations, sorted", body = Vec<String>)
    ),
    tag = "users"
)]
pub async fn list_locations(State(db): State<Database>) -> Result<Response, WebError> {
    let locations = services::list_locations(db.store()).await?;

    Ok(Json(locations).into_response())
}

#[utoipa::path(
    post,
    path = "/users/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created and signed in", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "users"
)]
pub async fn sign_up(
    State(db): State<Database>,
    session: Session,
    JsonBody(req): JsonBody<SignUpRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user = services::sign_up(db.store(), req).await?;
    session::sign_in(&session, user.id).await?;
    tracing::info!(user = %user.id, "User signed up");

    Ok((StatusCode::CREATED, Json(UserResponse::with_email(user))).into_response())
}

#[utoipa::path(
    post,
    path = "/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = UserResponse),
        (status = 400, description = "Parameters missing"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "users"
)]
pub async fn login(
    State(db): State<Database>,
    session: Session,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user = services::login(db.store(), req).await?;
    session::sign_in(&session, user.id).await?;
    tracing::info!(user = %user.id, "User logged in");

    Ok(Json(UserResponse::with_email(user)).into_response())
}

#[utoipa::path(
    post,
    path = "/users/logout",
    responses(
        (status = 200, description = "Session ended"),
        (status = 401, description = "User not authenticated")
    ),
    tag = "users"
)]
pub async fn logout(
    session: Session,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response, WebError> {
    session::sign_out(&session).await?;
    tracing::info!(user = %user.id, "User logged out");

    Ok(StatusCode::OK.into_response())
}

#[utoipa::path(
    post,
    path = "/users/new-user",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "User not authenticated"),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Email already registered")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(db): State<Database>,
    JsonBody(req): JsonBody<SignUpRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user = services::create_user(db.store(), req).await?;

    Ok((StatusCode::CREATED, Json(user)).into_response())
}

#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(
        ("id" = String, Path, description = "User id")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Profile replaced", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "User not authenticated"),
        (status = 403, description = "Not the user's own account"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn update_user(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "user")?;
    if !user.may_manage(id) {
        return Err(WebError::Forbidden);
    }
    req.validate()?;

    let updated = services::update_user(db.store(), id, req, user.is_admin()).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(
        ("id" = String, Path, description = "User id")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "User not authenticated"),
        (status = 403, description = "Not the user's own account"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(db): State<Database>,
    session: Session,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let id = parse_id(&id, "user")?;
    if !user.may_manage(id) {
        return Err(WebError::Forbidden);
    }

    services::delete_user(db.store(), id).await?;
    if id == user.id {
        session::sign_out(&session).await?;
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}
