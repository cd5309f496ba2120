use storage::{
    document::Stored,
    dto::user::{LoginRequest, SignUpRequest, UpdateUserRequest, UserList, UserResponse},
    error::Result,
    models::{Role, User},
    query::ListParams,
    repository::user::UserRepository,
    store::DocumentStore,
};
use uuid::Uuid;

/// Get a user's own profile, email included
pub async fn get_profile(store: &dyn DocumentStore, id: Uuid) -> Result<UserResponse> {
    let user = UserRepository::new(store).find_by_id(id).await?;
    Ok(UserResponse::with_email(user))
}

/// List users matching the list parameters
pub async fn list_users(store: &dyn DocumentStore, params: &ListParams) -> Result<UserList> {
    UserRepository::new(store).list(params).await
}

/// List users of one role
pub async fn list_users_by_role(
    store: &dyn DocumentStore,
    role: Option<Role>,
) -> Result<Vec<UserResponse>> {
    UserRepository::new(store).by_role(role).await
}

/// List distinct user locations
pub async fn list_locations(store: &dyn DocumentStore) -> Result<Vec<String>> {
    UserRepository::new(store).locations().await
}

/// Register a new account
pub async fn sign_up(store: &dyn DocumentStore, request: SignUpRequest) -> Result<Stored<User>> {
    UserRepository::new(store).sign_up(request).await
}

/// Create a user with any role
pub async fn create_user(store: &dyn DocumentStore, request: SignUpRequest) -> Result<UserResponse> {
    let user = UserRepository::new(store).create(request).await?;
    Ok(UserResponse::with_email(user))
}

/// Check credentials
pub async fn login(store: &dyn DocumentStore, request: LoginRequest) -> Result<Stored<User>> {
    UserRepository::new(store).login(request).await
}

/// Replace a user's profile
pub async fn update_user(
    store: &dyn DocumentStore,
    id: Uuid,
    request: UpdateUserRequest,
    may_change_role: bool,
) -> Result<UserResponse> {
    let user = UserRepository::new(store)
        .update(id, request, may_change_role)
        .await?;
    Ok(UserResponse::with_email(user))
}

/// Delete a user
pub async fn delete_user(store: &dyn DocumentStore, id: Uuid) -> Result<()> {
    UserRepository::new(store).delete(id).await
}
