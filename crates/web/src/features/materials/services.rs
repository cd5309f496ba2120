use storage::{
    dto::material::{
        LikeResponse, MaterialList, MaterialRequest, MaterialResponse, MaterialSearchQuery,
        RecentMaterialsQuery, SecondaryMaterials,
    },
    error::Result,
    query::ListParams,
    repository::material::MaterialRepository,
    store::DocumentStore,
};
use uuid::Uuid;

/// List materials matching the list parameters
pub async fn list_materials(store: &dyn DocumentStore, params: &ListParams) -> Result<MaterialList> {
    MaterialRepository::new(store).list(params).await
}

/// Get the main material
pub async fn get_main_material(store: &dyn DocumentStore) -> Result<MaterialResponse> {
    MaterialRepository::new(store).main().await
}

/// Get the newest materials of the requested types
pub async fn get_recent_materials(
    store: &dyn DocumentStore,
    query: &RecentMaterialsQuery,
) -> Result<Vec<MaterialResponse>> {
    MaterialRepository::new(store).recent(query).await
}

/// Get the secondary homepage block
pub async fn get_secondary_materials(
    store: &dyn DocumentStore,
    top_materials: u64,
    posts: u64,
) -> Result<SecondaryMaterials> {
    MaterialRepository::new(store)
        .secondary(top_materials, posts)
        .await
}

/// Search materials by label or title
pub async fn search_materials(
    store: &dyn DocumentStore,
    query: &MaterialSearchQuery,
) -> Result<Vec<MaterialResponse>> {
    MaterialRepository::new(store).search(query).await
}

/// Get material by id
pub async fn get_material(store: &dyn DocumentStore, id: Uuid) -> Result<MaterialResponse> {
    MaterialRepository::new(store).find_by_id(id).await
}

/// Create a new material
pub async fn create_material(
    store: &dyn DocumentStore,
    request: MaterialRequest,
) -> Result<MaterialResponse> {
    MaterialRepository::new(store).create(request).await
}

/// Replace a material
pub async fn update_material(
    store: &dyn DocumentStore,
    id: Uuid,
    request: MaterialRequest,
) -> Result<MaterialResponse> {
    MaterialRepository::new(store).update(id, request).await
}

/// Delete a material and return the refreshed list
pub async fn delete_material(
    store: &dyn DocumentStore,
    id: Uuid,
    params: &ListParams,
) -> Result<MaterialList> {
    let repo = MaterialRepository::new(store);
    repo.delete(id).await?;
    repo.list(params).await
}

/// Like or unlike a material on behalf of a user
pub async fn toggle_like(store: &dyn DocumentStore, id: Uuid, user: Uuid) -> Result<LikeResponse> {
    MaterialRepository::new(store).toggle_like(id, user).await
}

/// Append a comment of a user to a material
pub async fn add_comment(
    store: &dyn DocumentStore,
    id: Uuid,
    user: Uuid,
    message: String,
) -> Result<MaterialResponse> {
    MaterialRepository::new(store)
        .add_comment(id, user, message)
        .await
}
