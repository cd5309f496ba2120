use storage::{
    dto::club::{ClubList, ClubRequest, ClubResponse},
    error::Result,
    query::ListParams,
    repository::club::ClubRepository,
    store::DocumentStore,
};
use uuid::Uuid;

/// List clubs matching the list parameters
pub async fn list_clubs(store: &dyn DocumentStore, params: &ListParams) -> Result<ClubList> {
    ClubRepository::new(store).list(params).await
}

/// Search clubs by name
pub async fn search_clubs(store: &dyn DocumentStore, value: &str) -> Result<Vec<ClubResponse>> {
    ClubRepository::new(store).search(value).await
}

/// Get club by id
pub async fn get_club(store: &dyn DocumentStore, id: Uuid) -> Result<ClubResponse> {
    ClubRepository::new(store).find_by_id(id).await
}

/// Create a new club
pub async fn create_club(store: &dyn DocumentStore, request: ClubRequest) -> Result<ClubResponse> {
    ClubRepository::new(store).create(request).await
}

/// Replace a club
pub async fn update_club(
    store: &dyn DocumentStore,
    id: Uuid,
    request: ClubRequest,
) -> Result<ClubResponse> {
    ClubRepository::new(store).update(id, request).await
}

/// Delete a club
pub async fn delete_club(store: &dyn DocumentStore, id: Uuid) -> Result<()> {
    ClubRepository::new(store).delete(id).await
}
