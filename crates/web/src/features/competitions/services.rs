use storage::{
    dto::competition::{CompetitionList, CompetitionRequest, CompetitionResponse},
    error::Result,
    query::ListParams,
    repository::competition::CompetitionRepository,
    store::DocumentStore,
};
use uuid::Uuid;

/// List competitions matching the list parameters
pub async fn list_competitions(
    store: &dyn DocumentStore,
    params: &ListParams,
) -> Result<CompetitionList> {
    CompetitionRepository::new(store).list(params).await
}

/// List every competition
pub async fn list_all_competitions(store: &dyn DocumentStore) -> Result<CompetitionList> {
    CompetitionRepository::new(store).list_all().await
}

/// Get competition by id
pub async fn get_competition(store: &dyn DocumentStore, id: Uuid) -> Result<CompetitionResponse> {
    CompetitionRepository::new(store).find_by_id(id).await
}

/// Create a new competition
pub async fn create_competition(
    store: &dyn DocumentStore,
    request: CompetitionRequest,
) -> Result<CompetitionResponse> {
    CompetitionRepository::new(store).create(request).await
}

/// Replace a competition
pub async fn update_competition(
    store: &dyn DocumentStore,
    id: Uuid,
    request: CompetitionRequest,
) -> Result<CompetitionResponse> {
    CompetitionRepository::new(store).update(id, request).await
}

/// Delete a competition and return the refreshed list
pub async fn delete_competition(
    store: &dyn DocumentStore,
    id: Uuid,
    params: &ListParams,
) -> Result<CompetitionList> {
    let repo = CompetitionRepository::new(store);
    repo.delete(id).await?;
    repo.list(params).await
}
