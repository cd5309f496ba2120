use storage::{
    dto::player::{PlayerList, PlayerRequest, PlayerResponse},
    error::Result,
    query::ListParams,
    repository::player::PlayerRepository,
    store::DocumentStore,
};
use uuid::Uuid;

/// List players matching the list parameters
pub async fn list_players(store: &dyn DocumentStore, params: &ListParams) -> Result<PlayerList> {
    PlayerRepository::new(store).list(params).await
}

/// Search players by name
pub async fn search_players(store: &dyn DocumentStore, value: &str) -> Result<Vec<PlayerResponse>> {
    PlayerRepository::new(store).search(value).await
}

/// Get player by id
pub async fn get_player(store: &dyn DocumentStore, id: Uuid) -> Result<PlayerResponse> {
    PlayerRepository::new(store).find_by_id(id).await
}

/// Create a new player
pub async fn create_player(
    store: &dyn DocumentStore,
    request: PlayerRequest,
) -> Result<PlayerResponse> {
    PlayerRepository::new(store).create(request).await
}

/// Replace a player
pub async fn update_player(
    store: &dyn DocumentStore,
    id: Uuid,
    request: PlayerRequest,
) -> Result<PlayerResponse> {
    PlayerRepository::new(store).update(id, request).await
}

/// Delete a player and return the refreshed list
pub async fn delete_player(
    store: &dyn DocumentStore,
    id: Uuid,
    params: &ListParams,
) -> Result<PlayerList> {
    let repo = PlayerRepository::new(store);
    repo.delete(id).await?;
    repo.list(params).await
}
